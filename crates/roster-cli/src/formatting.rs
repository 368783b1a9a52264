use roster_data::{Insights, Member, MemberForm};

macro_rules! next_attr {
    ($old:ident, $new:ident, $attr:ident) => {
        if $old.$attr != $new.$attr {
            format!(" -> {}", $new.$attr)
        } else {
            "".to_string()
        }
    };
}

/// Width of the longest bar in the distribution chart
const BAR_WIDTH: u64 = 40;

pub trait PrintFormatted {
    fn print_formatted(&self);
}

/// A bar proportional to `count`, the largest count
/// taking the full width.
pub fn bar(count: u64, max: u64, width: u64) -> String {
    if max == 0 {
        return String::new();
    }
    let len = (count * width + max - 1) / max;
    "#".repeat(len as usize)
}

impl PrintFormatted for Member {
    fn print_formatted(&self) {
        println!("ID:\t\t\t{}", self.id);
        println!("Name:\t\t\t{}", self.name);
        println!("Time:\t\t\t{}", self.time_formatted());
        println!("Mode of Payment:\t{}", self.mode_of_payment);
        println!("Student Number:\t\t{}", self.student_number);
        println!("Gmail:\t\t\t{}", self.gmail);
        println!("Details:\t\t{}", self.details.as_deref().unwrap_or(""));
    }
}

impl PrintFormatted for MemberForm {
    fn print_formatted(&self) {
        println!("Name:\t\t\t{}", self.name);
        println!("Mode of Payment:\t{}", self.mode_of_payment);
        println!("Student Number:\t\t{}", self.student_number);
        println!("Gmail:\t\t\t{}", self.gmail);
        println!("Details:\t\t{}", self.details.as_deref().unwrap_or(""));
    }
}

impl PrintFormatted for (Member, MemberForm) {
    fn print_formatted(&self) {
        let (old, new) = self;
        let old_details = old.details.clone().unwrap_or_default();
        let new_details = new.details.clone().unwrap_or_default();

        println!("ID:\t\t\t{}", old.id);
        let next_name = next_attr!(old, new, name);
        println!("Name:\t\t\t{}{}", old.name, next_name);
        let next_mode = next_attr!(old, new, mode_of_payment);
        println!("Mode of Payment:\t{}{}", old.mode_of_payment, next_mode);
        let next_student_number = next_attr!(old, new, student_number);
        println!(
            "Student Number:\t\t{}{}",
            old.student_number, next_student_number
        );
        let next_gmail = next_attr!(old, new, gmail);
        println!("Gmail:\t\t\t{}{}", old.gmail, next_gmail);
        let next_details = if old_details != new_details {
            format!(" -> {}", new_details)
        } else {
            "".to_string()
        };
        println!("Details:\t\t{}{}", old_details, next_details);
    }
}

impl PrintFormatted for Vec<Member> {
    fn print_formatted(&self) {
        println!(
            "{:>4}\t{:<24}\t{:<19}\t{:<8}\t{:<16}\t{:<30}\t{}",
            "ID", "Name", "Time", "Payment", "Student Number", "Gmail", "Details"
        );
        println!("{:-<150}", "-");

        for member in self {
            println!(
                "{:>4}\t{:<24}\t{:<19}\t{:<8}\t{:<16}\t{:<30}\t{}",
                member.id,
                member.name,
                member.time_formatted(),
                member.mode_of_payment,
                member.student_number,
                member.gmail,
                member.details.as_deref().unwrap_or(""),
            );
        }
    }
}

impl PrintFormatted for Insights {
    fn print_formatted(&self) {
        println!("Total Members:\t\t{}", self.total);
        println!();
        println!("Payment Mode Distribution:");
        let max = self.distribution.values().copied().max().unwrap_or(0);
        for (mode, count) in &self.distribution {
            println!(
                "  {:<10}\t{:>5}\t{}",
                mode,
                count,
                bar(*count, max, BAR_WIDTH)
            );
        }
        println!();
        println!(
            "Most Common Payment Mode:\t{}",
            self.most_common.as_deref().unwrap_or("-")
        );
    }
}
