
use anyhow::Result;
use clap::Args;
use inquire::Confirm;

use roster_data::{
    Delete, Error, Insert, Member, MemberFilter, MemberForm, PaymentMode, Query, Retrieve, Update,
};
use roster_db::Connection;

use crate::commands::explain;
use crate::formatting::PrintFormatted;

/// Ask for confirmation unless it was given upfront
fn confirm(message: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    let confirmed = Confirm::new(message).with_default(true).prompt()?;
    Ok(confirmed)
}

/// Retrieve a member, treating an unknown id as absent
async fn lookup(db: &Connection, id: i64) -> Result<Option<Member>> {
    match db.retrieve(id).await {
        Ok(member) => Ok(Some(member)),
        Err(Error::NotFound) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

#[derive(Args, Debug)]
pub struct ShowMember {
    #[clap(short, long)]
    pub id: i64,
}

impl ShowMember {
    /// Run the command and show a member
    pub async fn run(self, db: &Connection) -> Result<()> {
        match lookup(db, self.id).await? {
            Some(member) => {
                println!();
                member.print_formatted();
                println!();
            }
            None => println!("No member with id {}.", self.id),
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListMembers {
    /// Part of the name or the student number
    #[clap(short, long)]
    pub keyword: Option<String>,
    /// Print members as JSON
    #[clap(long)]
    pub json: bool,
}

impl ListMembers {
    /// Run the command and list members
    pub async fn run(self, db: &Connection) -> Result<()> {
        let filter = MemberFilter::keyword(self.keyword.unwrap_or_default());
        let members: Vec<Member> = db.query(&filter).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&members)?);
            return Ok(());
        }
        if members.is_empty() {
            println!("No records found.");
            return Ok(());
        }
        println!("{} members.", members.len());
        members.print_formatted();

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddMember {
    #[clap(short, long)]
    pub name: String,
    /// Mode of payment: Cash, Card or Online
    #[clap(short, long)]
    pub payment: PaymentMode,
    #[clap(short, long)]
    pub student_number: String,
    #[clap(short, long)]
    pub gmail: String,
    #[clap(short, long)]
    pub details: Option<String>,
    /// Do not ask for confirmation
    #[clap(short, long)]
    pub yes: bool,
}

impl AddMember {
    /// Run the command and add a member to the database
    pub async fn run(self, db: &Connection) -> Result<()> {
        let form = MemberForm {
            name: self.name,
            mode_of_payment: self.payment.to_string(),
            student_number: self.student_number,
            gmail: self.gmail,
            details: self.details,
        };

        println!();
        form.print_formatted();
        println!();

        if !confirm("Add member?", self.yes)? {
            return Ok(());
        }

        let member = db.insert(form).await.map_err(explain)?;
        println!("Member {} added with id {}.", member.name, member.id);

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct UpdateMember {
    #[clap(short, long)]
    pub id: i64,
    #[clap(short, long)]
    pub name: Option<String>,
    #[clap(short, long)]
    pub payment: Option<PaymentMode>,
    #[clap(short, long)]
    pub student_number: Option<String>,
    #[clap(short, long)]
    pub gmail: Option<String>,
    /// Replace the details. Details cannot be removed again,
    /// an empty value stores empty details.
    #[clap(short, long)]
    pub details: Option<String>,
    /// Do not ask for confirmation
    #[clap(short, long)]
    pub yes: bool,
}

impl UpdateMember {
    /// Fields of the member with the given changes applied
    fn apply(&self, member: &Member) -> MemberForm {
        let mut form = member.form();
        if let Some(name) = &self.name {
            form.name = name.clone();
        }
        if let Some(payment) = self.payment {
            form.mode_of_payment = payment.to_string();
        }
        if let Some(student_number) = &self.student_number {
            form.student_number = student_number.clone();
        }
        if let Some(gmail) = &self.gmail {
            form.gmail = gmail.clone();
        }
        if let Some(details) = &self.details {
            form.details = Some(details.clone());
        }
        form
    }

    /// Run command and update a member
    pub async fn run(self, db: &Connection) -> Result<()> {
        let Some(member) = lookup(db, self.id).await? else {
            println!("No member with id {}.", self.id);
            return Ok(());
        };
        let form = self.apply(&member);

        println!();
        (member.clone(), form.clone()).print_formatted();
        println!();
        if !confirm("Update member?", self.yes)? {
            return Ok(());
        }

        match db.update(member.id, form).await.map_err(explain)? {
            Some(member) => println!("Member {} updated.", member.name),
            None => println!("No member with id {}.", self.id),
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct DeleteMember {
    #[clap(short, long)]
    pub id: i64,
    /// Do not ask for confirmation
    #[clap(short, long)]
    pub yes: bool,
}

impl DeleteMember {
    pub async fn run(&self, db: &Connection) -> Result<()> {
        let Some(member) = lookup(db, self.id).await? else {
            println!("No member with id {}.", self.id);
            return Ok(());
        };
        println!();
        member.print_formatted();
        println!();
        if !confirm("Delete member from database?", self.yes)? {
            return Ok(());
        }
        if db.delete(member.id).await? {
            println!("Member id {} deleted.", member.id);
        }
        Ok(())
    }
}
