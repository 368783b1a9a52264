use roster_data::{Member, MemberFilter, Query};
use roster_db::Connection;

use crate::ExportError;

/// Column names, in storage order
pub const HEADER: [&str; 7] = [
    "id",
    "name",
    "time",
    "mode_of_payment",
    "student_number",
    "gmail",
    "details",
];

/// Read all members for an export
pub async fn snapshot(db: &Connection) -> Result<Vec<Member>, ExportError> {
    let members = db.query(&MemberFilter::keyword("")).await?;
    tracing::debug!(members = members.len(), "read members for export");
    Ok(members)
}

/// A member as a row of text fields. Absent
/// details become an empty field.
pub(crate) fn record(member: &Member) -> [String; 7] {
    [
        member.id.to_string(),
        member.name.clone(),
        member.time_formatted(),
        member.mode_of_payment.clone(),
        member.student_number.clone(),
        member.gmail.clone(),
        member.details.clone().unwrap_or_default(),
    ]
}
