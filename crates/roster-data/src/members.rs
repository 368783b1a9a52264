use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Storage format of the sign-up timestamp.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time with whole-second precision.
pub fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemberFilter {
    pub id: Option<i64>,
    /// Substring of the name or the student number
    pub keyword: Option<String>,
}

impl MemberFilter {
    pub fn keyword(keyword: impl Into<String>) -> Self {
        Self {
            keyword: Some(keyword.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub time: NaiveDateTime,
    pub mode_of_payment: String,
    pub student_number: String,
    pub gmail: String,
    pub details: Option<String>,
}

/// The fields of a member which are set on sign-up
/// and may be replaced later on.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberForm {
    pub name: String,
    pub mode_of_payment: String,
    pub student_number: String,
    pub gmail: String,
    pub details: Option<String>,
}

impl Member {
    /// Sign-up time in storage format
    pub fn time_formatted(&self) -> String {
        self.time.format(TIME_FORMAT).to_string()
    }

    /// Editable fields of this member
    pub fn form(&self) -> MemberForm {
        MemberForm {
            name: self.name.clone(),
            mode_of_payment: self.mode_of_payment.clone(),
            student_number: self.student_number.clone(),
            gmail: self.gmail.clone(),
            details: self.details.clone(),
        }
    }
}
