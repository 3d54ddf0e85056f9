use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::format;

/// The three calendars kept per employee. They share one row shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Training,
    Absence,
    Vacation,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [EventKind::Training, EventKind::Absence, EventKind::Vacation];

    pub fn table_name(self) -> &'static str {
        match self {
            EventKind::Training => "training_event",
            EventKind::Absence => "absence_event",
            EventKind::Vacation => "vacation_event",
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub name: String,
    #[serde(serialize_with = "format::date")]
    pub start_date: NaiveDate,
    #[serde(serialize_with = "format::date")]
    pub end_date: NaiveDate,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EmployeeEvents {
    pub training: Vec<Event>,
    pub absence: Vec<Event>,
    pub vacation: Vec<Event>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewEvent {
    pub employee_id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: String,
}
