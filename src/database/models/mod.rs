pub mod comment;
pub mod department;
pub mod document;
pub mod employee;
pub mod event;
pub mod position;
pub mod user;

pub use comment::{Comment, CommentAuthor};
pub use department::Department;
pub use document::{Document, NewDocument};
pub use employee::{DepartmentEmployee, Employee, EmployeeDetail, EmployeeSummary, NewEmployee};
pub use event::{EmployeeEvents, Event, EventKind, NewEvent};
pub use position::Position;
pub use user::User;

/// Serde helpers rendering chrono values the way the API exposes them
pub(crate) mod format {
    use chrono::{NaiveDate, NaiveDateTime};
    use serde::Serializer;

    pub const TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";
    pub const DATE: &str = "%Y-%m-%d";

    pub fn timestamp<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(TIMESTAMP))
    }

    pub fn date<S: Serializer>(value: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(DATE))
    }

    pub fn optional_date<S: Serializer>(
        value: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => serializer.collect_str(&d.format(DATE)),
            None => serializer.serialize_none(),
        }
    }
}
