use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::format;

/// Raw `employee` row with foreign keys unresolved
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Employee {
    pub id: i64,
    pub fullname: String,
    pub work_phone_number: String,
    pub phone_number: Option<String>,
    pub office_number: String,
    pub email: String,
    pub birth_day: Option<NaiveDate>,
    pub department_id: i64,
    pub position_id: i64,
    pub manager_id: Option<i64>,
    pub assistant_id: Option<i64>,
    pub other: Option<String>,
}

/// Directory listing entry, read from `employee_view`
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EmployeeSummary {
    pub id: i64,
    pub fullname: String,
    pub department: String,
    pub position: String,
    pub work_phone_number: String,
    pub phone_number: Option<String>,
    pub office_number: String,
    pub email: String,
}

/// Full employee card. Manager and assistant are resolved to full names.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EmployeeDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub summary: EmployeeSummary,
    #[serde(serialize_with = "format::optional_date")]
    pub birth_day: Option<NaiveDate>,
    pub manager: Option<String>,
    pub assistant: Option<String>,
    pub other: Option<String>,
}

/// Entry in a department's staff list
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DepartmentEmployee {
    pub id: i64,
    pub fullname: String,
    pub position: String,
    pub work_phone_number: String,
    pub email: String,
    pub office_number: String,
}

/// Insert payload for `employee`, also the fixture file shape
#[derive(Debug, Clone, Deserialize)]
pub struct NewEmployee {
    pub fullname: String,
    pub work_phone_number: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub office_number: String,
    pub email: String,
    #[serde(default)]
    pub birth_day: Option<NaiveDate>,
    pub department_id: i64,
    pub position_id: i64,
    #[serde(default)]
    pub manager_id: Option<i64>,
    #[serde(default)]
    pub assistant_id: Option<i64>,
    #[serde(default)]
    pub other: Option<String>,
}
