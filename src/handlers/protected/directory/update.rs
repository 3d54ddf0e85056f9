use axum::{body::Bytes, extract::State, http::StatusCode};
use chrono::NaiveDate;
use serde_json::{Map, Value};

use super::validate::{is_valid_email, is_valid_phone};
use crate::database::models::Employee;
use crate::database::{service, DatabaseError, Repository};
use crate::error::{codes, ApiError};
use crate::handlers::{json_object, IdPath};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// Checked in this order; the first one missing is reported
const REQUIRED_FIELDS: [&str; 6] = [
    "fullname",
    "work_phone_number",
    "office_number",
    "email",
    "department_id",
    "position_id",
];

/// The only columns a client may change. Optional fields use a double `Option`:
/// absent keeps the stored value, `null` clears it.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeUpdate {
    pub fullname: String,
    pub work_phone_number: String,
    pub office_number: String,
    pub email: String,
    pub department_id: i64,
    pub position_id: i64,
    pub phone_number: Option<Option<String>>,
    pub birth_day: Option<Option<NaiveDate>>,
    pub manager_id: Option<Option<i64>>,
    pub assistant_id: Option<Option<i64>>,
    pub other: Option<Option<String>>,
}

impl EmployeeUpdate {
    /// Validate a request body. Keys outside the allow-list are ignored.
    pub fn from_json(map: &Map<String, Value>) -> Result<Self, ApiError> {
        if let Some(field) = REQUIRED_FIELDS.iter().find(|f| !map.contains_key(**f)) {
            return Err(ApiError::bad_request(
                codes::MISSING_FIELD,
                format!("Missing required field {}", field),
            ));
        }

        let work_phone_number = required_str(map, "work_phone_number")?;
        if !is_valid_phone(&work_phone_number) {
            return Err(ApiError::bad_request(
                codes::INVALID_WORK_PHONE,
                "Invalid work phone number format",
            ));
        }

        let phone_number = match map.get("phone_number") {
            None => None,
            Some(Value::Null) => Some(None),
            Some(Value::String(s)) if s.is_empty() || is_valid_phone(s) => Some(Some(s.clone())),
            Some(_) => {
                return Err(ApiError::bad_request(
                    codes::INVALID_PHONE,
                    "Invalid personal phone number format",
                ))
            }
        };

        let email = required_str(map, "email")?;
        if !is_valid_email(&email) {
            return Err(ApiError::bad_request(codes::INVALID_EMAIL, "Invalid email format"));
        }

        let birth_day = match map.get("birth_day") {
            None => None,
            Some(Value::Null) => Some(None),
            Some(Value::String(s)) => match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                Ok(date) => Some(Some(date)),
                Err(_) => return Err(invalid_birth_day()),
            },
            Some(_) => return Err(invalid_birth_day()),
        };

        Ok(Self {
            fullname: required_str(map, "fullname")?,
            work_phone_number,
            office_number: required_str(map, "office_number")?,
            email,
            department_id: required_id(map, "department_id")?,
            position_id: required_id(map, "position_id")?,
            phone_number,
            birth_day,
            manager_id: optional_id(map, "manager_id")?,
            assistant_id: optional_id(map, "assistant_id")?,
            other: optional_str(map, "other")?,
        })
    }

    /// Referenced rows that must exist, as `(field, table, id)`
    fn references(&self) -> Vec<(&'static str, &'static str, i64)> {
        let mut refs = vec![
            ("department_id", "department", self.department_id),
            ("position_id", "position", self.position_id),
        ];
        if let Some(Some(id)) = self.manager_id {
            refs.push(("manager_id", "employee", id));
        }
        if let Some(Some(id)) = self.assistant_id {
            refs.push(("assistant_id", "employee", id));
        }
        refs
    }

    pub fn apply(self, employee: &mut Employee) {
        employee.fullname = self.fullname;
        employee.work_phone_number = self.work_phone_number;
        employee.office_number = self.office_number;
        employee.email = self.email;
        employee.department_id = self.department_id;
        employee.position_id = self.position_id;
        if let Some(v) = self.phone_number {
            employee.phone_number = v;
        }
        if let Some(v) = self.birth_day {
            employee.birth_day = v;
        }
        if let Some(v) = self.manager_id {
            employee.manager_id = v;
        }
        if let Some(v) = self.assistant_id {
            employee.assistant_id = v;
        }
        if let Some(v) = self.other {
            employee.other = v;
        }
    }
}

fn invalid_type(field: &str) -> ApiError {
    ApiError::bad_request(codes::MISSING_FIELD, format!("Field {} has an invalid type", field))
}

/// 400/3010 naming the first field that points at a missing row
async fn check_references(state: &AppState, update: &EmployeeUpdate) -> Result<(), ApiError> {
    for (field, table, id) in update.references() {
        let found = Repository::<Employee>::new(table, state.db.pool().clone())
            .exists(id)
            .await?;
        if !found {
            return Err(ApiError::bad_request(
                codes::MISSING_FIELD,
                format!("Field {} references unknown id {}", field, id),
            ));
        }
    }
    Ok(())
}

fn invalid_birth_day() -> ApiError {
    ApiError::bad_request(codes::INVALID_BIRTH_DAY, "Invalid birth day format, expected YYYY-MM-DD")
}

fn required_str(map: &Map<String, Value>, field: &str) -> Result<String, ApiError> {
    map.get(field)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| invalid_type(field))
}

fn required_id(map: &Map<String, Value>, field: &str) -> Result<i64, ApiError> {
    map.get(field)
        .and_then(Value::as_i64)
        .ok_or_else(|| invalid_type(field))
}

fn optional_id(map: &Map<String, Value>, field: &str) -> Result<Option<Option<i64>>, ApiError> {
    match map.get(field) {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(None)),
        Some(v) => v.as_i64().map(|id| Some(Some(id))).ok_or_else(|| invalid_type(field)),
    }
}

fn optional_str(map: &Map<String, Value>, field: &str) -> Result<Option<Option<String>>, ApiError> {
    match map.get(field) {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(None)),
        Some(Value::String(s)) => Ok(Some(Some(s.clone()))),
        Some(_) => Err(invalid_type(field)),
    }
}

/// PUT /api/v1/employees/:id - replace an employee's editable fields
///
/// 404/3009 for an unknown employee (checked before the body), then 400 with
/// 3010 missing/mistyped field or unknown referenced id, 3011 work phone, 3012 personal phone,
/// 3013 email, 3014 birth day.
pub async fn employee_put(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(employee_id): IdPath,
    body: Bytes,
) -> ApiResult<Value> {
    let pool = state.db.pool();
    let mut employee = service::find_employee(pool, employee_id)
        .await?
        .ok_or_else(|| ApiError::not_found(codes::UPDATE_EMPLOYEE_NOT_FOUND, "Employee not found"))?;

    let map = json_object(&body).unwrap_or_default();
    let update = EmployeeUpdate::from_json(&map)?;
    check_references(&state, &update).await?;
    update.apply(&mut employee);

    match service::update_employee(pool, &employee).await {
        Ok(()) => {}
        // Deleted between the lookup and the write
        Err(DatabaseError::NotFound(_)) => {
            return Err(ApiError::not_found(
                codes::UPDATE_EMPLOYEE_NOT_FOUND,
                "Employee not found",
            ))
        }
        Err(e) => return Err(e.into()),
    }
    tracing::info!("User {} updated employee {}", auth.user_id, employee_id);

    Ok(ApiResponse::message(StatusCode::OK, "Employee updated successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(overrides: Value) -> Map<String, Value> {
        let mut base = json!({
            "fullname": "Ann Lee",
            "work_phone_number": "+1 (555) 123-4567",
            "office_number": "12B",
            "email": "a@b.co",
            "department_id": 1,
            "position_id": 2
        });
        for (k, v) in overrides.as_object().unwrap() {
            if v == "__remove__" {
                base.as_object_mut().unwrap().remove(k);
            } else {
                base[k] = v.clone();
            }
        }
        base.as_object().unwrap().clone()
    }

    fn code_of(map: Map<String, Value>) -> &'static str {
        EmployeeUpdate::from_json(&map).unwrap_err().error_code()
    }

    #[test]
    fn accepts_minimal_valid_body() {
        let update = EmployeeUpdate::from_json(&body(json!({}))).unwrap();
        assert_eq!(update.department_id, 1);
        assert_eq!(update.phone_number, None);
    }

    #[test]
    fn reports_first_missing_field() {
        let err = EmployeeUpdate::from_json(&body(json!({"email": "__remove__", "fullname": "__remove__"})))
            .unwrap_err();
        assert_eq!(err.error_code(), "3010");
        assert!(err.message().contains("fullname"));
    }

    #[test]
    fn phone_and_email_formats() {
        assert_eq!(code_of(body(json!({"work_phone_number": "555-CALL"}))), "3011");
        assert_eq!(code_of(body(json!({"phone_number": "abc"}))), "3012");
        assert_eq!(code_of(body(json!({"email": "not-an-email"}))), "3013");
        assert_eq!(code_of(body(json!({"birth_day": "17/05/1990"}))), "3014");
        assert_eq!(code_of(body(json!({"department_id": "one"}))), "3010");
    }

    #[test]
    fn references_include_only_set_links() {
        let update = EmployeeUpdate::from_json(&body(json!({"manager_id": 3, "assistant_id": null}))).unwrap();
        assert_eq!(
            update.references(),
            vec![
                ("department_id", "department", 1),
                ("position_id", "position", 2),
                ("manager_id", "employee", 3),
            ]
        );
    }

    #[test]
    fn empty_personal_phone_is_allowed() {
        let update = EmployeeUpdate::from_json(&body(json!({"phone_number": ""}))).unwrap();
        assert_eq!(update.phone_number, Some(Some(String::new())));
    }

    #[test]
    fn unknown_keys_do_not_reach_the_row() {
        let mut employee = Employee {
            id: 9,
            fullname: "Old".into(),
            work_phone_number: "1".into(),
            phone_number: Some("2".into()),
            office_number: "3".into(),
            email: "old@x.io".into(),
            birth_day: None,
            department_id: 5,
            position_id: 6,
            manager_id: Some(4),
            assistant_id: None,
            other: Some("keep".into()),
        };

        let update = EmployeeUpdate::from_json(&body(json!({"id": 1000, "manager_id": null}))).unwrap();
        update.apply(&mut employee);

        assert_eq!(employee.id, 9);
        assert_eq!(employee.fullname, "Ann Lee");
        assert_eq!(employee.manager_id, None);
        assert_eq!(employee.phone_number.as_deref(), Some("2"));
        assert_eq!(employee.other.as_deref(), Some("keep"));
    }
}
