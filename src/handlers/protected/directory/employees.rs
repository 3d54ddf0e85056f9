use axum::extract::State;

use crate::database::models::{
    Employee, EmployeeDetail, EmployeeEvents, EmployeeSummary, Event, EventKind,
};
use crate::database::Repository;
use crate::error::{codes, ApiError};
use crate::handlers::IdPath;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/v1/employees - directory listing
pub async fn employees_get(State(state): State<AppState>) -> ApiResult<Vec<EmployeeSummary>> {
    let employees = Repository::<EmployeeSummary>::new("employee_view", state.db.pool().clone())
        .select_all()
        .await?;

    Ok(ApiResponse::success(employees))
}

/// GET /api/v1/employees/:id - full card including manager and assistant names
pub async fn employee_get(
    State(state): State<AppState>,
    IdPath(employee_id): IdPath,
) -> ApiResult<EmployeeDetail> {
    let employee = Repository::<EmployeeDetail>::new("employee_view", state.db.pool().clone())
        .select_one(employee_id)
        .await?
        .ok_or_else(|| ApiError::not_found(codes::EMPLOYEE_NOT_FOUND, "Employee not found"))?;

    Ok(ApiResponse::success(employee))
}

/// GET /api/v1/employees/:id/events - `{training, absence, vacation}`
pub async fn employee_events_get(
    State(state): State<AppState>,
    IdPath(employee_id): IdPath,
) -> ApiResult<EmployeeEvents> {
    let pool = state.db.pool();
    let exists = Repository::<Employee>::new("employee", pool.clone())
        .exists(employee_id)
        .await?;
    if !exists {
        return Err(ApiError::not_found(
            codes::EVENTS_EMPLOYEE_NOT_FOUND,
            "Employee not found",
        ));
    }

    let mut events = EmployeeEvents::default();
    for kind in EventKind::ALL {
        let rows = Repository::<Event>::new(kind.table_name(), pool.clone())
            .select_by("employee_id", employee_id)
            .await?;
        match kind {
            EventKind::Training => events.training = rows,
            EventKind::Absence => events.absence = rows,
            EventKind::Vacation => events.vacation = rows,
        }
    }

    Ok(ApiResponse::success(events))
}
