use axum::extract::State;

use crate::database::models::{Department, DepartmentEmployee};
use crate::database::Repository;
use crate::error::{codes, ApiError};
use crate::handlers::IdPath;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

fn departments(state: &AppState) -> Repository<Department> {
    Repository::new("department_view", state.db.pool().clone())
}

/// GET /api/v1/departments - with head name and headcount
pub async fn departments_get(State(state): State<AppState>) -> ApiResult<Vec<Department>> {
    Ok(ApiResponse::success(departments(&state).select_all().await?))
}

/// GET /api/v1/departments/:id
pub async fn department_get(
    State(state): State<AppState>,
    IdPath(department_id): IdPath,
) -> ApiResult<Department> {
    let department = departments(&state)
        .select_one(department_id)
        .await?
        .ok_or_else(|| ApiError::not_found(codes::DEPARTMENT_NOT_FOUND, "Department not found"))?;

    Ok(ApiResponse::success(department))
}

/// GET /api/v1/departments/:id/employees
pub async fn department_employees_get(
    State(state): State<AppState>,
    IdPath(department_id): IdPath,
) -> ApiResult<Vec<DepartmentEmployee>> {
    if !departments(&state).exists(department_id).await? {
        return Err(ApiError::not_found(
            codes::DEPARTMENT_EMPLOYEES_NOT_FOUND,
            "Department not found",
        ));
    }

    let staff = Repository::<DepartmentEmployee>::new("employee_view", state.db.pool().clone())
        .select_by("department_id", department_id)
        .await?;

    Ok(ApiResponse::success(staff))
}
