use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::error::ApiError;
use crate::employee::{Employee, EmployeeId};
use crate::service::EmployeeService;
use crate::store::EmployeeStore;
use crate::validation;

type Service<S> = State<Arc<EmployeeService<S>>>;

/// Body of every listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeList {
    pub employees: Vec<Employee>,
    pub total_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AgeRange {
    pub min: u8,
    pub max: u8,
}

#[derive(Debug, Deserialize)]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
}

/// `GET /health`
pub async fn health<S: EmployeeStore + 'static>(
    State(service): Service<S>,
) -> Result<impl IntoResponse, ApiError> {
    let total_count = service.count()?;
    Ok(Json(json!({ "ok": true, "total_count": total_count })))
}

/// `GET /employees` - everything, ordered by name.
pub async fn list<S: EmployeeStore + 'static>(
    State(service): Service<S>,
) -> Result<Json<EmployeeList>, ApiError> {
    let employees = service.find_all()?;
    let total_count = service.count()?;
    Ok(Json(EmployeeList {
        employees,
        total_count,
    }))
}

/// `GET /employees/by-salary` - everything, highest salary first.
pub async fn list_by_salary<S: EmployeeStore + 'static>(
    State(service): Service<S>,
) -> Result<Json<EmployeeList>, ApiError> {
    let employees = service.find_all_order_by_salary()?;
    let total_count = service.count()?;
    Ok(Json(EmployeeList {
        employees,
        total_count,
    }))
}

/// `GET /employees/search?query=..` - `total_count` is the number of hits.
pub async fn search<S: EmployeeStore + 'static>(
    State(service): Service<S>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<EmployeeList>, ApiError> {
    let Query(params) = params?;
    let employees = service.search_by_name(params.query.as_deref())?;
    Ok(Json(hits(employees)))
}

/// `GET /employees/age-between?min=..&max=..`
pub async fn age_between<S: EmployeeStore + 'static>(
    State(service): Service<S>,
    range: Result<Query<AgeRange>, QueryRejection>,
) -> Result<Json<EmployeeList>, ApiError> {
    let Query(range) = range?;
    let employees = service.find_by_age_between(range.min, range.max)?;
    Ok(Json(hits(employees)))
}

/// `GET /employees/salary-between?min=..&max=..`
pub async fn salary_between<S: EmployeeStore + 'static>(
    State(service): Service<S>,
    range: Result<Query<SalaryRange>, QueryRejection>,
) -> Result<Json<EmployeeList>, ApiError> {
    let Query(range) = range?;
    let employees = service.find_by_salary_between(range.min, range.max)?;
    Ok(Json(hits(employees)))
}

/// `GET /employees/:id`
pub async fn get_one<S: EmployeeStore + 'static>(
    State(service): Service<S>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Employee>, ApiError> {
    let Path(id) = id?;
    let id = EmployeeId(id);
    match service.find_by_id(id)? {
        Some(employee) => Ok(Json(employee)),
        None => Err(crate::service::ServiceError::NotFound { id }.into()),
    }
}

/// `POST /employees` - validate, then create.
///
/// The body is taken as raw JSON so a field of the wrong type is reported as
/// a violation on that field.
pub async fn create<S: EmployeeStore + 'static>(
    State(service): Service<S>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let draft = validation::validate_json(&body)?;
    let saved = service.save(draft)?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// `PUT /employees/:id` - validate, then overwrite.
pub async fn update<S: EmployeeStore + 'static>(
    State(service): Service<S>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Employee>, ApiError> {
    let Path(id) = id?;
    let Json(body) = body?;
    let draft = validation::validate_json(&body)?;
    let updated = service.update(EmployeeId(id), draft)?;
    Ok(Json(updated))
}

/// `DELETE /employees/:id`
pub async fn delete<S: EmployeeStore + 'static>(
    State(service): Service<S>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id?;
    service.delete_by_id(EmployeeId(id))?;
    Ok(Json(json!({ "deleted": id })))
}

fn hits(employees: Vec<Employee>) -> EmployeeList {
    let total_count = employees.len() as u64;
    EmployeeList {
        employees,
        total_count,
    }
}
