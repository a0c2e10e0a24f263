//! HTTP transport - JSON API over the employee service.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /health` - `{ "ok": true, "total_count": n }`
//! - `GET /employees` - all records ordered by name
//! - `GET /employees/by-salary` - all records, highest salary first
//! - `GET /employees/search?query=..` - case-insensitive name search
//! - `GET /employees/age-between?min=..&max=..`
//! - `GET /employees/salary-between?min=..&max=..`
//! - `GET /employees/:id` - one record, 404 if absent
//! - `POST /employees` - create (201), body `{ name, age, salary }`
//! - `PUT /employees/:id` - overwrite name, age and salary
//! - `DELETE /employees/:id`
//!
//! Listings answer `{ "employees": [...], "total_count": n }`. Failures answer
//! `{ "error": "..." }` with 400 (undecodable body, path or query), 422
//! (validation, plus a `violations` array), 409 (duplicate name), 404 (unknown
//! id) or 500 (store failure). A body field of the wrong JSON type is a 422
//! violation on that field.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use employee_registry::{http, EmployeeService, InMemoryEmployeeStore};
//!
//! let service = Arc::new(EmployeeService::new(InMemoryEmployeeStore::new()));
//!
//! // Get the router to compose with other axum routes
//! let app = http::router(service.clone());
//!
//! // Or serve directly
//! http::serve(service, "127.0.0.1:8080".parse()?).await?;
//! ```

mod error;
mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::service::EmployeeService;
use crate::store::EmployeeStore;

pub use error::ApiError;
pub use handlers::EmployeeList;

/// Build an axum `Router` serving the employee API.
pub fn router<S: EmployeeStore + 'static>(service: Arc<EmployeeService<S>>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::<S>))
        .route(
            "/employees",
            get(handlers::list::<S>).post(handlers::create::<S>),
        )
        .route("/employees/by-salary", get(handlers::list_by_salary::<S>))
        .route("/employees/search", get(handlers::search::<S>))
        .route("/employees/age-between", get(handlers::age_between::<S>))
        .route(
            "/employees/salary-between",
            get(handlers::salary_between::<S>),
        )
        .route(
            "/employees/:id",
            get(handlers::get_one::<S>)
                .put(handlers::update::<S>)
                .delete(handlers::delete::<S>),
        )
        .with_state(service)
}

/// Serve the employee API at `addr` until the listener fails.
pub async fn serve<S: EmployeeStore + 'static>(
    service: Arc<EmployeeService<S>>,
    addr: SocketAddr,
) -> Result<(), std::io::Error> {
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "employee registry listening");
    axum::serve(listener, app).await
}
