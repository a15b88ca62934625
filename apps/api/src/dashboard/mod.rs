// Dashboards: aggregation over an employer's applications, request-scoped
// view-model composition for both roles, and the Axum handlers serving them.

pub mod aggregation;
pub mod composer;
pub mod handlers;
pub mod views;
