use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use axum_helpers::server::{run_health_checks, HealthCheckFuture};
use domain_users::{handlers, PostgresUserRepository, UserService};
use sea_orm::DatabaseConnection;

/// Compose the API routes; domain routers carry their own state
pub fn routes(service: UserService<PostgresUserRepository>) -> Router {
    Router::new().nest("/users", handlers::router(service))
}

/// Readiness probe: the service is ready when the database answers a ping
async fn ready(State(db): State<DatabaseConnection>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "database",
        Box::pin(async {
            database::postgres::check_health(&db)
                .await
                .map_err(|e| format!("Database ping failed: {}", e))
        }),
    )];

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}

pub fn ready_router(db: DatabaseConnection) -> Router {
    Router::new().route("/ready", get(ready)).with_state(db)
}
