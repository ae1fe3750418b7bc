use axum::{
    Router,
    routing::{delete, get, post},
};
use minijinja::Environment;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;

use crate::routes::{attendees, publishing, register};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub templates: Arc<Environment<'static>>,
}

pub fn create_router(db: DatabaseConnection, template_dir: &str) -> Router {
    let state = AppState {
        db,
        templates: Arc::new(setup_templates(template_dir)),
    };

    Router::new()
        .route("/health", get(health))
        .route("/publishing/events", post(publishing::publish_event))
        .route("/publishing/events/close", post(publishing::close_event))
        .route("/publishing/events/{page_id}", delete(publishing::delete_page))
        .route(
            "/register",
            get(register::registration_form).post(register::submit_registration),
        )
        .route("/attendees/{id}/bookings", get(attendees::upcoming))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

fn setup_templates(template_dir: &str) -> Environment<'static> {
    let mut env = Environment::new();
    env.set_loader(minijinja::path_loader(template_dir));
    env
}

async fn health() -> &'static str {
    "ok"
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
