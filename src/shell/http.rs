use axum::{Json, Router, extract::DefaultBodyLimit, routing::get};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::modules::commitments::adapters::inbound::http as commitments_http;
use crate::modules::fund_classifications::adapters::inbound::http as classifications_http;
use crate::modules::fund_classifications::core::model::ClassificationKind;
use crate::modules::fund_projects::adapters::inbound::http as fund_projects_http;
use crate::modules::funds::adapters::inbound::http as funds_http;
use crate::modules::geography::adapters::inbound::http as geography_http;
use crate::modules::projects::adapters::inbound::http as projects_http;
use crate::shell::errors::ApplicationError;
use crate::shell::state::AppState;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

async fn root() -> Json<Message> {
    Json(Message::new("Hello World"))
}

async fn not_found() -> ApplicationError {
    ApplicationError::NotFound("Not Found".into())
}

pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(funds_http::routes())
        .merge(classifications_http::routes(ClassificationKind::FundType))
        .merge(classifications_http::routes(ClassificationKind::FundFocus))
        .merge(geography_http::routes())
        .merge(fund_projects_http::routes())
        .merge(commitments_http::routes())
        .merge(projects_http::routes())
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
