use std::collections::BTreeMap;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    routing::{get, patch},
};

use crate::modules::fund_classifications::core::model::{
    Classification, ClassificationKind, ClassificationPatch,
};
use crate::shell::errors::ApplicationError;
use crate::shell::extract::{json_body, path_param};
use crate::shell::http::Message;
use crate::shell::state::AppState;

/// `/fund_types` or `/fund_focuses`, depending on `kind`.
pub fn routes(kind: ClassificationKind) -> Router<AppState> {
    let prefix = format!("/{}", kind.collection());
    let list_handler = move |State(state): State<AppState>| async move { list(state, kind).await };

    Router::new()
        .route(&prefix, get(list_handler.clone()))
        .route(&format!("{prefix}/"), get(list_handler))
        .route(
            &format!("{prefix}/{{id}}"),
            patch(
                move |State(state): State<AppState>,
                      id: Result<Path<i64>, PathRejection>,
                      body: Result<Json<ClassificationPatch>, JsonRejection>| async move {
                    update(state, kind, id, body).await
                },
            )
            .delete(
                move |State(state): State<AppState>, id: Result<Path<i64>, PathRejection>| async move {
                    remove(state, kind, id).await
                },
            ),
        )
}

async fn list(
    state: AppState,
    kind: ClassificationKind,
) -> Result<Json<BTreeMap<&'static str, Vec<Classification>>>, ApplicationError> {
    let items = state.classifications.list(kind).await?;
    Ok(Json(BTreeMap::from([(kind.collection(), items)])))
}

async fn remove(
    state: AppState,
    kind: ClassificationKind,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Message>, ApplicationError> {
    let id = path_param(id)?;
    if !state.classifications.delete(kind, id).await? {
        return Err(not_found(kind));
    }
    Ok(Json(Message::new(format!("{} deleted successfully", kind.label()))))
}

async fn update(
    state: AppState,
    kind: ClassificationKind,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<ClassificationPatch>, JsonRejection>,
) -> Result<Json<Classification>, ApplicationError> {
    let id = path_param(id)?;
    let patch = json_body(body)?;
    state
        .classifications
        .rename(kind, id, patch.name)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(kind))
}

fn not_found(kind: ClassificationKind) -> ApplicationError {
    ApplicationError::NotFound(format!("{} not found", kind.label()))
}
