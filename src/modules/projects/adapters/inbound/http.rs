use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use serde::Serialize;

use crate::modules::projects::core::model::{ProjectPage, ProjectSearch, ProjectSummary};
use crate::shell::errors::ApplicationError;
use crate::shell::extract::{PageParams, query_params};
use crate::shell::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProjectList {
    pub projects: Vec<ProjectSummary>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/projects/commitments", get(with_commitments))
        .route("/projects/commitments/paginated", get(paginated))
}

pub async fn with_commitments(State(state): State<AppState>) -> Result<Json<ProjectList>, ApplicationError> {
    let projects = state.projects.with_commitments().await?;
    Ok(Json(ProjectList { projects }))
}

pub async fn paginated(
    State(state): State<AppState>,
    query: Result<Query<ProjectSearch>, QueryRejection>,
) -> Result<Json<ProjectPage>, ApplicationError> {
    let query = query_params(query)?;
    let page = PageParams { limit: query.limit, offset: query.offset }.resolve(20, Some(100))?;
    let result = state
        .projects
        .search_with_commitments(query.search.as_deref(), page)
        .await?;
    Ok(Json(result))
}
