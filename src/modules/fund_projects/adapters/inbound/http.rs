use axum::{
    Json, Router,
    extract::{
        Multipart, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    routing::post,
};
use serde::Serialize;

use crate::modules::fund_projects::core::model::{FundProject, FundProjectFilter};
use crate::modules::fund_projects::use_cases::import_fund_projects::fund_projects_from_table;
use crate::shared::infrastructure::tabular::UploadKind;
use crate::shell::errors::ApplicationError;
use crate::shell::extract::{
    PageParams, UPLOAD_SUCCESS_MESSAGE, json_body, parse_upload, query_params, read_upload,
};
use crate::shell::http::Message;
use crate::shell::state::AppState;

#[derive(Debug, Serialize)]
pub struct FundProjectList {
    pub fund_projects: Vec<FundProject>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/fund_projects", post(list))
        .route("/fund_projects/", post(list))
        .route("/fund_projects/upload", post(upload))
}

pub async fn list(
    State(state): State<AppState>,
    page: Result<Query<PageParams>, QueryRejection>,
    body: Result<Json<FundProjectFilter>, JsonRejection>,
) -> Result<Json<FundProjectList>, ApplicationError> {
    let page = query_params(page)?.resolve(40, None)?;
    let filter = json_body(body)?;
    let fund_projects = state.fund_projects.list(&filter, page).await?;
    Ok(Json(FundProjectList { fund_projects }))
}

pub async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Message>, ApplicationError> {
    let upload = read_upload(multipart).await?;
    let table = parse_upload(upload, UploadKind::FundProjects, state.upload_settings.clone()).await?;
    let inserted = state.fund_projects.import(fund_projects_from_table(&table)).await?;
    tracing::info!(inserted, "fund projects imported");
    Ok(Json(Message::new(UPLOAD_SUCCESS_MESSAGE)))
}
