use axum::{
    Json, Router,
    body::Body,
    extract::{
        Multipart, Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use bytes::Bytes;
use futures::{StreamExt, stream};
use serde::{Deserialize, Serialize};

use crate::modules::commitments::core::model::{
    Commitment, CommitmentFilter, EXPORT_COLUMNS, Kpis, Objective, ObjectiveFilter, ObjectiveTotal,
    SankeyFilter, SankeyPage, SankeyView, TimeSeries,
};
use crate::modules::commitments::use_cases::import_commitments::commitments_from_table;
use crate::modules::commitments::use_cases::sankey_page::sankey_page;
use crate::modules::commitments::use_cases::time_series::time_series;
use crate::shared::infrastructure::tabular::UploadKind;
use crate::shell::errors::ApplicationError;
use crate::shell::extract::{
    PageParams, UPLOAD_SUCCESS_MESSAGE, json_body, parse_upload, path_param, query_params, read_upload,
};
use crate::shell::http::Message;
use crate::shell::state::AppState;

#[derive(Debug, Serialize)]
pub struct CommitmentList {
    pub commitments: Vec<Commitment>,
}

#[derive(Debug, Serialize)]
pub struct ObjectiveTotals {
    pub totals: Vec<ObjectiveTotal>,
}

#[derive(Debug, Serialize)]
pub struct TimeSeriesResponse {
    pub series: Vec<TimeSeries>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/commitments", post(list))
        .route("/commitments/", post(list))
        .route("/commitments/upload", post(upload))
        .route("/commitments/totals_by_objective", post(totals_by_objective))
        .route("/commitments/time_series", post(series))
        .route("/commitments/years", get(years))
        .route("/commitments/export/{year}", get(export))
        .route("/commitments/kpis", get(kpis))
        .route("/commitments/sankey_data", get(sankey_data))
}

pub async fn list(
    State(state): State<AppState>,
    page: Result<Query<PageParams>, QueryRejection>,
    body: Result<Json<CommitmentFilter>, JsonRejection>,
) -> Result<Json<CommitmentList>, ApplicationError> {
    let page = query_params(page)?.resolve(40, None)?;
    let filter = json_body(body)?;
    let commitments = state.commitments.list(&filter, page).await?;
    Ok(Json(CommitmentList { commitments }))
}

pub async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApplicationError> {
    let upload = read_upload(multipart).await?;
    let table = parse_upload(upload, UploadKind::Commitments, state.upload_settings.clone()).await?;
    let commitments = commitments_from_table(&table)?;
    let inserted = state.commitments.import(commitments).await?;
    tracing::info!(inserted, "commitments imported");
    Ok((StatusCode::CREATED, Json(Message::new(UPLOAD_SUCCESS_MESSAGE))))
}

pub async fn totals_by_objective(
    State(state): State<AppState>,
    body: Result<Json<ObjectiveFilter>, JsonRejection>,
) -> Result<Json<ObjectiveTotals>, ApplicationError> {
    let filter = json_body(body)?;
    let totals = state.commitments.totals_by_objective(&filter).await?;
    Ok(Json(ObjectiveTotals { totals }))
}

pub async fn series(
    State(state): State<AppState>,
    body: Result<Json<CommitmentFilter>, JsonRejection>,
) -> Result<Json<TimeSeriesResponse>, ApplicationError> {
    let filter = json_body(body)?;
    let series = time_series(state.commitments.as_ref(), &filter).await?;
    Ok(Json(TimeSeriesResponse { series }))
}

pub async fn years(State(state): State<AppState>) -> Result<Json<Vec<i64>>, ApplicationError> {
    Ok(Json(state.commitments.years().await?))
}

pub async fn kpis(State(state): State<AppState>) -> Result<Json<Kpis>, ApplicationError> {
    Ok(Json(state.commitments.kpis().await?))
}

fn csv_line<T: Serialize>(record: T) -> Result<Bytes, ApplicationError> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    writer
        .serialize(record)
        .map_err(|e| ApplicationError::Unexpected(e.to_string()))?;
    writer
        .into_inner()
        .map(Bytes::from)
        .map_err(|e| ApplicationError::Unexpected(e.to_string()))
}

pub async fn export(
    State(state): State<AppState>,
    year: Result<Path<i64>, PathRejection>,
) -> Result<Response, ApplicationError> {
    let year = path_param(year)?;
    let header_line = stream::once(async { csv_line(EXPORT_COLUMNS) });
    let rows = state
        .commitments
        .export(year)
        .map(|row| csv_line(row.map_err(ApplicationError::from)?));

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"commitments_{year}.csv\""),
            ),
        ],
        Body::from_stream(header_line.chain(rows)),
    )
        .into_response())
}

/// Raw `/sankey_data` parameters; `year`, `country_id` and `project_id` may repeat.
#[derive(Debug, Default)]
pub struct SankeyParams {
    pub filter: SankeyFilter,
    pub page: PageParams,
    pub view: SankeyView,
}

fn parse_param<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ApplicationError> {
    value
        .parse()
        .map_err(|_| ApplicationError::Unprocessable(format!("Invalid value for '{key}': '{value}'")))
}

fn parse_choice<T: for<'de> Deserialize<'de>>(key: &str, value: &str) -> Result<T, ApplicationError> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .map_err(|_| ApplicationError::Unprocessable(format!("Invalid value for '{key}': '{value}'")))
}

impl SankeyParams {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, ApplicationError> {
        let mut params = SankeyParams::default();
        for (key, value) in pairs {
            match key.as_str() {
                "year" => params.filter.years.get_or_insert_with(Vec::new).push(parse_param(&key, &value)?),
                "country_id" => params
                    .filter
                    .country_ids
                    .get_or_insert_with(Vec::new)
                    .push(parse_param(&key, &value)?),
                "project_id" => params
                    .filter
                    .project_ids
                    .get_or_insert_with(Vec::new)
                    .push(parse_param(&key, &value)?),
                "objective" => params.filter.objective = parse_choice::<Objective>(&key, &value)?,
                "view" => params.view = parse_choice(&key, &value)?,
                "limit" => params.page.limit = Some(parse_param(&key, &value)?),
                "offset" => params.page.offset = Some(parse_param(&key, &value)?),
                _ => {}
            }
        }
        Ok(params)
    }
}

pub async fn sankey_data(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<SankeyPage>, ApplicationError> {
    let params = SankeyParams::from_pairs(query_params(pairs)?)?;
    let page = params.page.resolve(5, Some(20))?;
    let data = sankey_page(state.commitments.as_ref(), &params.filter, page, params.view).await?;
    Ok(Json(data))
}
