// Request helpers shared by the inbound adapters: JSON bodies, paging
// parameters and spreadsheet uploads.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Multipart, Path, Query,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};
use bytes::Bytes;
use serde::Deserialize;

use crate::shared::core::pagination::Page;
use crate::shared::infrastructure::tabular::{
    FileFormat, Table, UploadKind, UploadSettings, read_table,
};
use crate::shell::errors::ApplicationError;

pub const UPLOAD_SUCCESS_MESSAGE: &str = "File processed and data inserted successfully";

pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApplicationError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApplicationError::Unprocessable(rejection.body_text()))
}

pub fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApplicationError> {
    query
        .map(|Query(value)| value)
        .map_err(|rejection| ApplicationError::Unprocessable(rejection.body_text()))
}

pub fn path_param<T>(path: Result<Path<T>, PathRejection>) -> Result<T, ApplicationError> {
    path.map(|Path(value)| value)
        .map_err(|rejection| ApplicationError::Unprocessable(rejection.body_text()))
}

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PageParams {
    pub fn resolve(&self, default_limit: i64, max_limit: Option<i64>) -> Result<Page, ApplicationError> {
        let limit = self.limit.unwrap_or(default_limit);
        let offset = self.offset.unwrap_or(0);
        if limit < 1 {
            return Err(ApplicationError::Unprocessable(
                "limit must be greater than or equal to 1".into(),
            ));
        }
        if let Some(max) = max_limit.filter(|max| limit > *max) {
            return Err(ApplicationError::Unprocessable(format!(
                "limit must be less than or equal to {max}"
            )));
        }
        if offset < 0 {
            return Err(ApplicationError::Unprocessable(
                "offset must be greater than or equal to 0".into(),
            ));
        }
        Ok(Page::new(limit, offset))
    }
}

#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Bytes,
}

/// Reads the multipart field named `file`.
pub async fn read_upload(mut multipart: Multipart) -> Result<Upload, ApplicationError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApplicationError::Unprocessable(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApplicationError::Unprocessable(e.body_text()))?;
        return Ok(Upload { filename, bytes });
    }
    Err(ApplicationError::Unprocessable("Field 'file' is required.".into()))
}

/// Checks the extension, then parses the workbook off the async runtime.
pub async fn parse_upload(
    upload: Upload,
    kind: UploadKind,
    settings: Arc<UploadSettings>,
) -> Result<Table, ApplicationError> {
    let format = FileFormat::from_filename(&upload.filename)?;
    let Upload { filename, bytes } = upload;
    let table = tokio::task::spawn_blocking(move || read_table(&bytes, format, kind, &settings))
        .await
        .map_err(|e| ApplicationError::Unexpected(e.to_string()))??;
    tracing::info!(%filename, rows = table.rows.len(), ?kind, "parsed upload");
    Ok(table)
}
