use axum::{
    Json, Router,
    extract::{
        Multipart, Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, post},
};
use serde::Serialize;

use crate::modules::funds::core::model::{Fund, FundFilter, FundPatch, FundStatus, FundStatusFilter};
use crate::modules::funds::use_cases::import_funds::funds_from_table;
use crate::shared::infrastructure::tabular::UploadKind;
use crate::shell::errors::ApplicationError;
use crate::shell::extract::{
    PageParams, UPLOAD_SUCCESS_MESSAGE, json_body, parse_upload, path_param, query_params, read_upload,
};
use crate::shell::http::Message;
use crate::shell::state::AppState;

#[derive(Debug, Serialize)]
pub struct FundList {
    pub funds: Vec<Fund>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/funds", post(list))
        .route("/funds/", post(list))
        .route("/funds/upload", post(upload))
        .route("/funds/status", post(status))
        .route("/funds/{fund_id}", delete(remove).patch(update))
}

pub async fn list(
    State(state): State<AppState>,
    page: Result<Query<PageParams>, QueryRejection>,
    body: Result<Json<FundFilter>, JsonRejection>,
) -> Result<Json<FundList>, ApplicationError> {
    let page = query_params(page)?.resolve(40, None)?;
    let filter = json_body(body)?;
    let funds = state.funds.list(&filter, page).await?;
    Ok(Json(FundList { funds }))
}

pub async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApplicationError> {
    let upload = read_upload(multipart).await?;
    let table = parse_upload(upload, UploadKind::Funds, state.upload_settings.clone()).await?;
    let inserted = state.funds.import(funds_from_table(&table)).await?;
    tracing::info!(inserted, "funds imported");
    Ok((StatusCode::CREATED, Json(Message::new(UPLOAD_SUCCESS_MESSAGE))))
}

pub async fn status(
    State(state): State<AppState>,
    body: Result<Json<FundStatusFilter>, JsonRejection>,
) -> Result<Json<FundStatus>, ApplicationError> {
    let filter = json_body(body)?;
    Ok(Json(state.funds.status(&filter).await?))
}

pub async fn remove(
    State(state): State<AppState>,
    fund_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Message>, ApplicationError> {
    let fund_id = path_param(fund_id)?;
    if !state.funds.delete(fund_id).await? {
        return Err(ApplicationError::NotFound("Fund not found".into()));
    }
    Ok(Json(Message::new("Fund deleted successfully")))
}

pub async fn update(
    State(state): State<AppState>,
    fund_id: Result<Path<i64>, PathRejection>,
    body: Result<Json<FundPatch>, JsonRejection>,
) -> Result<Json<Fund>, ApplicationError> {
    let fund_id = path_param(fund_id)?;
    let patch = json_body(body)?;
    state
        .funds
        .update(fund_id, patch)
        .await?
        .map(Json)
        .ok_or_else(|| ApplicationError::NotFound("Fund not found".into()))
}

#[cfg(test)]
mod funds_http_inbound_tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::shell::state::test_support::make_test_state;

    use super::routes;

    const FUNDS_CSV: &str = "Fund,Fund Type,Fund Focus,Pledge,Deposit,Approval,Disbursement,Projects Approved\n\
        Adaptation Fund,Multilateral,Adaptation,100,50,40,30,10\n\
        Green Climate Fund,Multilateral,Multiple Foci,200,150,-,n/a,20\n";

    fn multipart_body(filename: &str, content: &str) -> (String, Body) {
        let boundary = "tracker-boundary";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: text/csv\r\n\r\n{content}\r\n--{boundary}--\r\n"
        );
        (format!("multipart/form-data; boundary={boundary}"), Body::from(body))
    }

    async fn json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn it_should_import_a_csv_and_list_the_funds() {
        let state = make_test_state().await;
        let (content_type, body) = multipart_body("funds.csv", FUNDS_CSV);

        let response = routes()
            .with_state(state.clone())
            .oneshot(
                Request::post("/funds/upload")
                    .header("content-type", content_type)
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = routes()
            .with_state(state)
            .oneshot(
                Request::post("/funds/?limit=10")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json(response).await;
        let funds = json["funds"].as_array().unwrap();
        assert_eq!(funds.len(), 2);
        assert_eq!(funds[1]["fund_name"], "Green Climate Fund");
        assert_eq!(funds[1]["fund_focus"], "Multiple Foci");
        assert_eq!(funds[1]["approval"], serde_json::Value::Null);
        assert_eq!(funds[1]["projects_approved"], 20);
    }

    #[tokio::test]
    async fn it_should_reject_unsupported_file_types() {
        let (content_type, body) = multipart_body("funds.txt", FUNDS_CSV);

        let response = routes()
            .with_state(make_test_state().await)
            .oneshot(
                Request::post("/funds/upload")
                    .header("content-type", content_type)
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json(response).await,
            serde_json::json!({"detail": "Only .csv and .xlsx are supported."})
        );
    }

    #[tokio::test]
    async fn it_should_return_422_when_a_required_column_is_missing() {
        let (content_type, body) = multipart_body("funds.csv", "Fund,Pledge\nA,1\n");

        let response = routes()
            .with_state(make_test_state().await)
            .oneshot(
                Request::post("/funds/upload")
                    .header("content-type", content_type)
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn it_should_return_zero_totals_without_funds() {
        let response = routes()
            .with_state(make_test_state().await)
            .oneshot(
                Request::post("/funds/status")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"funds":[1,2]}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json(response).await,
            serde_json::json!({"total_pledge": 0.0, "total_deposit": 0.0, "total_approval": 0.0})
        );
    }

    #[tokio::test]
    async fn it_should_return_404_for_unknown_funds() {
        let state = make_test_state().await;

        let deleted = routes()
            .with_state(state.clone())
            .oneshot(Request::delete("/funds/7").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let patched = routes()
            .with_state(state)
            .oneshot(
                Request::patch("/funds/7")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"pledge": 1.0}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(deleted.status(), StatusCode::NOT_FOUND);
        assert_eq!(json(deleted).await, serde_json::json!({"detail": "Fund not found"}));
        assert_eq!(patched.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn it_should_return_422_on_invalid_json() {
        let response = routes()
            .with_state(make_test_state().await)
            .oneshot(
                Request::post("/funds/")
                    .header("content-type", "application/json")
                    .body(Body::from("not-json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
