use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::modules::geography::core::model::{Country, Region};
use crate::shell::errors::ApplicationError;
use crate::shell::state::AppState;

#[derive(Debug, Serialize)]
pub struct RegionList {
    pub regions: Vec<Region>,
}

#[derive(Debug, Serialize)]
pub struct CountryList {
    pub countries: Vec<Country>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/regions", get(regions))
        .route("/regions/", get(regions))
        .route("/countries", get(countries))
        .route("/countries/", get(countries))
        .route("/countries/recipients", get(recipients))
}

pub async fn regions(State(state): State<AppState>) -> Result<Json<RegionList>, ApplicationError> {
    let regions = state.geography.regions().await?;
    Ok(Json(RegionList { regions }))
}

pub async fn countries(State(state): State<AppState>) -> Result<Json<CountryList>, ApplicationError> {
    let countries = state.geography.countries().await?;
    Ok(Json(CountryList { countries }))
}

pub async fn recipients(State(state): State<AppState>) -> Result<Json<CountryList>, ApplicationError> {
    let countries = state.geography.recipient_countries().await?;
    Ok(Json(CountryList { countries }))
}
