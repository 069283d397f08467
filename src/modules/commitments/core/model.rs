use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Commitment {
    pub id: i64,
    pub year: i64,
    pub amount_usd_thousand: f64,
    pub channel_of_delivery: Option<String>,
    pub provider_country: Option<String>,
    pub recipient_country: Option<String>,
    pub project: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitmentFilter {
    pub years: Option<Vec<i64>>,
    pub countries: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectiveFilter {
    pub years: Option<Vec<i64>>,
    pub recipient_countries: Option<Vec<i64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct ObjectiveTotal {
    pub year: i64,
    pub total_adaptation: f64,
    pub total_mitigation: f64,
}

/// One aggregated amount of a time series. `series` is the recipient country
/// name, or `None` when all countries are aggregated.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct SeriesRow {
    pub series: Option<String>,
    pub year: i64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub year: i64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    pub name: String,
    pub data: Vec<TimeSeriesPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Kpis {
    pub total_projects: i64,
    pub total_countries: i64,
    pub total_amount_usd_thousand: f64,
}

/// A commitment read from an upload; names are resolved to ids on import.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCommitment {
    pub year: i64,
    pub amount_usd_thousand: f64,
    pub adaptation_amount_usd_thousand: f64,
    pub mitigation_amount_usd_thousand: f64,
    pub overlap_amount_usd_thousand: f64,
    pub project: Option<String>,
    pub recipient_country: Option<String>,
    pub provider: Option<String>,
    pub channel_of_delivery: Option<String>,
}

pub const EXPORT_COLUMNS: [&str; 10] = [
    "id",
    "year",
    "amount_usd_thousand",
    "adaptation_amount_usd_thousand",
    "mitigation_amount_usd_thousand",
    "overlap_amount_usd_thousand",
    "project",
    "recipient_country",
    "provider",
    "channel_of_delivery",
];

/// Field order matches `EXPORT_COLUMNS`.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct ExportRow {
    pub id: i64,
    pub year: i64,
    pub amount_usd_thousand: f64,
    pub adaptation_amount_usd_thousand: f64,
    pub mitigation_amount_usd_thousand: f64,
    pub overlap_amount_usd_thousand: f64,
    pub project: Option<String>,
    pub recipient_country: Option<String>,
    pub provider: Option<String>,
    pub channel_of_delivery: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    #[default]
    All,
    Adaptation,
    Mitigation,
    Both,
}

impl Objective {
    /// Column whose amount weighs a flow for this objective.
    pub fn weight_column(self) -> &'static str {
        match self {
            Objective::All => "amount_usd_thousand",
            Objective::Adaptation => "adaptation_amount_usd_thousand",
            Objective::Mitigation => "mitigation_amount_usd_thousand",
            Objective::Both => "overlap_amount_usd_thousand",
        }
    }

    /// Whether only rows with a positive weight take part.
    pub fn positive_only(self) -> bool {
        !matches!(self, Objective::All)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SankeyView {
    #[default]
    ProjectCountryYear,
    ProjectYearCountry,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SankeyFilter {
    pub years: Option<Vec<i64>>,
    pub country_ids: Option<Vec<i64>>,
    pub project_ids: Option<Vec<i64>>,
    pub objective: Objective,
}

/// Weighted amount of one project, recipient country and year.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct SankeyFlow {
    pub project_id: i64,
    pub project: String,
    pub country: Option<String>,
    pub year: i64,
    pub amount: f64,
}

/// The projects of one ranking page and their flows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SankeySlice {
    pub total_projects: i64,
    /// Project ids, best ranked first.
    pub ranking: Vec<i64>,
    pub flows: Vec<SankeyFlow>,
}

/// `[from, to, weight, tooltip]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SankeyLink(pub String, pub String, pub f64, pub String);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SankeyPage {
    pub data: Vec<SankeyLink>,
    pub total_projects: i64,
    pub limit: i64,
    pub offset: i64,
}
