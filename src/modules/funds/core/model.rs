use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Fund {
    pub id: i64,
    pub fund_name: String,
    pub fund_type: Option<String>,
    pub fund_focus: Option<String>,
    pub pledge: Option<f64>,
    pub deposit: Option<f64>,
    pub approval: Option<f64>,
    pub disbursement: Option<f64>,
    pub projects_approved: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FundFilter {
    pub fund_types: Option<Vec<i64>>,
    pub fund_focuses: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FundStatusFilter {
    pub funds: Option<Vec<i64>>,
    pub fund_types: Option<Vec<i64>>,
    pub fund_focuses: Option<Vec<i64>>,
}

/// Money totals over the filtered funds. Missing values count as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, sqlx::FromRow)]
pub struct FundStatus {
    pub total_pledge: f64,
    pub total_deposit: f64,
    pub total_approval: f64,
}

/// Partial update. `None` keeps the stored value; classifications are given by name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FundPatch {
    pub fund_name: Option<String>,
    pub fund_type: Option<String>,
    pub fund_focus: Option<String>,
    pub pledge: Option<f64>,
    pub deposit: Option<f64>,
    pub approval: Option<f64>,
    pub disbursement: Option<f64>,
    pub projects_approved: Option<i64>,
}

/// One fund read from an upload.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFund {
    pub fund_name: String,
    pub fund_type: Option<String>,
    pub fund_focus: Option<String>,
    pub pledge: Option<f64>,
    pub deposit: Option<f64>,
    pub approval: Option<f64>,
    pub disbursement: Option<f64>,
    pub projects_approved: Option<i64>,
}
