use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct FundProject {
    pub id: i64,
    pub name: String,
    pub fund_name: Option<String>,
    pub country_name: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FundProjectFilter {
    pub funds: Option<Vec<i64>>,
    pub countries: Option<Vec<i64>>,
    pub regions: Option<Vec<i64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewFundProject {
    pub name: String,
    pub fund_name: Option<String>,
    pub country_name: Option<String>,
}
