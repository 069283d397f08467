use crate::modules::funds::core::model::NewFund;
use crate::shared::infrastructure::tabular::Table;
use crate::shared::infrastructure::tabular::values::{safe_float, safe_int};

/// Maps a normalized funds sheet to import rows. Rows without a fund name are skipped.
pub fn funds_from_table(table: &Table) -> Vec<NewFund> {
    table
        .records()
        .filter_map(|record| {
            let fund_name = record.get("fund")?.to_string();
            Some(NewFund {
                fund_name,
                fund_type: record.get("fund_type").map(String::from),
                fund_focus: record.get("fund_focus").map(String::from),
                pledge: safe_float(record.get("pledge")),
                deposit: safe_float(record.get("deposit")),
                approval: safe_float(record.get("approval")),
                disbursement: safe_float(record.get("disbursement")),
                projects_approved: safe_int(record.get("projects_approved")),
            })
        })
        .collect()
}
