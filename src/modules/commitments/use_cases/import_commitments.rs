use crate::modules::commitments::core::model::NewCommitment;
use crate::shared::infrastructure::tabular::normalize::{ADAPTATION_COLUMN, MITIGATION_COLUMN};
use crate::shared::infrastructure::tabular::values::{safe_float, safe_int};
use crate::shared::infrastructure::tabular::{Table, TabularError};

pub const OVERLAP_COLUMN: &str = "overlap_-_commitment_-_current_usd_thousand";
pub const CLIMATE_COLUMN: &str =
    "climate-related_development_finance_-_commitment_-_current_usd_thousand";

const PROVIDER_COLUMNS: &[&str] = &["provider", "provider_country"];
const CHANNEL_COLUMNS: &[&str] = &["channel_of_delivery", "channel"];
const RECIPIENT_COLUMNS: &[&str] = &["recipient", "recipient_country"];
const PROJECT_COLUMNS: &[&str] = &["project_title", "project"];

/// Maps a normalized commitments sheet to import rows. Rows without a valid
/// year are skipped; the sheet itself must have a `year` column.
pub fn commitments_from_table(table: &Table) -> Result<Vec<NewCommitment>, TabularError> {
    if !table.has_column("year") {
        return Err(TabularError::MissingColumn("year".into()));
    }

    Ok(table
        .records()
        .filter_map(|record| {
            let year = safe_int(record.get("year"))?;
            let adaptation = safe_float(record.get(ADAPTATION_COLUMN)).unwrap_or(0.0);
            let mitigation = safe_float(record.get(MITIGATION_COLUMN)).unwrap_or(0.0);
            let overlap = safe_float(record.get(OVERLAP_COLUMN)).unwrap_or(0.0);
            let amount = safe_float(record.get(CLIMATE_COLUMN))
                .unwrap_or(adaptation + mitigation - overlap);

            Some(NewCommitment {
                year,
                amount_usd_thousand: amount,
                adaptation_amount_usd_thousand: adaptation,
                mitigation_amount_usd_thousand: mitigation,
                overlap_amount_usd_thousand: overlap,
                project: record.get_any(PROJECT_COLUMNS).map(String::from),
                recipient_country: record.get_any(RECIPIENT_COLUMNS).map(String::from),
                provider: record.get_any(PROVIDER_COLUMNS).map(String::from),
                channel_of_delivery: record.get_any(CHANNEL_COLUMNS).map(String::from),
            })
        })
        .collect())
}

#[cfg(test)]
mod commitments_import_tests {
    use super::*;
    use rstest::rstest;

    fn table(columns: &[&str], rows: &[&[Option<&str>]]) -> Table {
        Table {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.map(String::from)).collect())
                .collect(),
        }
    }

    #[rstest]
    fn it_should_fail_without_a_year_column() {
        let error = commitments_from_table(&table(&["provider"], &[&[Some("Japan")]])).unwrap_err();

        assert_eq!(error.to_string(), "Required column 'year' not found.");
    }

    #[rstest]
    fn it_should_derive_the_amount_when_the_climate_total_is_missing() {
        let sheet = table(
            &["year", "recipient", ADAPTATION_COLUMN, MITIGATION_COLUMN, OVERLAP_COLUMN, CLIMATE_COLUMN],
            &[
                &[Some("2021"), Some("Kenya"), Some("10"), Some("5"), Some("2"), None],
                &[Some("2021.0"), None, Some("10"), None, None, Some("99.5")],
                &[Some("unknown"), Some("Nepal"), Some("1"), Some("1"), None, None],
            ],
        );

        let commitments = commitments_from_table(&sheet).unwrap();

        assert_eq!(commitments.len(), 2);
        assert_eq!(commitments[0].amount_usd_thousand, 13.0);
        assert_eq!(commitments[0].recipient_country.as_deref(), Some("Kenya"));
        assert_eq!(commitments[1].year, 2021);
        assert_eq!(commitments[1].amount_usd_thousand, 99.5);
        assert_eq!(commitments[1].mitigation_amount_usd_thousand, 0.0);
    }
}
