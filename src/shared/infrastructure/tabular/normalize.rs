use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::fuzzy::best_match;
use super::{Table, TabularError, UploadKind, UploadSettings};

pub const ADAPTATION_COLUMN: &str =
    "adaptation-related_development_finance_-_commitment_-_current_usd_thousand";
pub const MITIGATION_COLUMN: &str =
    "mitigation-related_development_finance_-_commitment_-_current_usd_thousand";

/// Cell values that mean "no data".
const NULL_TOKENS: &[&str] = &["-", "n/a", "N/A", "null", "NULL", "na", "NA"];

static COMMITMENT_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (
            r"adaptation-related development finance.*commitment.*\d{4} usd thousand",
            ADAPTATION_COLUMN,
        ),
        (
            r"mitigation-related development finance.*commitment.*\d{4} usd thousand",
            MITIGATION_COLUMN,
        ),
    ]
    .into_iter()
    .filter_map(|(pattern, name)| Regex::new(pattern).ok().map(|re| (re, name)))
    .collect()
});

pub fn normalize(
    table: Table,
    kind: UploadKind,
    settings: &UploadSettings,
) -> Result<Table, TabularError> {
    let renames = match kind {
        UploadKind::Funds => match_expected_columns(&table.columns, settings)?,
        UploadKind::Commitments => rename_commitment_columns(&table.columns),
        UploadKind::FundProjects => HashMap::new(),
    };

    let columns = table
        .columns
        .into_iter()
        .enumerate()
        .map(|(index, column)| renames.get(&index).cloned().unwrap_or(column))
        .map(|column| snake_header(&column))
        .collect();

    let rows = table
        .rows
        .into_iter()
        .map(|row| row.into_iter().map(clean_cell).collect::<Vec<_>>())
        .filter(|row| row.iter().any(Option::is_some))
        .collect();

    Ok(Table { columns, rows })
}

fn match_expected_columns(
    columns: &[String],
    settings: &UploadSettings,
) -> Result<HashMap<usize, String>, TabularError> {
    let lowered: Vec<String> = columns.iter().map(|c| c.trim().to_lowercase()).collect();
    let mut renames = HashMap::new();

    for expected in &settings.expected_columns {
        match best_match(expected, &lowered) {
            Some((index, score)) if score >= settings.similarity_threshold => {
                renames.insert(index, expected.clone());
            }
            Some((index, score)) => {
                return Err(TabularError::ColumnNotMatched {
                    expected: expected.clone(),
                    best: lowered[index].clone(),
                    score,
                });
            }
            None => {
                return Err(TabularError::ColumnNotMatched {
                    expected: expected.clone(),
                    best: String::new(),
                    score: 0,
                });
            }
        }
    }

    Ok(renames)
}

fn rename_commitment_columns(columns: &[String]) -> HashMap<usize, String> {
    columns
        .iter()
        .enumerate()
        .filter_map(|(index, column)| {
            let lower = column.trim().to_lowercase();
            COMMITMENT_PATTERNS
                .iter()
                .find(|(re, _)| re.is_match(&lower))
                .map(|(_, name)| (index, name.to_string()))
        })
        .collect()
}

fn snake_header(column: &str) -> String {
    column.trim().to_lowercase().replace(' ', "_")
}

fn clean_cell(cell: Option<String>) -> Option<String> {
    let cell = cell?;
    let trimmed = cell.trim();
    if trimmed.is_empty() || NULL_TOKENS.contains(&trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod shared_tabular_normalize_tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn settings() -> UploadSettings {
        UploadSettings {
            expected_columns: vec!["fund".into(), "fund_type".into(), "pledge".into()],
            similarity_threshold: 80,
        }
    }

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
    fn it_should_rename_fuzzy_matched_headers(settings: UploadSettings) {
        let raw = table(&["Fund ", "Fund Type", "Pledges", "Notes here"], &[]);

        let normalized = normalize(raw, UploadKind::Funds, &settings).expect("normalized");

        assert_eq!(
            normalized.columns,
            vec!["fund", "fund_type", "pledge", "notes_here"]
        );
    }

    #[rstest]
    fn it_should_fail_when_a_required_header_is_too_different(settings: UploadSettings) {
        let raw = table(&["Fund", "Category", "Pledge"], &[]);

        let error = normalize(raw, UploadKind::Funds, &settings).unwrap_err();

        match error {
            TabularError::ColumnNotMatched { expected, score, .. } => {
                assert_eq!(expected, "fund_type");
                assert!(score < 80);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[rstest]
    fn it_should_rename_commitment_amount_headers_for_any_price_year(settings: UploadSettings) {
        let raw = table(
            &[
                "Year",
                "Adaptation-related development finance - Commitment - 2021 USD thousand",
                "Mitigation-related development finance - Commitment - 2022 USD thousand",
                "Channel of Delivery",
            ],
            &[],
        );

        let normalized = normalize(raw, UploadKind::Commitments, &settings).expect("normalized");

        assert_eq!(
            normalized.columns,
            vec!["year", ADAPTATION_COLUMN, MITIGATION_COLUMN, "channel_of_delivery"]
        );
    }

    #[rstest]
    fn it_should_blank_placeholders_and_drop_empty_rows(settings: UploadSettings) {
        let raw = table(
            &["project", "country"],
            &[
                &[Some(" Solar farm "), Some("N/A")],
                &[Some("-"), Some("")],
                &[None, Some("null")],
                &[Some("Wind park"), Some("Kenya")],
            ],
        );

        let normalized = normalize(raw, UploadKind::FundProjects, &settings).expect("normalized");

        assert_eq!(
            normalized.rows,
            vec![
                vec![Some("Solar farm".to_string()), None],
                vec![Some("Wind park".to_string()), Some("Kenya".to_string())],
            ]
        );
    }
}
