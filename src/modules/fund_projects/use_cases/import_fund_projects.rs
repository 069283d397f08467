use crate::modules::fund_projects::core::model::NewFundProject;
use crate::shared::infrastructure::tabular::Table;

const PROJECT_COLUMNS: &[&str] = &["project", "project_name", "name"];
const FUND_COLUMNS: &[&str] = &["fund", "fund_name"];
const COUNTRY_COLUMNS: &[&str] = &["country", "country_name", "recipient"];

/// Maps a normalized fund projects sheet to import rows. Rows without a project name are skipped.
pub fn fund_projects_from_table(table: &Table) -> Vec<NewFundProject> {
    table
        .records()
        .filter_map(|record| {
            Some(NewFundProject {
                name: record.get_any(PROJECT_COLUMNS)?.to_string(),
                fund_name: record.get_any(FUND_COLUMNS).map(String::from),
                country_name: record.get_any(COUNTRY_COLUMNS).map(String::from),
            })
        })
        .collect()
}

#[cfg(test)]
mod fund_projects_import_tests {
    use super::*;

    #[test]
    fn it_should_accept_column_aliases_and_skip_unnamed_projects() {
        let table = Table {
            columns: vec!["fund_name".into(), "project_name".into(), "country".into()],
            rows: vec![
                vec![Some("Adaptation Fund".into()), Some("Coastal resilience".into()), Some("Kenya".into())],
                vec![Some("Adaptation Fund".into()), None, Some("Nepal".into())],
                vec![None, Some("Solar mini grids".into()), None],
            ],
        };

        let projects = fund_projects_from_table(&table);

        assert_eq!(
            projects,
            vec![
                NewFundProject {
                    name: "Coastal resilience".into(),
                    fund_name: Some("Adaptation Fund".into()),
                    country_name: Some("Kenya".into()),
                },
                NewFundProject {
                    name: "Solar mini grids".into(),
                    fund_name: None,
                    country_name: None,
                },
            ]
        );
    }
}
