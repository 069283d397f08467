use serde::{Deserialize, Serialize};

use crate::shared::core::pagination::Page;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ProjectSummary {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectPage {
    pub projects: Vec<ProjectSummary>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectSearch {
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Case-insensitive substring search over `projects`, then one page of the matches.
/// Folding uses Unicode lowercase on both sides, so `école` finds `ÉCOLE Verte`.
pub fn search_page(projects: Vec<ProjectSummary>, search: Option<&str>, page: Page) -> ProjectPage {
    let term = search.map(str::trim).filter(|t| !t.is_empty()).map(str::to_lowercase);
    let matches: Vec<_> = projects
        .into_iter()
        .filter(|p| term.as_deref().is_none_or(|t| p.name.to_lowercase().contains(t)))
        .collect();
    let total = matches.len() as i64;
    let projects = matches
        .into_iter()
        .skip(page.offset as usize)
        .take(page.limit as usize)
        .collect();
    ProjectPage { projects, total, limit: page.limit, offset: page.offset }
}

#[cfg(test)]
mod projects_model_tests {
    use super::*;
    use rstest::rstest;

    fn summaries(names: &[&str]) -> Vec<ProjectSummary> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| ProjectSummary { id: i as i64 + 1, name: name.to_string() })
            .collect()
    }

    #[rstest]
    #[case(Some("école"), 1)]
    #[case(Some("ÉCOLE"), 1)]
    #[case(Some("açaí"), 1)]
    #[case(Some("100%"), 1)]
    #[case(Some("_"), 0)]
    #[case(Some("  "), 4)]
    #[case(None, 4)]
    fn it_should_fold_case_and_match_literally(#[case] search: Option<&str>, #[case] expected: i64) {
        let projects = summaries(&["ÉCOLE Verte", "Projeto AÇAÍ", "100% renewable", "Solar"]);

        let page = search_page(projects, search, Page::new(20, 0));

        assert_eq!(page.total, expected);
    }

    #[rstest]
    fn it_should_count_all_matches_but_return_one_page() {
        let projects = summaries(&["Solar a", "Solar b", "Solar c", "Wind"]);

        let page = search_page(projects, Some("solar"), Page::new(1, 1));

        assert_eq!(page.total, 3);
        assert_eq!(page.projects, vec![ProjectSummary { id: 2, name: "Solar b".into() }]);
        assert_eq!((page.limit, page.offset), (1, 1));
    }
}
