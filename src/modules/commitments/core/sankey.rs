use std::collections::HashMap;

use crate::modules::commitments::core::model::{SankeyFlow, SankeyLink, SankeyView};

pub const UNSPECIFIED_COUNTRY: &str = "Unspecified";

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sums weights per `(from, to)` pair, keeping the order pairs first appear in.
#[derive(Default)]
struct Stage {
    index: HashMap<(String, String), usize>,
    links: Vec<(String, String, f64)>,
}

impl Stage {
    fn add(&mut self, from: String, to: String, weight: f64) {
        match self.index.get(&(from.clone(), to.clone())) {
            Some(&i) => self.links[i].2 += weight,
            None => {
                self.index.insert((from.clone(), to.clone()), self.links.len());
                self.links.push((from, to, weight));
            }
        }
    }
}

/// Builds the two link stages of the diagram. Flows are visited in ranking
/// order, so the links of the best ranked project come first.
pub fn sankey_links(ranking: &[i64], flows: &[SankeyFlow], view: SankeyView) -> Vec<SankeyLink> {
    let rank: HashMap<i64, usize> = ranking.iter().enumerate().map(|(i, id)| (*id, i)).collect();
    let mut ordered: Vec<&SankeyFlow> = flows.iter().filter(|f| rank.contains_key(&f.project_id)).collect();
    ordered.sort_by_key(|f| rank[&f.project_id]);

    let mut first = Stage::default();
    let mut second = Stage::default();
    for flow in ordered {
        let country = flow.country.clone().unwrap_or_else(|| UNSPECIFIED_COUNTRY.to_string());
        let year = flow.year.to_string();
        match view {
            SankeyView::ProjectCountryYear => {
                first.add(flow.project.clone(), country.clone(), flow.amount);
                second.add(country, year, flow.amount);
            }
            SankeyView::ProjectYearCountry => {
                first.add(flow.project.clone(), year.clone(), flow.amount);
                second.add(year, country, flow.amount);
            }
        }
    }

    first
        .links
        .into_iter()
        .chain(second.links)
        .map(|(from, to, weight)| {
            let weight = round2(weight);
            let tooltip = format!("{from} -> {to}: {weight:.2} USD thousand");
            SankeyLink(from, to, weight, tooltip)
        })
        .collect()
}

#[cfg(test)]
mod commitments_sankey_tests {
    use super::*;
    use rstest::rstest;

    fn flow(project_id: i64, project: &str, country: Option<&str>, year: i64, amount: f64) -> SankeyFlow {
        SankeyFlow {
            project_id,
            project: project.into(),
            country: country.map(String::from),
            year,
            amount,
        }
    }

    fn flows() -> Vec<SankeyFlow> {
        vec![
            flow(1, "Solar", Some("Kenya"), 2020, 10.004),
            flow(2, "Wind", Some("Kenya"), 2020, 50.0),
            flow(1, "Solar", None, 2021, 5.0),
            flow(2, "Wind", Some("Kenya"), 2021, 1.5),
        ]
    }

    #[rstest]
    fn it_should_link_projects_to_countries_then_countries_to_years() {
        let links = sankey_links(&[2, 1], &flows(), SankeyView::ProjectCountryYear);

        let pairs: Vec<_> = links.iter().map(|l| (l.0.as_str(), l.1.as_str(), l.2)).collect();
        assert_eq!(
            pairs,
            vec![
                ("Wind", "Kenya", 51.5),
                ("Solar", "Kenya", 10.0),
                ("Solar", "Unspecified", 5.0),
                ("Kenya", "2020", 60.0),
                ("Kenya", "2021", 1.5),
                ("Unspecified", "2021", 5.0),
            ]
        );
    }

    #[rstest]
    fn it_should_link_projects_to_years_then_years_to_countries() {
        let links = sankey_links(&[1], &flows(), SankeyView::ProjectYearCountry);

        let pairs: Vec<_> = links.iter().map(|l| (l.0.as_str(), l.1.as_str(), l.2)).collect();
        assert_eq!(
            pairs,
            vec![
                ("Solar", "2020", 10.0),
                ("Solar", "2021", 5.0),
                ("2020", "Kenya", 10.0),
                ("2021", "Unspecified", 5.0),
            ]
        );
    }

    #[rstest]
    fn it_should_describe_each_link_in_its_tooltip() {
        let links = sankey_links(&[2], &flows()[1..2], SankeyView::ProjectCountryYear);

        assert_eq!(links[0].3, "Wind -> Kenya: 50.00 USD thousand");
    }

    #[rstest]
    #[case(1.005, 1.0)]
    #[case(2.456, 2.46)]
    #[case(-0.001, -0.0)]
    fn it_should_round_to_two_decimals(#[case] value: f64, #[case] expected: f64) {
        assert_eq!(round2(value), expected);
    }
}
