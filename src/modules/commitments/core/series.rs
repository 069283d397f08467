use crate::modules::commitments::core::model::{SeriesRow, TimeSeries, TimeSeriesPoint};

pub const AGGREGATED_SERIES: &str = "Aggregated total";

/// Groups rows ordered by series then year into one series per name.
/// An aggregated request always yields exactly one series, even without data.
pub fn group_series(rows: Vec<SeriesRow>, aggregated: bool) -> Vec<TimeSeries> {
    if aggregated {
        let data = rows
            .into_iter()
            .map(|row| TimeSeriesPoint { year: row.year, amount: row.amount })
            .collect();
        return vec![TimeSeries { name: AGGREGATED_SERIES.to_string(), data }];
    }

    let mut series: Vec<TimeSeries> = Vec::new();
    for row in rows {
        let name = row.series.unwrap_or_else(|| AGGREGATED_SERIES.to_string());
        let point = TimeSeriesPoint { year: row.year, amount: row.amount };
        match series.last_mut() {
            Some(last) if last.name == name => last.data.push(point),
            _ => series.push(TimeSeries { name, data: vec![point] }),
        }
    }
    series
}

#[cfg(test)]
mod commitments_series_tests {
    use super::*;
    use rstest::rstest;

    fn row(series: Option<&str>, year: i64, amount: f64) -> SeriesRow {
        SeriesRow { series: series.map(String::from), year, amount }
    }

    #[rstest]
    fn it_should_return_one_aggregated_series() {
        let series = group_series(vec![row(None, 2020, 1.0), row(None, 2021, 2.5)], true);

        assert_eq!(
            series,
            vec![TimeSeries {
                name: "Aggregated total".into(),
                data: vec![
                    TimeSeriesPoint { year: 2020, amount: 1.0 },
                    TimeSeriesPoint { year: 2021, amount: 2.5 },
                ],
            }]
        );
    }

    #[rstest]
    fn it_should_keep_an_empty_aggregated_series() {
        let series = group_series(Vec::new(), true);

        assert_eq!(series.len(), 1);
        assert!(series[0].data.is_empty());
    }

    #[rstest]
    fn it_should_split_rows_per_country() {
        let series = group_series(
            vec![
                row(Some("Kenya"), 2020, 1.0),
                row(Some("Kenya"), 2022, 3.0),
                row(Some("Nepal"), 2021, 2.0),
            ],
            false,
        );

        let shape: Vec<_> = series.iter().map(|s| (s.name.as_str(), s.data.len())).collect();
        assert_eq!(shape, vec![("Kenya", 2), ("Nepal", 1)]);
    }
}
