//! Searchable catalog of known forecast locations.
//!
//! The catalog is a tab-separated reference file shipped alongside the
//! applet, one row per location. It is re-read on every search request;
//! a local file read is cheap enough that no caching layer is warranted.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::warn;

use crate::error::Error;

/// Default cap on search results returned to the host.
pub const MAX_SEARCH_RESULTS: usize = 1000;

// Column layout of the reference file.
const COL_CITY: usize = 3;
const COL_COUNTRY: usize = 10;
const URL_COLUMNS: [usize; 3] = [17, 16, 15];
const MIN_COLUMNS: usize = 18;

/// A selectable location: the forecast-query URL plus a display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityOption {
    pub key: String,
    pub value: String,
}

/// Read the reference file, drop the header line, sort the remaining rows
/// and remove duplicates.
pub fn load_lines(path: &Path) -> Result<Vec<String>, Error> {
    let raw = fs::read_to_string(path)?;
    let mut lines: Vec<String> = raw.lines().skip(1).map(str::to_owned).collect();
    lines.sort_unstable();
    lines.dedup();
    Ok(lines)
}

/// Turn raw catalog rows into selectable options.
///
/// Malformed rows are skipped with a warning rather than failing the whole
/// catalog; a single bad row should not make every city unselectable.
pub fn to_options(lines: &[String]) -> Vec<CityOption> {
    let mut options = Vec::with_capacity(lines.len());
    for line in lines {
        match parse_line(line) {
            Ok(option) => options.push(option),
            Err(err) => warn!(%err, "skipping malformed city row"),
        }
    }
    options
}

fn parse_line(line: &str) -> Result<CityOption, Error> {
    let columns: Vec<&str> = line.split('\t').collect();
    if columns.len() < MIN_COLUMNS {
        return Err(Error::City(format!(
            "expected at least {MIN_COLUMNS} columns, got {}",
            columns.len()
        )));
    }

    // Several columns may carry the forecast URL; first non-blank wins.
    let url = URL_COLUMNS
        .iter()
        .map(|&i| columns[i].trim())
        .find(|c| !c.is_empty())
        .ok_or_else(|| Error::City("no forecast url in any candidate column".into()))?;

    // The region sits in the URL path, with underscores for spaces.
    let region = url
        .split("//")
        .nth(1)
        .and_then(|rest| rest.split('/').nth(3))
        .ok_or_else(|| Error::City(format!("unrecognized forecast url: {url}")))?
        .replace('_', " ");

    Ok(CityOption {
        key: url.to_owned(),
        value: format!("{}, {} ({})", columns[COL_CITY], region, columns[COL_COUNTRY]),
    })
}

/// Filter options by a user-supplied query.
///
/// The query is trimmed, percent-decoded and lower-cased; an empty query
/// returns the first `limit` options unfiltered. Matching is a
/// case-insensitive substring test on the label, preserving catalog order.
pub fn search(options: &[CityOption], query: &str, limit: usize) -> Vec<CityOption> {
    let decoded = urlencoding::decode(query.trim())
        .map(|q| q.into_owned())
        .unwrap_or_else(|_| query.trim().to_owned());
    let needle = decoded.trim().to_lowercase();

    if needle.is_empty() {
        return options.iter().take(limit).cloned().collect();
    }

    options
        .iter()
        .filter(|option| option.value.to_lowercase().contains(&needle))
        .take(limit)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn city_line(city: &str, country: &str, url: &str) -> String {
        let mut columns = vec![""; MIN_COLUMNS];
        columns[COL_CITY] = city;
        columns[COL_COUNTRY] = country;
        columns[17] = url;
        columns.join("\t")
    }

    fn sample_options() -> Vec<CityOption> {
        let lines = vec![
            city_line(
                "Andorra la Vella",
                "Andorra",
                "https://www.yr.no/place/Andorra/Andorra_la_Vella/Andorra_la_Vella/forecast.xml",
            ),
            city_line(
                "Austin",
                "USA",
                "https://www.yr.no/place/United_States/Texas/Austin/forecast.xml",
            ),
            city_line(
                "Casablanca",
                "Morocco",
                "https://www.yr.no/place/Morocco/Grand_Casablanca/Casablanca/forecast.xml",
            ),
        ];
        to_options(&lines)
    }

    #[test]
    fn load_lines_sorts_and_dedupes_without_header() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "header\tcolumns").unwrap();
        writeln!(file, "b-row").unwrap();
        writeln!(file, "a-row").unwrap();
        writeln!(file, "b-row").unwrap();
        writeln!(file, "c-row").unwrap();

        let lines = load_lines(file.path()).expect("load should succeed");
        assert_eq!(lines, vec!["a-row", "b-row", "c-row"]);
    }

    #[test]
    fn load_lines_fails_on_missing_file() {
        let err = load_lines(Path::new("does-not-exist.txt")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn to_options_builds_label_from_city_region_country() {
        let options = sample_options();
        assert_eq!(options.len(), 3);
        assert_eq!(
            options[2].key,
            "https://www.yr.no/place/Morocco/Grand_Casablanca/Casablanca/forecast.xml"
        );
        assert_eq!(options[2].value, "Casablanca, Grand Casablanca (Morocco)");
    }

    #[test]
    fn to_options_falls_back_through_url_columns() {
        let mut columns = vec![""; MIN_COLUMNS];
        columns[COL_CITY] = "Austin";
        columns[COL_COUNTRY] = "USA";
        columns[15] = "https://www.yr.no/place/United_States/Texas/Austin/forecast.xml";
        let lines = vec![columns.join("\t")];

        let options = to_options(&lines);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].value, "Austin, Texas (USA)");
    }

    #[test]
    fn to_options_skips_malformed_rows() {
        let lines = vec![
            "too\tfew\tcolumns".to_owned(),
            city_line(
                "Austin",
                "USA",
                "https://www.yr.no/place/United_States/Texas/Austin/forecast.xml",
            ),
        ];

        let options = to_options(&lines);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].value, "Austin, Texas (USA)");
    }

    #[test]
    fn search_empty_query_returns_limit_in_order() {
        let options = sample_options();

        let all = search(&options, "", MAX_SEARCH_RESULTS);
        assert_eq!(all.len(), options.len());
        assert_eq!(all[0].value, options[0].value);

        let capped = search(&options, "   ", 2);
        assert_eq!(capped.len(), 2);
    }

    #[test]
    fn search_matches_case_insensitive_substring() {
        let options = sample_options();

        let hits = search(&options, "TEXAS", MAX_SEARCH_RESULTS);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].value, "Austin, Texas (USA)");

        assert!(search(&options, "nowhere", MAX_SEARCH_RESULTS).is_empty());
    }

    #[test]
    fn search_decodes_percent_escapes() {
        let options = sample_options();

        let hits = search(&options, "andorra%20la%20vella", MAX_SEARCH_RESULTS);
        assert_eq!(hits.len(), 1);
        assert!(hits[0].value.starts_with("Andorra la Vella"));
    }

    #[test]
    fn search_respects_limit() {
        let options = sample_options();
        let hits = search(&options, "a", 1);
        assert_eq!(hits.len(), 1);
    }
}
