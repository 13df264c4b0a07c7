//! Related-queries data served by the trends endpoint.

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use smartidea_core::Result;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopQuery {
    pub name: String,
    pub value: f64,
}

/// Rising queries carry growth labels such as `+850%` or `Breakout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RisingQuery {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RelatedQueries {
    pub top: Vec<TopQuery>,
    pub rising: Vec<RisingQuery>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Top,
    Rising,
}

/// Parse a related-queries export.
///
/// Rows are `name,value` under a `TOP` or `RISING` header line. Rows before
/// the first header, rows without both columns, and TOP rows whose value is
/// not numeric are skipped.
pub fn parse_related_queries(text: &str) -> RelatedQueries {
    let mut section = Section::None;
    let mut queries = RelatedQueries::default();

    for line in text.lines() {
        let trimmed = line.trim();
        match trimmed {
            "TOP" => {
                section = Section::Top;
                continue;
            }
            "RISING" => {
                section = Section::Rising;
                continue;
            }
            "" => continue,
            _ => {}
        }

        let mut columns = trimmed.split(',');
        let (Some(name), Some(value)) = (columns.next(), columns.next()) else {
            continue;
        };
        let (name, value) = (name.trim(), value.trim());
        if name.is_empty() || value.is_empty() {
            continue;
        }

        match section {
            Section::Top => {
                if let Ok(value) = value.parse::<f64>() {
                    queries.top.push(TopQuery {
                        name: name.to_string(),
                        value,
                    });
                }
            }
            Section::Rising => queries.rising.push(RisingQuery {
                name: name.to_string(),
                value: value.to_string(),
            }),
            Section::None => {}
        }
    }

    queries
}

/// Read and parse the related-queries file at `path`.
pub async fn load_related_queries(path: impl AsRef<Path>) -> Result<RelatedQueries> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path).await?;
    let queries = parse_related_queries(&text);
    debug!(
        path = %path.display(),
        top = queries.top.len(),
        rising = queries.rising.len(),
        "Loaded related queries"
    );
    Ok(queries)
}
