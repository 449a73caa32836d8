use super::{DailyIndices, IndexProvider};
use crate::domain::{GlowError, GlowResult};
use hifitime::Epoch;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Index provider backed by a local whitespace table, one UTC day per
/// row: `YYYY-MM-DD f107 f107a ap`. Blank lines and `#` comments are
/// ignored. Lookup is by calendar date; a missing day is an error.
#[derive(Debug, Clone, Default)]
pub struct FileIndexProvider {
    table: HashMap<(i32, u8, u8), DailyIndices>,
}

impl FileIndexProvider {
    pub fn from_path(path: &Path) -> GlowResult<Self> {
        let source = fs::read_to_string(path)?;
        Self::from_source(&source).map_err(|error| match error {
            GlowError::Indices(message) => {
                GlowError::Indices(format!("{}: {}", path.display(), message))
            }
            other => other,
        })
    }

    pub fn from_source(source: &str) -> GlowResult<Self> {
        let mut table = HashMap::new();

        for (line_index, line) in source.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = trimmed.split_whitespace().collect();
            if fields.len() != 4 {
                return Err(row_error(
                    line_index,
                    format!(
                        "expected 'YYYY-MM-DD f107 f107a ap', found {} fields",
                        fields.len()
                    ),
                ));
            }

            let date = parse_date(fields[0]).ok_or_else(|| {
                row_error(line_index, format!("invalid date '{}'", fields[0]))
            })?;
            let f107 = parse_value(fields[1], line_index, "f107")?;
            let f107a = parse_value(fields[2], line_index, "f107a")?;
            let ap = parse_value(fields[3], line_index, "ap")?;

            table.insert(date, DailyIndices { f107, f107a, ap });
        }

        if table.is_empty() {
            return Err(GlowError::Indices(
                "index table contains no data rows".to_string(),
            ));
        }

        Ok(Self { table })
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl IndexProvider for FileIndexProvider {
    fn daily(&self, day: Epoch) -> GlowResult<DailyIndices> {
        let (year, month, dom, ..) = day.to_gregorian_utc();
        self.table.get(&(year, month, dom)).copied().ok_or_else(|| {
            GlowError::Indices(format!(
                "no entry for {year:04}-{month:02}-{dom:02}"
            ))
        })
    }
}

fn parse_date(token: &str) -> Option<(i32, u8, u8)> {
    let mut parts = token.split('-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u8 = parts.next()?.parse().ok()?;
    let day: u8 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    Some((year, month, day))
}

fn parse_value(token: &str, line_index: usize, field: &str) -> GlowResult<f64> {
    token
        .parse::<f64>()
        .map_err(|_| row_error(line_index, format!("non-numeric {field} value '{token}'")))
}

fn row_error(line_index: usize, message: String) -> GlowError {
    GlowError::Indices(format!("line {}: {}", line_index + 1, message))
}
