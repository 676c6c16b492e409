use std::collections::HashMap;
use thiserror::Error;

/// Field delimiter used by the provider's flat report format.
const DELIMITER: char = ';';

/// A parsed flat-text report: one header line naming the fields, zero or more
/// data lines aligned to it positionally.
#[derive(Debug, Clone, PartialEq)]
pub enum FlatTable {
    /// Fewer than two lines: no data to speak of. Not an error.
    Empty,
    Single(HashMap<String, String>),
    Many(Vec<HashMap<String, String>>),
}

impl FlatTable {
    /// All records regardless of shape; empty for `Empty`.
    pub fn records(&self) -> Vec<&HashMap<String, String>> {
        match self {
            FlatTable::Empty => Vec::new(),
            FlatTable::Single(record) => vec![record],
            FlatTable::Many(records) => records.iter().collect(),
        }
    }

    pub fn first(&self) -> Option<&HashMap<String, String>> {
        match self {
            FlatTable::Empty => None,
            FlatTable::Single(record) => Some(record),
            FlatTable::Many(records) => records.first(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FlatTableError {
    /// A data line carries a different number of fields than the header.
    /// Positional alignment would silently map values to the wrong field
    /// names, so this is rejected outright.
    #[error("line {line} has {found} fields, header has {expected}")]
    FieldCountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },
}

/// Parses the provider's semicolon-delimited report format. The first line
/// names the fields; each subsequent line is one record, values mapped to
/// field names by position.
pub fn parse(text: &str) -> Result<FlatTable, FlatTableError> {
    let lines: Vec<&str> = text.trim().lines().collect();
    if lines.len() < 2 {
        return Ok(FlatTable::Empty);
    }

    let headers: Vec<&str> = lines[0].split(DELIMITER).collect();

    let mut records = Vec::with_capacity(lines.len() - 1);
    for (idx, line) in lines[1..].iter().enumerate() {
        let values: Vec<&str> = line.split(DELIMITER).collect();
        if values.len() != headers.len() {
            return Err(FlatTableError::FieldCountMismatch {
                // 1-based, counting the header as line 1
                line: idx + 2,
                expected: headers.len(),
                found: values.len(),
            });
        }

        let record: HashMap<String, String> = headers
            .iter()
            .zip(values)
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        records.push(record);
    }

    if records.len() == 1 {
        // records always has exactly one element here
        Ok(FlatTable::Single(records.pop().expect("one record")))
    } else {
        Ok(FlatTable::Many(records))
    }
}
