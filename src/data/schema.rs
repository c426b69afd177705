//! Column layout of the movie dataset.
//!
//! Rows carry a variable number of leading columns (titles may contain
//! unquoted commas), so every field is addressed by its offset from the end
//! of the row rather than by absolute index.

use csv::StringRecord;
use serde::{Deserialize, Serialize};

use super::{DataError, Result};
use crate::types::Field;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// 1 is the last column, 2 the one before it, and so on.
    pub offset_from_end: usize,
    /// Label the column carries in the header row.
    pub header: String,
}

impl ColumnSpec {
    pub fn new(offset_from_end: usize, header: &str) -> Self {
        Self {
            offset_from_end,
            header: header.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub release_year: ColumnSpec,
    pub production_cost: ColumnSpec,
    pub worldwide_gross: ColumnSpec,
    pub genre: ColumnSpec,
    pub runtime: ColumnSpec,
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self {
            release_year: ColumnSpec::new(1, "year"),
            runtime: ColumnSpec::new(2, "runtime"),
            genre: ColumnSpec::new(4, "genre"),
            worldwide_gross: ColumnSpec::new(7, "worldwide_gross"),
            production_cost: ColumnSpec::new(9, "production_cost"),
        }
    }
}

impl ColumnSchema {
    pub fn column(&self, field: Field) -> &ColumnSpec {
        match field {
            Field::ReleaseYear => &self.release_year,
            Field::ProductionCost => &self.production_cost,
            Field::WorldwideGross => &self.worldwide_gross,
            Field::Genre => &self.genre,
            Field::Runtime => &self.runtime,
        }
    }

    pub fn header(&self, field: Field) -> &str {
        &self.column(field).header
    }

    /// Pulls `N` fields out of a row, in the order requested.
    pub fn extract<'r, const N: usize>(
        &self,
        row: &'r StringRecord,
        fields: [Field; N],
        line: u64,
    ) -> Result<[&'r str; N]> {
        let mut out = [""; N];
        for (slot, field) in out.iter_mut().zip(fields) {
            let offset = self.column(field).offset_from_end;
            let len = row.len();
            if offset == 0 || offset > len {
                return Err(DataError::OutOfRange {
                    line,
                    field,
                    offset,
                    len,
                });
            }
            *slot = &row[len - offset];
        }
        Ok(out)
    }
}
