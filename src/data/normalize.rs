use std::borrow::Cow;

use super::{DataError, Result};
use crate::types::{CurrencyUnit, Field, MISSING_VALUE};

/// Rescales raw currency fields into a display unit.
#[derive(Debug, Clone, Copy)]
pub struct UnitNormalizer {
    unit: CurrencyUnit,
}

impl UnitNormalizer {
    pub fn new(unit: CurrencyUnit) -> Self {
        Self { unit }
    }

    /// Converts an integer amount to the display unit, rendered back to a
    /// numeric string. The header label and the missing-value marker pass
    /// through untouched so the row filter can still see them.
    pub fn normalize<'a>(
        &self,
        value: &'a str,
        header: &str,
        field: Field,
        line: u64,
    ) -> Result<Cow<'a, str>> {
        if value == header || value == MISSING_VALUE {
            return Ok(Cow::Borrowed(value));
        }
        let amount: i64 = value.trim().parse().map_err(|_| DataError::MalformedValue {
            line,
            field,
            value: value.to_string(),
        })?;
        Ok(Cow::Owned(self.unit.rescale(amount as f64).to_string()))
    }
}

impl Default for UnitNormalizer {
    fn default() -> Self {
        Self::new(CurrencyUnit::HundredMillions)
    }
}
