mod parser;

pub use parser::FileIndexProvider;

use crate::domain::GlowResult;
use hifitime::{Epoch, Unit};
use serde::{Deserialize, Serialize};

/// One UTC day of solar/geomagnetic activity drivers: same-day F10.7,
/// its 81-day mean, and the daily Ap index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyIndices {
    pub f107: f64,
    pub f107a: f64,
    pub ap: f64,
}

/// The two-day window consumed by the simulation input line: the day
/// before the requested time and the day itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexWindow {
    pub previous: DailyIndices,
    pub current: DailyIndices,
}

impl IndexWindow {
    /// Previous-day F10.7, the lagged value of the input line.
    pub fn lagged_f107(&self) -> f64 {
        self.previous.f107
    }
}

/// Date-keyed source of activity indices. Implementations are expected
/// to be cheap to query; the driver performs exactly two lookups per run.
pub trait IndexProvider {
    fn daily(&self, day: Epoch) -> GlowResult<DailyIndices>;

    fn window(&self, time: Epoch) -> GlowResult<IndexWindow> {
        let previous = self.daily(time - 1 * Unit::Day)?;
        let current = self.daily(time)?;
        Ok(IndexWindow { previous, current })
    }
}

/// Constant indices, useful offline and in tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedIndices(pub DailyIndices);

impl IndexProvider for FixedIndices {
    fn daily(&self, _day: Epoch) -> GlowResult<DailyIndices> {
        Ok(self.0)
    }
}
