//! Driver for the GLOW ionosphere/thermosphere simulation executable:
//! resolve (and build on demand) the native binary, feed it one line of
//! numeric parameters over stdin, and parse its fixed-format stdout into
//! a labeled altitude-indexed dataset.

pub mod domain;
pub mod modules;

pub use domain::{GlowError, GlowResult, SimulationRequest};
pub use modules::driver::{
    DEFAULT_TIME_BUDGET, format_input_line, glow_date, maxwellian, maxwellian_with_budget,
    run_glow,
};
pub use modules::indices::{
    DailyIndices, FileIndexProvider, FixedIndices, IndexProvider, IndexWindow,
};
pub use modules::output::{
    DatasetAttrs, IonoDataset, NUM_ALTITUDES, NUM_QUANTITIES, NUM_WAVELENGTHS, Quantity,
    WAVELENGTH_LABELS, parse_output,
};
pub use modules::toolchain::{GlowExecutable, cmake_build, which, which_in};
