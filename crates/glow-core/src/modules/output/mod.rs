mod model;
mod parser;

pub use model::{
    DatasetAttrs, HEADER_FIELDS, IonoDataset, NUM_ALTITUDES, NUM_QUANTITIES, NUM_WAVELENGTHS,
    ParsedOutput, Quantity, WAVELENGTH_LABELS,
};
pub use parser::parse_output;
