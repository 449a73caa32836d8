use crate::domain::{GlowError, GlowResult, SimulationRequest};
use crate::modules::indices::IndexWindow;
use hifitime::Epoch;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Fixed row count of both output blocks.
pub const NUM_ALTITUDES: usize = 102;
/// Named 1D quantities of the first block, excluding the altitude axis.
pub const NUM_QUANTITIES: usize = 13;
/// Wavelength channels of the emission block.
pub const NUM_WAVELENGTHS: usize = 15;
/// Fields of the numeric header row echoing the input line.
pub const HEADER_FIELDS: usize = 10;

/// Emission channel labels in column order: 14 wavelengths in Angstrom
/// plus the symbolic LBH band.
pub const WAVELENGTH_LABELS: [&str; NUM_WAVELENGTHS] = [
    "3371", "4278", "5200", "5577", "6300", "7320", "10400", "3644", "7774", "8446", "3726",
    "LBH", "1356", "1493", "1304",
];

/// The 13 named physical quantities of the first output block, in
/// column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Quantity {
    Tn,
    O,
    N2,
    No,
    NeIn,
    NeOut,
    IonRate,
    OPlus,
    O2Plus,
    NoPlus,
    N2D,
    Pedersen,
    Hall,
}

impl Quantity {
    pub const ALL: [Quantity; NUM_QUANTITIES] = [
        Self::Tn,
        Self::O,
        Self::N2,
        Self::No,
        Self::NeIn,
        Self::NeOut,
        Self::IonRate,
        Self::OPlus,
        Self::O2Plus,
        Self::NoPlus,
        Self::N2D,
        Self::Pedersen,
        Self::Hall,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tn => "Tn",
            Self::O => "O",
            Self::N2 => "N2",
            Self::No => "NO",
            Self::NeIn => "NeIn",
            Self::NeOut => "NeOut",
            Self::IonRate => "ionrate",
            Self::OPlus => "O+",
            Self::O2Plus => "O2+",
            Self::NoPlus => "NO+",
            Self::N2D => "N2D",
            Self::Pedersen => "pedersen",
            Self::Hall => "hall",
        }
    }

    /// Position among the data columns of the first block.
    pub const fn column(self) -> usize {
        self as usize
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Shape-validated parser output before dataset assembly: the altitude
/// axis, the 13 profiles in column order, and the row-major
/// altitude-by-wavelength emission array.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedOutput {
    pub alt_km: Vec<f64>,
    pub profiles: Vec<Vec<f64>>,
    pub ver: Vec<f64>,
}

/// Run metadata attached to the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DatasetAttrs {
    pub time: Epoch,
    pub glat: f64,
    pub glon: f64,
    pub indices: IndexWindow,
}

impl DatasetAttrs {
    pub fn new(request: &SimulationRequest, indices: IndexWindow) -> Self {
        Self {
            time: request.time,
            glat: request.glat,
            glon: request.glon,
            indices,
        }
    }
}

/// One simulation run as a labeled structure: 13 named profiles and the
/// emission array, all sharing the ascending altitude axis. Constructed
/// once per invocation, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IonoDataset {
    alt_km: Vec<f64>,
    profiles: Vec<Vec<f64>>,
    ver: Vec<f64>,
    pub attrs: DatasetAttrs,
}

impl IonoDataset {
    pub fn assemble(parsed: ParsedOutput, attrs: DatasetAttrs) -> GlowResult<Self> {
        // guard against an accidental name/column mismatch upstream
        if parsed.profiles.len() != NUM_QUANTITIES {
            return Err(GlowError::Format(format!(
                "assembled {} named profiles, expected {}",
                parsed.profiles.len(),
                NUM_QUANTITIES
            )));
        }

        Ok(Self {
            alt_km: parsed.alt_km,
            profiles: parsed.profiles,
            ver: parsed.ver,
            attrs,
        })
    }

    pub fn alt_km(&self) -> &[f64] {
        &self.alt_km
    }

    pub fn num_altitudes(&self) -> usize {
        self.alt_km.len()
    }

    pub fn num_quantities(&self) -> usize {
        self.profiles.len()
    }

    pub fn profile(&self, quantity: Quantity) -> &[f64] {
        &self.profiles[quantity.column()]
    }

    pub fn ver_at(&self, alt_index: usize, wavelength_index: usize) -> f64 {
        self.ver[alt_index * NUM_WAVELENGTHS + wavelength_index]
    }

    /// Emission profile of one wavelength channel over the altitude axis.
    pub fn ver_column(&self, wavelength_index: usize) -> Vec<f64> {
        (0..self.alt_km.len())
            .map(|row| self.ver_at(row, wavelength_index))
            .collect()
    }
}

impl Display for IonoDataset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let first_alt = self.alt_km.first().copied().unwrap_or(f64::NAN);
        let last_alt = self.alt_km.last().copied().unwrap_or(f64::NAN);

        writeln!(f, "GLOW ionosphere dataset")?;
        writeln!(f, "  time       : {}", self.attrs.time)?;
        writeln!(
            f,
            "  location   : glat {:.2}, glon {:.2}",
            self.attrs.glat, self.attrs.glon
        )?;
        writeln!(
            f,
            "  altitudes  : {} points, {:.1} - {:.1} km",
            self.alt_km.len(),
            first_alt,
            last_alt
        )?;
        let names: Vec<&str> = Quantity::ALL.iter().map(|q| q.as_str()).collect();
        writeln!(f, "  quantities : {}", names.join(" "))?;
        writeln!(
            f,
            "  ver        : {} x {} wavelengths",
            self.alt_km.len(),
            NUM_WAVELENGTHS
        )?;
        write!(
            f,
            "  indices    : f107a={} f107={} f107p={} ap={}",
            self.attrs.indices.current.f107a,
            self.attrs.indices.current.f107,
            self.attrs.indices.lagged_f107(),
            self.attrs.indices.current.ap
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{NUM_QUANTITIES, NUM_WAVELENGTHS, Quantity, WAVELENGTH_LABELS};

    #[test]
    fn quantity_labels_follow_block_column_order() {
        assert_eq!(Quantity::ALL.len(), NUM_QUANTITIES);
        assert_eq!(Quantity::Tn.column(), 0);
        assert_eq!(Quantity::Hall.column(), NUM_QUANTITIES - 1);
        assert_eq!(Quantity::OPlus.as_str(), "O+");
        assert_eq!(Quantity::IonRate.as_str(), "ionrate");
    }

    #[test]
    fn wavelength_labels_keep_the_symbolic_lbh_channel() {
        assert_eq!(WAVELENGTH_LABELS.len(), NUM_WAVELENGTHS);
        assert_eq!(WAVELENGTH_LABELS[11], "LBH");
        assert_eq!(WAVELENGTH_LABELS[0], "3371");
        assert_eq!(WAVELENGTH_LABELS[14], "1304");
    }
}
