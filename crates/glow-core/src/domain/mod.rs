pub mod errors;

pub use errors::{GlowError, GlowResult};

use hifitime::Epoch;
use serde::Serialize;

/// Caller-supplied inputs of one simulation call, immutable for its
/// duration. Energy flux and characteristic energy describe the
/// precipitating Maxwellian electron population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationRequest {
    pub time: Epoch,
    pub glat: f64,
    pub glon: f64,
    pub energy_flux: f64,
    pub char_energy: f64,
}

impl SimulationRequest {
    pub fn new(time: Epoch, glat: f64, glon: f64, energy_flux: f64, char_energy: f64) -> Self {
        Self {
            time,
            glat,
            glon,
            energy_flux,
            char_energy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SimulationRequest;
    use hifitime::Epoch;

    #[test]
    fn request_preserves_the_five_scalar_tuple() {
        let time = Epoch::from_gregorian_utc(2015, 12, 13, 10, 0, 0, 0);
        let request = SimulationRequest::new(time, 65.1, -147.4, 1.0, 100.0);
        assert_eq!(request.time, time);
        assert_eq!(request.glat, 65.1);
        assert_eq!(request.glon, -147.4);
        assert_eq!(request.energy_flux, 1.0);
        assert_eq!(request.char_energy, 100.0);
    }
}
