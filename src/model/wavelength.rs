// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! OI_WAVELENGTH: per-instrument spectral calibration.

use ndarray::Array1;

/// A named spectral table.
#[derive(Debug, Clone)]
pub struct WavelengthTable {
    pub revision: i32,
    pub insname: String,
    /// Effective wavelength per channel, metres.
    pub eff_wave: Array1<f64>,
    /// Effective bandpass per channel, metres.
    pub eff_band: Array1<f64>,
}

impl WavelengthTable {
    pub fn new(revision: i32, insname: impl Into<String>, nwave: usize) -> Self {
        WavelengthTable {
            revision,
            insname: insname.into(),
            eff_wave: Array1::from_elem(nwave, f64::NAN),
            eff_band: Array1::from_elem(nwave, f64::NAN),
        }
    }

    pub fn nwave(&self) -> usize {
        self.eff_wave.len()
    }

    pub fn upgrade_to_v2(&mut self) {
        self.revision = 2;
    }

    /// True iff `eff_wave` is monotonically non-decreasing (invariant 6).
    pub fn is_wave_ordered(&self) -> bool {
        self.eff_wave
            .as_slice()
            .map(|s| s.windows(2).all(|w| w[0] <= w[1]))
            .unwrap_or(true)
    }

    /// Content equality used by the merger: same `nwave`, and every
    /// eff_wave/eff_band within tolerance.
    pub fn content_eq(&self, other: &WavelengthTable) -> bool {
        use crate::constants::MERGE_COORD_TOLERANCE;

        if self.nwave() != other.nwave() {
            return false;
        }
        self.eff_wave
            .iter()
            .zip(other.eff_wave.iter())
            .all(|(a, b)| (a - b).abs() < MERGE_COORD_TOLERANCE)
            && self
                .eff_band
                .iter()
                .zip(other.eff_band.iter())
                .all(|(a, b)| (a - b).abs() < MERGE_COORD_TOLERANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wave_ordered() {
        let mut wl = WavelengthTable::new(2, "TEST", 3);
        wl.eff_wave = Array1::from(vec![1.0e-6, 1.1e-6, 1.2e-6]);
        assert!(wl.is_wave_ordered());
        wl.eff_wave = Array1::from(vec![1.2e-6, 1.1e-6, 1.2e-6]);
        assert!(!wl.is_wave_ordered());
    }

    #[test]
    fn test_content_eq() {
        let mut a = WavelengthTable::new(2, "A", 2);
        a.eff_wave = Array1::from(vec![1e-6, 2e-6]);
        a.eff_band = Array1::from(vec![1e-8, 2e-8]);
        let mut b = a.clone();
        b.insname = "B".to_string();
        assert!(a.content_eq(&b));
        b.eff_wave[0] = 1.1e-6;
        assert!(!a.content_eq(&b));
    }
}
