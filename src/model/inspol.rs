// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! OI_INSPOL: instrumental-polarization Jones matrix per station.

use ndarray::Array1;
use num_complex::Complex64;

/// One station/time/wavelength-range record of the instrument's 2x2 Jones
/// matrix, as four complex-valued per-channel sequences.
#[derive(Debug, Clone)]
pub struct InspolRecord {
    pub target_id: i32,
    pub insname: String,
    pub mjd_obs: f64,
    pub mjd_end: f64,
    pub sta_index: i32,
    pub jxx: Array1<Complex64>,
    pub jyy: Array1<Complex64>,
    pub jxy: Array1<Complex64>,
    pub jyx: Array1<Complex64>,
}

impl InspolRecord {
    pub fn new_default(nwave: usize) -> Self {
        let zeros = Array1::from_elem(nwave, Complex64::new(f64::NAN, f64::NAN));
        InspolRecord {
            target_id: -1,
            insname: String::new(),
            mjd_obs: f64::NAN,
            mjd_end: f64::NAN,
            sta_index: -1,
            jxx: zeros.clone(),
            jyy: zeros.clone(),
            jxy: zeros.clone(),
            jyx: zeros,
        }
    }
}

/// Mandatory ARRNAME per invariant 8. Orientation and model tags describe
/// how the polarization basis was fixed.
#[derive(Debug, Clone)]
pub struct InspolTable {
    pub revision: i32,
    pub arrname: String,
    pub orient: String,
    pub model: String,
    pub nwave: usize,
    pub records: Vec<InspolRecord>,
}

impl InspolTable {
    pub fn new(revision: i32, arrname: impl Into<String>, nwave: usize, n: usize) -> Self {
        InspolTable {
            revision,
            arrname: arrname.into(),
            orient: String::new(),
            model: String::new(),
            nwave,
            records: (0..n).map(|_| InspolRecord::new_default(nwave)).collect(),
        }
    }

    pub fn upgrade_to_v2(&mut self) {
        self.revision = 2;
    }
}
