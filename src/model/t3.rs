// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! OI_T3: triple-product (bispectrum) measurements.

use ndarray::Array1;

/// One triple-product measurement over three stations and two independent
/// baselines.
#[derive(Debug, Clone)]
pub struct T3Record {
    pub target_id: i32,
    pub time: f64,
    pub mjd: f64,
    pub int_time: f64,
    pub u1coord: f64,
    pub v1coord: f64,
    pub u2coord: f64,
    pub v2coord: f64,
    pub sta_index: [i32; 3],
    pub t3amp: Array1<f64>,
    pub t3amperr: Array1<f64>,
    pub t3phi: Array1<f64>,
    pub t3phierr: Array1<f64>,
    pub flag: Array1<bool>,
    pub corrindx_t3amp: Option<Array1<i32>>,
    pub corrindx_t3phi: Option<Array1<i32>>,
}

impl T3Record {
    pub fn new_default(nwave: usize) -> Self {
        T3Record {
            target_id: -1,
            time: 0.0,
            mjd: f64::NAN,
            int_time: f64::NAN,
            u1coord: f64::NAN,
            v1coord: f64::NAN,
            u2coord: f64::NAN,
            v2coord: f64::NAN,
            sta_index: [-1, -1, -1],
            t3amp: Array1::from_elem(nwave, f64::NAN),
            t3amperr: Array1::from_elem(nwave, f64::NAN),
            t3phi: Array1::from_elem(nwave, f64::NAN),
            t3phierr: Array1::from_elem(nwave, f64::NAN),
            flag: Array1::from_elem(nwave, false),
            corrindx_t3amp: None,
            corrindx_t3phi: None,
        }
    }

    /// The three baselines (AB, BC, AC) as uv radii in metres: AB and BC
    /// are the two independent coordinate pairs, AC is their sum.
    pub fn baselines(&self) -> [f64; 3] {
        let ab = (self.u1coord.powi(2) + self.v1coord.powi(2)).sqrt();
        let bc = (self.u2coord.powi(2) + self.v2coord.powi(2)).sqrt();
        let u3 = -(self.u1coord + self.u2coord);
        let v3 = -(self.v1coord + self.v2coord);
        let ac = (u3.powi(2) + v3.powi(2)).sqrt();
        [ab, bc, ac]
    }
}

#[derive(Debug, Clone)]
pub struct T3Table {
    pub revision: i32,
    pub arrname: String,
    pub insname: String,
    pub corrname: Option<String>,
    pub date_obs: String,
    pub nwave: usize,
    pub records: Vec<T3Record>,
}

impl T3Table {
    pub fn new(
        revision: i32,
        arrname: impl Into<String>,
        insname: impl Into<String>,
        nwave: usize,
        n: usize,
    ) -> Self {
        T3Table {
            revision,
            arrname: arrname.into(),
            insname: insname.into(),
            corrname: None,
            date_obs: String::new(),
            nwave,
            records: (0..n).map(|_| T3Record::new_default(nwave)).collect(),
        }
    }

    pub fn upgrade_to_v2(&mut self) {
        self.revision = 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baselines_third_is_sum() {
        let mut r = T3Record::new_default(1);
        r.u1coord = 10.0;
        r.v1coord = 0.0;
        r.u2coord = 0.0;
        r.v2coord = 10.0;
        let [ab, bc, ac] = r.baselines();
        assert_eq!(ab, 10.0);
        assert_eq!(bc, 10.0);
        assert!((ac - (200.0_f64).sqrt()).abs() < 1e-9);
    }
}
