// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! OI_VIS2: squared-visibility measurements.

use ndarray::Array1;

/// One squared-visibility measurement. As [`super::VisRecord`] but with
/// only the vis2data/vis2err/flag channels, no phase or complex variants.
#[derive(Debug, Clone)]
pub struct Vis2Record {
    pub target_id: i32,
    pub time: f64,
    pub mjd: f64,
    pub int_time: f64,
    pub ucoord: f64,
    pub vcoord: f64,
    pub sta_index: [i32; 2],
    pub vis2data: Array1<f64>,
    pub vis2err: Array1<f64>,
    pub flag: Array1<bool>,
    pub corr_indices: Option<Array1<i32>>,
}

impl Vis2Record {
    pub fn new_default(nwave: usize) -> Self {
        Vis2Record {
            target_id: -1,
            time: 0.0,
            mjd: f64::NAN,
            int_time: f64::NAN,
            ucoord: f64::NAN,
            vcoord: f64::NAN,
            sta_index: [-1, -1],
            vis2data: Array1::from_elem(nwave, f64::NAN),
            vis2err: Array1::from_elem(nwave, f64::NAN),
            flag: Array1::from_elem(nwave, false),
            corr_indices: None,
        }
    }

    pub fn baseline(&self) -> f64 {
        (self.ucoord * self.ucoord + self.vcoord * self.vcoord).sqrt()
    }
}

#[derive(Debug, Clone)]
pub struct Vis2Table {
    pub revision: i32,
    pub arrname: String,
    pub insname: String,
    pub corrname: Option<String>,
    pub date_obs: String,
    pub nwave: usize,
    pub records: Vec<Vis2Record>,
}

impl Vis2Table {
    pub fn new(
        revision: i32,
        arrname: impl Into<String>,
        insname: impl Into<String>,
        nwave: usize,
        n: usize,
    ) -> Self {
        Vis2Table {
            revision,
            arrname: arrname.into(),
            insname: insname.into(),
            corrname: None,
            date_obs: String::new(),
            nwave,
            records: (0..n).map(|_| Vis2Record::new_default(nwave)).collect(),
        }
    }

    pub fn upgrade_to_v2(&mut self) {
        self.revision = 2;
    }
}
