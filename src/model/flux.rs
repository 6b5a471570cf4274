// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! OI_FLUX: per-target spectrally-resolved flux.
//!
//! Revision-1 files may name this extension OI_SPECTRUM instead of
//! OI_FLUX; both are read into the same [`FluxTable`] and always written
//! back as OI_FLUX.

use ndarray::Array1;

/// Calibration status of a flux table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalStat {
    /// Calibrated: ARRNAME and per-record station index must be absent.
    Calibrated,
    /// Uncalibrated: ARRNAME and per-record station index are mandatory.
    Uncalibrated,
}

impl CalStat {
    pub fn as_char(self) -> char {
        match self {
            CalStat::Calibrated => 'C',
            CalStat::Uncalibrated => 'U',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(CalStat::Calibrated),
            'U' => Some(CalStat::Uncalibrated),
            _ => None,
        }
    }
}

/// One spectrally-resolved flux measurement.
#[derive(Debug, Clone)]
pub struct FluxRecord {
    pub target_id: i32,
    pub mjd: f64,
    pub int_time: f64,
    pub fluxdata: Array1<f64>,
    pub fluxerr: Array1<f64>,
    pub flag: Array1<bool>,
    /// Present only when the table's calibration status is `Uncalibrated`.
    pub sta_index: Option<i32>,
}

impl FluxRecord {
    pub fn new_default(nwave: usize) -> Self {
        FluxRecord {
            target_id: -1,
            mjd: f64::NAN,
            int_time: f64::NAN,
            fluxdata: Array1::from_elem(nwave, f64::NAN),
            fluxerr: Array1::from_elem(nwave, f64::NAN),
            flag: Array1::from_elem(nwave, false),
            sta_index: None,
        }
    }
}

use super::FovType;

#[derive(Debug, Clone)]
pub struct FluxTable {
    pub revision: i32,
    pub insname: String,
    pub calstat: CalStat,
    /// Mandatory iff `calstat` is `Uncalibrated` (invariant 9).
    pub arrname: Option<String>,
    pub fov: Option<f64>,
    pub fov_type: Option<FovType>,
    pub nwave: usize,
    pub records: Vec<FluxRecord>,
}

impl FluxTable {
    pub fn new(revision: i32, insname: impl Into<String>, calstat: CalStat, nwave: usize, n: usize) -> Self {
        FluxTable {
            revision,
            insname: insname.into(),
            calstat,
            arrname: None,
            fov: None,
            fov_type: None,
            nwave,
            records: (0..n).map(|_| FluxRecord::new_default(nwave)).collect(),
        }
    }

    pub fn upgrade_to_v2(&mut self) {
        self.revision = 2;
    }

    /// Invariant 9: ARRNAME and per-record station index presence must
    /// match the calibration status.
    pub fn calibration_consistent(&self) -> bool {
        match self.calstat {
            CalStat::Uncalibrated => {
                self.arrname.is_some() && self.records.iter().all(|r| r.sta_index.is_some())
            }
            CalStat::Calibrated => {
                self.arrname.is_none() && self.records.iter().all(|r| r.sta_index.is_none())
            }
        }
    }
}
