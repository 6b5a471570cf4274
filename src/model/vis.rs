// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! OI_VIS: complex-visibility measurements.

use ndarray::{Array1, Array2};

/// Amplitude type, introduced at OIFITS2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmpType {
    Absolute,
    Differential,
    CorrelatedFlux,
}

impl AmpType {
    pub fn as_str(self) -> &'static str {
        match self {
            AmpType::Absolute => "absolute",
            AmpType::Differential => "differential",
            AmpType::CorrelatedFlux => "correlated flux",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "absolute" => Some(AmpType::Absolute),
            "differential" => Some(AmpType::Differential),
            "correlated flux" => Some(AmpType::CorrelatedFlux),
            _ => None,
        }
    }
}

/// Phase type, introduced at OIFITS2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhiType {
    Absolute,
    Differential,
}

impl PhiType {
    pub fn as_str(self) -> &'static str {
        match self {
            PhiType::Absolute => "absolute",
            PhiType::Differential => "differential",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "absolute" => Some(PhiType::Absolute),
            "differential" => Some(PhiType::Differential),
            _ => None,
        }
    }
}

/// Real/imaginary visibility channels, present only when the RVIS column
/// was found on read (or requested on a fresh table).
#[derive(Debug, Clone)]
pub struct VisComplex {
    pub rvis: Array1<f64>,
    pub rviserr: Array1<f64>,
    pub ivis: Array1<f64>,
    pub iviserr: Array1<f64>,
}

impl VisComplex {
    pub fn new_default(nwave: usize) -> Self {
        VisComplex {
            rvis: Array1::from_elem(nwave, f64::NAN),
            rviserr: Array1::from_elem(nwave, f64::NAN),
            ivis: Array1::from_elem(nwave, f64::NAN),
            iviserr: Array1::from_elem(nwave, f64::NAN),
        }
    }
}

/// Per-channel anchors into a CORR table, present only when the record's
/// table carries a CORRNAME.
#[derive(Debug, Clone, Default)]
pub struct VisCorrIndices {
    pub visamp: Option<Array1<i32>>,
    pub visphi: Option<Array1<i32>>,
    pub rvis: Option<Array1<i32>>,
    pub ivis: Option<Array1<i32>>,
}

/// One complex-visibility measurement.
#[derive(Debug, Clone)]
pub struct VisRecord {
    pub target_id: i32,
    /// Deprecated at revision >= 2; always written as zero.
    pub time: f64,
    pub mjd: f64,
    pub int_time: f64,
    pub ucoord: f64,
    pub vcoord: f64,
    pub sta_index: [i32; 2],
    pub visamp: Array1<f64>,
    pub visamperr: Array1<f64>,
    pub visphi: Array1<f64>,
    pub visphierr: Array1<f64>,
    pub flag: Array1<bool>,
    pub complex: Option<VisComplex>,
    /// nwave x nwave boolean map, for differential-phase data.
    pub refmap: Option<Array2<bool>>,
    pub corr_indices: Option<VisCorrIndices>,
}

impl VisRecord {
    pub fn new_default(nwave: usize) -> Self {
        VisRecord {
            target_id: -1,
            time: 0.0,
            mjd: f64::NAN,
            int_time: f64::NAN,
            ucoord: f64::NAN,
            vcoord: f64::NAN,
            sta_index: [-1, -1],
            visamp: Array1::from_elem(nwave, f64::NAN),
            visamperr: Array1::from_elem(nwave, f64::NAN),
            visphi: Array1::from_elem(nwave, f64::NAN),
            visphierr: Array1::from_elem(nwave, f64::NAN),
            flag: Array1::from_elem(nwave, false),
            complex: None,
            refmap: None,
            corr_indices: None,
        }
    }

    /// uv radius in metres.
    pub fn baseline(&self) -> f64 {
        (self.ucoord * self.ucoord + self.vcoord * self.vcoord).sqrt()
    }
}

/// Named by (arrname, insname, optional corrname).
#[derive(Debug, Clone)]
pub struct VisTable {
    pub revision: i32,
    pub arrname: String,
    pub insname: String,
    pub corrname: Option<String>,
    pub date_obs: String,
    pub nwave: usize,
    pub records: Vec<VisRecord>,
    pub amp_typ: Option<AmpType>,
    pub phi_typ: Option<PhiType>,
    pub amp_order: Option<i32>,
    pub phi_order: Option<i32>,
    /// Emitted on write only when `amp_typ` is `CorrelatedFlux`.
    pub amp_unit: Option<String>,
}

impl VisTable {
    pub fn new(
        revision: i32,
        arrname: impl Into<String>,
        insname: impl Into<String>,
        nwave: usize,
        n: usize,
    ) -> Self {
        VisTable {
            revision,
            arrname: arrname.into(),
            insname: insname.into(),
            corrname: None,
            date_obs: String::new(),
            nwave,
            records: (0..n).map(|_| VisRecord::new_default(nwave)).collect(),
            amp_typ: None,
            phi_typ: None,
            amp_order: None,
            phi_order: None,
            amp_unit: None,
        }
    }

    pub fn upgrade_to_v2(&mut self) {
        self.revision = 2;
    }

    /// Invariant 10: a differential amp or phi type requires a refmap on
    /// every record; any other type requires its absence.
    pub fn refmap_consistent(&self) -> bool {
        let differential = self.amp_typ == Some(AmpType::Differential)
            || self.phi_typ == Some(PhiType::Differential);
        self.records
            .iter()
            .all(|r| r.refmap.is_some() == differential)
    }
}
