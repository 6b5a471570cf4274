// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The typed in-memory representation of an OIFITS dataset (component A).
//!
//! Every extension kind gets its own record type and table type. Optional
//! fields are modeled as `Option<T>` rather than a paired "usage flag plus
//! unused buffer", so absence is statically distinguishable from a present
//! default value. Per-channel sequences are [`ndarray::Array1`]/[`ndarray::Array2`]
//! buffers of length `nwave` (or `nwave x nwave` for a VIS refmap).

mod array;
mod corr;
mod dataset;
mod flux;
mod header;
mod inspol;
mod target;
mod t3;
mod vis;
mod vis2;
mod wavelength;

pub use array::{ArrayTable, Element, Frame};
pub use corr::CorrTable;
pub use dataset::Dataset;
pub use flux::{CalStat, FluxRecord, FluxTable};
pub use header::Header;
pub use inspol::{InspolRecord, InspolTable};
pub use target::{Category, Target, TargetTable};
pub use t3::{T3Record, T3Table};
pub use vis::{AmpType, PhiType, VisComplex, VisCorrIndices, VisRecord, VisTable};
pub use vis2::{Vis2Record, Vis2Table};
pub use wavelength::WavelengthTable;

/// Field-of-view model tag, introduced at OIFITS2 on ARRAY elements and on
/// FLUX tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FovType {
    Fwhm,
    Radius,
}

impl FovType {
    pub fn as_str(self) -> &'static str {
        match self {
            FovType::Fwhm => "FWHM",
            FovType::Radius => "RADIUS",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "FWHM" => Some(FovType::Fwhm),
            "RADIUS" => Some(FovType::Radius),
            _ => None,
        }
    }
}
