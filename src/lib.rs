// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Reading, writing, merging, filtering and validating OIFITS optical/
//! infrared interferometry datasets (revisions 1 and 2 of the exchange
//! standard).
//!
//! <https://github.com/OpenOpticalInterferometry/oifits-standard>

pub(crate) mod constants;
pub mod error;
pub mod filter;
pub mod io;
pub mod merge;
pub mod model;
pub(crate) mod time;
pub mod validate;

// Re-exports. These are the types and functions most callers need; deeper
// submodule paths remain available for anyone who wants them.
pub use error::OifitsError;
pub use filter::{FilterSpec, T3Iter, VisIter, Vis2Iter};
pub use io::orchestrator::{is_atomic, read_fits, write_fits};
pub use merge::{merge_datasets, MergeError};
pub use model::{
    ArrayTable, CorrTable, Dataset, Element, FluxTable, Header, InspolTable, T3Table, Target,
    TargetTable, VisTable, Vis2Table, WavelengthTable,
};
pub use time::{date2mjd, mjd2date};
pub use validate::{run_all, CheckResult, Severity};
