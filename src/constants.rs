// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision: this crate does as many
calculations as possible in double precision before converting to a lower
precision, if it is ever required.
 */

pub use std::f64::consts::PI;

/// Conversion factor from radians to degrees.
pub const RAD2DEG: f64 = 180.0 / PI;

/// The highest OI_REVN this codec understands for ARRAY, TARGET,
/// WAVELENGTH, VIS, VIS2 and T3.
pub const MAX_KNOWN_REVISION: i32 = 2;

/// The highest OI_REVN this codec understands for CORR, INSPOL and FLUX,
/// which have no revision beyond 1.
pub const MAX_KNOWN_REVISION_V2_ONLY: i32 = 1;

/// The sentinel value written/read for an "absent" integer field (e.g. a
/// station index that was never populated).
pub const ABSENT_INT: i32 = -1;

/// The maximum number of offending locations a [`crate::validate::CheckResult`]
/// will list individually before collapsing the remainder into
/// `"[list truncated]"`.
pub const MAX_REPORT: usize = 10;

/// The literal written into the primary header for any mandatory keyword
/// that has no value when `write_fits` is called.
pub const UNSET_KEYWORD: &str = "[unset]";

/// The literal written into a merged header's mandatory keyword when two or
/// more inputs disagree on its value.
pub const MULTIPLE_KEYWORD: &str = "MULTIPLE";

/// The value `write_fits` always stamps into the primary header's CONTENT
/// keyword.
pub const CONTENT_OIFITS2: &str = "OIFITS2";

/// Tolerance (fractional) used to compare ARRAY station diameters for
/// content-equality during a merge.
pub const MERGE_DIAMETER_TOLERANCE: f64 = 1e-3;

/// Tolerance used to compare most other floating-point quantities
/// (coordinates, wavelengths, bandpasses, field of view) for
/// content-equality during a merge.
pub const MERGE_COORD_TOLERANCE: f64 = 1e-10;

/// The longest name (ARRNAME/INSNAME/CORRNAME) this implementation will
/// try to extend with a "_NNN" disambiguator before falling back to a
/// generic "arrayNNN"/"insNNN"/"corrNNN" pattern. FITS string keywords are
/// limited to 68 characters.
pub const MAX_FITS_STRING_KEYWORD_LEN: usize = 68;
