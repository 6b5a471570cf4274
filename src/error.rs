// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all oifits-related errors. This should be the *only*
//! error enum that is publicly visible.

use thiserror::Error;

use crate::{
    filter::FilterError,
    io::{ReadError, WriteError},
    merge::MergeError,
};

const URL: &str = "https://github.com/OpenOpticalInterferometry/oifits-standard";

/// The *only* publicly visible error from this crate. Each error message
/// should include the URL, unless it's "generic".
#[derive(Error, Debug)]
pub enum OifitsError {
    /// An error related to reading an OIFITS file.
    #[error("{0}\n\nSee for more info: {URL}")]
    Read(String),

    /// An error related to writing an OIFITS file.
    #[error("{0}\n\nSee for more info: {URL}")]
    Write(String),

    /// An error related to merging datasets.
    #[error("{0}")]
    Merge(String),

    /// An error related to filtering or iterating over a dataset.
    #[error("{0}")]
    Filter(String),

    /// A cfitsio error. Because these are usually quite spartan, some
    /// suggestions are provided here.
    #[error("cfitsio error: {0}\n\nIf you don't know what this means, try turning up verbosity (-v or -vv).")]
    Cfitsio(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

impl From<ReadError> for OifitsError {
    fn from(e: ReadError) -> Self {
        let s = e.to_string();
        match e {
            ReadError::Fitsio(_) => Self::Cfitsio(s),
            ReadError::IO(_) => Self::Generic(s),
            ReadError::BadBinaryTableFormat { .. }
            | ReadError::MissingMandatoryKeyword { .. }
            | ReadError::MissingMandatoryColumn { .. }
            | ReadError::NoMatchingExtension { .. }
            | ReadError::UnnamedBinaryTable { .. }
            | ReadError::InvalidRevision { .. }
            | ReadError::MultipleTargetTables
            | ReadError::MissingTargetTable => Self::Read(s),
        }
    }
}

impl From<WriteError> for OifitsError {
    fn from(e: WriteError) -> Self {
        let s = e.to_string();
        match e {
            WriteError::Fitsio(_) => Self::Cfitsio(s),
            WriteError::IO(_) => Self::Generic(s),
        }
    }
}

impl From<MergeError> for OifitsError {
    fn from(e: MergeError) -> Self {
        let s = e.to_string();
        Self::Merge(s)
    }
}

impl From<FilterError> for OifitsError {
    fn from(e: FilterError) -> Self {
        let s = e.to_string();
        Self::Filter(s)
    }
}

impl From<std::io::Error> for OifitsError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
