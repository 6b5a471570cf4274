// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The table codec (component B) and file orchestrator (component C).

pub(crate) mod fits;
pub mod orchestrator;
pub(crate) mod read;
pub(crate) mod write;

use thiserror::Error;

/// Errors arising from deserializing a file into a [`crate::model::Dataset`].
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("cfitsio error: {0}")]
    Fitsio(#[from] fitsio::errors::Error),

    #[error("I/O error: {0}")]
    IO(#[from] std::io::Error),

    #[error("extension '{extname}': column '{column}' format repeat count {repeat} exceeds destination buffer size {max}")]
    BadBinaryTableFormat {
        extname: String,
        column: String,
        repeat: usize,
        max: usize,
    },

    #[error("extension '{extname}': missing mandatory keyword '{key}'")]
    MissingMandatoryKeyword { extname: String, key: String },

    #[error("extension '{extname}': missing mandatory column '{column}'")]
    MissingMandatoryColumn { extname: String, column: String },

    #[error("no extension named '{extname}' matching key '{key}' found")]
    NoMatchingExtension { extname: String, key: String },

    #[error("binary table extension at HDU {hdu} has no EXTNAME keyword")]
    UnnamedBinaryTable { hdu: usize },

    #[error("extension '{extname}': revision {revision} is not a valid OIFITS revision")]
    InvalidRevision { extname: String, revision: i32 },

    #[error("file contains more than one OI_TARGET extension")]
    MultipleTargetTables,

    #[error("file is missing the mandatory OI_TARGET extension")]
    MissingTargetTable,
}

/// Errors arising from serializing a [`crate::model::Dataset`] to a file.
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("cfitsio error: {0}")]
    Fitsio(#[from] fitsio::errors::Error),

    #[error("I/O error: {0}")]
    IO(#[from] std::io::Error),
}
