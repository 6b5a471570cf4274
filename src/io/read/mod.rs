// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Per-extension deserialization (read-specific / read-next).

mod array;
mod corr;
mod flux;
mod inspol;
mod t3;
mod target;
mod vis;
mod vis2;
mod wavelength;

pub(crate) use array::{read_array_next, read_array_specific};
pub(crate) use corr::{read_corr_next, read_corr_specific};
pub(crate) use flux::{read_flux_next, read_flux_specific};
pub(crate) use inspol::{read_inspol_next, read_inspol_specific};
pub(crate) use t3::{read_t3_next, read_t3_specific};
pub(crate) use target::read_target;
pub(crate) use vis::{read_vis_next, read_vis_specific};
pub(crate) use vis2::{read_vis2_next, read_vis2_specific};
pub(crate) use wavelength::{read_wavelength_next, read_wavelength_specific};

use fitsio::{hdu::HduInfo, FitsFile, FitsHdu};
use log::warn;

use super::ReadError;

/// Scans forward from `start_hdu` (the file's 0-indexed HDU number) for the
/// next binary-table extension named `extname`, skipping anything else and
/// warning on unnamed binary tables. Returns the matching [`FitsHdu`] and
/// its HDU number, or `None` at EOF.
pub(crate) fn find_next_by_name(
    fptr: &mut FitsFile,
    extname: &str,
    start_hdu: usize,
) -> Result<Option<(FitsHdu, usize)>, ReadError> {
    let mut hdu_num = start_hdu;
    loop {
        let hdu = match fptr.hdu(hdu_num) {
            Ok(hdu) => hdu,
            Err(_) => return Ok(None), // EOF is not an error.
        };
        if let HduInfo::TableInfo { .. } = hdu.info {
            match hdu.read_key::<String>(fptr, "EXTNAME") {
                Ok(name) if name.trim() == extname => return Ok(Some((hdu, hdu_num))),
                Ok(_) => {}
                Err(_) => warn!("binary table at HDU {hdu_num} has no EXTNAME keyword"),
            }
        }
        hdu_num += 1;
    }
}

/// Scans from the start of the file for the first binary-table extension
/// named `extname` whose unique-key keyword (ARRNAME/INSNAME/CORRNAME)
/// equals `key_value`.
pub(crate) fn find_specific_by_key(
    fptr: &mut FitsFile,
    extname: &str,
    key: &str,
    key_value: &str,
) -> Result<Option<(FitsHdu, usize)>, ReadError> {
    let mut hdu_num = 0;
    while let Some((hdu, num)) = find_next_by_name(fptr, extname, hdu_num)? {
        if let Ok(v) = hdu.read_key::<String>(fptr, key) {
            if v.trim() == key_value {
                return Ok(Some((hdu, num)));
            }
        }
        hdu_num = num + 1;
    }
    Ok(None)
}

pub(crate) fn mandatory_string(
    fptr: &mut FitsFile,
    hdu: &FitsHdu,
    extname: &str,
    key: &str,
) -> Result<String, ReadError> {
    hdu.read_key::<String>(fptr, key)
        .map_err(|_| ReadError::MissingMandatoryKeyword {
            extname: extname.to_string(),
            key: key.to_string(),
        })
}

pub(crate) fn optional_string(fptr: &mut FitsFile, hdu: &FitsHdu, key: &str) -> Option<String> {
    hdu.read_key::<String>(fptr, key).ok().map(|s| s.trim().to_string())
}

pub(crate) fn mandatory_f64(
    fptr: &mut FitsFile,
    hdu: &FitsHdu,
    extname: &str,
    key: &str,
) -> Result<f64, ReadError> {
    hdu.read_key::<f64>(fptr, key)
        .map_err(|_| ReadError::MissingMandatoryKeyword {
            extname: extname.to_string(),
            key: key.to_string(),
        })
}

pub(crate) fn mandatory_i32(
    fptr: &mut FitsFile,
    hdu: &FitsHdu,
    extname: &str,
    key: &str,
) -> Result<i32, ReadError> {
    hdu.read_key::<i32>(fptr, key)
        .map_err(|_| ReadError::MissingMandatoryKeyword {
            extname: extname.to_string(),
            key: key.to_string(),
        })
}

/// Reads the OIFITS revision stamp, warning (not failing) if it exceeds
/// `max_known`.
pub(crate) fn read_revision(
    fptr: &mut FitsFile,
    hdu: &FitsHdu,
    extname: &str,
    max_known: i32,
) -> Result<i32, ReadError> {
    let revision = mandatory_i32(fptr, hdu, extname, "OI_REVN")?;
    if revision > max_known {
        warn!(
            "extension '{extname}' has revision {revision}, newer than the {max_known} this crate knows; reading with the known schema"
        );
    }
    Ok(revision)
}

pub(crate) fn num_rows(hdu: &FitsHdu) -> usize {
    match &hdu.info {
        HduInfo::TableInfo { num_rows, .. } => *num_rows,
        _ => 0,
    }
}

/// The repeat count (vector length) of a table column, e.g. `nwave` for a
/// per-channel column. Defaults to 1 if the column isn't found.
pub(crate) fn column_repeat(hdu: &FitsHdu, col: &str) -> usize {
    match &hdu.info {
        HduInfo::TableInfo {
            column_descriptions,
            ..
        } => column_descriptions
            .iter()
            .find(|c| c.name == col)
            .map(|c| c.data_type.repeat)
            .unwrap_or(1),
        _ => 1,
    }
}

/// Reads a full numeric column, flattened across rows, and reshapes it
/// into `nrows` chunks of `repeat` elements each. Used for per-channel
/// sequences (nwave per row).
pub(crate) fn read_chunked_col_f64(
    fptr: &mut FitsFile,
    hdu: &FitsHdu,
    col: &str,
    nrows: usize,
    repeat: usize,
) -> Result<Vec<Vec<f64>>, ReadError> {
    let flat: Vec<f64> = hdu.read_col(fptr, col)?;
    Ok(flat.chunks(repeat.max(1)).map(|c| c.to_vec()).take(nrows).collect())
}

pub(crate) fn read_chunked_col_bool(
    fptr: &mut FitsFile,
    hdu: &FitsHdu,
    col: &str,
    nrows: usize,
    repeat: usize,
) -> Result<Vec<Vec<bool>>, ReadError> {
    let flat: Vec<bool> = hdu.read_col(fptr, col)?;
    Ok(flat.chunks(repeat.max(1)).map(|c| c.to_vec()).take(nrows).collect())
}

pub(crate) fn read_chunked_col_i32(
    fptr: &mut FitsFile,
    hdu: &FitsHdu,
    col: &str,
    nrows: usize,
    repeat: usize,
) -> Result<Vec<Vec<i32>>, ReadError> {
    let flat: Vec<i32> = hdu.read_col(fptr, col)?;
    Ok(flat.chunks(repeat.max(1)).map(|c| c.to_vec()).take(nrows).collect())
}
