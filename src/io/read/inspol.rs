// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use fitsio::FitsFile;
use log::warn;
use ndarray::Array1;
use num_complex::Complex64;

use crate::model::{InspolRecord, InspolTable};

use super::super::ReadError;
use super::{
    column_repeat, find_next_by_name, find_specific_by_key, mandatory_string, num_rows,
    read_revision,
};

const EXTNAME: &str = "OI_INSPOL";

/// Reads a complex-valued column stored as interleaved real/imaginary
/// single-precision floats, `nwave` complex values per row.
fn read_complex_col(
    fptr: &mut FitsFile,
    hdu: &fitsio::FitsHdu,
    col: &str,
    nrows: usize,
    nwave: usize,
) -> Result<Vec<Array1<Complex64>>, ReadError> {
    let flat: Vec<f64> = hdu.read_col(fptr, col)?;
    let mut out = Vec::with_capacity(nrows);
    for row in flat.chunks(2 * nwave.max(1)).take(nrows) {
        let v: Vec<Complex64> = row.chunks(2).map(|p| Complex64::new(p[0], p[1])).collect();
        out.push(Array1::from(v));
    }
    Ok(out)
}

fn read_at(fptr: &mut FitsFile, hdu: &fitsio::FitsHdu) -> Result<InspolTable, ReadError> {
    if !crate::io::fits::verify_checksum(fptr)? {
        warn!("{EXTNAME}: checksum missing or mismatched");
    }
    let revision = read_revision(fptr, hdu, EXTNAME, crate::constants::MAX_KNOWN_REVISION_V2_ONLY)?;
    let arrname = mandatory_string(fptr, hdu, EXTNAME, "ARRNAME")?;
    let orient = mandatory_string(fptr, hdu, EXTNAME, "ORIENT")?;
    let model = mandatory_string(fptr, hdu, EXTNAME, "MODEL")?;

    let nrows = num_rows(hdu);
    let nwave = column_repeat(hdu, "JXX");

    let target_id: Vec<i32> = hdu.read_col(fptr, "TARGET_ID")?;
    let insname: Vec<String> = hdu.read_col(fptr, "INSNAME")?;
    let mjd_obs: Vec<f64> = hdu.read_col(fptr, "MJD_OBS")?;
    let mjd_end: Vec<f64> = hdu.read_col(fptr, "MJD_END")?;
    let sta_index: Vec<i32> = hdu.read_col(fptr, "STA_INDEX")?;
    let jxx = read_complex_col(fptr, hdu, "JXX", nrows, nwave)?;
    let jyy = read_complex_col(fptr, hdu, "JYY", nrows, nwave)?;
    let jxy = read_complex_col(fptr, hdu, "JXY", nrows, nwave)?;
    let jyx = read_complex_col(fptr, hdu, "JYX", nrows, nwave)?;

    let mut records = Vec::with_capacity(nrows);
    for i in 0..nrows {
        records.push(InspolRecord {
            target_id: target_id[i],
            insname: insname[i].clone(),
            mjd_obs: mjd_obs[i],
            mjd_end: mjd_end[i],
            sta_index: sta_index[i],
            jxx: jxx[i].clone(),
            jyy: jyy[i].clone(),
            jxy: jxy[i].clone(),
            jyx: jyx[i].clone(),
        });
    }

    Ok(InspolTable {
        revision,
        arrname,
        orient,
        model,
        nwave,
        records,
    })
}

pub(crate) fn read_inspol_specific(
    fptr: &mut FitsFile,
    arrname: &str,
) -> Result<InspolTable, ReadError> {
    let (hdu, _) = find_specific_by_key(fptr, EXTNAME, "ARRNAME", arrname)?.ok_or_else(|| {
        ReadError::NoMatchingExtension {
            extname: EXTNAME.to_string(),
            key: arrname.to_string(),
        }
    })?;
    read_at(fptr, &hdu)
}

pub(crate) fn read_inspol_next(
    fptr: &mut FitsFile,
    start_hdu: usize,
) -> Result<Option<(InspolTable, usize)>, ReadError> {
    match find_next_by_name(fptr, EXTNAME, start_hdu)? {
        Some((hdu, hdu_num)) => Ok(Some((read_at(fptr, &hdu)?, hdu_num + 1))),
        None => Ok(None),
    }
}
