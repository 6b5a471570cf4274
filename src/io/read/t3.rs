// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use fitsio::FitsFile;
use log::warn;
use ndarray::Array1;

use crate::model::{T3Record, T3Table};

use super::super::ReadError;
use super::{
    column_repeat, find_next_by_name, find_specific_by_key, mandatory_string, num_rows,
    read_chunked_col_bool, read_chunked_col_f64, read_chunked_col_i32, read_revision,
};

const EXTNAME: &str = "OI_T3";

fn read_at(fptr: &mut FitsFile, hdu: &fitsio::FitsHdu) -> Result<T3Table, ReadError> {
    if !crate::io::fits::verify_checksum(fptr)? {
        warn!("{EXTNAME}: checksum missing or mismatched");
    }
    let revision = read_revision(fptr, hdu, EXTNAME, crate::constants::MAX_KNOWN_REVISION)?;
    let arrname = mandatory_string(fptr, hdu, EXTNAME, "ARRNAME")?;
    let insname = mandatory_string(fptr, hdu, EXTNAME, "INSNAME")?;
    let date_obs = mandatory_string(fptr, hdu, EXTNAME, "DATE-OBS")?;
    let corrname = if revision >= 2 {
        hdu.read_key::<String>(fptr, "CORRNAME").ok()
    } else {
        None
    };

    let nrows = num_rows(hdu);
    let nwave = column_repeat(hdu, "T3AMP").max(1);

    let target_id: Vec<i32> = hdu.read_col(fptr, "TARGET_ID")?;
    let time: Vec<f64> = hdu.read_col(fptr, "TIME")?;
    let mjd: Vec<f64> = hdu.read_col(fptr, "MJD")?;
    let int_time: Vec<f64> = hdu.read_col(fptr, "INT_TIME")?;
    let u1coord: Vec<f64> = hdu.read_col(fptr, "U1COORD")?;
    let v1coord: Vec<f64> = hdu.read_col(fptr, "V1COORD")?;
    let u2coord: Vec<f64> = hdu.read_col(fptr, "U2COORD")?;
    let v2coord: Vec<f64> = hdu.read_col(fptr, "V2COORD")?;
    let sta_index: Vec<i32> = hdu.read_col(fptr, "STA_INDEX")?;

    let t3amp = read_chunked_col_f64(fptr, hdu, "T3AMP", nrows, nwave)?;
    let t3amperr = read_chunked_col_f64(fptr, hdu, "T3AMPERR", nrows, nwave)?;
    let t3phi = read_chunked_col_f64(fptr, hdu, "T3PHI", nrows, nwave)?;
    let t3phierr = read_chunked_col_f64(fptr, hdu, "T3PHIERR", nrows, nwave)?;
    let flag = read_chunked_col_bool(fptr, hdu, "FLAG", nrows, nwave)?;
    let corrindx_amp = if corrname.is_some() {
        Some(read_chunked_col_i32(fptr, hdu, "CORRINDX_T3AMP", nrows, nwave)?)
    } else {
        None
    };
    let corrindx_phi = if corrname.is_some() {
        Some(read_chunked_col_i32(fptr, hdu, "CORRINDX_T3PHI", nrows, nwave)?)
    } else {
        None
    };

    let mut records = Vec::with_capacity(nrows);
    for i in 0..nrows {
        records.push(T3Record {
            target_id: target_id[i],
            time: time[i],
            mjd: mjd[i],
            int_time: int_time[i],
            u1coord: u1coord[i],
            v1coord: v1coord[i],
            u2coord: u2coord[i],
            v2coord: v2coord[i],
            sta_index: [sta_index[3 * i], sta_index[3 * i + 1], sta_index[3 * i + 2]],
            t3amp: Array1::from(t3amp[i].clone()),
            t3amperr: Array1::from(t3amperr[i].clone()),
            t3phi: Array1::from(t3phi[i].clone()),
            t3phierr: Array1::from(t3phierr[i].clone()),
            flag: Array1::from(flag[i].clone()),
            corrindx_t3amp: corrindx_amp.as_ref().map(|v| Array1::from(v[i].clone())),
            corrindx_t3phi: corrindx_phi.as_ref().map(|v| Array1::from(v[i].clone())),
        });
    }

    Ok(T3Table {
        revision,
        arrname,
        insname,
        corrname,
        date_obs,
        nwave,
        records,
    })
}

pub(crate) fn read_t3_specific(fptr: &mut FitsFile, arrname: &str) -> Result<T3Table, ReadError> {
    let (hdu, _) = find_specific_by_key(fptr, EXTNAME, "ARRNAME", arrname)?.ok_or_else(|| {
        ReadError::NoMatchingExtension {
            extname: EXTNAME.to_string(),
            key: arrname.to_string(),
        }
    })?;
    read_at(fptr, &hdu)
}

pub(crate) fn read_t3_next(
    fptr: &mut FitsFile,
    start_hdu: usize,
) -> Result<Option<(T3Table, usize)>, ReadError> {
    match find_next_by_name(fptr, EXTNAME, start_hdu)? {
        Some((hdu, hdu_num)) => Ok(Some((read_at(fptr, &hdu)?, hdu_num + 1))),
        None => Ok(None),
    }
}
