// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use fitsio::FitsFile;
use log::warn;
use ndarray::Array1;

use crate::model::{Vis2Record, Vis2Table};

use super::super::ReadError;
use super::{
    column_repeat, find_next_by_name, find_specific_by_key, mandatory_string, num_rows,
    read_chunked_col_bool, read_chunked_col_f64, read_chunked_col_i32, read_revision,
};

const EXTNAME: &str = "OI_VIS2";

fn read_at(fptr: &mut FitsFile, hdu: &fitsio::FitsHdu) -> Result<Vis2Table, ReadError> {
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
    let nwave = column_repeat(hdu, "VIS2DATA").max(1);

    let target_id: Vec<i32> = hdu.read_col(fptr, "TARGET_ID")?;
    let time: Vec<f64> = hdu.read_col(fptr, "TIME")?;
    let mjd: Vec<f64> = hdu.read_col(fptr, "MJD")?;
    let int_time: Vec<f64> = hdu.read_col(fptr, "INT_TIME")?;
    let ucoord: Vec<f64> = hdu.read_col(fptr, "UCOORD")?;
    let vcoord: Vec<f64> = hdu.read_col(fptr, "VCOORD")?;
    let sta_index: Vec<i32> = hdu.read_col(fptr, "STA_INDEX")?;

    let vis2data = read_chunked_col_f64(fptr, hdu, "VIS2DATA", nrows, nwave)?;
    let vis2err = read_chunked_col_f64(fptr, hdu, "VIS2ERR", nrows, nwave)?;
    let flag = read_chunked_col_bool(fptr, hdu, "FLAG", nrows, nwave)?;
    let corrindx = if corrname.is_some() {
        Some(read_chunked_col_i32(fptr, hdu, "CORRINDX_VIS2DATA", nrows, nwave)?)
    } else {
        None
    };

    let mut records = Vec::with_capacity(nrows);
    for i in 0..nrows {
        records.push(Vis2Record {
            target_id: target_id[i],
            time: time[i],
            mjd: mjd[i],
            int_time: int_time[i],
            ucoord: ucoord[i],
            vcoord: vcoord[i],
            sta_index: [sta_index[2 * i], sta_index[2 * i + 1]],
            vis2data: Array1::from(vis2data[i].clone()),
            vis2err: Array1::from(vis2err[i].clone()),
            flag: Array1::from(flag[i].clone()),
            corr_indices: corrindx.as_ref().map(|v| Array1::from(v[i].clone())),
        });
    }

    Ok(Vis2Table {
        revision,
        arrname,
        insname,
        corrname,
        date_obs,
        nwave,
        records,
    })
}

pub(crate) fn read_vis2_specific(
    fptr: &mut FitsFile,
    arrname: &str,
) -> Result<Vis2Table, ReadError> {
    let (hdu, _) = find_specific_by_key(fptr, EXTNAME, "ARRNAME", arrname)?.ok_or_else(|| {
        ReadError::NoMatchingExtension {
            extname: EXTNAME.to_string(),
            key: arrname.to_string(),
        }
    })?;
    read_at(fptr, &hdu)
}

pub(crate) fn read_vis2_next(
    fptr: &mut FitsFile,
    start_hdu: usize,
) -> Result<Option<(Vis2Table, usize)>, ReadError> {
    match find_next_by_name(fptr, EXTNAME, start_hdu)? {
        Some((hdu, hdu_num)) => Ok(Some((read_at(fptr, &hdu)?, hdu_num + 1))),
        None => Ok(None),
    }
}
