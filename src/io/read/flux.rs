// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Revision-1 files may name this extension OI_SPECTRUM; both names are
// read into the same FluxTable.

use fitsio::{hdu::HduInfo, FitsFile};
use log::warn;
use ndarray::Array1;

use crate::model::{CalStat, FluxRecord, FluxTable, FovType};

use super::super::ReadError;
use super::{column_repeat, mandatory_string, num_rows, read_chunked_col_bool, read_chunked_col_f64, read_revision};

const NAMES: [&str; 2] = ["OI_FLUX", "OI_SPECTRUM"];

fn find_next(
    fptr: &mut FitsFile,
    start_hdu: usize,
) -> Result<Option<(fitsio::FitsHdu, usize)>, ReadError> {
    let mut hdu_num = start_hdu;
    loop {
        let hdu = match fptr.hdu(hdu_num) {
            Ok(hdu) => hdu,
            Err(_) => return Ok(None),
        };
        if let HduInfo::TableInfo { .. } = hdu.info {
            match hdu.read_key::<String>(fptr, "EXTNAME") {
                Ok(name) if NAMES.contains(&name.trim()) => return Ok(Some((hdu, hdu_num))),
                Ok(_) => {}
                Err(_) => warn!("binary table at HDU {hdu_num} has no EXTNAME keyword"),
            }
        }
        hdu_num += 1;
    }
}

fn find_specific(
    fptr: &mut FitsFile,
    insname: &str,
) -> Result<Option<(fitsio::FitsHdu, usize)>, ReadError> {
    let mut hdu_num = 0;
    while let Some((hdu, num)) = find_next(fptr, hdu_num)? {
        if let Ok(v) = hdu.read_key::<String>(fptr, "INSNAME") {
            if v.trim() == insname {
                return Ok(Some((hdu, num)));
            }
        }
        hdu_num = num + 1;
    }
    Ok(None)
}

fn read_at(fptr: &mut FitsFile, hdu: &fitsio::FitsHdu) -> Result<FluxTable, ReadError> {
    if !crate::io::fits::verify_checksum(fptr)? {
        warn!("OI_FLUX: checksum missing or mismatched");
    }
    let revision = read_revision(fptr, hdu, "OI_FLUX", crate::constants::MAX_KNOWN_REVISION_V2_ONLY)?;
    let insname = mandatory_string(fptr, hdu, "OI_FLUX", "INSNAME")?;
    let calstat_s = mandatory_string(fptr, hdu, "OI_FLUX", "CALSTAT")?;
    let calstat = CalStat::from_char(calstat_s.trim().chars().next().unwrap_or('U'))
        .unwrap_or(CalStat::Uncalibrated);
    let arrname = hdu.read_key::<String>(fptr, "ARRNAME").ok();
    let fov = hdu.read_key::<f64>(fptr, "FOV").ok();
    let fov_type = hdu
        .read_key::<String>(fptr, "FOVTYPE")
        .ok()
        .and_then(|s| FovType::from_str(&s));

    let nrows = num_rows(hdu);
    let nwave = column_repeat(hdu, "FLUXDATA").max(1);

    let target_id: Vec<i32> = hdu.read_col(fptr, "TARGET_ID")?;
    let mjd: Vec<f64> = hdu.read_col(fptr, "MJD")?;
    let int_time: Vec<f64> = hdu.read_col(fptr, "INT_TIME")?;
    let fluxdata = read_chunked_col_f64(fptr, hdu, "FLUXDATA", nrows, nwave)?;
    let fluxerr = read_chunked_col_f64(fptr, hdu, "FLUXERR", nrows, nwave)?;
    let flag = read_chunked_col_bool(fptr, hdu, "FLAG", nrows, nwave)?;
    let sta_index: Option<Vec<i32>> = hdu.read_col(fptr, "STA_INDEX").ok();

    let mut records = Vec::with_capacity(nrows);
    for i in 0..nrows {
        records.push(FluxRecord {
            target_id: target_id[i],
            mjd: mjd[i],
            int_time: int_time[i],
            fluxdata: Array1::from(fluxdata[i].clone()),
            fluxerr: Array1::from(fluxerr[i].clone()),
            flag: Array1::from(flag[i].clone()),
            sta_index: sta_index.as_ref().map(|v| v[i]),
        });
    }

    Ok(FluxTable {
        revision,
        insname,
        calstat,
        arrname,
        fov,
        fov_type,
        nwave,
        records,
    })
}

pub(crate) fn read_flux_specific(fptr: &mut FitsFile, insname: &str) -> Result<FluxTable, ReadError> {
    let (hdu, _) = find_specific(fptr, insname)?.ok_or_else(|| ReadError::NoMatchingExtension {
        extname: "OI_FLUX".to_string(),
        key: insname.to_string(),
    })?;
    read_at(fptr, &hdu)
}

pub(crate) fn read_flux_next(
    fptr: &mut FitsFile,
    start_hdu: usize,
) -> Result<Option<(FluxTable, usize)>, ReadError> {
    match find_next(fptr, start_hdu)? {
        Some((hdu, hdu_num)) => Ok(Some((read_at(fptr, &hdu)?, hdu_num + 1))),
        None => Ok(None),
    }
}
