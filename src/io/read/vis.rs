// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use fitsio::FitsFile;
use log::warn;
use ndarray::{Array1, Array2};

use crate::model::{AmpType, PhiType, VisComplex, VisCorrIndices, VisRecord, VisTable};

use super::super::ReadError;
use super::{
    column_repeat, find_next_by_name, find_specific_by_key, mandatory_string, num_rows,
    read_chunked_col_bool, read_chunked_col_f64, read_chunked_col_i32, read_revision,
};

const EXTNAME: &str = "OI_VIS";

fn read_at(fptr: &mut FitsFile, hdu: &fitsio::FitsHdu) -> Result<VisTable, ReadError> {
    if !crate::io::fits::verify_checksum(fptr)? {
        warn!("{EXTNAME}: checksum missing or mismatched");
    }
    let revision = read_revision(fptr, hdu, EXTNAME, crate::constants::MAX_KNOWN_REVISION)?;
    let arrname = mandatory_string(fptr, hdu, EXTNAME, "ARRNAME")?;
    let insname = mandatory_string(fptr, hdu, EXTNAME, "INSNAME")?;
    let date_obs = mandatory_string(fptr, hdu, EXTNAME, "DATE-OBS")?;

    let nrows = num_rows(hdu);
    let nwave = column_repeat(hdu, "VISAMP").max(1);

    let target_id: Vec<i32> = hdu.read_col(fptr, "TARGET_ID")?;
    let time: Vec<f64> = hdu.read_col(fptr, "TIME")?;
    let mjd: Vec<f64> = hdu.read_col(fptr, "MJD")?;
    let int_time: Vec<f64> = hdu.read_col(fptr, "INT_TIME")?;
    let ucoord: Vec<f64> = hdu.read_col(fptr, "UCOORD")?;
    let vcoord: Vec<f64> = hdu.read_col(fptr, "VCOORD")?;
    let sta_index: Vec<i32> = hdu.read_col(fptr, "STA_INDEX")?;

    let visamp = read_chunked_col_f64(fptr, hdu, "VISAMP", nrows, nwave)?;
    let visamperr = read_chunked_col_f64(fptr, hdu, "VISAMPERR", nrows, nwave)?;
    let visphi = read_chunked_col_f64(fptr, hdu, "VISPHI", nrows, nwave)?;
    let visphierr = read_chunked_col_f64(fptr, hdu, "VISPHIERR", nrows, nwave)?;
    let flag = read_chunked_col_bool(fptr, hdu, "FLAG", nrows, nwave)?;

    let (amp_typ, phi_typ, amp_order, phi_order, corrname) = if revision >= 2 {
        (
            hdu.read_key::<String>(fptr, "AMPTYP").ok().and_then(|s| AmpType::from_str(&s)),
            hdu.read_key::<String>(fptr, "PHITYP").ok().and_then(|s| PhiType::from_str(&s)),
            hdu.read_key::<i32>(fptr, "AMPORDER").ok(),
            hdu.read_key::<i32>(fptr, "PHIORDER").ok(),
            hdu.read_key::<String>(fptr, "CORRNAME").ok(),
        )
    } else {
        (None, None, None, None, None)
    };

    let (corrindx_visamp, corrindx_visphi) = if corrname.is_some() {
        (
            Some(read_chunked_col_i32(fptr, hdu, "CORRINDX_VISAMP", nrows, nwave)?),
            Some(read_chunked_col_i32(fptr, hdu, "CORRINDX_VISPHI", nrows, nwave)?),
        )
    } else {
        (None, None)
    };

    let use_refmap = revision >= 2 && column_repeat(hdu, "VISREFMAP") > 0 && hdu
        .read_col::<bool>(fptr, "VISREFMAP")
        .is_ok();
    let refmap_flat: Option<Vec<bool>> = if use_refmap {
        hdu.read_col(fptr, "VISREFMAP").ok()
    } else {
        None
    };

    let use_complex = revision >= 2 && hdu.read_col::<f32>(fptr, "RVIS").is_ok();
    let (rvis, rviserr, ivis, iviserr, amp_unit) = if use_complex {
        (
            Some(read_chunked_col_f64(fptr, hdu, "RVIS", nrows, nwave)?),
            Some(read_chunked_col_f64(fptr, hdu, "RVISERR", nrows, nwave)?),
            Some(read_chunked_col_f64(fptr, hdu, "IVIS", nrows, nwave)?),
            Some(read_chunked_col_f64(fptr, hdu, "IVISERR", nrows, nwave)?),
            None, // TUNIT of RVIS is informational only on read.
        )
    } else {
        (None, None, None, None, None)
    };
    let (corrindx_rvis, corrindx_ivis) = if use_complex && corrname.is_some() {
        (
            Some(read_chunked_col_i32(fptr, hdu, "CORRINDX_RVIS", nrows, nwave)?),
            Some(read_chunked_col_i32(fptr, hdu, "CORRINDX_IVIS", nrows, nwave)?),
        )
    } else {
        (None, None)
    };

    let mut records = Vec::with_capacity(nrows);
    for i in 0..nrows {
        let complex = if use_complex {
            Some(VisComplex {
                rvis: Array1::from(rvis.as_ref().unwrap()[i].clone()),
                rviserr: Array1::from(rviserr.as_ref().unwrap()[i].clone()),
                ivis: Array1::from(ivis.as_ref().unwrap()[i].clone()),
                iviserr: Array1::from(iviserr.as_ref().unwrap()[i].clone()),
            })
        } else {
            None
        };
        let refmap = refmap_flat.as_ref().map(|flat| {
            let start = i * nwave * nwave;
            Array2::from_shape_vec((nwave, nwave), flat[start..start + nwave * nwave].to_vec())
                .unwrap()
        });
        let corr_indices = if corrname.is_some() {
            Some(VisCorrIndices {
                visamp: corrindx_visamp.as_ref().map(|v| Array1::from(v[i].clone())),
                visphi: corrindx_visphi.as_ref().map(|v| Array1::from(v[i].clone())),
                rvis: corrindx_rvis.as_ref().map(|v| Array1::from(v[i].clone())),
                ivis: corrindx_ivis.as_ref().map(|v| Array1::from(v[i].clone())),
            })
        } else {
            None
        };

        records.push(VisRecord {
            target_id: target_id[i],
            time: time[i],
            mjd: mjd[i],
            int_time: int_time[i],
            ucoord: ucoord[i],
            vcoord: vcoord[i],
            sta_index: [sta_index[2 * i], sta_index[2 * i + 1]],
            visamp: Array1::from(visamp[i].clone()),
            visamperr: Array1::from(visamperr[i].clone()),
            visphi: Array1::from(visphi[i].clone()),
            visphierr: Array1::from(visphierr[i].clone()),
            flag: Array1::from(flag[i].clone()),
            complex,
            refmap,
            corr_indices,
        });
    }

    Ok(VisTable {
        revision,
        arrname,
        insname,
        corrname,
        date_obs,
        nwave,
        records,
        amp_typ,
        phi_typ,
        amp_order,
        phi_order,
        amp_unit,
    })
}

pub(crate) fn read_vis_specific(
    fptr: &mut FitsFile,
    arrname: &str,
) -> Result<VisTable, ReadError> {
    let (hdu, _) = find_specific_by_key(fptr, EXTNAME, "ARRNAME", arrname)?.ok_or_else(|| {
        ReadError::NoMatchingExtension {
            extname: EXTNAME.to_string(),
            key: arrname.to_string(),
        }
    })?;
    read_at(fptr, &hdu)
}

pub(crate) fn read_vis_next(
    fptr: &mut FitsFile,
    start_hdu: usize,
) -> Result<Option<(VisTable, usize)>, ReadError> {
    match find_next_by_name(fptr, EXTNAME, start_hdu)? {
        Some((hdu, hdu_num)) => Ok(Some((read_at(fptr, &hdu)?, hdu_num + 1))),
        None => Ok(None),
    }
}
