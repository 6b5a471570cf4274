// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use fitsio::FitsFile;
use log::warn;

use crate::model::{ArrayTable, Element, Frame, FovType};

use super::super::ReadError;
use super::{find_next_by_name, find_specific_by_key, mandatory_f64, mandatory_string, read_revision};

const EXTNAME: &str = "OI_ARRAY";

fn read_at(fptr: &mut FitsFile, hdu: &fitsio::FitsHdu) -> Result<ArrayTable, ReadError> {
    if !crate::io::fits::verify_checksum(fptr)? {
        warn!("{EXTNAME}: checksum missing or mismatched");
    }

    let revision = read_revision(fptr, hdu, EXTNAME, crate::constants::MAX_KNOWN_REVISION)?;
    let arrname = mandatory_string(fptr, hdu, EXTNAME, "ARRNAME")?;
    let frame_s = mandatory_string(fptr, hdu, EXTNAME, "FRAME")?;
    let frame = Frame::from_str(&frame_s).unwrap_or(Frame::Geocentric);
    let array_xyz = [
        mandatory_f64(fptr, hdu, EXTNAME, "ARRAYX")?,
        mandatory_f64(fptr, hdu, EXTNAME, "ARRAYY")?,
        mandatory_f64(fptr, hdu, EXTNAME, "ARRAYZ")?,
    ];

    let tel_name: Vec<String> = hdu.read_col(fptr, "TEL_NAME")?;
    let sta_name: Vec<String> = hdu.read_col(fptr, "STA_NAME")?;
    let sta_index: Vec<i32> = hdu.read_col(fptr, "STA_INDEX")?;
    let diameter: Vec<f32> = hdu.read_col(fptr, "DIAMETER")?;
    let staxyz: Vec<f64> = hdu.read_col(fptr, "STAXYZ")?;
    let fov: Option<Vec<f64>> = if revision >= 2 {
        hdu.read_col(fptr, "FOV").ok()
    } else {
        None
    };
    let fov_type: Option<Vec<String>> = if revision >= 2 {
        hdu.read_col(fptr, "FOVTYPE").ok()
    } else {
        None
    };

    let n = sta_index.len();
    let mut elements = Vec::with_capacity(n);
    for i in 0..n {
        let mut e = Element::new_default();
        e.tel_name = tel_name[i].clone();
        e.sta_name = sta_name[i].clone();
        e.sta_index = sta_index[i];
        e.diameter = diameter[i] as f64;
        e.sta_xyz = [staxyz[3 * i], staxyz[3 * i + 1], staxyz[3 * i + 2]];
        e.fov = fov.as_ref().map(|v| v[i]);
        e.fov_type = fov_type.as_ref().and_then(|v| FovType::from_str(&v[i]));
        elements.push(e);
    }

    Ok(ArrayTable {
        revision,
        arrname,
        frame,
        array_xyz,
        elements,
    })
}

pub(crate) fn read_array_specific(
    fptr: &mut FitsFile,
    arrname: &str,
) -> Result<ArrayTable, ReadError> {
    let (hdu, _) = find_specific_by_key(fptr, EXTNAME, "ARRNAME", arrname)?.ok_or_else(|| {
        ReadError::NoMatchingExtension {
            extname: EXTNAME.to_string(),
            key: arrname.to_string(),
        }
    })?;
    read_at(fptr, &hdu)
}

pub(crate) fn read_array_next(
    fptr: &mut FitsFile,
    start_hdu: usize,
) -> Result<Option<(ArrayTable, usize)>, ReadError> {
    match find_next_by_name(fptr, EXTNAME, start_hdu)? {
        Some((hdu, hdu_num)) => Ok(Some((read_at(fptr, &hdu)?, hdu_num + 1))),
        None => Ok(None),
    }
}
