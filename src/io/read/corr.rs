// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use fitsio::FitsFile;
use log::warn;

use crate::model::CorrTable;

use super::super::ReadError;
use super::{find_next_by_name, find_specific_by_key, mandatory_i32, mandatory_string, read_revision};

const EXTNAME: &str = "OI_CORR";

fn read_at(fptr: &mut FitsFile, hdu: &fitsio::FitsHdu) -> Result<CorrTable, ReadError> {
    if !crate::io::fits::verify_checksum(fptr)? {
        warn!("{EXTNAME}: checksum missing or mismatched");
    }
    let revision = read_revision(fptr, hdu, EXTNAME, crate::constants::MAX_KNOWN_REVISION_V2_ONLY)?;
    let corrname = mandatory_string(fptr, hdu, EXTNAME, "CORRNAME")?;
    let ndata = mandatory_i32(fptr, hdu, EXTNAME, "NDATA")?;

    let iindx: Vec<i32> = hdu.read_col(fptr, "IINDX")?;
    let jindx: Vec<i32> = hdu.read_col(fptr, "JINDX")?;
    let corr: Vec<f64> = hdu.read_col(fptr, "CORR")?;

    Ok(CorrTable {
        revision,
        corrname,
        ndata,
        iindx,
        jindx,
        corr,
    })
}

pub(crate) fn read_corr_specific(fptr: &mut FitsFile, corrname: &str) -> Result<CorrTable, ReadError> {
    let (hdu, _) = find_specific_by_key(fptr, EXTNAME, "CORRNAME", corrname)?.ok_or_else(|| {
        ReadError::NoMatchingExtension {
            extname: EXTNAME.to_string(),
            key: corrname.to_string(),
        }
    })?;
    read_at(fptr, &hdu)
}

pub(crate) fn read_corr_next(
    fptr: &mut FitsFile,
    start_hdu: usize,
) -> Result<Option<(CorrTable, usize)>, ReadError> {
    match find_next_by_name(fptr, EXTNAME, start_hdu)? {
        Some((hdu, hdu_num)) => Ok(Some((read_at(fptr, &hdu)?, hdu_num + 1))),
        None => Ok(None),
    }
}
