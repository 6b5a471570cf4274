// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use fitsio::FitsFile;
use log::warn;
use ndarray::Array1;

use crate::model::WavelengthTable;

use super::super::ReadError;
use super::{find_next_by_name, find_specific_by_key, mandatory_string, read_revision};

const EXTNAME: &str = "OI_WAVELENGTH";

fn read_at(fptr: &mut FitsFile, hdu: &fitsio::FitsHdu) -> Result<WavelengthTable, ReadError> {
    if !crate::io::fits::verify_checksum(fptr)? {
        warn!("{EXTNAME}: checksum missing or mismatched");
    }
    let revision = read_revision(fptr, hdu, EXTNAME, crate::constants::MAX_KNOWN_REVISION)?;
    let insname = mandatory_string(fptr, hdu, EXTNAME, "INSNAME")?;

    let eff_wave: Vec<f32> = hdu.read_col(fptr, "EFF_WAVE")?;
    let eff_band: Vec<f32> = hdu.read_col(fptr, "EFF_BAND")?;

    Ok(WavelengthTable {
        revision,
        insname,
        eff_wave: Array1::from(eff_wave.iter().map(|&x| x as f64).collect::<Vec<_>>()),
        eff_band: Array1::from(eff_band.iter().map(|&x| x as f64).collect::<Vec<_>>()),
    })
}

pub(crate) fn read_wavelength_specific(
    fptr: &mut FitsFile,
    insname: &str,
) -> Result<WavelengthTable, ReadError> {
    let (hdu, _) = find_specific_by_key(fptr, EXTNAME, "INSNAME", insname)?.ok_or_else(|| {
        ReadError::NoMatchingExtension {
            extname: EXTNAME.to_string(),
            key: insname.to_string(),
        }
    })?;
    read_at(fptr, &hdu)
}

pub(crate) fn read_wavelength_next(
    fptr: &mut FitsFile,
    start_hdu: usize,
) -> Result<Option<(WavelengthTable, usize)>, ReadError> {
    match find_next_by_name(fptr, EXTNAME, start_hdu)? {
        Some((hdu, hdu_num)) => Ok(Some((read_at(fptr, &hdu)?, hdu_num + 1))),
        None => Ok(None),
    }
}
