// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use fitsio::FitsFile;

use crate::model::WavelengthTable;

use super::super::{fits::create_binary_table, WriteError};
use super::write_col_f64;

pub(crate) fn write_wavelength(
    fptr: &mut FitsFile,
    table: &WavelengthTable,
    extver: i32,
) -> Result<(), WriteError> {
    let names = vec!["EFF_WAVE".to_string(), "EFF_BAND".to_string()];
    let formats = vec!["1E".to_string(), "1E".to_string()];
    let units = vec!["METERS".to_string(), "METERS".to_string()];

    let hdu_num = create_binary_table(fptr, "OI_WAVELENGTH", table.nwave() as i64, &names, &formats, &units)?;
    let hdu = fptr.hdu(hdu_num)?;
    hdu.write_key(fptr, "OI_REVN", 2)?;
    hdu.write_key(fptr, "INSNAME", table.insname.as_str())?;
    hdu.write_key(fptr, "EXTVER", extver)?;

    write_col_f64(fptr, 1, table.eff_wave.as_slice().unwrap())?;
    write_col_f64(fptr, 2, table.eff_band.as_slice().unwrap())?;

    crate::io::fits::write_checksum(fptr)?;
    Ok(())
}
