// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use fitsio::FitsFile;

use crate::model::{CalStat, FluxTable};

use super::super::{fits::create_binary_table, WriteError};
use super::{concrete_format, write_col_bool, write_col_f64, write_col_i32, write_optional_str};

pub(crate) fn write_flux(fptr: &mut FitsFile, table: &FluxTable) -> Result<(), WriteError> {
    let nwave = table.nwave;
    let uncalibrated = table.calstat == CalStat::Uncalibrated;

    let mut names = vec!["TARGET_ID", "MJD", "INT_TIME", "FLUXDATA", "FLUXERR", "FLAG"];
    let mut formats = vec!["1J", "1D", "1D", "?D", "?D", "?L"];
    let mut units = vec!["", "DAY", "S", "", "", ""];
    if uncalibrated {
        names.push("STA_INDEX");
        formats.push("1J");
        units.push("");
    }

    let names: Vec<String> = names.into_iter().map(String::from).collect();
    let formats: Vec<String> = formats.into_iter().map(|f| concrete_format(f, nwave)).collect();
    let units: Vec<String> = units.into_iter().map(String::from).collect();

    let hdu_num = create_binary_table(fptr, "OI_FLUX", table.records.len() as i64, &names, &formats, &units)?;
    let hdu = fptr.hdu(hdu_num)?;
    hdu.write_key(fptr, "OI_REVN", 1)?;
    hdu.write_key(fptr, "INSNAME", table.insname.as_str())?;
    hdu.write_key(fptr, "CALSTAT", table.calstat.as_char().to_string())?;
    if uncalibrated {
        write_optional_str(fptr, &hdu, "ARRNAME", table.arrname.as_deref())?;
    }
    if let Some(fov) = table.fov {
        hdu.write_key(fptr, "FOV", fov)?;
    }
    if let Some(ft) = table.fov_type {
        hdu.write_key(fptr, "FOVTYPE", ft.as_str())?;
    }

    write_col_i32(fptr, 1, &table.records.iter().map(|r| r.target_id).collect::<Vec<_>>())?;
    write_col_f64(fptr, 2, &table.records.iter().map(|r| r.mjd).collect::<Vec<_>>())?;
    write_col_f64(fptr, 3, &table.records.iter().map(|r| r.int_time).collect::<Vec<_>>())?;
    write_col_f64(fptr, 4, &table.records.iter().flat_map(|r| r.fluxdata.to_vec()).collect::<Vec<_>>())?;
    write_col_f64(fptr, 5, &table.records.iter().flat_map(|r| r.fluxerr.to_vec()).collect::<Vec<_>>())?;
    write_col_bool(fptr, 6, &table.records.iter().flat_map(|r| r.flag.to_vec()).collect::<Vec<_>>())?;
    if uncalibrated {
        write_col_i32(
            fptr,
            7,
            &table.records.iter().map(|r| r.sta_index.unwrap_or(-1)).collect::<Vec<_>>(),
        )?;
    }

    crate::io::fits::write_checksum(fptr)?;
    Ok(())
}
