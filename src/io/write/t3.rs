// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use fitsio::FitsFile;

use crate::model::T3Table;

use super::super::{fits::create_binary_table, WriteError};
use super::{concrete_format, write_col_bool, write_col_f64, write_col_i32, write_optional_str};

pub(crate) fn write_t3(fptr: &mut FitsFile, table: &T3Table) -> Result<(), WriteError> {
    let nwave = table.nwave;
    let has_corr = table.corrname.is_some();

    let mut names = vec![
        "TARGET_ID", "TIME", "MJD", "INT_TIME", "T3AMP", "T3AMPERR", "T3PHI", "T3PHIERR",
        "U1COORD", "V1COORD", "U2COORD", "V2COORD", "STA_INDEX", "FLAG",
    ];
    let mut formats = vec!["1J", "1D", "1D", "1D", "?D", "?D", "?D", "?D", "1D", "1D", "1D", "1D", "3J", "?L"];
    let mut units = vec!["", "S", "DAY", "S", "", "", "DEGREES", "DEGREES", "M", "M", "M", "M", "", ""];
    if has_corr {
        names.extend(["CORRINDX_T3AMP", "CORRINDX_T3PHI"]);
        formats.extend(["?J", "?J"]);
        units.extend(["", ""]);
    }

    let names: Vec<String> = names.into_iter().map(String::from).collect();
    let formats: Vec<String> = formats.into_iter().map(|f| concrete_format(f, nwave)).collect();
    let units: Vec<String> = units.into_iter().map(String::from).collect();

    let hdu_num = create_binary_table(fptr, "OI_T3", table.records.len() as i64, &names, &formats, &units)?;
    let hdu = fptr.hdu(hdu_num)?;
    hdu.write_key(fptr, "OI_REVN", 2)?;
    hdu.write_key(fptr, "DATE-OBS", table.date_obs.as_str())?;
    hdu.write_key(fptr, "ARRNAME", table.arrname.as_str())?;
    hdu.write_key(fptr, "INSNAME", table.insname.as_str())?;
    write_optional_str(fptr, &hdu, "CORRNAME", table.corrname.as_deref())?;

    write_col_i32(fptr, 1, &table.records.iter().map(|r| r.target_id).collect::<Vec<_>>())?;
    write_col_f64(fptr, 2, &table.records.iter().map(|_| 0.0_f64).collect::<Vec<_>>())?;
    write_col_f64(fptr, 3, &table.records.iter().map(|r| r.mjd).collect::<Vec<_>>())?;
    write_col_f64(fptr, 4, &table.records.iter().map(|r| r.int_time).collect::<Vec<_>>())?;
    write_col_f64(fptr, 5, &table.records.iter().flat_map(|r| r.t3amp.to_vec()).collect::<Vec<_>>())?;
    write_col_f64(fptr, 6, &table.records.iter().flat_map(|r| r.t3amperr.to_vec()).collect::<Vec<_>>())?;
    write_col_f64(fptr, 7, &table.records.iter().flat_map(|r| r.t3phi.to_vec()).collect::<Vec<_>>())?;
    write_col_f64(fptr, 8, &table.records.iter().flat_map(|r| r.t3phierr.to_vec()).collect::<Vec<_>>())?;
    write_col_f64(fptr, 9, &table.records.iter().map(|r| r.u1coord).collect::<Vec<_>>())?;
    write_col_f64(fptr, 10, &table.records.iter().map(|r| r.v1coord).collect::<Vec<_>>())?;
    write_col_f64(fptr, 11, &table.records.iter().map(|r| r.u2coord).collect::<Vec<_>>())?;
    write_col_f64(fptr, 12, &table.records.iter().map(|r| r.v2coord).collect::<Vec<_>>())?;
    write_col_i32(fptr, 13, &table.records.iter().flat_map(|r| r.sta_index).collect::<Vec<_>>())?;
    write_col_bool(fptr, 14, &table.records.iter().flat_map(|r| r.flag.to_vec()).collect::<Vec<_>>())?;
    if has_corr {
        write_col_i32(
            fptr,
            15,
            &table
                .records
                .iter()
                .flat_map(|r| r.corrindx_t3amp.clone().unwrap_or_default().to_vec())
                .collect::<Vec<_>>(),
        )?;
        write_col_i32(
            fptr,
            16,
            &table
                .records
                .iter()
                .flat_map(|r| r.corrindx_t3phi.clone().unwrap_or_default().to_vec())
                .collect::<Vec<_>>(),
        )?;
    }

    crate::io::fits::write_checksum(fptr)?;
    Ok(())
}
