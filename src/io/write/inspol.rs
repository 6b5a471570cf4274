// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use fitsio::FitsFile;
use num_complex::Complex64;

use crate::io::write::concrete_format;
use crate::model::InspolTable;

use super::super::{fits::create_binary_table, WriteError};
use super::{write_col_f64, write_col_i32, write_col_str};

fn flatten_complex(rows: &[ndarray::Array1<Complex64>]) -> Vec<f64> {
    rows.iter()
        .flat_map(|row| row.iter().flat_map(|c| [c.re, c.im]))
        .collect()
}

pub(crate) fn write_inspol(fptr: &mut FitsFile, table: &InspolTable) -> Result<(), WriteError> {
    let names = vec![
        "TARGET_ID", "INSNAME", "MJD_OBS", "MJD_END", "STA_INDEX", "JXX", "JYY", "JXY", "JYX",
    ];
    let formats = vec!["1J", "70A", "1D", "1D", "1J", "?M", "?M", "?M", "?M"];
    let units = vec!["", "", "DAY", "DAY", "", "", "", "", ""];

    let names: Vec<String> = names.into_iter().map(String::from).collect();
    let formats: Vec<String> = formats
        .into_iter()
        .map(|f| concrete_format(f, table.nwave))
        .collect();
    let units: Vec<String> = units.into_iter().map(String::from).collect();

    let hdu_num = create_binary_table(fptr, "OI_INSPOL", table.records.len() as i64, &names, &formats, &units)?;
    let hdu = fptr.hdu(hdu_num)?;
    hdu.write_key(fptr, "OI_REVN", 1)?;
    hdu.write_key(fptr, "ARRNAME", table.arrname.as_str())?;
    hdu.write_key(fptr, "ORIENT", table.orient.as_str())?;
    hdu.write_key(fptr, "MODEL", table.model.as_str())?;
    hdu.write_key(fptr, "NPOL", table.records.len() as i32)?;

    write_col_i32(fptr, 1, &table.records.iter().map(|r| r.target_id).collect::<Vec<_>>())?;
    write_col_str(fptr, 2, &table.records.iter().map(|r| r.insname.clone()).collect::<Vec<_>>())?;
    write_col_f64(fptr, 3, &table.records.iter().map(|r| r.mjd_obs).collect::<Vec<_>>())?;
    write_col_f64(fptr, 4, &table.records.iter().map(|r| r.mjd_end).collect::<Vec<_>>())?;
    write_col_i32(fptr, 5, &table.records.iter().map(|r| r.sta_index).collect::<Vec<_>>())?;
    write_col_f64(fptr, 6, &flatten_complex(&table.records.iter().map(|r| r.jxx.clone()).collect::<Vec<_>>()))?;
    write_col_f64(fptr, 7, &flatten_complex(&table.records.iter().map(|r| r.jyy.clone()).collect::<Vec<_>>()))?;
    write_col_f64(fptr, 8, &flatten_complex(&table.records.iter().map(|r| r.jxy.clone()).collect::<Vec<_>>()))?;
    write_col_f64(fptr, 9, &flatten_complex(&table.records.iter().map(|r| r.jyx.clone()).collect::<Vec<_>>()))?;

    crate::io::fits::write_checksum(fptr)?;
    Ok(())
}
