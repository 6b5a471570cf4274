// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use fitsio::FitsFile;

use crate::model::ArrayTable;

use super::super::{fits::create_binary_table, WriteError};
use super::{write_col_f64, write_col_i32, write_col_str};

pub(crate) fn write_array(fptr: &mut FitsFile, table: &ArrayTable, extver: i32) -> Result<(), WriteError> {
    let rev2 = table.revision.max(2) >= 2;
    let mut names = vec!["TEL_NAME", "STA_NAME", "STA_INDEX", "DIAMETER", "STAXYZ"];
    let mut formats = vec!["16A", "16A", "1J", "1E", "3D"];
    let mut units = vec!["", "", "", "METERS", "METERS"];
    if rev2 {
        names.extend(["FOV", "FOVTYPE"]);
        formats.extend(["1D", "6A"]);
        units.extend(["ARCSEC", ""]);
    }
    let names: Vec<String> = names.into_iter().map(String::from).collect();
    let formats: Vec<String> = formats.into_iter().map(String::from).collect();
    let units: Vec<String> = units.into_iter().map(String::from).collect();

    let hdu_num = create_binary_table(
        fptr,
        "OI_ARRAY",
        table.elements.len() as i64,
        &names,
        &formats,
        &units,
    )?;
    let hdu = fptr.hdu(hdu_num)?;
    hdu.write_key(fptr, "OI_REVN", 2)?;
    hdu.write_key(fptr, "ARRNAME", table.arrname.as_str())?;
    hdu.write_key(fptr, "FRAME", table.frame.as_str())?;
    hdu.write_key(fptr, "ARRAYX", table.array_xyz[0])?;
    hdu.write_key(fptr, "ARRAYY", table.array_xyz[1])?;
    hdu.write_key(fptr, "ARRAYZ", table.array_xyz[2])?;
    hdu.write_key(fptr, "EXTVER", extver)?;

    write_col_str(fptr, 1, &table.elements.iter().map(|e| e.tel_name.clone()).collect::<Vec<_>>())?;
    write_col_str(fptr, 2, &table.elements.iter().map(|e| e.sta_name.clone()).collect::<Vec<_>>())?;
    write_col_i32(fptr, 3, &table.elements.iter().map(|e| e.sta_index).collect::<Vec<_>>())?;
    write_col_f64(fptr, 4, &table.elements.iter().map(|e| e.diameter).collect::<Vec<_>>())?;
    write_col_f64(
        fptr,
        5,
        &table
            .elements
            .iter()
            .flat_map(|e| e.sta_xyz)
            .collect::<Vec<_>>(),
    )?;
    if rev2 {
        write_col_f64(
            fptr,
            6,
            &table
                .elements
                .iter()
                .map(|e| e.fov.unwrap_or(f64::NAN))
                .collect::<Vec<_>>(),
        )?;
        write_col_str(
            fptr,
            7,
            &table
                .elements
                .iter()
                .map(|e| e.fov_type.map(|f| f.as_str().to_string()).unwrap_or_default())
                .collect::<Vec<_>>(),
        )?;
    }

    crate::io::fits::write_checksum(fptr)?;
    Ok(())
}
