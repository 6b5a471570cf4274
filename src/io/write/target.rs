// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use fitsio::FitsFile;

use crate::model::TargetTable;

use super::super::{fits::create_binary_table, WriteError};
use super::{write_col_f64, write_col_i32, write_col_str};

const COLS: &[(&str, &str, &str)] = &[
    ("TARGET_ID", "1J", ""),
    ("TARGET", "16A", ""),
    ("RAEP0", "1D", "DEGREES"),
    ("DECEP0", "1D", "DEGREES"),
    ("EQUINOX", "1E", "YEARS"),
    ("RA_ERR", "1D", "DEGREES"),
    ("DEC_ERR", "1D", "DEGREES"),
    ("SYSVEL", "1D", "M/S"),
    ("VELTYP", "8A", ""),
    ("VELDEF", "8A", ""),
    ("PMRA", "1D", "DEG/YR"),
    ("PMDEC", "1D", "DEG/YR"),
    ("PMRA_ERR", "1D", "DEG/YR"),
    ("PMDEC_ERR", "1D", "DEG/YR"),
    ("PARALLAX", "1E", "DEGREES"),
    ("PARA_ERR", "1E", "DEGREES"),
    ("SPECTYP", "16A", ""),
    ("CATEGORY", "3A", ""),
];

pub(crate) fn write_target(fptr: &mut FitsFile, table: &TargetTable) -> Result<(), WriteError> {
    let n = table.targets.len();
    let has_category = table.targets.iter().any(|t| t.category.is_some());
    let names: Vec<String> = COLS
        .iter()
        .filter(|(n, _, _)| *n != "CATEGORY" || has_category)
        .map(|(n, _, _)| n.to_string())
        .collect();
    let formats: Vec<String> = COLS
        .iter()
        .filter(|(n, _, _)| *n != "CATEGORY" || has_category)
        .map(|(_, f, _)| f.to_string())
        .collect();
    let units: Vec<String> = COLS
        .iter()
        .filter(|(n, _, _)| *n != "CATEGORY" || has_category)
        .map(|(_, _, u)| u.to_string())
        .collect();

    let hdu_num = create_binary_table(fptr, "OI_TARGET", n as i64, &names, &formats, &units)?;
    let hdu = fptr.hdu(hdu_num)?;
    hdu.write_key(fptr, "OI_REVN", table.revision)?;

    write_col_i32(fptr, 1, &table.targets.iter().map(|t| t.target_id).collect::<Vec<_>>())?;
    write_col_str(fptr, 2, &table.targets.iter().map(|t| t.target.clone()).collect::<Vec<_>>())?;
    write_col_f64(fptr, 3, &table.targets.iter().map(|t| t.raep0).collect::<Vec<_>>())?;
    write_col_f64(fptr, 4, &table.targets.iter().map(|t| t.decep0).collect::<Vec<_>>())?;
    write_col_f64(fptr, 5, &table.targets.iter().map(|t| t.equinox).collect::<Vec<_>>())?;
    write_col_f64(fptr, 6, &table.targets.iter().map(|t| t.ra_err).collect::<Vec<_>>())?;
    write_col_f64(fptr, 7, &table.targets.iter().map(|t| t.dec_err).collect::<Vec<_>>())?;
    write_col_f64(fptr, 8, &table.targets.iter().map(|t| t.sys_vel).collect::<Vec<_>>())?;
    write_col_str(fptr, 9, &table.targets.iter().map(|t| t.vel_typ.clone()).collect::<Vec<_>>())?;
    write_col_str(fptr, 10, &table.targets.iter().map(|t| t.vel_def.clone()).collect::<Vec<_>>())?;
    write_col_f64(fptr, 11, &table.targets.iter().map(|t| t.pm_ra).collect::<Vec<_>>())?;
    write_col_f64(fptr, 12, &table.targets.iter().map(|t| t.pm_dec).collect::<Vec<_>>())?;
    write_col_f64(fptr, 13, &table.targets.iter().map(|t| t.pm_ra_err).collect::<Vec<_>>())?;
    write_col_f64(fptr, 14, &table.targets.iter().map(|t| t.pm_dec_err).collect::<Vec<_>>())?;
    write_col_f64(fptr, 15, &table.targets.iter().map(|t| t.parallax).collect::<Vec<_>>())?;
    write_col_f64(fptr, 16, &table.targets.iter().map(|t| t.para_err).collect::<Vec<_>>())?;
    write_col_str(fptr, 17, &table.targets.iter().map(|t| t.spec_typ.clone()).collect::<Vec<_>>())?;
    if has_category {
        write_col_str(
            fptr,
            18,
            &table
                .targets
                .iter()
                .map(|t| t.category.map(|c| c.as_str().to_string()).unwrap_or_default())
                .collect::<Vec<_>>(),
        )?;
    }

    crate::io::fits::write_checksum(fptr)?;
    Ok(())
}
