// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use fitsio::FitsFile;

use crate::model::CorrTable;

use super::super::{fits::create_binary_table, WriteError};
use super::{write_col_f64, write_col_i32};

pub(crate) fn write_corr(fptr: &mut FitsFile, table: &CorrTable, extver: i32) -> Result<(), WriteError> {
    let names = vec!["IINDX".to_string(), "JINDX".to_string(), "CORR".to_string()];
    let formats = vec!["1J".to_string(), "1J".to_string(), "1D".to_string()];
    let units = vec![String::new(), String::new(), String::new()];

    let hdu_num = create_binary_table(fptr, "OI_CORR", table.len() as i64, &names, &formats, &units)?;
    let hdu = fptr.hdu(hdu_num)?;
    hdu.write_key(fptr, "OI_REVN", 1)?;
    hdu.write_key(fptr, "CORRNAME", table.corrname.as_str())?;
    hdu.write_key(fptr, "NDATA", table.ndata)?;
    hdu.write_key(fptr, "EXTVER", extver)?;

    write_col_i32(fptr, 1, &table.iindx)?;
    write_col_i32(fptr, 2, &table.jindx)?;
    write_col_f64(fptr, 3, &table.corr)?;

    crate::io::fits::write_checksum(fptr)?;
    Ok(())
}
