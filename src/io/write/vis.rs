// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use fitsio::FitsFile;

use crate::model::{AmpType, VisTable};

use super::super::{fits::create_binary_table, WriteError};
use super::{concrete_format, write_col_bool, write_col_f64, write_col_i32, write_optional_str};

pub(crate) fn write_vis(fptr: &mut FitsFile, table: &VisTable) -> Result<(), WriteError> {
    let nwave = table.nwave;
    let use_complex = table.records.iter().any(|r| r.complex.is_some());
    let use_refmap = table.records.iter().any(|r| r.refmap.is_some());
    let has_corr = table.corrname.is_some();

    let mut names = vec!["TARGET_ID", "TIME", "MJD", "INT_TIME", "VISAMP", "VISAMPERR", "VISPHI", "VISPHIERR", "UCOORD", "VCOORD", "STA_INDEX", "FLAG"];
    let mut formats = vec!["1J", "1D", "1D", "1D", "?D", "?D", "?D", "?D", "1D", "1D", "2J", "?L"];
    let mut units = vec!["", "S", "DAY", "S", "", "", "DEGREES", "DEGREES", "M", "M", "", ""];
    if has_corr {
        names.extend(["CORRINDX_VISAMP", "CORRINDX_VISPHI"]);
        formats.extend(["?J", "?J"]);
        units.extend(["", ""]);
    }
    if use_complex {
        names.extend(["RVIS", "RVISERR", "IVIS", "IVISERR"]);
        formats.extend(["?D", "?D", "?D", "?D"]);
        units.extend(["", "", "", ""]);
        if has_corr {
            names.extend(["CORRINDX_RVIS", "CORRINDX_IVIS"]);
            formats.extend(["?J", "?J"]);
            units.extend(["", ""]);
        }
    }
    let mut names: Vec<String> = names.into_iter().map(String::from).collect();
    let mut formats: Vec<String> = formats.into_iter().map(|f| concrete_format(f, nwave)).collect();
    let mut units: Vec<String> = units.into_iter().map(String::from).collect();

    if use_refmap {
        names.push("VISREFMAP".to_string());
        formats.push(format!("{}L", nwave * nwave));
        units.push(String::new());
    }

    let hdu_num = create_binary_table(fptr, "OI_VIS", table.records.len() as i64, &names, &formats, &units)?;
    let hdu = fptr.hdu(hdu_num)?;
    hdu.write_key(fptr, "OI_REVN", 2)?;
    hdu.write_key(fptr, "DATE-OBS", table.date_obs.as_str())?;
    hdu.write_key(fptr, "ARRNAME", table.arrname.as_str())?;
    hdu.write_key(fptr, "INSNAME", table.insname.as_str())?;
    write_optional_str(fptr, &hdu, "CORRNAME", table.corrname.as_deref())?;
    if let Some(t) = table.amp_typ {
        hdu.write_key(fptr, "AMPTYP", t.as_str())?;
        if t == AmpType::CorrelatedFlux {
            write_optional_str(fptr, &hdu, "TUNIT5", table.amp_unit.as_deref())?;
        }
    }
    if let Some(t) = table.phi_typ {
        hdu.write_key(fptr, "PHITYP", t.as_str())?;
    }
    if let Some(o) = table.amp_order {
        hdu.write_key(fptr, "AMPORDER", o)?;
    }
    if let Some(o) = table.phi_order {
        hdu.write_key(fptr, "PHIORDER", o)?;
    }

    let mut col = 0;
    col += 1;
    write_col_i32(fptr, col, &table.records.iter().map(|r| r.target_id).collect::<Vec<_>>())?;
    col += 1;
    write_col_f64(fptr, col, &table.records.iter().map(|_| 0.0_f64).collect::<Vec<_>>())?; // TIME always zero.
    col += 1;
    write_col_f64(fptr, col, &table.records.iter().map(|r| r.mjd).collect::<Vec<_>>())?;
    col += 1;
    write_col_f64(fptr, col, &table.records.iter().map(|r| r.int_time).collect::<Vec<_>>())?;
    col += 1;
    write_col_f64(fptr, col, &table.records.iter().flat_map(|r| r.visamp.to_vec()).collect::<Vec<_>>())?;
    col += 1;
    write_col_f64(fptr, col, &table.records.iter().flat_map(|r| r.visamperr.to_vec()).collect::<Vec<_>>())?;
    col += 1;
    write_col_f64(fptr, col, &table.records.iter().flat_map(|r| r.visphi.to_vec()).collect::<Vec<_>>())?;
    col += 1;
    write_col_f64(fptr, col, &table.records.iter().flat_map(|r| r.visphierr.to_vec()).collect::<Vec<_>>())?;
    col += 1;
    write_col_f64(fptr, col, &table.records.iter().map(|r| r.ucoord).collect::<Vec<_>>())?;
    col += 1;
    write_col_f64(fptr, col, &table.records.iter().map(|r| r.vcoord).collect::<Vec<_>>())?;
    col += 1;
    write_col_i32(fptr, col, &table.records.iter().flat_map(|r| r.sta_index).collect::<Vec<_>>())?;
    col += 1;
    write_col_bool(fptr, col, &table.records.iter().flat_map(|r| r.flag.to_vec()).collect::<Vec<_>>())?;

    if has_corr {
        col += 1;
        write_col_i32(fptr, col, &table.records.iter().flat_map(|r| r.corr_indices.as_ref().and_then(|c| c.visamp.clone()).unwrap_or_default().to_vec()).collect::<Vec<_>>())?;
        col += 1;
        write_col_i32(fptr, col, &table.records.iter().flat_map(|r| r.corr_indices.as_ref().and_then(|c| c.visphi.clone()).unwrap_or_default().to_vec()).collect::<Vec<_>>())?;
    }
    if use_complex {
        col += 1;
        write_col_f64(fptr, col, &table.records.iter().flat_map(|r| r.complex.as_ref().map(|c| c.rvis.to_vec()).unwrap_or_default()).collect::<Vec<_>>())?;
        col += 1;
        write_col_f64(fptr, col, &table.records.iter().flat_map(|r| r.complex.as_ref().map(|c| c.rviserr.to_vec()).unwrap_or_default()).collect::<Vec<_>>())?;
        col += 1;
        write_col_f64(fptr, col, &table.records.iter().flat_map(|r| r.complex.as_ref().map(|c| c.ivis.to_vec()).unwrap_or_default()).collect::<Vec<_>>())?;
        col += 1;
        write_col_f64(fptr, col, &table.records.iter().flat_map(|r| r.complex.as_ref().map(|c| c.iviserr.to_vec()).unwrap_or_default()).collect::<Vec<_>>())?;
        if has_corr {
            col += 1;
            write_col_i32(fptr, col, &table.records.iter().flat_map(|r| r.corr_indices.as_ref().and_then(|c| c.rvis.clone()).unwrap_or_default().to_vec()).collect::<Vec<_>>())?;
            col += 1;
            write_col_i32(fptr, col, &table.records.iter().flat_map(|r| r.corr_indices.as_ref().and_then(|c| c.ivis.clone()).unwrap_or_default().to_vec()).collect::<Vec<_>>())?;
        }
    }
    if use_refmap {
        col += 1;
        write_col_bool(
            fptr,
            col,
            &table
                .records
                .iter()
                .flat_map(|r| r.refmap.as_ref().map(|m| m.iter().copied().collect::<Vec<_>>()).unwrap_or_default())
                .collect::<Vec<_>>(),
        )?;
        hdu.write_key(fptr, format!("TDIM{col}").as_str(), format!("({nwave},{nwave})"))?;
    }

    crate::io::fits::write_checksum(fptr)?;
    Ok(())
}
