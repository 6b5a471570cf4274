// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Thin wrappers over the primitives `fitsio`'s high-level API doesn't
//! expose: per-HDU checksum verification/writing, and binary-table
//! creation with explicit column arrays.

use std::ffi::CString;

use fitsio::{errors::check_status as fits_check_status, errors::Error as FitsioError, FitsFile};

/// Verifies CHECKSUM/DATASUM on the HDU currently selected in `fptr`.
/// Returns `Ok(true)` if both are present and match, `Ok(false)` if either
/// is missing or mismatched (this is a warning condition, never a hard
/// failure), and `Err` only on an underlying cfitsio fault.
pub(crate) fn verify_checksum(fptr: &mut FitsFile) -> Result<bool, FitsioError> {
    let mut datastatus = 0;
    let mut hdustatus = 0;
    let mut status = 0;
    unsafe {
        fitsio_sys::ffvcks(
            fptr.as_raw(),
            &mut datastatus,
            &mut hdustatus,
            &mut status,
        );
    }
    fits_check_status(status)?;
    Ok(datastatus == 1 && hdustatus == 1)
}

/// Writes CHECKSUM and DATASUM for the HDU currently selected in `fptr`.
pub(crate) fn write_checksum(fptr: &mut FitsFile) -> Result<(), FitsioError> {
    let mut status = 0;
    unsafe {
        fitsio_sys::ffpcks(fptr.as_raw(), &mut status);
    }
    fits_check_status(status)?;
    Ok(())
}

/// The 0-indexed number (as used by `fitsio::FitsFile::hdu`) of the HDU
/// currently selected in `fptr`.
pub(crate) fn current_hdu_num(fptr: &mut FitsFile) -> Result<usize, FitsioError> {
    let mut hdu_num = 0;
    let mut status = 0;
    unsafe {
        fitsio_sys::ffghdn(fptr.as_raw(), &mut hdu_num, &mut status);
    }
    fits_check_status(status)?;
    Ok((hdu_num - 1).max(0) as usize)
}

/// Creates a new binary-table HDU with explicit column name/format/unit
/// arrays, mirroring `ffcrtb` as used to build uvfits antenna tables:
/// the high-level `fitsio` API has no equivalent for tables whose column
/// set is only known at runtime (channel-dependent repeat counts). Returns
/// the new HDU's 0-indexed number.
pub(crate) fn create_binary_table(
    fptr: &mut FitsFile,
    extname: &str,
    num_rows: i64,
    col_names: &[String],
    col_formats: &[String],
    col_units: &[String],
) -> Result<usize, FitsioError> {
    let c_names: Vec<CString> = col_names.iter().map(|s| CString::new(s.as_str()).unwrap()).collect();
    let c_formats: Vec<CString> = col_formats.iter().map(|s| CString::new(s.as_str()).unwrap()).collect();
    let c_units: Vec<CString> = col_units.iter().map(|s| CString::new(s.as_str()).unwrap()).collect();
    let mut name_ptrs: Vec<*mut i8> = c_names.iter().map(|s| s.as_ptr() as *mut i8).collect();
    let mut format_ptrs: Vec<*mut i8> = c_formats.iter().map(|s| s.as_ptr() as *mut i8).collect();
    let mut unit_ptrs: Vec<*mut i8> = c_units.iter().map(|s| s.as_ptr() as *mut i8).collect();
    let c_extname = CString::new(extname).unwrap();

    let mut status = 0;
    unsafe {
        fitsio_sys::ffcrtb(
            fptr.as_raw(),
            2, // BINARY_TBL
            num_rows,
            col_names.len() as i32,
            name_ptrs.as_mut_ptr(),
            format_ptrs.as_mut_ptr(),
            unit_ptrs.as_mut_ptr(),
            c_extname.as_ptr(),
            &mut status,
        );
    }
    fits_check_status(status)?;
    current_hdu_num(fptr)
}
