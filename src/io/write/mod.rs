// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Per-extension serialization.

mod array;
mod corr;
mod flux;
mod inspol;
mod t3;
mod target;
mod vis;
mod vis2;
mod wavelength;

pub(crate) use array::write_array;
pub(crate) use corr::write_corr;
pub(crate) use flux::write_flux;
pub(crate) use inspol::write_inspol;
pub(crate) use t3::write_t3;
pub(crate) use target::write_target;
pub(crate) use vis::write_vis;
pub(crate) use vis2::write_vis2;
pub(crate) use wavelength::write_wavelength;

use std::ffi::CString;

use fitsio::{errors::check_status as fits_check_status, FitsFile};

use super::WriteError;

pub(crate) fn concrete_format(template: &str, nwave: usize) -> String {
    template.replace('?', &nwave.to_string())
}

pub(crate) fn write_col_f64(fptr: &mut FitsFile, colnum: i32, data: &[f64]) -> Result<(), WriteError> {
    let mut status = 0;
    let mut data = data.to_vec();
    unsafe {
        fitsio_sys::ffpcld(
            fptr.as_raw(),
            colnum,
            1,
            1,
            data.len() as i64,
            data.as_mut_ptr(),
            &mut status,
        );
    }
    fits_check_status(status)?;
    Ok(())
}

pub(crate) fn write_col_i32(fptr: &mut FitsFile, colnum: i32, data: &[i32]) -> Result<(), WriteError> {
    let mut status = 0;
    let mut data = data.to_vec();
    unsafe {
        fitsio_sys::ffpclk(
            fptr.as_raw(),
            colnum,
            1,
            1,
            data.len() as i64,
            data.as_mut_ptr(),
            &mut status,
        );
    }
    fits_check_status(status)?;
    Ok(())
}

pub(crate) fn write_col_bool(fptr: &mut FitsFile, colnum: i32, data: &[bool]) -> Result<(), WriteError> {
    let mut status = 0;
    let mut data: Vec<i8> = data.iter().map(|&b| b as i8).collect();
    unsafe {
        fitsio_sys::ffpcll(
            fptr.as_raw(),
            colnum,
            1,
            1,
            data.len() as i64,
            data.as_mut_ptr(),
            &mut status,
        );
    }
    fits_check_status(status)?;
    Ok(())
}

pub(crate) fn write_col_str(fptr: &mut FitsFile, colnum: i32, data: &[String]) -> Result<(), WriteError> {
    let mut status = 0;
    let c_strings: Vec<CString> = data.iter().map(|s| CString::new(s.as_str()).unwrap()).collect();
    let mut ptrs: Vec<*mut i8> = c_strings.iter().map(|s| s.as_ptr() as *mut i8).collect();
    unsafe {
        fitsio_sys::ffpcls(
            fptr.as_raw(),
            colnum,
            1,
            1,
            ptrs.len() as i64,
            ptrs.as_mut_ptr(),
            &mut status,
        );
    }
    fits_check_status(status)?;
    Ok(())
}

/// Writes a keyword only if `value` is non-empty, per the "optional
/// keywords emitted only when non-empty/non-default" write policy.
pub(crate) fn write_optional_str(
    fptr: &mut FitsFile,
    hdu: &fitsio::FitsHdu,
    key: &str,
    value: Option<&str>,
) -> Result<(), WriteError> {
    if let Some(v) = value {
        if !v.is_empty() {
            hdu.write_key(fptr, key, v)?;
        }
    }
    Ok(())
}
