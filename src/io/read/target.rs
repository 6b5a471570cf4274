// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use fitsio::FitsFile;
use log::warn;

use crate::model::{Category, Target, TargetTable};

use super::super::ReadError;
use super::{find_next_by_name, mandatory_i32, read_revision};

/// Reads the dataset's single mandatory OI_TARGET extension. Errors if
/// absent, or if a second one is found.
pub(crate) fn read_target(fptr: &mut FitsFile) -> Result<TargetTable, ReadError> {
    let (hdu, hdu_num) =
        find_next_by_name(fptr, "OI_TARGET", 0)?.ok_or(ReadError::MissingTargetTable)?;

    if find_next_by_name(fptr, "OI_TARGET", hdu_num + 1)?.is_some() {
        return Err(ReadError::MultipleTargetTables);
    }

    if !crate::io::fits::verify_checksum(fptr)? {
        warn!("OI_TARGET: checksum missing or mismatched");
    }

    let revision = read_revision(fptr, &hdu, "OI_TARGET", crate::constants::MAX_KNOWN_REVISION)?;

    let target_id: Vec<i32> = hdu.read_col(fptr, "TARGET_ID")?;
    let target: Vec<String> = hdu.read_col(fptr, "TARGET")?;
    let raep0: Vec<f64> = hdu.read_col(fptr, "RAEP0")?;
    let decep0: Vec<f64> = hdu.read_col(fptr, "DECEP0")?;
    let equinox: Vec<f32> = hdu.read_col(fptr, "EQUINOX")?;
    let ra_err: Vec<f64> = hdu.read_col(fptr, "RA_ERR")?;
    let dec_err: Vec<f64> = hdu.read_col(fptr, "DEC_ERR")?;
    let sysvel: Vec<f64> = hdu.read_col(fptr, "SYSVEL")?;
    let veltyp: Vec<String> = hdu.read_col(fptr, "VELTYP")?;
    let veldef: Vec<String> = hdu.read_col(fptr, "VELDEF")?;
    let pmra: Vec<f64> = hdu.read_col(fptr, "PMRA")?;
    let pmdec: Vec<f64> = hdu.read_col(fptr, "PMDEC")?;
    let pmra_err: Vec<f64> = hdu.read_col(fptr, "PMRA_ERR")?;
    let pmdec_err: Vec<f64> = hdu.read_col(fptr, "PMDEC_ERR")?;
    let parallax: Vec<f32> = hdu.read_col(fptr, "PARALLAX")?;
    let para_err: Vec<f32> = hdu.read_col(fptr, "PARA_ERR")?;
    let spectyp: Vec<String> = hdu.read_col(fptr, "SPECTYP")?;
    let category: Option<Vec<String>> = hdu.read_col(fptr, "CATEGORY").ok();

    let n = target_id.len();
    let mut targets = Vec::with_capacity(n);
    for i in 0..n {
        let mut t = Target::new_default(target_id[i]);
        t.target = target[i].clone();
        t.raep0 = raep0[i];
        t.decep0 = decep0[i];
        t.equinox = equinox[i] as f64;
        t.ra_err = ra_err[i];
        t.dec_err = dec_err[i];
        t.sys_vel = sysvel[i];
        t.vel_typ = veltyp[i].clone();
        t.vel_def = veldef[i].clone();
        t.pm_ra = pmra[i];
        t.pm_dec = pmdec[i];
        t.pm_ra_err = pmra_err[i];
        t.pm_dec_err = pmdec_err[i];
        t.parallax = parallax[i] as f64;
        t.para_err = para_err[i] as f64;
        t.spec_typ = spectyp[i].clone();
        t.category = category.as_ref().and_then(|c| Category::from_str(&c[i]));
        targets.push(t);
    }

    Ok(TargetTable { revision, targets })
}
