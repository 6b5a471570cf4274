// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The file orchestrator (component C): wires the per-extension codec
//! functions together into whole-dataset `read_fits`/`write_fits`, and
//! re-exports `Dataset::is_atomic` as a free function.

use fitsio::FitsFile;
use log::{error, warn};

use crate::model::{Dataset, Header};

use super::read::{
    read_array_next, read_corr_next, read_flux_next, read_inspol_next, read_t3_next,
    read_target, read_vis2_next, read_vis_next, read_wavelength_next,
};
use super::write::{
    write_array, write_corr, write_flux, write_inspol, write_t3, write_target, write_vis,
    write_vis2, write_wavelength,
};
use super::{ReadError, WriteError};

fn read_header(fptr: &mut FitsFile) -> Result<Header, ReadError> {
    let hdu = fptr.primary_hdu()?;
    let mut header = Header::new_default();
    header.origin = hdu.read_key::<String>(fptr, "ORIGIN").unwrap_or_default();
    header.date = hdu.read_key::<String>(fptr, "DATE").unwrap_or_default();
    header.date_obs = hdu.read_key::<String>(fptr, "DATE-OBS").unwrap_or_default();
    header.content = hdu.read_key::<String>(fptr, "CONTENT").unwrap_or_default();
    header.telescop = hdu.read_key::<String>(fptr, "TELESCOP").unwrap_or_default();
    header.instrume = hdu.read_key::<String>(fptr, "INSTRUME").unwrap_or_default();
    header.observer = hdu.read_key::<String>(fptr, "OBSERVER").unwrap_or_default();
    header.insmode = hdu.read_key::<String>(fptr, "INSMODE").unwrap_or_default();
    header.object = hdu.read_key::<String>(fptr, "OBJECT").unwrap_or_default();
    header.referenc = hdu.read_key::<String>(fptr, "REFERENC").ok();
    header.author = hdu.read_key::<String>(fptr, "AUTHOR").ok();
    header.prog_id = hdu.read_key::<String>(fptr, "PROG_ID").ok();
    header.procsoft = hdu.read_key::<String>(fptr, "PROCSOFT").ok();
    header.obstech = hdu.read_key::<String>(fptr, "OBSTECH").ok();
    Ok(header)
}

/// Reads an entire OIFITS file into a [`Dataset`].
///
/// Reads the primary header, then the single mandatory OI_TARGET table,
/// then every extension of each remaining kind via read-next loops that
/// terminate at EOF. Rebuilds the dataset's name indexes before returning.
pub fn read_fits(path: &str) -> Result<Dataset, ReadError> {
    let result = (|| -> Result<Dataset, ReadError> {
        let mut fptr = FitsFile::open(path)?;
        let header = read_header(&mut fptr)?;
        let target = read_target(&mut fptr)?;
        let mut dataset = Dataset::new(header, target);

        let mut hdu_num = 1;
        while let Some((table, next)) = read_array_next(&mut fptr, hdu_num)? {
            dataset.arrays.push(table);
            hdu_num = next;
        }
        hdu_num = 1;
        while let Some((table, next)) = read_wavelength_next(&mut fptr, hdu_num)? {
            dataset.wavelengths.push(table);
            hdu_num = next;
        }
        hdu_num = 1;
        while let Some((table, next)) = read_corr_next(&mut fptr, hdu_num)? {
            dataset.corrs.push(table);
            hdu_num = next;
        }
        hdu_num = 1;
        while let Some((table, next)) = read_inspol_next(&mut fptr, hdu_num)? {
            dataset.inspols.push(table);
            hdu_num = next;
        }
        hdu_num = 1;
        while let Some((table, next)) = read_vis_next(&mut fptr, hdu_num)? {
            dataset.vis.push(table);
            hdu_num = next;
        }
        hdu_num = 1;
        while let Some((table, next)) = read_vis2_next(&mut fptr, hdu_num)? {
            dataset.vis2.push(table);
            hdu_num = next;
        }
        hdu_num = 1;
        while let Some((table, next)) = read_t3_next(&mut fptr, hdu_num)? {
            dataset.t3.push(table);
            hdu_num = next;
        }
        hdu_num = 1;
        while let Some((table, next)) = read_flux_next(&mut fptr, hdu_num)? {
            dataset.flux.push(table);
            hdu_num = next;
        }

        dataset.rebuild_indexes();
        Ok(dataset)
    })();

    if let Err(e) = &result {
        error!("failed to read '{path}': {e}");
    }
    result
}

fn write_header(fptr: &mut FitsFile, header: &Header) -> Result<(), WriteError> {
    let hdu = fptr.primary_hdu()?;
    for (key, value) in header.mandatory_or_unset() {
        hdu.write_key(fptr, key, value.as_str())?;
    }
    super::write::write_optional_str(fptr, &hdu, "REFERENC", header.referenc.as_deref())?;
    super::write::write_optional_str(fptr, &hdu, "AUTHOR", header.author.as_deref())?;
    super::write::write_optional_str(fptr, &hdu, "PROG_ID", header.prog_id.as_deref())?;
    super::write::write_optional_str(fptr, &hdu, "PROCSOFT", header.procsoft.as_deref())?;
    super::write::write_optional_str(fptr, &hdu, "OBSTECH", header.obstech.as_deref())?;
    Ok(())
}

/// Writes a [`Dataset`] to a new OIFITS file at `path`.
///
/// On any failure the partially-written file is removed (best-effort)
/// before the error is propagated.
pub fn write_fits(path: &str, dataset: &Dataset) -> Result<(), WriteError> {
    let result = (|| -> Result<(), WriteError> {
        let mut fptr = FitsFile::create(path).open()?;
        write_header(&mut fptr, &dataset.header)?;
        write_target(&mut fptr, &dataset.target)?;

        for (i, table) in dataset.arrays.iter().enumerate() {
            write_array(&mut fptr, table, (i + 1) as i32)?;
        }
        for (i, table) in dataset.wavelengths.iter().enumerate() {
            write_wavelength(&mut fptr, table, (i + 1) as i32)?;
        }
        for (i, table) in dataset.corrs.iter().enumerate() {
            write_corr(&mut fptr, table, (i + 1) as i32)?;
        }
        for table in &dataset.inspols {
            write_inspol(&mut fptr, table)?;
        }
        for table in &dataset.vis {
            write_vis(&mut fptr, table)?;
        }
        for table in &dataset.vis2 {
            write_vis2(&mut fptr, table)?;
        }
        for table in &dataset.t3 {
            write_t3(&mut fptr, table)?;
        }
        for table in &dataset.flux {
            write_flux(&mut fptr, table)?;
        }

        Ok(())
    })();

    if let Err(e) = &result {
        error!("failed to write '{path}': {e}");
        if let Err(io_err) = std::fs::remove_file(path) {
            warn!("could not remove partially-written '{path}': {io_err}");
        }
    }
    result
}

/// True iff every data table in `dataset` has exactly one record and every
/// data record's MJD falls within a single window of `tolerance` days.
pub fn is_atomic(dataset: &Dataset, tolerance: f64) -> bool {
    dataset.is_atomic(tolerance)
}
