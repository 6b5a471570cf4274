// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The merger (component E): combines an ordered list of datasets into
//! one, deduplicating reference tables by content and rewriting every
//! cross-reference (ARRNAME/INSNAME/CORRNAME/target_id) to match.

use indexmap::IndexMap;
use thiserror::Error;

use crate::constants::{MAX_FITS_STRING_KEYWORD_LEN, MULTIPLE_KEYWORD};
use crate::model::{
    ArrayTable, CorrTable, Dataset, FluxTable, Header, InspolTable, T3Table, Target, TargetTable,
    VisTable, Vis2Table, WavelengthTable,
};
use crate::time::{date2mjd, mjd2date};

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("merge requires at least one input dataset")]
    NoInputs,
}

/// A table renamed during merge because its original name collided with
/// one already present in the output.
fn rename_collision(base: &str, kind: &str, existing_count: usize) -> String {
    let candidate = format!("{base}_{}", existing_count + 1);
    if candidate.len() <= MAX_FITS_STRING_KEYWORD_LEN {
        candidate
    } else {
        format!("{kind}{}", existing_count + 1)
    }
}

/// Merges every non-empty, distinct mandatory header value; "MULTIPLE" on
/// disagreement.
fn merge_keyword<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let mut chosen: Option<&str> = None;
    for v in values.filter(|v| !v.is_empty()) {
        match chosen {
            None => chosen = Some(v),
            Some(c) if c == v => {}
            Some(_) => return MULTIPLE_KEYWORD.to_string(),
        }
    }
    chosen.unwrap_or("").to_string()
}

fn merge_header(inputs: &[Dataset]) -> Header {
    let mut header = Header::new_default();
    header.origin = merge_keyword(inputs.iter().map(|d| d.header.origin.as_str()));
    header.date = merge_keyword(inputs.iter().map(|d| d.header.date.as_str()));
    header.telescop = merge_keyword(inputs.iter().map(|d| d.header.telescop.as_str()));
    header.instrume = merge_keyword(inputs.iter().map(|d| d.header.instrume.as_str()));
    header.observer = merge_keyword(inputs.iter().map(|d| d.header.observer.as_str()));
    header.insmode = merge_keyword(inputs.iter().map(|d| d.header.insmode.as_str()));
    header.object = merge_keyword(inputs.iter().map(|d| d.header.object.as_str()));
    header.referenc = optional_merge_keyword(inputs.iter().map(|d| d.header.referenc.as_deref()));
    header.author = optional_merge_keyword(inputs.iter().map(|d| d.header.author.as_deref()));
    header.prog_id = optional_merge_keyword(inputs.iter().map(|d| d.header.prog_id.as_deref()));
    header.procsoft = optional_merge_keyword(inputs.iter().map(|d| d.header.procsoft.as_deref()));
    header.obstech = optional_merge_keyword(inputs.iter().map(|d| d.header.obstech.as_deref()));

    let earliest_mjd = inputs
        .iter()
        .filter_map(|d| {
            let s = d.header.date_obs.as_str();
            let parts: Vec<&str> = s.split('-').collect();
            match parts.as_slice() {
                [y, m, day] => {
                    let (y, m, day) = (y.parse().ok()?, m.parse().ok()?, day.parse().ok()?);
                    Some(date2mjd(y, m, day))
                }
                _ => None,
            }
        })
        .fold(f64::INFINITY, f64::min);
    header.date_obs = if earliest_mjd.is_finite() {
        let (y, m, d) = mjd2date(earliest_mjd);
        format!("{y:04}-{m:02}-{d:02}")
    } else {
        String::new()
    };

    header
}

fn optional_merge_keyword<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Option<String> {
    let present: Vec<&str> = values.flatten().filter(|v| !v.is_empty()).collect();
    if present.is_empty() {
        None
    } else {
        Some(merge_keyword(present.into_iter()))
    }
}

/// Merges every input's TARGET table by name, assigning fresh sequential
/// ids. Returns the output table plus, per input, a name -> output-id map.
fn merge_targets(inputs: &[Dataset]) -> (TargetTable, Vec<IndexMap<String, i32>>) {
    let mut out = TargetTable::new(inputs.iter().map(|d| d.target.revision).max().unwrap_or(2));
    let mut name_to_id: IndexMap<String, i32> = IndexMap::new();
    let mut per_input = Vec::with_capacity(inputs.len());

    for input in inputs {
        let mut map = IndexMap::new();
        for t in &input.target.targets {
            let id = *name_to_id.entry(t.target.clone()).or_insert_with(|| {
                let new_id = out.targets.len() as i32 + 1;
                let mut new_target = t.clone();
                new_target.target_id = new_id;
                out.targets.push(new_target);
                new_id
            });
            map.insert(t.target.clone(), id);
        }
        per_input.push(map);
    }

    (out, per_input)
}

/// Deduplicates ARRAY tables by content equality, appending and
/// collision-renaming any not already present. Returns, per input, an
/// old-arrname -> new-arrname map.
fn merge_arrays(inputs: &[Dataset]) -> (Vec<ArrayTable>, Vec<IndexMap<String, String>>) {
    let mut out: Vec<ArrayTable> = Vec::new();
    let mut per_input = Vec::with_capacity(inputs.len());

    for input in inputs {
        let mut map = IndexMap::new();
        for a in &input.arrays {
            let existing = out.iter().find(|o| o.content_eq(a));
            let new_name = match existing {
                Some(o) => o.arrname.clone(),
                None => {
                    let name = if out.iter().any(|o| o.arrname == a.arrname) {
                        rename_collision(&a.arrname, "array", out.len())
                    } else {
                        a.arrname.clone()
                    };
                    let mut copy = a.clone();
                    copy.arrname = name.clone();
                    copy.upgrade_to_v2();
                    out.push(copy);
                    name
                }
            };
            map.insert(a.arrname.clone(), new_name);
        }
        per_input.push(map);
    }

    (out, per_input)
}

fn merge_wavelengths(inputs: &[Dataset]) -> (Vec<WavelengthTable>, Vec<IndexMap<String, String>>) {
    let mut out: Vec<WavelengthTable> = Vec::new();
    let mut per_input = Vec::with_capacity(inputs.len());

    for input in inputs {
        let mut map = IndexMap::new();
        for w in &input.wavelengths {
            let existing = out.iter().find(|o| o.content_eq(w));
            let new_name = match existing {
                Some(o) => o.insname.clone(),
                None => {
                    let name = if out.iter().any(|o| o.insname == w.insname) {
                        rename_collision(&w.insname, "ins", out.len())
                    } else {
                        w.insname.clone()
                    };
                    let mut copy = w.clone();
                    copy.insname = name.clone();
                    copy.upgrade_to_v2();
                    out.push(copy);
                    name
                }
            };
            map.insert(w.insname.clone(), new_name);
        }
        per_input.push(map);
    }

    (out, per_input)
}

/// CORR tables are never deduplicated; every input table is appended as a
/// renamed deep copy.
fn merge_corrs(inputs: &[Dataset]) -> (Vec<CorrTable>, Vec<IndexMap<String, String>>) {
    let mut out: Vec<CorrTable> = Vec::new();
    let mut per_input = Vec::with_capacity(inputs.len());

    for input in inputs {
        let mut map = IndexMap::new();
        for c in &input.corrs {
            let name = if out.iter().any(|o| o.corrname == c.corrname) {
                rename_collision(&c.corrname, "corr", out.len())
            } else {
                c.corrname.clone()
            };
            let mut copy = c.clone();
            copy.corrname = name.clone();
            out.push(copy);
            map.insert(c.corrname.clone(), name);
        }
        per_input.push(map);
    }

    (out, per_input)
}

fn rewrite_target_id(input: &Dataset, target_map: &IndexMap<String, i32>, old_id: i32) -> i32 {
    input
        .target
        .by_id(old_id)
        .and_then(|t| target_map.get(&t.target).copied())
        .unwrap_or(old_id)
}

/// Merges every `dataset` into a single output [`Dataset`], deduplicating
/// ARRAY/WAVELENGTH tables by content, renaming collisions, and rewriting
/// every cross-reference to match.
pub fn merge_datasets(datasets: &[Dataset]) -> Result<Dataset, MergeError> {
    if datasets.is_empty() {
        return Err(MergeError::NoInputs);
    }

    let header = merge_header(datasets);
    let (target, target_maps) = merge_targets(datasets);
    let (arrays, arr_maps) = merge_arrays(datasets);
    let (wavelengths, wave_maps) = merge_wavelengths(datasets);
    let (corrs, corr_maps) = merge_corrs(datasets);

    let mut out = Dataset::new(header, target);
    out.arrays = arrays;
    out.wavelengths = wavelengths;
    out.corrs = corrs;

    for (i, input) in datasets.iter().enumerate() {
        let target_map = &target_maps[i];
        let arr_map = &arr_maps[i];
        let wave_map = &wave_maps[i];
        let corr_map = &corr_maps[i];

        for t in &input.inspols {
            let mut copy: InspolTable = t.clone();
            copy.upgrade_to_v2();
            copy.arrname = arr_map.get(&t.arrname).cloned().unwrap_or_else(|| t.arrname.clone());
            for r in &mut copy.records {
                r.target_id = rewrite_target_id(input, target_map, r.target_id);
            }
            out.inspols.push(copy);
        }

        for t in &input.vis {
            let mut copy: VisTable = t.clone();
            copy.upgrade_to_v2();
            copy.arrname = arr_map.get(&t.arrname).cloned().unwrap_or_else(|| t.arrname.clone());
            copy.insname = wave_map.get(&t.insname).cloned().unwrap_or_else(|| t.insname.clone());
            copy.corrname = t.corrname.as_ref().map(|c| corr_map.get(c).cloned().unwrap_or_else(|| c.clone()));
            for r in &mut copy.records {
                r.target_id = rewrite_target_id(input, target_map, r.target_id);
            }
            out.vis.push(copy);
        }

        for t in &input.vis2 {
            let mut copy: Vis2Table = t.clone();
            copy.upgrade_to_v2();
            copy.arrname = arr_map.get(&t.arrname).cloned().unwrap_or_else(|| t.arrname.clone());
            copy.insname = wave_map.get(&t.insname).cloned().unwrap_or_else(|| t.insname.clone());
            copy.corrname = t.corrname.as_ref().map(|c| corr_map.get(c).cloned().unwrap_or_else(|| c.clone()));
            for r in &mut copy.records {
                r.target_id = rewrite_target_id(input, target_map, r.target_id);
            }
            out.vis2.push(copy);
        }

        for t in &input.t3 {
            let mut copy: T3Table = t.clone();
            copy.upgrade_to_v2();
            copy.arrname = arr_map.get(&t.arrname).cloned().unwrap_or_else(|| t.arrname.clone());
            copy.insname = wave_map.get(&t.insname).cloned().unwrap_or_else(|| t.insname.clone());
            copy.corrname = t.corrname.as_ref().map(|c| corr_map.get(c).cloned().unwrap_or_else(|| c.clone()));
            for r in &mut copy.records {
                r.target_id = rewrite_target_id(input, target_map, r.target_id);
            }
            out.t3.push(copy);
        }

        for t in &input.flux {
            let mut copy: FluxTable = t.clone();
            copy.upgrade_to_v2();
            copy.arrname = t.arrname.as_ref().map(|a| arr_map.get(a).cloned().unwrap_or_else(|| a.clone()));
            for r in &mut copy.records {
                r.target_id = rewrite_target_id(input, target_map, r.target_id);
            }
            out.flux.push(copy);
        }
    }

    out.rebuild_indexes();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TargetTable;

    #[test]
    fn test_no_inputs() {
        assert!(matches!(merge_datasets(&[]), Err(MergeError::NoInputs)));
    }

    #[test]
    fn test_merge_keeps_every_target_once() {
        let mut a = Dataset::new(Header::new_default(), TargetTable::new(2));
        let mut t1 = Target::new_default(1);
        t1.target = "Vega".to_string();
        a.target.targets.push(t1);

        let mut b = Dataset::new(Header::new_default(), TargetTable::new(2));
        let mut t2 = Target::new_default(5);
        t2.target = "Vega".to_string();
        b.target.targets.push(t2);
        let mut t3 = Target::new_default(6);
        t3.target = "Sirius".to_string();
        b.target.targets.push(t3);

        let merged = merge_datasets(&[a, b]).unwrap();
        assert_eq!(merged.target.targets.len(), 2);
        assert!(merged.target.by_name("Vega").is_some());
        assert!(merged.target.by_name("Sirius").is_some());
    }
}
