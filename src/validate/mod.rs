// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The validator (component D): a fixed set of checks, each a plain
//! `fn(&Dataset) -> CheckResult`, collected into a slice and run together
//! by [`run_all`]. The validator never raises; conformance problems are
//! reported, not propagated as errors.

use serde::Serialize;

use crate::constants::MAX_REPORT;
use crate::model::{AmpType, CalStat, Dataset, Frame, PhiType};

/// Worst-to-best: `NotFits` > `NotOifits` > `Warning` > `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Severity {
    None,
    Warning,
    NotOifits,
    NotFits,
}

/// The outcome of one named check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub name: &'static str,
    pub severity: Severity,
    pub description: String,
    /// Offending table/record locations, truncated to [`MAX_REPORT`].
    pub locations: Vec<String>,
}

fn result(name: &'static str, severity: Severity, description: &str, mut locations: Vec<String>) -> CheckResult {
    if locations.len() > MAX_REPORT {
        locations.truncate(MAX_REPORT);
        locations.push("[list truncated]".to_string());
    }
    CheckResult {
        name,
        severity,
        description: description.to_string(),
        locations,
    }
}

fn ok(name: &'static str) -> CheckResult {
    result(name, Severity::None, "", Vec::new())
}

fn check_tables_present(ds: &Dataset) -> CheckResult {
    let mut missing = Vec::new();
    if ds.target.targets.is_empty() {
        missing.push("OI_TARGET has no rows".to_string());
    }
    let has_data = !ds.vis.is_empty() || !ds.vis2.is_empty() || !ds.t3.is_empty();
    if has_data && ds.wavelengths.is_empty() {
        missing.push("data tables present but no OI_WAVELENGTH table found".to_string());
    }
    if has_data && ds.arrays.is_empty() {
        missing.push("data tables present but no OI_ARRAY table found".to_string());
    }
    if missing.is_empty() {
        ok("tables_present")
    } else {
        result("tables_present", Severity::NotOifits, "mandatory table absent", missing)
    }
}

fn check_revisions(ds: &Dataset) -> CheckResult {
    let mut bad = Vec::new();
    if !(1..=2).contains(&ds.target.revision) {
        bad.push(format!("OI_TARGET revision {}", ds.target.revision));
    }
    for (i, t) in ds.arrays.iter().enumerate() {
        if !(1..=2).contains(&t.revision) {
            bad.push(format!("OI_ARRAY[{i}] ({}) revision {}", t.arrname, t.revision));
        }
    }
    for (i, t) in ds.wavelengths.iter().enumerate() {
        if !(1..=2).contains(&t.revision) {
            bad.push(format!("OI_WAVELENGTH[{i}] ({}) revision {}", t.insname, t.revision));
        }
    }
    for (i, t) in ds.vis.iter().enumerate() {
        if !(1..=2).contains(&t.revision) {
            bad.push(format!("OI_VIS[{i}] revision {}", t.revision));
        }
    }
    for (i, t) in ds.vis2.iter().enumerate() {
        if !(1..=2).contains(&t.revision) {
            bad.push(format!("OI_VIS2[{i}] revision {}", t.revision));
        }
    }
    for (i, t) in ds.t3.iter().enumerate() {
        if !(1..=2).contains(&t.revision) {
            bad.push(format!("OI_T3[{i}] revision {}", t.revision));
        }
    }
    for (i, t) in ds.corrs.iter().enumerate() {
        if t.revision != 1 {
            bad.push(format!("OI_CORR[{i}] ({}) revision {}", t.corrname, t.revision));
        }
    }
    for (i, t) in ds.inspols.iter().enumerate() {
        if t.revision != 1 {
            bad.push(format!("OI_INSPOL[{i}] revision {}", t.revision));
        }
    }
    for (i, t) in ds.flux.iter().enumerate() {
        if t.revision != 1 {
            bad.push(format!("OI_FLUX[{i}] ({}) revision {}", t.insname, t.revision));
        }
    }
    if bad.is_empty() {
        ok("revisions")
    } else {
        result("revisions", Severity::NotOifits, "invalid OI_REVN", bad)
    }
}

fn check_header_required(ds: &Dataset) -> CheckResult {
    let rev2 = ds.target.revision >= 2;
    if !rev2 {
        return ok("header_required");
    }
    let missing = ds.header.empty_mandatory_keys();
    if missing.is_empty() {
        ok("header_required")
    } else {
        result(
            "header_required",
            Severity::NotOifits,
            "mandatory primary-header keyword empty",
            missing.into_iter().map(String::from).collect(),
        )
    }
}

fn check_keyword_values(ds: &Dataset) -> CheckResult {
    let mut bad = Vec::new();
    for t in &ds.arrays {
        if Frame::from_str(t.frame.as_str()).is_none() {
            bad.push(format!("OI_ARRAY ({}) FRAME {:?}", t.arrname, t.frame));
        }
    }
    for t in &ds.vis {
        if let Some(a) = t.amp_typ {
            if AmpType::from_str(a.as_str()).is_none() {
                bad.push(format!("OI_VIS ({}) AMPTYP invalid", t.insname));
            }
        }
        if let Some(p) = t.phi_typ {
            if PhiType::from_str(p.as_str()).is_none() {
                bad.push(format!("OI_VIS ({}) PHITYP invalid", t.insname));
            }
        }
    }
    for t in &ds.flux {
        if CalStat::from_char(t.calstat.as_char()).is_none() {
            bad.push(format!("OI_FLUX ({}) CALSTAT invalid", t.insname));
        }
    }
    if bad.is_empty() {
        ok("keyword_values")
    } else {
        result("keyword_values", Severity::NotOifits, "keyword value outside closed set", bad)
    }
}

fn check_visrefmap(ds: &Dataset) -> CheckResult {
    let mut missing = Vec::new();
    let mut spurious = Vec::new();
    for t in &ds.vis {
        let differential = t.amp_typ == Some(AmpType::Differential) || t.phi_typ == Some(PhiType::Differential);
        for (i, r) in t.records.iter().enumerate() {
            match (differential, r.refmap.is_some()) {
                (true, false) => missing.push(format!("OI_VIS ({}) record {i}", t.insname)),
                (false, true) => spurious.push(format!("OI_VIS ({}) record {i}", t.insname)),
                _ => {}
            }
        }
    }
    if !missing.is_empty() {
        result("visrefmap", Severity::NotOifits, "differential VIS missing VISREFMAP", missing)
    } else if !spurious.is_empty() {
        result("visrefmap", Severity::Warning, "VISREFMAP present on non-differential VIS", spurious)
    } else {
        ok("visrefmap")
    }
}

fn check_unique_targets(ds: &Dataset) -> CheckResult {
    let dupes: Vec<String> = ds.target.duplicate_names().into_iter().map(String::from).collect();
    if dupes.is_empty() {
        ok("unique_targets")
    } else {
        result("unique_targets", Severity::Warning, "duplicate target name", dupes)
    }
}

fn check_targets_present(ds: &Dataset) -> CheckResult {
    let mut bad = Vec::new();
    let check_id = |id: i32, loc: String, bad: &mut Vec<String>| {
        if ds.target.by_id(id).is_none() {
            bad.push(loc);
        }
    };
    for (i, t) in ds.vis.iter().enumerate() {
        for (j, r) in t.records.iter().enumerate() {
            check_id(r.target_id, format!("OI_VIS[{i}] record {j} target_id {}", r.target_id), &mut bad);
        }
    }
    for (i, t) in ds.vis2.iter().enumerate() {
        for (j, r) in t.records.iter().enumerate() {
            check_id(r.target_id, format!("OI_VIS2[{i}] record {j} target_id {}", r.target_id), &mut bad);
        }
    }
    for (i, t) in ds.t3.iter().enumerate() {
        for (j, r) in t.records.iter().enumerate() {
            check_id(r.target_id, format!("OI_T3[{i}] record {j} target_id {}", r.target_id), &mut bad);
        }
    }
    for (i, t) in ds.flux.iter().enumerate() {
        for (j, r) in t.records.iter().enumerate() {
            check_id(r.target_id, format!("OI_FLUX[{i}] record {j} target_id {}", r.target_id), &mut bad);
        }
    }
    if bad.is_empty() {
        ok("targets_present")
    } else {
        result("targets_present", Severity::NotOifits, "data record target_id not in OI_TARGET", bad)
    }
}

fn check_arrname_present(ds: &Dataset) -> CheckResult {
    let mut bad = Vec::new();
    for t in &ds.inspols {
        if t.arrname.is_empty() {
            bad.push(format!("OI_INSPOL ({})", t.model));
        }
    }
    for t in &ds.vis {
        if t.revision >= 2 && t.arrname.is_empty() {
            bad.push(format!("OI_VIS ({})", t.insname));
        }
    }
    for t in &ds.vis2 {
        if t.revision >= 2 && t.arrname.is_empty() {
            bad.push(format!("OI_VIS2 ({})", t.insname));
        }
    }
    for t in &ds.t3 {
        if t.revision >= 2 && t.arrname.is_empty() {
            bad.push(format!("OI_T3 ({})", t.insname));
        }
    }
    for t in &ds.flux {
        if t.calstat == CalStat::Uncalibrated && t.arrname.as_deref().unwrap_or("").is_empty() {
            bad.push(format!("OI_FLUX ({})", t.insname));
        }
    }
    if bad.is_empty() {
        ok("arrname_present")
    } else {
        result("arrname_present", Severity::NotOifits, "ARRNAME required but absent", bad)
    }
}

fn check_elements_present(ds: &Dataset) -> CheckResult {
    let mut bad = Vec::new();
    let mut check = |arrname: &str, sta: i32, loc: String| {
        if sta == -1 {
            return;
        }
        match ds.array_by_name(arrname) {
            Some(a) if a.element(sta).is_some() => {}
            _ => bad.push(loc),
        }
    };
    for t in &ds.vis {
        for (i, r) in t.records.iter().enumerate() {
            for s in r.sta_index {
                check(&t.arrname, s, format!("OI_VIS ({}) record {i} station {s}", t.insname));
            }
        }
    }
    for t in &ds.vis2 {
        for (i, r) in t.records.iter().enumerate() {
            for s in r.sta_index {
                check(&t.arrname, s, format!("OI_VIS2 ({}) record {i} station {s}", t.insname));
            }
        }
    }
    for t in &ds.t3 {
        for (i, r) in t.records.iter().enumerate() {
            for s in r.sta_index {
                check(&t.arrname, s, format!("OI_T3 ({}) record {i} station {s}", t.insname));
            }
        }
    }
    if bad.is_empty() {
        ok("elements_present")
    } else {
        result("elements_present", Severity::NotOifits, "referenced station absent from ARRAY", bad)
    }
}

fn check_corr_present(ds: &Dataset) -> CheckResult {
    let mut bad = Vec::new();
    let mut check = |corrname: &Option<String>, loc: String| {
        if let Some(name) = corrname {
            if !name.is_empty() && ds.corr_by_name(name).is_none() {
                bad.push(loc);
            }
        }
    };
    for t in &ds.vis {
        check(&t.corrname, format!("OI_VIS ({})", t.insname));
    }
    for t in &ds.vis2 {
        check(&t.corrname, format!("OI_VIS2 ({})", t.insname));
    }
    for t in &ds.t3 {
        check(&t.corrname, format!("OI_T3 ({})", t.insname));
    }
    if bad.is_empty() {
        ok("corr_present")
    } else {
        result("corr_present", Severity::NotOifits, "CORRNAME does not resolve to an OI_CORR table", bad)
    }
}

fn check_flagging(ds: &Dataset) -> CheckResult {
    let mut bad = Vec::new();
    for (i, t) in ds.vis.iter().enumerate() {
        for (j, r) in t.records.iter().enumerate() {
            for (k, (&flagged, &err)) in r.flag.iter().zip(r.visamperr.iter()).enumerate() {
                if !flagged && err < 0.0 {
                    bad.push(format!("OI_VIS[{i}] record {j} channel {k} VISAMPERR"));
                }
            }
            for (k, (&flagged, &err)) in r.flag.iter().zip(r.visphierr.iter()).enumerate() {
                if !flagged && err < 0.0 {
                    bad.push(format!("OI_VIS[{i}] record {j} channel {k} VISPHIERR"));
                }
            }
        }
    }
    for (i, t) in ds.vis2.iter().enumerate() {
        for (j, r) in t.records.iter().enumerate() {
            for (k, (&flagged, &err)) in r.flag.iter().zip(r.vis2err.iter()).enumerate() {
                if !flagged && err < 0.0 {
                    bad.push(format!("OI_VIS2[{i}] record {j} channel {k}"));
                }
            }
        }
    }
    for (i, t) in ds.t3.iter().enumerate() {
        for (j, r) in t.records.iter().enumerate() {
            for (k, (&flagged, &err)) in r.flag.iter().zip(r.t3amperr.iter()).enumerate() {
                if !flagged && err < 0.0 {
                    bad.push(format!("OI_T3[{i}] record {j} channel {k} T3AMPERR"));
                }
            }
            for (k, (&flagged, &err)) in r.flag.iter().zip(r.t3phierr.iter()).enumerate() {
                if !flagged && err < 0.0 {
                    bad.push(format!("OI_T3[{i}] record {j} channel {k} T3PHIERR"));
                }
            }
        }
    }
    if bad.is_empty() {
        ok("flagging")
    } else {
        result("flagging", Severity::NotOifits, "negative error bar on an unflagged channel", bad)
    }
}

fn check_t3amp(ds: &Dataset) -> CheckResult {
    let mut bad = Vec::new();
    for (i, t) in ds.t3.iter().enumerate() {
        for (j, r) in t.records.iter().enumerate() {
            for (k, ((&flagged, &amp), &err)) in r.flag.iter().zip(r.t3amp.iter()).zip(r.t3amperr.iter()).enumerate() {
                if !flagged && amp > 1.0 + err {
                    bad.push(format!("OI_T3[{i}] record {j} channel {k} T3AMP {amp}"));
                }
            }
        }
    }
    if bad.is_empty() {
        ok("t3amp")
    } else {
        result("t3amp", Severity::NotOifits, "T3AMP exceeds 1 by more than one sigma", bad)
    }
}

fn check_waveorder(ds: &Dataset) -> CheckResult {
    let bad: Vec<String> = ds
        .wavelengths
        .iter()
        .filter(|w| !w.is_wave_ordered())
        .map(|w| format!("OI_WAVELENGTH ({})", w.insname))
        .collect();
    if bad.is_empty() {
        ok("waveorder")
    } else {
        result("waveorder", Severity::Warning, "wavelengths not monotonically non-decreasing", bad)
    }
}

fn check_time_deprecated(ds: &Dataset) -> CheckResult {
    let mut bad = Vec::new();
    for (i, t) in ds.vis.iter().enumerate() {
        if t.revision >= 2 {
            for (j, r) in t.records.iter().enumerate() {
                if r.time != 0.0 {
                    bad.push(format!("OI_VIS[{i}] record {j}"));
                }
            }
        }
    }
    for (i, t) in ds.vis2.iter().enumerate() {
        if t.revision >= 2 {
            for (j, r) in t.records.iter().enumerate() {
                if r.time != 0.0 {
                    bad.push(format!("OI_VIS2[{i}] record {j}"));
                }
            }
        }
    }
    for (i, t) in ds.t3.iter().enumerate() {
        if t.revision >= 2 {
            for (j, r) in t.records.iter().enumerate() {
                if r.time != 0.0 {
                    bad.push(format!("OI_T3[{i}] record {j}"));
                }
            }
        }
    }
    if bad.is_empty() {
        ok("time_deprecated")
    } else {
        result("time_deprecated", Severity::Warning, "non-zero TIME on revision-2 data", bad)
    }
}

fn check_flux_consistency(ds: &Dataset) -> CheckResult {
    let bad: Vec<String> = ds
        .flux
        .iter()
        .filter(|t| !t.calibration_consistent())
        .map(|t| format!("OI_FLUX ({})", t.insname))
        .collect();
    if bad.is_empty() {
        ok("flux_consistency")
    } else {
        result(
            "flux_consistency",
            Severity::NotOifits,
            "CALSTAT inconsistent with ARRNAME/STA_INDEX presence",
            bad,
        )
    }
}

type CheckFn = fn(&Dataset) -> CheckResult;

const CHECKS: &[CheckFn] = &[
    check_tables_present,
    check_revisions,
    check_header_required,
    check_keyword_values,
    check_visrefmap,
    check_unique_targets,
    check_targets_present,
    check_arrname_present,
    check_elements_present,
    check_corr_present,
    check_flagging,
    check_t3amp,
    check_waveorder,
    check_time_deprecated,
    check_flux_consistency,
];

/// Runs every registered check and returns the individual results alongside
/// the worst severity observed across all of them.
pub fn run_all(dataset: &Dataset) -> (Severity, Vec<CheckResult>) {
    let results: Vec<CheckResult> = CHECKS.iter().map(|check| check(dataset)).collect();
    let worst = results.iter().map(|r| r.severity).max().unwrap_or(Severity::None);
    (worst, results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Header, TargetTable};

    #[test]
    fn test_run_all_empty_dataset() {
        let ds = Dataset::new(Header::new_default(), TargetTable::new(2));
        let (worst, results) = run_all(&ds);
        assert_eq!(worst, Severity::NotOifits);
        assert!(results.iter().any(|r| r.name == "tables_present"));
    }

    #[test]
    fn test_severity_order() {
        assert!(Severity::Warning > Severity::None);
        assert!(Severity::NotOifits > Severity::Warning);
        assert!(Severity::NotFits > Severity::NotOifits);
    }
}
