// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The filter and iterator (component F): a `FilterSpec` configuration
//! plus three cursor-based iterators (VIS, VIS2, T3) that walk a dataset
//! in (table, record, channel) order, rejecting positions that fail the
//! spec's predicates.

use glob::Pattern;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::RAD2DEG;
use crate::model::{Dataset, T3Table, VisTable, Vis2Table};

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("invalid glob pattern '{0}'")]
    BadPattern(String),
}

/// An immutable filter configuration. An empty (default) spec accepts
/// every unflagged channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default = "default_pattern")]
    pub arrname: String,
    #[serde(default = "default_pattern")]
    pub insname: String,
    #[serde(default = "default_pattern")]
    pub corrname: String,
    pub target_id: Option<i32>,
    pub mjd_range: Option<(f64, f64)>,
    pub bas_range: Option<(f64, f64)>,
    pub wave_range: Option<(f64, f64)>,
    pub uvrad_range: Option<(f64, f64)>,
    pub snr_range: Option<(f64, f64)>,
    #[serde(default)]
    pub accept_flagged: bool,
    #[serde(default = "default_true")]
    pub accept_vis: bool,
    #[serde(default = "default_true")]
    pub accept_vis2: bool,
    #[serde(default = "default_true")]
    pub accept_t3amp: bool,
    #[serde(default = "default_true")]
    pub accept_t3phi: bool,
}

fn default_pattern() -> String {
    "*".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for FilterSpec {
    fn default() -> Self {
        FilterSpec {
            arrname: default_pattern(),
            insname: default_pattern(),
            corrname: default_pattern(),
            target_id: None,
            mjd_range: None,
            bas_range: None,
            wave_range: None,
            uvrad_range: None,
            snr_range: None,
            accept_flagged: false,
            accept_vis: true,
            accept_vis2: true,
            accept_t3amp: true,
            accept_t3phi: true,
        }
    }
}

impl FilterSpec {
    /// CLI-args-override-file-args merge: any `Some`/non-default field in
    /// `self` wins over `other`.
    pub fn merge(self, other: FilterSpec) -> FilterSpec {
        FilterSpec {
            arrname: if self.arrname != default_pattern() { self.arrname } else { other.arrname },
            insname: if self.insname != default_pattern() { self.insname } else { other.insname },
            corrname: if self.corrname != default_pattern() { self.corrname } else { other.corrname },
            target_id: self.target_id.or(other.target_id),
            mjd_range: self.mjd_range.or(other.mjd_range),
            bas_range: self.bas_range.or(other.bas_range),
            wave_range: self.wave_range.or(other.wave_range),
            uvrad_range: self.uvrad_range.or(other.uvrad_range),
            snr_range: self.snr_range.or(other.snr_range),
            accept_flagged: self.accept_flagged || other.accept_flagged,
            accept_vis: self.accept_vis && other.accept_vis,
            accept_vis2: self.accept_vis2 && other.accept_vis2,
            accept_t3amp: self.accept_t3amp && other.accept_t3amp,
            accept_t3phi: self.accept_t3phi && other.accept_t3phi,
        }
    }

    fn compile(&self, pattern: &str) -> Result<Pattern, FilterError> {
        Pattern::new(pattern).map_err(|_| FilterError::BadPattern(pattern.to_string()))
    }

    fn in_range(range: Option<(f64, f64)>, value: f64) -> bool {
        range.map(|(lo, hi)| value >= lo && value <= hi).unwrap_or(true)
    }
}

/// Compiled glob patterns, cached once per iterator rather than recompiled
/// on every `next()`.
struct CompiledPatterns {
    arrname: Pattern,
    insname: Pattern,
    corrname: Pattern,
}

impl CompiledPatterns {
    fn new(spec: &FilterSpec) -> Result<Self, FilterError> {
        Ok(CompiledPatterns {
            arrname: spec.compile(&spec.arrname)?,
            insname: spec.compile(&spec.insname)?,
            corrname: spec.compile(&spec.corrname)?,
        })
    }
}

/// The cursor's current (table, record, channel) position.
#[derive(Debug, Clone, Copy)]
pub struct CursorPosition {
    pub table: usize,
    pub record: usize,
    pub channel: usize,
}

macro_rules! impl_iter_scaffold {
    ($name:ident, $table_ty:ty, $tables_field:ident) => {
        pub struct $name<'a> {
            dataset: &'a Dataset,
            spec: &'a FilterSpec,
            patterns: CompiledPatterns,
            table: usize,
            record: usize,
            channel: i64,
        }

        impl<'a> $name<'a> {
            pub fn new(dataset: &'a Dataset, spec: &'a FilterSpec) -> Result<Self, FilterError> {
                Ok($name {
                    dataset,
                    spec,
                    patterns: CompiledPatterns::new(spec)?,
                    table: 0,
                    record: 0,
                    channel: -1,
                })
            }

            fn tables(&self) -> &'a [$table_ty] {
                &self.dataset.$tables_field
            }

            fn table_passes(&self, t: &$table_ty) -> bool {
                self.patterns.arrname.matches(&t.arrname)
                    && self.patterns.insname.matches(&t.insname)
                    && t.corrname
                        .as_deref()
                        .map(|c| self.patterns.corrname.matches(c))
                        .unwrap_or(true)
            }

            /// Advances the cursor to the next raw position, without
            /// applying predicates. Returns `None` at true end-of-data.
            fn step(&mut self) -> Option<CursorPosition> {
                let tables = self.tables();
                if tables.is_empty() {
                    return None;
                }
                loop {
                    if self.table >= tables.len() {
                        return None;
                    }
                    let t = &tables[self.table];
                    let nwave = t.nwave as i64;
                    self.channel += 1;
                    if self.channel >= nwave.max(1) {
                        self.channel = 0;
                        self.record += 1;
                    }
                    if self.record >= t.records.len() {
                        self.table += 1;
                        self.record = 0;
                        self.channel = -1;
                        continue;
                    }
                    return Some(CursorPosition {
                        table: self.table,
                        record: self.record,
                        channel: self.channel as usize,
                    });
                }
            }
        }
    };
}

impl_iter_scaffold!(VisIter, VisTable, vis);
impl_iter_scaffold!(Vis2Iter, Vis2Table, vis2);
impl_iter_scaffold!(T3Iter, T3Table, t3);

impl<'a> VisIter<'a> {
    /// Advances to and returns the next position that passes every
    /// predicate, or `None` when the data is exhausted.
    pub fn advance(&mut self) -> Option<CursorPosition> {
        loop {
            let pos = self.step()?;
            let t = &self.tables()[pos.table];
            if !self.table_passes(t) || !self.spec.accept_vis {
                continue;
            }
            let r = &t.records[pos.record];
            if let Some(id) = self.spec.target_id {
                if r.target_id != id {
                    continue;
                }
            }
            if !FilterSpec::in_range(self.spec.mjd_range, r.mjd) {
                continue;
            }
            if !FilterSpec::in_range(self.spec.bas_range, r.baseline()) {
                continue;
            }
            let flagged = r.flag[pos.channel];
            if flagged && !self.spec.accept_flagged {
                continue;
            }
            let wave = self
                .dataset
                .wavelength_by_name(&t.insname)
                .map(|w| w.eff_wave[pos.channel])
                .unwrap_or(f64::NAN);
            if !FilterSpec::in_range(self.spec.wave_range, wave) {
                continue;
            }
            let uvrad = (r.baseline()) / wave;
            if !FilterSpec::in_range(self.spec.uvrad_range, uvrad) {
                continue;
            }
            let amp_snr = r.visamp[pos.channel] / r.visamperr[pos.channel];
            let phi_snr = RAD2DEG / r.visphierr[pos.channel];
            if !FilterSpec::in_range(self.spec.snr_range, amp_snr) || !FilterSpec::in_range(self.spec.snr_range, phi_snr) {
                continue;
            }
            return Some(pos);
        }
    }

    /// The current record's (u/lambda, v/lambda) pair, cycles per radian.
    pub fn uv_per_wavelength(&self, pos: CursorPosition) -> (f64, f64) {
        let t = &self.tables()[pos.table];
        let r = &t.records[pos.record];
        let wave = self
            .dataset
            .wavelength_by_name(&t.insname)
            .map(|w| w.eff_wave[pos.channel])
            .unwrap_or(f64::NAN);
        (r.ucoord / wave, r.vcoord / wave)
    }
}

impl<'a> Iterator for VisIter<'a> {
    type Item = CursorPosition;
    fn next(&mut self) -> Option<CursorPosition> {
        self.advance()
    }
}

impl<'a> Vis2Iter<'a> {
    pub fn advance(&mut self) -> Option<CursorPosition> {
        loop {
            let pos = self.step()?;
            let t = &self.tables()[pos.table];
            if !self.table_passes(t) || !self.spec.accept_vis2 {
                continue;
            }
            let r = &t.records[pos.record];
            if let Some(id) = self.spec.target_id {
                if r.target_id != id {
                    continue;
                }
            }
            if !FilterSpec::in_range(self.spec.mjd_range, r.mjd) {
                continue;
            }
            if !FilterSpec::in_range(self.spec.bas_range, r.baseline()) {
                continue;
            }
            let flagged = r.flag[pos.channel];
            if flagged && !self.spec.accept_flagged {
                continue;
            }
            let wave = self
                .dataset
                .wavelength_by_name(&t.insname)
                .map(|w| w.eff_wave[pos.channel])
                .unwrap_or(f64::NAN);
            if !FilterSpec::in_range(self.spec.wave_range, wave) {
                continue;
            }
            let uvrad = r.baseline() / wave;
            if !FilterSpec::in_range(self.spec.uvrad_range, uvrad) {
                continue;
            }
            let snr = r.vis2data[pos.channel] / r.vis2err[pos.channel];
            if !FilterSpec::in_range(self.spec.snr_range, snr) {
                continue;
            }
            return Some(pos);
        }
    }

    pub fn uv_per_wavelength(&self, pos: CursorPosition) -> (f64, f64) {
        let t = &self.tables()[pos.table];
        let r = &t.records[pos.record];
        let wave = self
            .dataset
            .wavelength_by_name(&t.insname)
            .map(|w| w.eff_wave[pos.channel])
            .unwrap_or(f64::NAN);
        (r.ucoord / wave, r.vcoord / wave)
    }
}

impl<'a> Iterator for Vis2Iter<'a> {
    type Item = CursorPosition;
    fn next(&mut self) -> Option<CursorPosition> {
        self.advance()
    }
}

impl<'a> T3Iter<'a> {
    pub fn advance(&mut self) -> Option<CursorPosition> {
        loop {
            let pos = self.step()?;
            let t = &self.tables()[pos.table];
            if !self.table_passes(t) {
                continue;
            }
            let r = &t.records[pos.record];
            if let Some(id) = self.spec.target_id {
                if r.target_id != id {
                    continue;
                }
            }
            if !FilterSpec::in_range(self.spec.mjd_range, r.mjd) {
                continue;
            }
            let baselines = r.baselines();
            if let Some(range) = self.spec.bas_range {
                if !baselines.iter().all(|&b| b >= range.0 && b <= range.1) {
                    continue;
                }
            }
            let flagged = r.flag[pos.channel];
            if flagged && !self.spec.accept_flagged {
                continue;
            }
            let wave = self
                .dataset
                .wavelength_by_name(&t.insname)
                .map(|w| w.eff_wave[pos.channel])
                .unwrap_or(f64::NAN);
            if !FilterSpec::in_range(self.spec.wave_range, wave) {
                continue;
            }
            if let Some(range) = self.spec.uvrad_range {
                if !baselines.iter().all(|&b| {
                    let uvrad = b / wave;
                    uvrad >= range.0 && uvrad <= range.1
                }) {
                    continue;
                }
            }
            if self.spec.accept_t3amp {
                let snr = r.t3amp[pos.channel] / r.t3amperr[pos.channel];
                if !FilterSpec::in_range(self.spec.snr_range, snr) {
                    continue;
                }
            }
            if self.spec.accept_t3phi {
                let snr = RAD2DEG / r.t3phierr[pos.channel];
                if !FilterSpec::in_range(self.spec.snr_range, snr) {
                    continue;
                }
            }
            return Some(pos);
        }
    }

    /// The three (u/lambda, v/lambda) pairs for AB, BC, AC.
    pub fn uv_per_wavelength(&self, pos: CursorPosition) -> [(f64, f64); 3] {
        let t = &self.tables()[pos.table];
        let r = &t.records[pos.record];
        let wave = self
            .dataset
            .wavelength_by_name(&t.insname)
            .map(|w| w.eff_wave[pos.channel])
            .unwrap_or(f64::NAN);
        let u3 = -(r.u1coord + r.u2coord);
        let v3 = -(r.v1coord + r.v2coord);
        [
            (r.u1coord / wave, r.v1coord / wave),
            (r.u2coord / wave, r.v2coord / wave),
            (u3 / wave, v3 / wave),
        ]
    }
}

impl<'a> Iterator for T3Iter<'a> {
    type Item = CursorPosition;
    fn next(&mut self) -> Option<CursorPosition> {
        self.advance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Header, TargetTable};

    #[test]
    fn test_default_accepts_all_unflagged() {
        let mut ds = Dataset::new(Header::new_default(), TargetTable::new(2));
        let vis = VisTable::new(2, "VLTI", "GRAVITY", 2, 1);
        ds.vis.push(vis);
        let spec = FilterSpec::default();
        let mut it = VisIter::new(&ds, &spec).unwrap();
        let mut count = 0;
        while it.advance().is_some() {
            count += 1;
        }
        assert_eq!(count, 2);
    }

    #[test]
    fn test_target_id_filter_excludes_all() {
        let mut ds = Dataset::new(Header::new_default(), TargetTable::new(2));
        let mut vis = VisTable::new(2, "VLTI", "GRAVITY", 1, 1);
        vis.records[0].target_id = 1;
        ds.vis.push(vis);
        let mut spec = FilterSpec::default();
        spec.target_id = Some(99);
        let mut it = VisIter::new(&ds, &spec).unwrap();
        assert!(it.advance().is_none());
    }
}
