// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The root aggregate owning every table in a dataset.

use indexmap::IndexMap;

use super::{
    ArrayTable, CorrTable, FluxTable, Header, InspolTable, T3Table, TargetTable, VisTable,
    Vis2Table, WavelengthTable,
};

/// One Header, one TARGET table, and ordered lists of every other
/// extension kind, plus O(1) name lookups rebuilt on read and maintained
/// on mutation.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub header: Header,
    pub target: TargetTable,
    pub arrays: Vec<ArrayTable>,
    pub wavelengths: Vec<WavelengthTable>,
    pub corrs: Vec<CorrTable>,
    pub inspols: Vec<InspolTable>,
    pub vis: Vec<VisTable>,
    pub vis2: Vec<Vis2Table>,
    pub t3: Vec<T3Table>,
    pub flux: Vec<FluxTable>,

    arrname_index: IndexMap<String, usize>,
    insname_index: IndexMap<String, usize>,
    corrname_index: IndexMap<String, usize>,
}

impl Dataset {
    pub fn new(header: Header, target: TargetTable) -> Self {
        Dataset {
            header,
            target,
            arrays: Vec::new(),
            wavelengths: Vec::new(),
            corrs: Vec::new(),
            inspols: Vec::new(),
            vis: Vec::new(),
            vis2: Vec::new(),
            t3: Vec::new(),
            flux: Vec::new(),
            arrname_index: IndexMap::new(),
            insname_index: IndexMap::new(),
            corrname_index: IndexMap::new(),
        }
    }

    /// Rebuild the three name-indexed lookups from the current table
    /// lists. Called after ingest and after any mutation that adds,
    /// removes, or renames a reference table.
    pub fn rebuild_indexes(&mut self) {
        self.arrname_index = self
            .arrays
            .iter()
            .enumerate()
            .map(|(i, a)| (a.arrname.clone(), i))
            .collect();
        self.insname_index = self
            .wavelengths
            .iter()
            .enumerate()
            .map(|(i, w)| (w.insname.clone(), i))
            .collect();
        self.corrname_index = self
            .corrs
            .iter()
            .enumerate()
            .map(|(i, c)| (c.corrname.clone(), i))
            .collect();
    }

    pub fn array_by_name(&self, arrname: &str) -> Option<&ArrayTable> {
        self.arrname_index.get(arrname).map(|&i| &self.arrays[i])
    }

    pub fn wavelength_by_name(&self, insname: &str) -> Option<&WavelengthTable> {
        self.insname_index
            .get(insname)
            .map(|&i| &self.wavelengths[i])
    }

    pub fn corr_by_name(&self, corrname: &str) -> Option<&CorrTable> {
        self.corrname_index.get(corrname).map(|&i| &self.corrs[i])
    }

    /// True iff every data table has exactly one record and every data
    /// record's MJD falls within a single window of `tolerance` days.
    pub fn is_atomic(&self, tolerance: f64) -> bool {
        let mjds: Vec<f64> = self
            .vis
            .iter()
            .flat_map(|t| t.records.iter().map(|r| r.mjd))
            .chain(
                self.vis2
                    .iter()
                    .flat_map(|t| t.records.iter().map(|r| r.mjd)),
            )
            .chain(self.t3.iter().flat_map(|t| t.records.iter().map(|r| r.mjd)))
            .chain(
                self.flux
                    .iter()
                    .flat_map(|t| t.records.iter().map(|r| r.mjd)),
            )
            .collect();

        let one_record_each = self.vis.iter().all(|t| t.records.len() == 1)
            && self.vis2.iter().all(|t| t.records.len() == 1)
            && self.t3.iter().all(|t| t.records.len() == 1)
            && self.flux.iter().all(|t| t.records.len() == 1);
        if !one_record_each || mjds.is_empty() {
            return one_record_each;
        }

        let lo = mjds.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = mjds.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        (hi - lo) <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rebuild_indexes() {
        let mut ds = Dataset::new(Header::new_default(), TargetTable::new(2));
        ds.arrays.push(ArrayTable::new(2, "VLTI", 0));
        ds.wavelengths.push(WavelengthTable::new(2, "GRAVITY", 0));
        ds.rebuild_indexes();
        assert!(ds.array_by_name("VLTI").is_some());
        assert!(ds.array_by_name("CHARA").is_none());
        assert!(ds.wavelength_by_name("GRAVITY").is_some());
    }
}
