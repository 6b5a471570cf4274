// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! OI_CORR: sparse correlation matrix over the dataset's observables.

/// A named sparse description of a symmetric correlation matrix: parallel
/// i-index/j-index/value sequences giving nonzero off-diagonal entries.
#[derive(Debug, Clone)]
pub struct CorrTable {
    pub revision: i32,
    pub corrname: String,
    /// Total number of correlated data values the matrix spans.
    pub ndata: i32,
    pub iindx: Vec<i32>,
    pub jindx: Vec<i32>,
    pub corr: Vec<f64>,
}

impl CorrTable {
    pub fn new(revision: i32, corrname: impl Into<String>, ndata: i32, n: usize) -> Self {
        CorrTable {
            revision,
            corrname: corrname.into(),
            ndata,
            iindx: vec![-1; n],
            jindx: vec![-1; n],
            corr: vec![f64::NAN; n],
        }
    }

    pub fn len(&self) -> usize {
        self.iindx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.iindx.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let c = CorrTable::new(1, "CORR1", 100, 3);
        assert_eq!(c.len(), 3);
        assert!(c.iindx.iter().all(|&x| x == -1));
        assert!(c.corr.iter().all(|x| x.is_nan()));
    }
}
