// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! OI_ARRAY: array geometry.

use super::FovType;

/// The reference frame an ARRAY table's coordinates are given in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Geocentric,
    Sky,
}

impl Frame {
    pub fn as_str(self) -> &'static str {
        match self {
            Frame::Geocentric => "GEOCENTRIC",
            Frame::Sky => "SKY",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "GEOCENTRIC" => Some(Frame::Geocentric),
            "SKY" => Some(Frame::Sky),
            _ => None,
        }
    }
}

/// One station of an interferometric array.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tel_name: String,
    pub sta_name: String,
    pub sta_index: i32,
    pub diameter: f64,
    /// Station coordinates (x, y, z) in the array's reference frame,
    /// metres.
    pub sta_xyz: [f64; 3],
    /// Field of view, arcseconds. Introduced at OIFITS2.
    pub fov: Option<f64>,
    /// Field-of-view model. Introduced at OIFITS2.
    pub fov_type: Option<FovType>,
}

impl Element {
    /// A new element with every field at its OIFITS "absent" default.
    pub fn new_default() -> Self {
        Element {
            tel_name: String::new(),
            sta_name: String::new(),
            sta_index: -1,
            diameter: f64::NAN,
            sta_xyz: [f64::NAN; 3],
            fov: None,
            fov_type: None,
        }
    }
}

/// A named collection of [`Element`]s (OI_ARRAY extension).
#[derive(Debug, Clone)]
pub struct ArrayTable {
    pub revision: i32,
    pub arrname: String,
    pub frame: Frame,
    /// Array-centre coordinates (x, y, z), metres.
    pub array_xyz: [f64; 3],
    pub elements: Vec<Element>,
}

impl ArrayTable {
    /// Allocate a table with `n` elements, all at their default values.
    pub fn new(revision: i32, arrname: impl Into<String>, n: usize) -> Self {
        ArrayTable {
            revision,
            arrname: arrname.into(),
            frame: Frame::Geocentric,
            array_xyz: [f64::NAN; 3],
            elements: (0..n).map(|_| Element::new_default()).collect(),
        }
    }

    /// Upgrade this table to revision 2. This only sets the revision stamp;
    /// rev 1 already has every field rev 2 introduced (fov/fov_type are
    /// simply `None` until populated).
    pub fn upgrade_to_v2(&mut self) {
        self.revision = 2;
    }

    /// Find the element with the given station index, if any.
    pub fn element(&self, sta_index: i32) -> Option<&Element> {
        self.elements.iter().find(|e| e.sta_index == sta_index)
    }

    /// Content equality used by the merger to decide whether two ARRAY
    /// tables describe the same array and can be deduplicated. Station
    /// name and telescope name are ignored, per the OIFITS merge
    /// convention this crate follows.
    pub fn content_eq(&self, other: &ArrayTable) -> bool {
        use crate::constants::{MERGE_COORD_TOLERANCE, MERGE_DIAMETER_TOLERANCE};

        let xyz_close = self
            .array_xyz
            .iter()
            .zip(other.array_xyz.iter())
            .all(|(a, b)| (a - b).abs() < MERGE_COORD_TOLERANCE);
        if !xyz_close {
            return false;
        }

        if self.elements.len() != other.elements.len() {
            return false;
        }

        for a in &self.elements {
            let Some(b) = other.element(a.sta_index) else {
                return false;
            };
            let xyz_close = a
                .sta_xyz
                .iter()
                .zip(b.sta_xyz.iter())
                .all(|(x, y)| (x - y).abs() < MERGE_COORD_TOLERANCE);
            if !xyz_close {
                return false;
            }
            if (a.diameter - b.diameter).abs() >= MERGE_DIAMETER_TOLERANCE {
                return false;
            }
            let rev2 = self.revision.max(other.revision) >= 2;
            if rev2 {
                match (a.fov, b.fov) {
                    (Some(x), Some(y)) if (x - y).abs() < MERGE_COORD_TOLERANCE => {}
                    (None, None) => {}
                    _ => return false,
                }
                if a.fov_type != b.fov_type {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_eq_ignores_names() {
        let mut a = ArrayTable::new(2, "VLTI", 1);
        a.array_xyz = [1.0, 2.0, 3.0];
        a.elements[0].sta_index = 1;
        a.elements[0].sta_xyz = [0.1, 0.2, 0.3];
        a.elements[0].diameter = 1.8;
        a.elements[0].sta_name = "A1".to_string();

        let mut b = a.clone();
        b.arrname = "VLTI_COPY".to_string();
        b.elements[0].sta_name = "DIFFERENT".to_string();
        b.elements[0].tel_name = "DIFFERENT".to_string();

        assert!(a.content_eq(&b));

        b.elements[0].diameter = 2.5;
        assert!(!a.content_eq(&b));
    }
}
