// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! OI_TARGET: the single per-dataset target table.

/// Introduced at OIFITS2: whether a target is the science target or a
/// calibrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Sci,
    Cal,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Sci => "SCI",
            Category::Cal => "CAL",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "SCI" => Some(Category::Sci),
            "CAL" => Some(Category::Cal),
            _ => None,
        }
    }
}

/// One astronomical source.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub target_id: i32,
    pub target: String,
    /// Right ascension, degrees.
    pub raep0: f64,
    /// Declination, degrees.
    pub decep0: f64,
    pub equinox: f64,
    /// RA error, degrees.
    pub ra_err: f64,
    /// Dec error, degrees.
    pub dec_err: f64,
    pub sys_vel: f64,
    pub vel_typ: String,
    pub vel_def: String,
    /// Proper motion in RA, degrees/year.
    pub pm_ra: f64,
    /// Proper motion in Dec, degrees/year.
    pub pm_dec: f64,
    pub pm_ra_err: f64,
    pub pm_dec_err: f64,
    pub parallax: f64,
    pub para_err: f64,
    pub spec_typ: String,
    /// Introduced at OIFITS2.
    pub category: Option<Category>,
}

impl Target {
    pub fn new_default(target_id: i32) -> Self {
        Target {
            target_id,
            target: String::new(),
            raep0: f64::NAN,
            decep0: f64::NAN,
            equinox: f64::NAN,
            ra_err: f64::NAN,
            dec_err: f64::NAN,
            sys_vel: f64::NAN,
            vel_typ: String::new(),
            vel_def: String::new(),
            pm_ra: f64::NAN,
            pm_dec: f64::NAN,
            pm_ra_err: f64::NAN,
            pm_dec_err: f64::NAN,
            parallax: f64::NAN,
            para_err: f64::NAN,
            spec_typ: String::new(),
            category: None,
        }
    }
}

/// The dataset's single TARGET table.
#[derive(Debug, Clone, Default)]
pub struct TargetTable {
    pub revision: i32,
    pub targets: Vec<Target>,
}

impl TargetTable {
    pub fn new(revision: i32) -> Self {
        TargetTable {
            revision,
            targets: Vec::new(),
        }
    }

    pub fn upgrade_to_v2(&mut self) {
        self.revision = 2;
    }

    pub fn by_id(&self, target_id: i32) -> Option<&Target> {
        self.targets.iter().find(|t| t.target_id == target_id)
    }

    pub fn by_name(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.target == name)
    }

    /// Duplicate target names, for the `unique_targets` validator check.
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        let mut dupes = Vec::new();
        for t in &self.targets {
            if !seen.insert(t.target.as_str()) {
                dupes.push(t.target.as_str());
            }
        }
        dupes
    }
}
