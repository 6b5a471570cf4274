// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Primary-header metadata, common to the whole dataset.

/// Mandatory and optional keywords carried in the primary HDU.
#[derive(Debug, Clone)]
pub struct Header {
    pub origin: String,
    pub date: String,
    pub date_obs: String,
    /// Always "OIFITS2" on write, per [`crate::constants::CONTENT_OIFITS2`].
    pub content: String,
    pub telescop: String,
    pub instrume: String,
    pub observer: String,
    pub insmode: String,
    pub object: String,
    pub referenc: Option<String>,
    pub author: Option<String>,
    pub prog_id: Option<String>,
    pub procsoft: Option<String>,
    pub obstech: Option<String>,
}

impl Header {
    pub fn new_default() -> Self {
        Header {
            origin: String::new(),
            date: String::new(),
            date_obs: String::new(),
            content: crate::constants::CONTENT_OIFITS2.to_string(),
            telescop: String::new(),
            instrume: String::new(),
            observer: String::new(),
            insmode: String::new(),
            object: String::new(),
            referenc: None,
            author: None,
            prog_id: None,
            procsoft: None,
            obstech: None,
        }
    }

    /// Mandatory keywords, substituting the crate's "unset" sentinel for
    /// any that are empty (used on write to guarantee standard compliance).
    pub fn mandatory_or_unset(&self) -> [(&'static str, String); 9] {
        let unset = crate::constants::UNSET_KEYWORD;
        let or_unset = |s: &str| {
            if s.is_empty() {
                unset.to_string()
            } else {
                s.to_string()
            }
        };
        [
            ("ORIGIN", or_unset(&self.origin)),
            ("DATE", or_unset(&self.date)),
            ("DATE-OBS", or_unset(&self.date_obs)),
            ("CONTENT", or_unset(&self.content)),
            ("TELESCOP", or_unset(&self.telescop)),
            ("INSTRUME", or_unset(&self.instrume)),
            ("OBSERVER", or_unset(&self.observer)),
            ("INSMODE", or_unset(&self.insmode)),
            ("OBJECT", or_unset(&self.object)),
        ]
    }

    /// The mandatory keywords that are empty, by name — used by the
    /// `header_required` validator check.
    pub fn empty_mandatory_keys(&self) -> Vec<&'static str> {
        [
            ("ORIGIN", self.origin.as_str()),
            ("DATE", self.date.as_str()),
            ("DATE-OBS", self.date_obs.as_str()),
            ("CONTENT", self.content.as_str()),
            ("TELESCOP", self.telescop.as_str()),
            ("INSTRUME", self.instrume.as_str()),
            ("OBSERVER", self.observer.as_str()),
            ("INSMODE", self.insmode.as_str()),
            ("OBJECT", self.object.as_str()),
        ]
        .into_iter()
        .filter(|(_, v)| v.is_empty())
        .map(|(k, _)| k)
        .collect()
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new_default()
    }
}
