use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// External profile sources, in collection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceId {
    #[serde(rename = "researchgate")]
    ResearchGate,
    GoogleScholar,
    #[serde(rename = "linkedin")]
    LinkedIn,
}

impl SourceId {
    pub const ALL: [SourceId; 3] = [
        SourceId::ResearchGate,
        SourceId::GoogleScholar,
        SourceId::LinkedIn,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SourceId::ResearchGate => "researchgate",
            SourceId::GoogleScholar => "google_scholar",
            SourceId::LinkedIn => "linkedin",
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResearchGateProfile {
    pub name: String,
    pub institution: String,
    pub publications: u64,
    pub citations: u64,
    pub research_interests: Vec<String>,
    pub h_index: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScholarProfile {
    pub name: String,
    pub citations: u64,
    pub h_index: u64,
    pub i10_index: u64,
    /// Publication titles listed on the profile page.
    pub publications: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkedInProfile {
    pub current_position: String,
    pub education: String,
    pub experience: Vec<String>,
}

/// One source's extracted data. Missing fields hold their type default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SourceProfile {
    ResearchGate(ResearchGateProfile),
    GoogleScholar(ScholarProfile),
    LinkedIn(LinkedInProfile),
}

impl SourceProfile {
    /// The all-default profile a source degrades to on failure.
    pub fn empty(id: SourceId) -> Self {
        match id {
            SourceId::ResearchGate => SourceProfile::ResearchGate(ResearchGateProfile::default()),
            SourceId::GoogleScholar => SourceProfile::GoogleScholar(ScholarProfile::default()),
            SourceId::LinkedIn => SourceProfile::LinkedIn(LinkedInProfile::default()),
        }
    }

    pub fn source(&self) -> SourceId {
        match self {
            SourceProfile::ResearchGate(_) => SourceId::ResearchGate,
            SourceProfile::GoogleScholar(_) => SourceId::GoogleScholar,
            SourceProfile::LinkedIn(_) => SourceId::LinkedIn,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == SourceProfile::empty(self.source())
    }
}

/// Results of one run, keyed by source. Skipped sources have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CombinedRecord {
    profiles: BTreeMap<SourceId, SourceProfile>,
}

impl CombinedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, profile: SourceProfile) {
        self.profiles.insert(profile.source(), profile);
    }

    pub fn get(&self, id: SourceId) -> Option<&SourceProfile> {
        self.profiles.get(&id)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn researchgate(&self) -> Option<&ResearchGateProfile> {
        match self.get(SourceId::ResearchGate) {
            Some(SourceProfile::ResearchGate(p)) => Some(p),
            _ => None,
        }
    }

    pub fn scholar(&self) -> Option<&ScholarProfile> {
        match self.get(SourceId::GoogleScholar) {
            Some(SourceProfile::GoogleScholar(p)) => Some(p),
            _ => None,
        }
    }
}
