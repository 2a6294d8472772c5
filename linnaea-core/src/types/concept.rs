/// Raw name-usage rows from a source archive
use serde::{Deserialize, Serialize};

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// A single name-usage row read from the core file of a Darwin Core
/// Archive. Fields hold the raw column values; blank columns are empty
/// strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    /// Row primary key in the source archive
    pub id: String,
    /// Stable taxon identifier; readers substitute `id` when blank
    pub lsid: String,
    pub parent_id: String,
    pub accepted_id: String,
    pub scientific_name: String,
    pub authorship: String,
    pub genus: String,
    pub specific_epithet: String,
    pub infraspecific_epithet: String,
    pub rank_string: String,
    pub taxonomic_status: String,
}

impl Concept {
    /// The stable identifier: the lsid when present, the row id otherwise
    pub fn lsid_or_id(&self) -> &str {
        if is_blank(&self.lsid) {
            &self.id
        } else {
            &self.lsid
        }
    }

    /// A concept is accepted when it has no accepted reference, or the
    /// reference points back at itself (by row id or lsid).
    pub fn is_accepted(&self) -> bool {
        is_blank(&self.accepted_id)
            || self.accepted_id == self.id
            || self.accepted_id == self.lsid_or_id()
    }

    /// Synonyms are the complement of accepted concepts
    pub fn is_synonym(&self) -> bool {
        !self.is_accepted()
    }

    /// Roots are accepted concepts with no parent reference
    pub fn is_root(&self) -> bool {
        self.is_accepted() && is_blank(&self.parent_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concept(id: &str, lsid: &str, parent: &str, accepted: &str) -> Concept {
        Concept {
            id: id.to_string(),
            lsid: lsid.to_string(),
            parent_id: parent.to_string(),
            accepted_id: accepted.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_accepted_when_no_reference() {
        assert!(concept("k1", "K1", "", "").is_accepted());
        assert!(concept("k1", "K1", "", "   ").is_accepted());
    }

    #[test]
    fn test_accepted_when_self_referencing() {
        assert!(concept("k1", "K1", "", "k1").is_accepted());
        assert!(concept("k1", "K1", "", "K1").is_accepted());
    }

    #[test]
    fn test_synonym_when_reference_differs() {
        let syn = concept("s2", "S2", "", "S1");
        assert!(syn.is_synonym());
        assert!(!syn.is_root());
    }

    #[test]
    fn test_root_requires_blank_parent() {
        assert!(concept("k1", "K1", "", "").is_root());
        assert!(!concept("g1", "G1", "k1", "").is_root());
    }

    #[test]
    fn test_lsid_substitution() {
        assert_eq!(concept("r7", "", "", "").lsid_or_id(), "r7");
        assert_eq!(concept("r7", "urn:lsid:x", "", "").lsid_or_id(), "urn:lsid:x");
        // substituted lsid also counts for the accepted self-reference
        assert!(concept("r7", "", "", "r7").is_accepted());
    }
}
