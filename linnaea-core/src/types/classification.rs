/// Higher classification propagated down the hierarchy walk
use serde::{Deserialize, Serialize};

use super::rank::Rank;

/// A (canonical name, lsid) pair filling one classification slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedTaxon {
    pub name: String,
    pub lsid: String,
}

impl NamedTaxon {
    pub fn new(name: impl Into<String>, lsid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lsid: lsid.into(),
        }
    }
}

/// The seven-slot Linnaean classification of a concept.
///
/// A child's classification is its parent's with the slot for the
/// child's own rank overwritten; slots below the child's rank stay
/// empty. Instances are copied down the recursion, never shared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub kingdom: Option<NamedTaxon>,
    pub phylum: Option<NamedTaxon>,
    pub class: Option<NamedTaxon>,
    pub order: Option<NamedTaxon>,
    pub family: Option<NamedTaxon>,
    pub genus: Option<NamedTaxon>,
    pub species: Option<NamedTaxon>,
}

impl Classification {
    /// Copy this classification, overwriting the slot for `rank_id` when
    /// it is one of the seven major ranks. Other rank ids return an
    /// unchanged copy.
    pub fn with_slot(&self, rank_id: i64, name: &str, lsid: &str) -> Classification {
        let mut next = self.clone();
        let taxon = NamedTaxon::new(name, lsid);
        match rank_id {
            id if id == Rank::Kingdom.id() => next.kingdom = Some(taxon),
            id if id == Rank::Phylum.id() => next.phylum = Some(taxon),
            id if id == Rank::Class.id() => next.class = Some(taxon),
            id if id == Rank::Order.id() => next.order = Some(taxon),
            id if id == Rank::Family.id() => next.family = Some(taxon),
            id if id == Rank::Genus.id() => next.genus = Some(taxon),
            id if id == Rank::Species.id() => next.species = Some(taxon),
            _ => {}
        }
        next
    }

    /// The slot for `rank_id`, when filled
    pub fn slot(&self, rank_id: i64) -> Option<&NamedTaxon> {
        match rank_id {
            id if id == Rank::Kingdom.id() => self.kingdom.as_ref(),
            id if id == Rank::Phylum.id() => self.phylum.as_ref(),
            id if id == Rank::Class.id() => self.class.as_ref(),
            id if id == Rank::Order.id() => self.order.as_ref(),
            id if id == Rank::Family.id() => self.family.as_ref(),
            id if id == Rank::Genus.id() => self.genus.as_ref(),
            id if id == Rank::Species.id() => self.species.as_ref(),
            _ => None,
        }
    }
}
