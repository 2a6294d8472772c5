//! Field names shared by the loading, search, vernacular and homonym
//! indexes.

pub const ID: &str = "id";
pub const LSID: &str = "lsid";
pub const PARENT_ID: &str = "parent_id";
pub const ACCEPTED: &str = "accepted";
pub const ACCEPTED_LSID: &str = "accepted_lsid";

pub const NAME: &str = "name";
pub const AUTHOR: &str = "author";
pub const GENUS: &str = "genus";
pub const SPECIFIC: &str = "specific";
pub const INFRA_SPECIFIC: &str = "infra_specific";

pub const RANK: &str = "rank";
pub const RANK_ID: &str = "rank_id";
pub const IS_SYNONYM: &str = "is_synonym";
pub const ROOT: &str = "root";
pub const STATUS: &str = "status";

pub const LEFT: &str = "left";
pub const RIGHT: &str = "right";

// Classification slots: the name field and its lsid companion
pub const KINGDOM: &str = "kingdom";
pub const KINGDOM_ID: &str = "kid";
pub const PHYLUM: &str = "phylum";
pub const PHYLUM_ID: &str = "pid";
pub const CLASS: &str = "class";
pub const CLASS_ID: &str = "cid";
pub const ORDER: &str = "order";
pub const ORDER_ID: &str = "oid";
pub const FAMILY: &str = "family";
pub const FAMILY_ID: &str = "fid";
pub const GENUS_ID: &str = "gid";
pub const SPECIES: &str = "species";
pub const SPECIES_ID: &str = "sid";

pub const COMMON_NAME: &str = "common_name";

/// Values of the boolean-ish term fields (`is_synonym`, `root`)
pub const FLAG_TRUE: &str = "T";
pub const FLAG_FALSE: &str = "F";
