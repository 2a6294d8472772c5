//! Domain types shared across the Linnaea workspace

pub mod classification;
pub mod concept;
pub mod rank;

pub use classification::{Classification, NamedTaxon};
pub use concept::Concept;
pub use rank::Rank;
