// Linnaea - source readers and name handling

pub mod canonical;
pub mod dwca;
pub mod vernacular;

// Re-export commonly used types
pub use canonical::{Canonicalizer, ScientificNameParser};
pub use dwca::DwcArchive;
pub use vernacular::{VernacularReader, VernacularRow};
