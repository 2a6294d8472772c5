// Linnaea - inverted index construction

pub mod analyzers;
pub mod fields;
pub mod homonym;
pub mod loading;
pub mod schema;
pub mod search;
pub mod store;
pub mod vernacular;
pub mod walker;

// Re-export the pipeline entry points
pub use loading::{LoadStats, LoadingIndexBuilder};
pub use search::{SearchIndexWriter, SynonymStats};
pub use store::{IndexReaderHandle, IndexWriterHandle, StoredDoc};
pub use walker::{HierarchyWalker, WalkStats};
