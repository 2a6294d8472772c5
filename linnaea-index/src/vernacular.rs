//! Vernacular sub-index construction
//!
//! Joins common-name rows against the loading index by lsid and writes
//! the matches into `<target>/vernacular`. Common-name matching at
//! query time is case-sensitive string equality, so the sub-index uses
//! the plain keyword analyzer.

use std::path::Path;

use linnaea_bio::VernacularReader;
use linnaea_core::LinnaeaResult;
use tantivy::TantivyDocument;
use tracing::{debug, info};

use crate::fields;
use crate::schema;
use crate::store::{IndexReaderHandle, IndexWriterHandle};

/// Counters from a vernacular join
#[derive(Debug, Clone, Copy, Default)]
pub struct VernacularStats {
    pub rows: u64,
    pub indexed: u64,
    pub unmatched: u64,
}

/// Join `rows` against `loading` and write the vernacular sub-index at
/// `dir`. Rows whose lsid is unknown to the loading index are counted
/// and discarded.
pub fn build_vernacular_index(
    loading: &IndexReaderHandle,
    rows: VernacularReader,
    dir: &Path,
    heap_bytes: usize,
) -> LinnaeaResult<VernacularStats> {
    info!("starting to load the common names");
    let mut writer = IndexWriterHandle::create(dir, schema::vernacular_schema(), heap_bytes)?;
    let f_common = writer.field(fields::COMMON_NAME)?;
    let f_name = writer.field(fields::NAME)?;
    let f_lsid = writer.field(fields::LSID)?;

    let mut stats = VernacularStats::default();
    for row in rows {
        stats.rows += 1;
        let lsid = row.lookup_lsid();
        if loading.term_query(fields::LSID, lsid, 1)?.is_empty() {
            stats.unmatched += 1;
        } else {
            let mut doc = TantivyDocument::default();
            doc.add_text(f_common, &row.vernacular_name);
            doc.add_text(f_name, &row.scientific_name);
            doc.add_text(f_lsid, lsid);
            writer.add(doc)?;
            stats.indexed += 1;
        }
        if stats.rows % 1000 == 0 {
            debug!(
                rows = stats.rows,
                indexed = stats.indexed,
                "common name progress"
            );
        }
    }

    writer.commit()?;
    writer.force_merge()?;
    writer.close()?;
    info!(
        rows = stats.rows,
        indexed = stats.indexed,
        unmatched = stats.unmatched,
        "finished processing common names"
    );
    Ok(stats)
}
