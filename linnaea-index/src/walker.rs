//! Hierarchy materialization
//!
//! Walks the parent/child links recorded in the loading index depth
//! first from the root concepts, assigning nested-set interval labels
//! and accumulating the seven-slot higher classification on the way
//! down. One enriched document per accepted concept is emitted into the
//! search index.
//!
//! Interval labels satisfy: `left < right` for every concept, an
//! ancestor's interval strictly contains every descendant's, and
//! sibling intervals are disjoint. Ancestry queries on the search index
//! therefore reduce to range checks.

use std::path::Path;

use linnaea_bio::Canonicalizer;
use linnaea_core::types::{Classification, Rank};
use linnaea_core::{IndexerConfig, LinnaeaError, LinnaeaResult};
use tracing::{debug, info};

use crate::fields;
use crate::search::SearchIndexWriter;
use crate::store::{IndexReaderHandle, StoredDoc};

/// Counters from a hierarchy walk
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkStats {
    pub roots: u64,
    pub accepted: u64,
}

/// Depth-first walker over a committed loading index
pub struct HierarchyWalker<'a> {
    reader: IndexReaderHandle,
    canonicalizer: &'a dyn Canonicalizer,
    log_interval: u64,
}

impl<'a> HierarchyWalker<'a> {
    /// Open the loading index at `tmp_dir` for walking. The index must
    /// have been built by a previous load phase.
    pub fn open(
        tmp_dir: &Path,
        canonicalizer: &'a dyn Canonicalizer,
        config: &IndexerConfig,
    ) -> LinnaeaResult<Self> {
        let reader = IndexReaderHandle::open(tmp_dir).map_err(|_| {
            LinnaeaError::Configuration(format!(
                "no loading index at {}; run with --load before building the search index",
                tmp_dir.display()
            ))
        })?;
        Ok(Self {
            reader,
            canonicalizer,
            log_interval: config.log_interval,
        })
    }

    /// Walk every root subtree, emitting accepted concepts into
    /// `writer`. Orphaned concepts (parent neither blank nor present)
    /// are unreachable and therefore omitted.
    pub fn walk(&self, writer: &mut SearchIndexWriter) -> LinnaeaResult<WalkStats> {
        let roots = self.reader.term_query_all(fields::ROOT, fields::FLAG_TRUE)?;
        let mut stats = WalkStats::default();
        let mut right: u64 = 0;
        for root in &roots {
            let left = right + 1;
            right = self.visit(root, 1, left, &Classification::default(), writer, &mut stats)?;
            stats.roots += 1;
            info!(
                lsid = root.text_or_empty(fields::LSID),
                name = root.text_or_empty(fields::NAME),
                left,
                right,
                "finished loading root subtree"
            );
        }
        Ok(stats)
    }

    /// Visit one accepted concept. `left` is the next unused interval
    /// label; the emitted interval is `(left, right)` where `right` is
    /// one past the last label used inside the subtree. Returns the
    /// emitted `right` so the caller can continue the numbering.
    fn visit(
        &self,
        doc: &StoredDoc,
        depth: u32,
        left: u64,
        higher: &Classification,
        writer: &mut SearchIndexWriter,
        stats: &mut WalkStats,
    ) -> LinnaeaResult<u64> {
        let id = doc.text_or_empty(fields::ID);
        let lsid = doc.text_or_empty(fields::LSID);
        let name = doc.text_or_empty(fields::NAME);
        let rank_id = doc
            .i64_value(fields::RANK_ID)
            .unwrap_or_else(|| Rank::Unranked.id());

        let canonical = self.canonicalizer.canonical(name);
        let classification = higher.with_slot(rank_id, &canonical, lsid);

        let mut children = self.reader.term_query_all(fields::PARENT_ID, id)?;
        if children.is_empty() && !lsid.is_empty() {
            // archives may link children by lsid rather than row id
            children = self.reader.term_query_all(fields::PARENT_ID, lsid)?;
        }

        let mut last = left;
        for child in &children {
            last = self.visit(child, depth + 1, last + 1, &classification, writer, stats)?;
        }
        let right = last + 1;

        writer.emit_accepted(
            &canonical,
            id,
            lsid,
            doc.text(fields::AUTHOR),
            doc.text_or_empty(fields::RANK),
            rank_id,
            left,
            right,
            &classification,
        )?;
        stats.accepted += 1;
        if self.log_interval > 0 && stats.accepted % self.log_interval == 0 {
            debug!(left, right, depth, "hierarchy walk progress");
        }
        Ok(right)
    }
}
