//! Shared fixtures for the index integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use linnaea_bio::{DwcArchive, ScientificNameParser};
use linnaea_core::IndexerConfig;
use linnaea_index::search::add_synonyms;
use linnaea_index::walker::HierarchyWalker;
use linnaea_index::{fields, IndexReaderHandle, LoadingIndexBuilder, SearchIndexWriter, StoredDoc};
use tempfile::TempDir;

pub const META_XML: &str = r#"<archive xmlns="http://rs.tdwg.org/dwc/text/">
  <core encoding="UTF-8" fieldsTerminatedBy="\t" linesTerminatedBy="\n" fieldsEnclosedBy="" ignoreHeaderLines="1" rowType="http://rs.tdwg.org/dwc/terms/Taxon">
    <files>
      <location>taxa.txt</location>
    </files>
    <id index="0"/>
    <field index="1" term="http://rs.tdwg.org/dwc/terms/taxonID"/>
    <field index="2" term="http://rs.tdwg.org/dwc/terms/parentNameUsageID"/>
    <field index="3" term="http://rs.tdwg.org/dwc/terms/acceptedNameUsageID"/>
    <field index="4" term="http://rs.tdwg.org/dwc/terms/scientificName"/>
    <field index="5" term="http://rs.tdwg.org/dwc/terms/scientificNameAuthorship"/>
    <field index="6" term="http://rs.tdwg.org/dwc/terms/taxonRank"/>
    <field index="7" term="http://rs.tdwg.org/dwc/terms/taxonomicStatus"/>
  </core>
</archive>
"#;

/// Write a small Darwin Core Archive into `dir`. Rows are raw
/// tab-separated lines in the column order declared by [`META_XML`].
pub fn write_archive(dir: &Path, rows: &[&str]) {
    fs::write(dir.join("meta.xml"), META_XML).unwrap();
    let mut data = String::from(
        "id\ttaxonID\tparentNameUsageID\tacceptedNameUsageID\tscientificName\tscientificNameAuthorship\ttaxonRank\ttaxonomicStatus\n",
    );
    for row in rows {
        data.push_str(row);
        data.push('\n');
    }
    fs::write(dir.join("taxa.txt"), data).unwrap();
}

/// A completed load + search build over a fixture archive
pub struct Pipeline {
    _dir: TempDir,
    pub tmp: PathBuf,
    pub cb: PathBuf,
}

impl Pipeline {
    /// Run the full load + walk + synonym build over `rows`
    pub fn run(rows: &[&str]) -> Pipeline {
        let dir = TempDir::new().unwrap();
        let archive_dir = dir.path().join("dwca");
        let tmp = dir.path().join("tmp");
        let cb = dir.path().join("target").join("cb");
        fs::create_dir_all(&archive_dir).unwrap();

        write_archive(&archive_dir, rows);
        let archive = DwcArchive::open(&archive_dir).unwrap();
        let config = IndexerConfig::default();
        let parser = ScientificNameParser::new();

        LoadingIndexBuilder::new(config.clone())
            .build(&archive, &tmp)
            .unwrap();

        let walker = HierarchyWalker::open(&tmp, &parser, &config).unwrap();
        let mut writer = SearchIndexWriter::create(&cb, config.writer_heap_bytes).unwrap();
        walker.walk(&mut writer).unwrap();
        add_synonyms(&mut writer, &archive, &parser).unwrap();
        writer.finish().unwrap();

        Pipeline {
            _dir: dir,
            tmp,
            cb,
        }
    }

    pub fn search_reader(&self) -> IndexReaderHandle {
        IndexReaderHandle::open(&self.cb).unwrap()
    }

    /// All accepted-concept documents (the ones carrying an interval)
    pub fn accepted_docs(&self) -> Vec<StoredDoc> {
        self.search_reader()
            .all_docs()
            .unwrap()
            .into_iter()
            .filter(|d| d.u64_value(fields::LEFT).is_some())
            .collect()
    }

    /// All synonym documents
    pub fn synonym_docs(&self) -> Vec<StoredDoc> {
        self.search_reader()
            .all_docs()
            .unwrap()
            .into_iter()
            .filter(|d| d.text(fields::ACCEPTED_LSID).is_some())
            .collect()
    }
}

/// Find the document whose stored lsid equals `lsid`
pub fn by_lsid<'d>(docs: &'d [StoredDoc], lsid: &str) -> &'d StoredDoc {
    docs.iter()
        .find(|d| d.text_or_empty(fields::LSID) == lsid)
        .unwrap_or_else(|| panic!("no document with lsid {}", lsid))
}

/// The `(left, right)` interval of a document
pub fn interval(doc: &StoredDoc) -> (u64, u64) {
    (
        doc.u64_value(fields::LEFT).unwrap(),
        doc.u64_value(fields::RIGHT).unwrap(),
    )
}
