mod common;

use std::fs;

use common::write_archive;
use linnaea_bio::{DwcArchive, ScientificNameParser, VernacularReader};
use linnaea_core::IndexerConfig;
use linnaea_index::homonym::build_homonym_index;
use linnaea_index::vernacular::build_vernacular_index;
use linnaea_index::{fields, IndexReaderHandle, LoadingIndexBuilder};
use tempfile::TempDir;

#[test]
fn test_vernacular_rows_join_against_the_loading_index() {
    let dir = TempDir::new().unwrap();
    let archive_dir = dir.path().join("dwca");
    let tmp = dir.path().join("tmp");
    let vernacular_dir = dir.path().join("target").join("vernacular");
    fs::create_dir_all(&archive_dir).unwrap();

    write_archive(
        &archive_dir,
        &["s1\tS1\t\t\tFelis catus\t\tspecies\taccepted"],
    );
    let archive = DwcArchive::open(&archive_dir).unwrap();
    let config = IndexerConfig::default();
    LoadingIndexBuilder::new(config.clone())
        .build(&archive, &tmp)
        .unwrap();

    let common_file = dir.path().join("vernacular.txt");
    fs::write(
        &common_file,
        "t1\tS1\tFelis catus\tdomestic cat\ten\tAU\n\
         t2\tUNKNOWN\tNulla nulla\tnothing\ten\tAU\n",
    )
    .unwrap();

    let loading = IndexReaderHandle::open(&tmp).unwrap();
    let stats = build_vernacular_index(
        &loading,
        VernacularReader::open(&common_file).unwrap(),
        &vernacular_dir,
        config.writer_heap_bytes,
    )
    .unwrap();

    assert_eq!(stats.rows, 2);
    assert_eq!(stats.indexed, 1);
    assert_eq!(stats.unmatched, 1);

    let reader = IndexReaderHandle::open(&vernacular_dir).unwrap();
    assert_eq!(reader.num_docs(), 1);

    // common-name matching is case-sensitive string equality
    let hits = reader
        .term_query(fields::COMMON_NAME, "domestic cat", 10)
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].text_or_empty(fields::LSID), "S1");
    assert_eq!(hits[0].text_or_empty(fields::NAME), "Felis catus");
    assert!(reader
        .term_query(fields::COMMON_NAME, "Domestic Cat", 10)
        .unwrap()
        .is_empty());
}

#[test]
fn test_homonym_index_holds_one_document_per_concept() {
    let dir = TempDir::new().unwrap();
    let archive_dir = dir.path().join("irmng");
    let homonym_dir = dir.path().join("target").join("irmng");
    fs::create_dir_all(&archive_dir).unwrap();

    write_archive(
        &archive_dir,
        &[
            "h1\tH1\t\t\tMorus Linnaeus, 1753\t\tgenus\taccepted",
            "h2\tH2\t\t\tMorus Vieillot, 1816\t\tgenus\taccepted",
            "h3\tH3\t\t\tMysteria\t\tcohort\taccepted",
        ],
    );
    let archive = DwcArchive::open(&archive_dir).unwrap();
    let parser = ScientificNameParser::new();

    let count = build_homonym_index(
        &archive,
        &parser,
        &homonym_dir,
        IndexerConfig::default().writer_heap_bytes,
    )
    .unwrap();
    assert_eq!(count, 3);

    // both entries collapse to the same canonical genus name
    let reader = IndexReaderHandle::open(&homonym_dir).unwrap();
    let hits = reader.term_query_all(fields::NAME, "morus").unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].i64_value(fields::RANK_ID), Some(6000));

    // unrecognized rank strings survive with the sentinel id
    let cohort = reader.term_query_all(fields::NAME, "mysteria").unwrap();
    assert_eq!(cohort.len(), 1);
    assert_eq!(cohort[0].text_or_empty(fields::RANK), "cohort");
    assert_eq!(cohort[0].i64_value(fields::RANK_ID), Some(0));
}
