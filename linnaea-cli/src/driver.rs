//! Phase orchestration for the indexer build

use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::*;
use linnaea_bio::{Canonicalizer, DwcArchive, ScientificNameParser, VernacularReader};
use linnaea_core::system::paths;
use linnaea_core::{IndexerConfig, LinnaeaError};
use linnaea_index::homonym::build_homonym_index;
use linnaea_index::search::add_synonyms;
use linnaea_index::vernacular::build_vernacular_index;
use linnaea_index::{
    analyzers, fields, HierarchyWalker, IndexReaderHandle, LoadingIndexBuilder, SearchIndexWriter,
};
use tracing::{info, warn};

use crate::cli::Cli;
use crate::progress::create_spinner;

pub fn run(cli: Cli) -> Result<()> {
    let target = cli.target.clone().unwrap_or_else(paths::default_target_dir);
    let tmp = cli.tmp.clone().unwrap_or_else(paths::default_tmp_dir);

    if let Some(name) = &cli.test_search {
        return test_search(&target, name);
    }

    let mut load = cli.load || cli.all;
    let mut search = cli.search || cli.all;
    if !cli.load && !cli.search && !cli.all {
        load = true;
        search = true;
    }
    info!("generating loading index: {}", load);
    info!("generating search index: {}", search);

    let config = IndexerConfig::default();
    let parser = ScientificNameParser::new();

    let dwca_dir = cli.dwca.clone().ok_or_else(|| {
        LinnaeaError::Configuration("no DwC archive specified; pass --dwca <DIR>".into())
    })?;
    if !dwca_dir.exists() {
        return Err(LinnaeaError::Configuration(format!(
            "DwC archive {} does not exist or is inaccessible",
            dwca_dir.display()
        ))
        .into());
    }
    info!("using the DwCA name file: {}", dwca_dir.display());
    let archive = DwcArchive::open(&dwca_dir)?;

    let irmng_dir = existing_input(cli.irmng.clone(), "IRMNG export");
    let common_file = existing_input(cli.common.clone(), "common name file");

    // Every phase below the load writes into the target directory
    if search || irmng_dir.is_some() || common_file.is_some() {
        backup_target(&target)?;
    }

    if load {
        let pb = create_spinner("Building the loading index...");
        let stats = LoadingIndexBuilder::new(config.clone()).build(&archive, &tmp)?;
        pb.finish_and_clear();
        println!(
            "{} Loaded {} concepts into {} ({} skipped)",
            "✓".green(),
            stats.concepts,
            tmp.display(),
            stats.skipped
        );
    }

    if search {
        let pb = create_spinner("Walking the concept hierarchy...");
        let walker = HierarchyWalker::open(&tmp, &parser, &config)?;
        let mut writer = SearchIndexWriter::create(&target.join("cb"), config.writer_heap_bytes)?;
        let walk = walker.walk(&mut writer)?;
        pb.set_message("Adding synonyms...");
        let synonyms = add_synonyms(&mut writer, &archive, &parser)?;
        writer.finish()?;
        pb.finish_and_clear();
        println!(
            "{} Indexed {} accepted concepts across {} roots and {} synonyms",
            "✓".green(),
            walk.accepted,
            walk.roots,
            synonyms.synonyms
        );
    }

    if let Some(dir) = irmng_dir {
        let pb = create_spinner("Building the IRMNG homonym index...");
        let count = build_homonym_index(
            &DwcArchive::open(&dir)?,
            &parser,
            &target.join("irmng"),
            config.writer_heap_bytes,
        )?;
        pb.finish_and_clear();
        println!("{} Indexed {} IRMNG concepts", "✓".green(), count);
    }

    if let Some(file) = common_file {
        let loading = IndexReaderHandle::open(&tmp).map_err(|_| {
            LinnaeaError::Configuration(format!(
                "no loading index at {}; the vernacular join requires a prior load",
                tmp.display()
            ))
        })?;
        let pb = create_spinner("Joining common names...");
        let stats = build_vernacular_index(
            &loading,
            VernacularReader::open(&file)?,
            &target.join("vernacular"),
            config.writer_heap_bytes,
        )?;
        pb.finish_and_clear();
        println!(
            "{} Indexed {} common names ({} unmatched)",
            "✓".green(),
            stats.indexed,
            stats.unmatched
        );
    }

    Ok(())
}

/// Check an optional input path, warning when it was supplied but is
/// not readable.
fn existing_input(path: Option<PathBuf>, what: &str) -> Option<PathBuf> {
    match path {
        Some(p) if p.exists() => Some(p),
        Some(p) => {
            warn!("{} {} does not exist or is inaccessible, skipping", what, p.display());
            None
        }
        None => None,
    }
}

/// Move an existing target directory aside with a timestamp suffix and
/// create a fresh one.
fn backup_target(target: &Path) -> Result<()> {
    if target.exists() {
        let name = target
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("namematching");
        let backup = target.with_file_name(format!("{}_{}", name, paths::backup_timestamp()));
        info!(
            "target directory already exists, backing up to {}",
            backup.display()
        );
        std::fs::rename(target, &backup)?;
    }
    std::fs::create_dir_all(target)?;
    Ok(())
}

/// Run a single exact name query against the built index and print the
/// stored record.
fn test_search(target: &Path, name: &str) -> Result<()> {
    let cb = target.join("cb");
    let reader = IndexReaderHandle::open(&cb)
        .map_err(|_| LinnaeaError::NotFound(format!("index unreadable, check {}", cb.display())))?;
    let parser = ScientificNameParser::new();
    let term = analyzers::lowercase_term(&parser.canonical(name));
    let hits = reader.term_query(fields::NAME, &term, 1)?;
    match hits.first() {
        Some(doc) => println!("{}", doc.to_named_json()?),
        None => eprintln!("No match for {}", name),
    }
    Ok(())
}
