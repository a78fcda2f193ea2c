//! Directory-level parsing: discovery, per-file extraction, accumulation.
//!
//! [`CorpusAggregator`] ties the pipeline together. Each discovered file is
//! read, extracted and assembled into a [`ParsedDocument`] independently;
//! documents are then merged into the caller's [`Corpus`] one at a time in
//! discovery order. With the `parallel` feature the per-file work runs on
//! the rayon pool, which changes throughput but not the result.
//!
//! Only a missing root directory is an error. Unreadable files and
//! malformed documents are logged and counted in the [`ParseReport`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::AggregatorConfig;
use crate::core::{Corpus, ParsedDocument};
use crate::discovery::{LayoutProbe, default_probes, discover_files};
use crate::error::{InboxpackError, Result};
use crate::parsing::{
    DocumentExtractor, MessageAssembler, SectionStats, TextNormalizer, TimestampParser,
    decode_utf8_dropping,
};
use crate::progress::{Progress, ProgressCallback};

/// Files parsed concurrently before their results are merged.
#[cfg(feature = "parallel")]
const PARALLEL_BATCH: usize = 256;

/// How much of a directory run was salvaged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    pub files_discovered: usize,
    pub files_parsed: usize,
    /// Files that could not be read or were not parseable documents
    pub files_failed: usize,
    pub sections_seen: usize,
    pub sections_skipped: usize,
    pub sections_failed: usize,
    /// Bundles rejected for empty content or a bad timestamp
    pub bundles_discarded: usize,
    pub messages_added: usize,
}

impl ParseReport {
    fn record(&mut self, sections: SectionStats, discarded: usize, added: usize) {
        self.files_parsed += 1;
        self.sections_seen += sections.seen;
        self.sections_skipped += sections.skipped;
        self.sections_failed += sections.failed;
        self.bundles_discarded += discarded;
        self.messages_added += added;
    }
}

/// Parses export directories into a [`Corpus`].
///
/// # Example
///
/// ```rust,no_run
/// use inboxpack::aggregator::CorpusAggregator;
/// use inboxpack::core::summary;
///
/// let aggregator = CorpusAggregator::new()?;
/// let corpus = aggregator.parse_directory("facebook-export".as_ref())?;
/// println!("{} messages", summary(&corpus).total_messages);
/// # Ok::<(), inboxpack::InboxpackError>(())
/// ```
pub struct CorpusAggregator {
    config: AggregatorConfig,
    extractor: DocumentExtractor,
    assembler: MessageAssembler,
    probes: Vec<Box<dyn LayoutProbe>>,
    progress: Option<ProgressCallback>,
}

impl CorpusAggregator {
    /// Creates an aggregator with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(AggregatorConfig::default())
    }

    /// Creates an aggregator with custom configuration.
    ///
    /// # Errors
    ///
    /// Fails if the configured markup profile does not compile.
    pub fn with_config(config: AggregatorConfig) -> Result<Self> {
        let extractor = DocumentExtractor::with_config(&config.extractor, config.normalizer.clone())?;
        let assembler = MessageAssembler::with_parts(
            TextNormalizer::with_config(config.normalizer.clone()),
            TimestampParser::with_formats(config.extra_timestamp_formats.iter().cloned()),
        );

        Ok(Self {
            config,
            extractor,
            assembler,
            probes: default_probes(),
            progress: None,
        })
    }

    /// Replaces the layout probes used for discovery.
    #[must_use]
    pub fn with_probes(mut self, probes: Vec<Box<dyn LayoutProbe>>) -> Self {
        self.probes = probes;
        self
    }

    /// Sets a callback invoked every `progress_interval` files and at the end.
    #[must_use]
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Extracts and assembles one document held in memory.
    ///
    /// `source_path` is recorded as provenance on every message.
    pub fn parse_document(&self, html: &str, source_path: &Path) -> Result<ParsedDocument> {
        let extracted = self
            .extractor
            .extract(html)
            .map_err(|e| e.with_path(source_path))?;

        let source = source_path.display().to_string();
        let messages: Vec<_> = extracted
            .bundles
            .iter()
            .filter_map(|bundle| {
                self.assembler
                    .assemble(bundle, &extracted.thread_title, &source)
            })
            .collect();
        let discarded = extracted.bundles.len() - messages.len();

        tracing::debug!(
            path = %source,
            thread = %extracted.thread_title,
            messages = messages.len(),
            discarded,
            "parsed document"
        );

        Ok(ParsedDocument {
            source_path: source_path.to_path_buf(),
            thread_title: extracted.thread_title,
            participants: extracted.participants,
            messages,
            sections: extracted.stats,
            discarded,
        })
    }

    /// Reads a file and parses it. Invalid UTF-8 bytes are dropped.
    pub fn read_document(&self, path: &Path) -> Result<ParsedDocument> {
        let bytes = fs::read(path)?;
        let html = decode_utf8_dropping(&bytes);
        self.parse_document(&html, path)
    }

    /// Parses one file into `corpus`, returning the number of messages added.
    pub fn parse_file(&self, path: &Path, corpus: &mut Corpus) -> Result<usize> {
        let doc = self.read_document(path)?;
        Ok(corpus.add_document(doc))
    }

    /// Parses every message file under `root` into a new corpus.
    ///
    /// # Errors
    ///
    /// Returns [`InboxpackError::DirectoryNotFound`] if `root` is not a
    /// directory. Per-file failures are logged and skipped.
    pub fn parse_directory(&self, root: &Path) -> Result<Corpus> {
        self.parse_directory_with_report(root).map(|(corpus, _)| corpus)
    }

    /// Same as [`parse_directory`](Self::parse_directory), also returning
    /// extraction counters.
    pub fn parse_directory_with_report(&self, root: &Path) -> Result<(Corpus, ParseReport)> {
        let mut corpus = Corpus::new();
        let report = self.parse_directory_into(root, &mut corpus)?;
        Ok((corpus, report))
    }

    /// Parses every message file under `root` into an existing corpus.
    pub fn parse_directory_into(&self, root: &Path, corpus: &mut Corpus) -> Result<ParseReport> {
        if !root.is_dir() {
            return Err(InboxpackError::directory_not_found(root));
        }

        let files = discover_files(root, &self.probes);
        let mut report = ParseReport {
            files_discovered: files.len(),
            ..ParseReport::default()
        };
        tracing::info!(root = %root.display(), files = files.len(), "starting export parse");

        let interval = self.config.progress_interval.max(1);
        let mut processed = 0;
        for batch in self.batches(&files) {
            for (path, result) in batch.iter().zip(self.read_batch(batch)) {
                match result {
                    Ok(doc) => {
                        let (sections, discarded) = (doc.sections, doc.discarded);
                        let added = corpus.add_document(doc);
                        report.record(sections, discarded, added);
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), "error processing file: {e}");
                        report.files_failed += 1;
                    }
                }
                processed += 1;
                if processed % interval == 0 {
                    tracing::info!(
                        processed,
                        total = files.len(),
                        messages = corpus.len(),
                        "progress"
                    );
                    self.report_progress(processed, files.len(), corpus.len());
                }
            }
        }
        self.report_progress(processed, files.len(), corpus.len());

        for thread in corpus.threads() {
            tracing::debug!(thread = thread.title(), messages = thread.len(), "thread");
        }
        tracing::info!(
            messages = corpus.len(),
            threads = corpus.thread_count(),
            participants = corpus.participant_count(),
            failed = report.files_failed,
            "finished export parse"
        );

        Ok(report)
    }

    fn report_progress(&self, processed: usize, total: usize, messages: usize) {
        if let Some(callback) = &self.progress {
            callback(Progress::new(processed, Some(total), messages));
        }
    }

    fn batches<'a>(&self, files: &'a [PathBuf]) -> std::slice::Chunks<'a, PathBuf> {
        #[cfg(feature = "parallel")]
        if self.config.parallel {
            return files.chunks(PARALLEL_BATCH);
        }
        files.chunks(1)
    }

    fn read_batch(&self, batch: &[PathBuf]) -> Vec<Result<ParsedDocument>> {
        #[cfg(feature = "parallel")]
        if self.config.parallel {
            use rayon::prelude::*;
            return batch.par_iter().map(|path| self.read_document(path)).collect();
        }
        batch.iter().map(|path| self.read_document(path)).collect()
    }
}
