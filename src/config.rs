//! Configuration types for the extraction pipeline.
//!
//! This module provides builder-style configuration structs for library
//! usage, without any CLI framework dependencies.
//!
//! - [`NormalizerConfig`] - text cleanup applied to every extracted fragment
//! - [`ExtractorConfig`] - markup profile and per-section guards
//! - [`AggregatorConfig`] - directory walk, timestamp formats, parallelism
//!
//! # Example
//!
//! ```rust
//! use inboxpack::config::{AggregatorConfig, NormalizerConfig, UnicodeForm};
//!
//! let config = AggregatorConfig::new()
//!     .with_normalizer(NormalizerConfig::new().with_form(UnicodeForm::Nfc))
//!     .with_progress_interval(50)
//!     .with_parallel(false);
//! ```

use serde::{Deserialize, Serialize};

use crate::parsing::profile::MarkupProfile;

/// Unicode normalization form applied by the text normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnicodeForm {
    /// Canonical composition
    Nfc,
    /// Canonical decomposition
    Nfd,
    /// Compatibility composition
    Nfkc,
    /// Compatibility decomposition (default; matches what the exports were
    /// historically cleaned with)
    #[default]
    Nfkd,
    /// Leave code points untouched
    None,
}

/// Configuration for the text normalizer.
///
/// # Example
///
/// ```rust
/// use inboxpack::config::{NormalizerConfig, UnicodeForm};
///
/// let config = NormalizerConfig::new()
///     .with_form(UnicodeForm::Nfd)
///     .with_repair_mojibake(true);
/// assert!(config.decode_entities);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Normalization form (default: NFKD)
    pub form: UnicodeForm,

    /// Resolve HTML character entities left in extracted text (default: true)
    pub decode_entities: bool,

    /// Re-decode Latin-1 mojibake back into UTF-8 (default: false)
    pub repair_mojibake: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            form: UnicodeForm::Nfkd,
            decode_entities: true,
            repair_mojibake: false,
        }
    }
}

impl NormalizerConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Unicode normalization form.
    #[must_use]
    pub fn with_form(mut self, form: UnicodeForm) -> Self {
        self.form = form;
        self
    }

    /// Enables or disables HTML entity decoding.
    #[must_use]
    pub fn with_decode_entities(mut self, enabled: bool) -> Self {
        self.decode_entities = enabled;
        self
    }

    /// Enables or disables the mojibake repair pass.
    #[must_use]
    pub fn with_repair_mojibake(mut self, enabled: bool) -> Self {
        self.repair_mojibake = enabled;
        self
    }
}

/// Configuration for the document extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Markup selectors for the export format version being read
    pub profile: MarkupProfile,

    /// Sections whose text exceeds this many bytes are skipped (default: 1MB)
    pub max_section_bytes: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            profile: MarkupProfile::current(),
            max_section_bytes: 1024 * 1024, // 1MB
        }
    }
}

impl ExtractorConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the markup profile.
    #[must_use]
    pub fn with_profile(mut self, profile: MarkupProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Sets the per-section size guard.
    #[must_use]
    pub fn with_max_section_bytes(mut self, size: usize) -> Self {
        self.max_section_bytes = size;
        self
    }
}

/// Configuration for a full directory parsing run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Text normalizer settings, shared by extractor and assembler
    pub normalizer: NormalizerConfig,

    /// Extractor settings
    pub extractor: ExtractorConfig,

    /// Additional chrono format strings tried after the built-in ones
    #[serde(default)]
    pub extra_timestamp_formats: Vec<String>,

    /// Parse files on the rayon pool when the `parallel` feature is enabled
    /// (default: true)
    pub parallel: bool,

    /// Log and report progress every N files (default: 10)
    pub progress_interval: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            normalizer: NormalizerConfig::default(),
            extractor: ExtractorConfig::default(),
            extra_timestamp_formats: Vec::new(),
            parallel: true,
            progress_interval: 10,
        }
    }
}

impl AggregatorConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that parses one file at a time.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets the normalizer configuration.
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: NormalizerConfig) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Sets the extractor configuration.
    #[must_use]
    pub fn with_extractor(mut self, extractor: ExtractorConfig) -> Self {
        self.extractor = extractor;
        self
    }

    /// Adds a chrono format string to try after the built-in formats.
    #[must_use]
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.extra_timestamp_formats.push(format.into());
        self
    }

    /// Enables or disables parallel file parsing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the progress reporting interval (clamped to at least 1).
    #[must_use]
    pub fn with_progress_interval(mut self, files: usize) -> Self {
        self.progress_interval = files.max(1);
        self
    }
}
