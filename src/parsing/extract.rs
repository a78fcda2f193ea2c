//! Pulls raw field bundles out of one export HTML document.
//!
//! The extractor knows the markup (via a [`CompiledProfile`]) but nothing
//! about validity: it hands unvalidated [`RawBundle`]s to the
//! [`MessageAssembler`](super::MessageAssembler). Sections that are clearly
//! not authored messages (participant headers, invite-link notices) are
//! skipped here; a section that fails extraction is logged and skipped
//! without affecting its siblings.

use regex::Regex;
use scraper::{ElementRef, Html};

use super::normalize::TextNormalizer;
use super::profile::CompiledProfile;
use crate::config::{ExtractorConfig, NormalizerConfig};
use crate::error::{InboxpackError, ParseErrorKind};

/// Unvalidated fields of one message section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBundle {
    /// Sender heading text, not yet normalized
    pub sender_name: String,
    /// First non-reaction content fragment, or empty
    pub raw_content: String,
    /// One entry per reaction list item
    pub reactions: Vec<String>,
    /// Footer timestamp text, if the section has one
    pub raw_timestamp: Option<String>,
}

/// Why a section was passed over without producing a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The section carries the participant declaration
    ParticipantsHeader,
    /// No sender heading
    MissingSender,
    /// Sender slot names an administrative event
    SystemMessage,
    /// No content container
    MissingContent,
}

/// Per-document section counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionStats {
    /// Sections matched by the profile's section selector
    pub seen: usize,
    /// Sections skipped by a structural heuristic
    pub skipped: usize,
    /// Sections that failed extraction
    pub failed: usize,
}

/// Everything extracted from one document.
#[derive(Debug, Clone, Default)]
pub struct ExtractedDocument {
    /// Normalized thread title
    pub thread_title: String,
    /// Normalized names from the participant declaration
    pub participants: Vec<String>,
    /// One bundle per surviving section, in document order
    pub bundles: Vec<RawBundle>,
    /// Section counters
    pub stats: SectionStats,
}

enum SectionOutcome {
    Bundle(RawBundle),
    Skipped(SkipReason),
}

/// Extracts thread metadata and message bundles from export HTML.
///
/// # Example
///
/// ```rust
/// use inboxpack::parsing::DocumentExtractor;
///
/// let html = r#"<html><body>
///   <h1>Team</h1>
///   <section class="_a6-g">
///     <h2>Alice</h2>
///     <div class="_2ph_ _a6-p"><div><div>hello</div></div></div>
///     <footer><div class="_a72d">Jan 1, 2023 9:00:00 am</div></footer>
///   </section>
/// </body></html>"#;
///
/// let doc = DocumentExtractor::new()?.extract(html)?;
/// assert_eq!(doc.thread_title, "Team");
/// assert_eq!(doc.bundles.len(), 1);
/// assert_eq!(doc.bundles[0].raw_content, "hello");
/// # Ok::<(), inboxpack::InboxpackError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DocumentExtractor {
    profile: CompiledProfile,
    participants_pattern: Regex,
    normalizer: TextNormalizer,
    max_section_bytes: usize,
}

impl DocumentExtractor {
    /// Creates an extractor for the current export layout.
    pub fn new() -> Result<Self, InboxpackError> {
        Self::with_config(&ExtractorConfig::default(), NormalizerConfig::default())
    }

    /// Creates an extractor with custom configuration.
    ///
    /// # Errors
    ///
    /// Fails if any selector in the profile does not compile.
    pub fn with_config(
        config: &ExtractorConfig,
        normalizer: NormalizerConfig,
    ) -> Result<Self, InboxpackError> {
        let profile = config.profile.compile()?;
        let marker = &config.profile.participants_marker;
        let participants_pattern = Regex::new(&format!(r"{}\s*(.+)", regex::escape(marker)))
            .map_err(|e| {
                InboxpackError::invalid_selector("participants_marker", marker.clone(), e.to_string())
            })?;

        Ok(Self {
            profile,
            participants_pattern,
            normalizer: TextNormalizer::with_config(normalizer),
            max_section_bytes: config.max_section_bytes,
        })
    }

    /// Returns the compiled profile in use.
    pub fn profile(&self) -> &CompiledProfile {
        &self.profile
    }

    /// Extracts a document.
    ///
    /// # Errors
    ///
    /// Only a blank document is an error; malformed sections are skipped.
    pub fn extract(&self, html: &str) -> Result<ExtractedDocument, InboxpackError> {
        if html.trim().is_empty() {
            return Err(InboxpackError::parse(ParseErrorKind::EmptyDocument, None));
        }

        let document = Html::parse_document(html);
        let markup = self.profile.profile();

        let thread_title = document
            .select(&self.profile.title)
            .next()
            .map(|el| self.normalizer.normalize(element_text(el)))
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| markup.unknown_thread.clone());

        let participants = self.extract_participants(&document);

        let mut stats = SectionStats::default();
        let mut bundles = Vec::new();

        for (index, section) in document.select(&self.profile.section).enumerate() {
            stats.seen += 1;
            match self.extract_section(section) {
                Ok(SectionOutcome::Bundle(bundle)) => bundles.push(bundle),
                Ok(SectionOutcome::Skipped(reason)) => {
                    tracing::trace!(index, ?reason, "skipped section");
                    stats.skipped += 1;
                }
                Err(e) => {
                    tracing::warn!(index, thread = %thread_title, "error parsing message section: {e}");
                    stats.failed += 1;
                }
            }
        }

        Ok(ExtractedDocument {
            thread_title,
            participants,
            bundles,
            stats,
        })
    }

    fn extract_participants(&self, document: &Html) -> Vec<String> {
        let marker = &self.profile.profile().participants_marker;

        let Some(declaration) = document
            .select(&self.profile.participants_heading)
            .map(element_text)
            .find(|text| text.contains(marker.as_str()))
        else {
            return Vec::new();
        };

        let Some(names) = self
            .participants_pattern
            .captures(&declaration)
            .and_then(|caps| caps.get(1))
        else {
            return Vec::new();
        };

        names
            .as_str()
            .split(',')
            .map(|name| self.normalizer.normalize(name))
            .filter(|name| !name.is_empty())
            .collect()
    }

    fn extract_section(&self, section: ElementRef<'_>) -> Result<SectionOutcome, InboxpackError> {
        let markup = self.profile.profile();
        let full_text = element_text(section);

        if full_text.len() > self.max_section_bytes {
            return Err(InboxpackError::section_too_large(
                self.max_section_bytes,
                full_text.len(),
            ));
        }

        if full_text.contains(markup.participants_marker.as_str()) {
            return Ok(SectionOutcome::Skipped(SkipReason::ParticipantsHeader));
        }

        let Some(sender_el) = section.select(&self.profile.sender).next() else {
            return Ok(SectionOutcome::Skipped(SkipReason::MissingSender));
        };
        let sender_name = element_text(sender_el);

        if self
            .profile
            .is_system_sender(&self.normalizer.normalize(&sender_name))
        {
            return Ok(SectionOutcome::Skipped(SkipReason::SystemMessage));
        }

        let Some(content) = section.select(&self.profile.content).next() else {
            return Ok(SectionOutcome::Skipped(SkipReason::MissingContent));
        };

        let raw_content = content
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| child.value().name() == markup.content_child_tag)
            .map(element_text)
            .map(|text| text.trim().to_string())
            .find(|text| !text.is_empty() && !self.profile.starts_with_reaction_glyph(text))
            .unwrap_or_default();

        let reactions = content
            .select(&self.profile.reactions)
            .next()
            .map(|list| {
                list.select(&self.profile.reaction_item)
                    .map(|item| element_text(item).trim().to_string())
                    .collect()
            })
            .unwrap_or_default();

        let raw_timestamp = section
            .select(&self.profile.timestamp)
            .next()
            .map(|el| element_text(el).trim().to_string());

        Ok(SectionOutcome::Bundle(RawBundle {
            sender_name,
            raw_content,
            reactions,
            raw_timestamp,
        }))
    }
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(sender: &str, body: &str, timestamp: Option<&str>) -> String {
        let footer = timestamp
            .map(|ts| format!(r#"<footer><div class="_a72d">{ts}</div></footer>"#))
            .unwrap_or_default();
        format!(
            r#"<section class="_a6-g"><h2>{sender}</h2><div class="_2ph_ _a6-p">{body}</div>{footer}</section>"#
        )
    }

    fn document(title: &str, sections: &[String]) -> String {
        format!(
            "<html><body><h1>{title}</h1>{}</body></html>",
            sections.join("\n")
        )
    }

    fn extractor() -> DocumentExtractor {
        DocumentExtractor::new().unwrap()
    }

    // =========================================================================
    // Document-level tests
    // =========================================================================

    #[test]
    fn test_extract_title_and_bundle() {
        let html = document(
            "Team",
            &[section("Alice", "<div><div>hello</div></div>", Some("Jan 1, 2023 9:00:00 am"))],
        );
        let doc = extractor().extract(&html).unwrap();
        assert_eq!(doc.thread_title, "Team");
        assert_eq!(doc.bundles.len(), 1);
        let bundle = &doc.bundles[0];
        assert_eq!(bundle.sender_name, "Alice");
        assert_eq!(bundle.raw_content, "hello");
        assert_eq!(bundle.raw_timestamp.as_deref(), Some("Jan 1, 2023 9:00:00 am"));
        assert!(bundle.reactions.is_empty());
        assert_eq!(doc.stats.seen, 1);
    }

    #[test]
    fn test_extract_missing_title() {
        let html = format!(
            "<html><body>{}</body></html>",
            section("Alice", "<div>hi</div>", None)
        );
        let doc = extractor().extract(&html).unwrap();
        assert_eq!(doc.thread_title, "Unknown Thread");
    }

    #[test]
    fn test_extract_blank_document_is_error() {
        assert!(extractor().extract("   \n").unwrap_err().is_parse());
    }

    #[test]
    fn test_extract_participants() {
        let html = "<html><body><h1>Team</h1><h2>Participants: Alice, Bob ,  Carol</h2></body></html>";
        let doc = extractor().extract(html).unwrap();
        assert_eq!(doc.participants, vec!["Alice", "Bob", "Carol"]);
        assert!(doc.bundles.is_empty());
    }

    #[test]
    fn test_extract_no_participants() {
        let html = document("Team", &[section("Alice", "<div>hi</div>", None)]);
        let doc = extractor().extract(&html).unwrap();
        assert!(doc.participants.is_empty());
    }

    // =========================================================================
    // Section heuristics tests
    // =========================================================================

    #[test]
    fn test_skip_participants_section() {
        let html = document(
            "Team",
            &[
                section("Participants: Alice, Bob", "<div>x</div>", Some("Jan 1, 2023 9:00:00 am")),
                section("Alice", "<div>hi</div>", Some("Jan 1, 2023 9:00:00 am")),
            ],
        );
        let doc = extractor().extract(&html).unwrap();
        assert_eq!(doc.bundles.len(), 1);
        assert_eq!(doc.stats.seen, 2);
        assert_eq!(doc.stats.skipped, 1);
        // The embedded header still declares participants
        assert_eq!(doc.participants, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_skip_system_sender() {
        let html = document(
            "Team",
            &[section("Group invite link", "<div>Alice turned on the link</div>", None)],
        );
        let doc = extractor().extract(&html).unwrap();
        assert!(doc.bundles.is_empty());
        assert_eq!(doc.stats.skipped, 1);
    }

    #[test]
    fn test_skip_missing_sender_and_content() {
        let html = document(
            "Team",
            &[
                r#"<section class="_a6-g"><div class="_2ph_ _a6-p"><div>orphan</div></div></section>"#
                    .to_string(),
                r#"<section class="_a6-g"><h2>Alice</h2><p>no container</p></section>"#.to_string(),
            ],
        );
        let doc = extractor().extract(&html).unwrap();
        assert!(doc.bundles.is_empty());
        assert_eq!(doc.stats.skipped, 2);
    }

    #[test]
    fn test_content_skips_reaction_summary() {
        let body = "<div>👍Bob</div><div>  </div><div>actual message</div>";
        let html = document("Team", &[section("Alice", body, None)]);
        let doc = extractor().extract(&html).unwrap();
        assert_eq!(doc.bundles[0].raw_content, "actual message");
    }

    #[test]
    fn test_content_only_direct_div_children() {
        let body = "<p>paragraph sibling</p><div><span>nested</span> text</div>";
        let html = document("Team", &[section("Alice", body, None)]);
        let doc = extractor().extract(&html).unwrap();
        assert_eq!(doc.bundles[0].raw_content, "nested text");
    }

    #[test]
    fn test_content_empty_when_only_reactions() {
        let body = "<div>❤Carol</div>";
        let html = document("Team", &[section("Alice", body, None)]);
        let doc = extractor().extract(&html).unwrap();
        assert_eq!(doc.bundles.len(), 1);
        assert_eq!(doc.bundles[0].raw_content, "");
    }

    #[test]
    fn test_extract_reactions() {
        let body = r#"<div>nice</div><div><ul class="_a6-q"><li>👍Bob</li><li> ❤Carol </li><li></li></ul></div>"#;
        let html = document("Team", &[section("Alice", body, None)]);
        let doc = extractor().extract(&html).unwrap();
        assert_eq!(doc.bundles[0].reactions, vec!["👍Bob", "❤Carol", ""]);
        assert_eq!(doc.bundles[0].raw_content, "nice");
    }

    #[test]
    fn test_oversized_section_fails_alone() {
        let config = ExtractorConfig::new().with_max_section_bytes(40);
        let extractor = DocumentExtractor::with_config(&config, NormalizerConfig::default()).unwrap();
        let long_body = format!("<div>{}</div>", "x".repeat(100));
        let html = document(
            "Team",
            &[section("Alice", &long_body, None), section("Bob", "<div>ok</div>", None)],
        );
        let doc = extractor.extract(&html).unwrap();
        assert_eq!(doc.stats.failed, 1);
        assert_eq!(doc.bundles.len(), 1);
        assert_eq!(doc.bundles[0].sender_name, "Bob");
    }

    #[test]
    fn test_entities_in_title_are_resolved() {
        let html = document("Tom &amp; Jerry", &[]);
        let doc = extractor().extract(&html).unwrap();
        assert_eq!(doc.thread_title, "Tom & Jerry");
    }
}
