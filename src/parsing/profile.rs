//! Markup selectors for each known export layout.
//!
//! Message exports identify their parts with generated CSS class names
//! (`_a6-g`, `_2ph_`, ...) that change between export versions. All of them
//! live in a [`MarkupProfile`] so supporting a new export only means adding
//! a table entry. Profiles are plain data (serde-friendly) and are compiled
//! into [`CompiledProfile`] once per extractor.

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::InboxpackError;

/// Selector table for one export format version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupProfile {
    /// Version label, used in logs
    pub version: String,
    /// Thread title element
    pub title: String,
    /// Elements that may carry the participant declaration
    pub participants_heading: String,
    /// Literal prefix of the participant declaration
    pub participants_marker: String,
    /// One element per message section
    pub section: String,
    /// Sender name inside a section
    pub sender: String,
    /// Content container inside a section
    pub content: String,
    /// Tag name of content candidates (direct children of the container)
    pub content_child_tag: String,
    /// Reaction list inside the content container
    pub reactions: String,
    /// One reaction inside the list
    pub reaction_item: String,
    /// Timestamp element inside a section
    pub timestamp: String,
    /// Leading glyphs that mark an inline reaction summary, not a body
    pub reaction_glyphs: Vec<String>,
    /// Lower-case phrases in the sender slot that mark administrative events
    pub system_phrases: Vec<String>,
    /// Title used when a document has none
    pub unknown_thread: String,
}

impl MarkupProfile {
    /// The Messenger HTML layout of current "Download Your Information"
    /// exports.
    pub fn current() -> Self {
        Self {
            version: "messenger-html-2024".to_string(),
            title: "h1".to_string(),
            participants_heading: "h2".to_string(),
            participants_marker: "Participants:".to_string(),
            section: "section._a6-g".to_string(),
            sender: "h2".to_string(),
            content: "div._2ph_._a6-p".to_string(),
            content_child_tag: "div".to_string(),
            reactions: "ul._a6-q".to_string(),
            reaction_item: "li".to_string(),
            timestamp: "footer div._a72d".to_string(),
            reaction_glyphs: vec!["❤".to_string(), "👍".to_string(), "😮".to_string()],
            system_phrases: vec!["group invite link".to_string(), "participants:".to_string()],
            unknown_thread: "Unknown Thread".to_string(),
        }
    }

    /// Returns every built-in profile, newest first.
    pub fn builtin() -> Vec<MarkupProfile> {
        vec![Self::current()]
    }

    /// Looks up a built-in profile by version label.
    pub fn by_version(version: &str) -> Option<MarkupProfile> {
        Self::builtin().into_iter().find(|p| p.version == version)
    }

    /// Compiles every selector in the profile.
    ///
    /// # Errors
    ///
    /// Returns [`InboxpackError::InvalidSelector`] naming the first field
    /// whose selector does not parse.
    pub fn compile(&self) -> Result<CompiledProfile, InboxpackError> {
        Ok(CompiledProfile {
            title: compile("title", &self.title)?,
            participants_heading: compile("participants_heading", &self.participants_heading)?,
            section: compile("section", &self.section)?,
            sender: compile("sender", &self.sender)?,
            content: compile("content", &self.content)?,
            reactions: compile("reactions", &self.reactions)?,
            reaction_item: compile("reaction_item", &self.reaction_item)?,
            timestamp: compile("timestamp", &self.timestamp)?,
            profile: self.clone(),
        })
    }
}

impl Default for MarkupProfile {
    fn default() -> Self {
        Self::current()
    }
}

fn compile(name: &'static str, selector: &str) -> Result<Selector, InboxpackError> {
    Selector::parse(selector)
        .map_err(|e| InboxpackError::invalid_selector(name, selector, format!("{e:?}")))
}

/// A [`MarkupProfile`] with its selectors parsed.
#[derive(Debug, Clone)]
pub struct CompiledProfile {
    pub(crate) title: Selector,
    pub(crate) participants_heading: Selector,
    pub(crate) section: Selector,
    pub(crate) sender: Selector,
    pub(crate) content: Selector,
    pub(crate) reactions: Selector,
    pub(crate) reaction_item: Selector,
    pub(crate) timestamp: Selector,
    profile: MarkupProfile,
}

impl CompiledProfile {
    /// Returns the source profile.
    pub fn profile(&self) -> &MarkupProfile {
        &self.profile
    }

    /// Returns `true` if `text` begins with one of the reaction glyphs.
    pub fn starts_with_reaction_glyph(&self, text: &str) -> bool {
        self.profile
            .reaction_glyphs
            .iter()
            .any(|glyph| text.starts_with(glyph.as_str()))
    }

    /// Returns `true` if a sender slot names an administrative event.
    pub fn is_system_sender(&self, sender: &str) -> bool {
        let lower = sender.to_lowercase();
        self.profile
            .system_phrases
            .iter()
            .any(|phrase| lower.contains(phrase.as_str()))
    }
}
