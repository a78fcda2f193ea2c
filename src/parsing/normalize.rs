//! Text cleanup for fragments pulled out of export HTML.
//!
//! Exports mix correctly encoded text with a few recurring artifacts:
//! stray invalid UTF-8 bytes, entities that survived one round of
//! unescaping (`&amp;#039;`), and occasionally Latin-1 mojibake
//! (`"cafÃ©"` for `"café"`). [`TextNormalizer`] repairs what it can
//! and never fails: the worst case is the input returned trimmed.

use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;

use crate::config::{NormalizerConfig, UnicodeForm};

/// Cleans raw text fragments.
///
/// # Example
///
/// ```rust
/// use inboxpack::parsing::TextNormalizer;
///
/// let normalizer = TextNormalizer::new();
/// assert_eq!(normalizer.normalize("  Tom &amp; Jerry "), "Tom & Jerry");
/// assert_eq!(normalizer.normalize_opt(None::<&str>), "");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer {
    config: NormalizerConfig,
}

impl TextNormalizer {
    /// Creates a normalizer with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a normalizer with custom configuration.
    pub fn with_config(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalizes text given as `&str`, `String` or raw bytes.
    ///
    /// Bytes are decoded as UTF-8 with invalid sequences dropped.
    pub fn normalize(&self, raw: impl AsRef<[u8]>) -> String {
        let bytes = raw.as_ref();
        if bytes.is_empty() {
            return String::new();
        }
        let decoded = decode_utf8_dropping(bytes);
        self.normalize_str(&decoded)
    }

    /// Same as [`normalize`](Self::normalize), mapping `None` to `""`.
    pub fn normalize_opt<T: AsRef<[u8]>>(&self, raw: Option<T>) -> String {
        raw.map(|r| self.normalize(r)).unwrap_or_default()
    }

    fn normalize_str(&self, text: &str) -> String {
        let repaired = if self.config.repair_mojibake {
            repair_mojibake(text)
        } else {
            Cow::Borrowed(text)
        };

        let mut out = apply_form(&repaired, self.config.form);

        if self.config.decode_entities {
            let decoded = match html_escape::decode_html_entities(&out) {
                Cow::Owned(decoded) => Some(decoded),
                Cow::Borrowed(_) => None,
            };
            if let Some(decoded) = decoded {
                // Entities may expand to precomposed characters.
                out = apply_form(&decoded, self.config.form);
            }
        }

        out.trim().to_string()
    }
}

/// Normalizes text with the default configuration.
///
/// ```rust
/// use inboxpack::parsing::normalize_text;
///
/// assert_eq!(normalize_text("&lt;3"), "<3");
/// ```
pub fn normalize_text(raw: impl AsRef<[u8]>) -> String {
    TextNormalizer::new().normalize(raw)
}

fn apply_form(text: &str, form: UnicodeForm) -> String {
    match form {
        UnicodeForm::Nfc => text.nfc().collect(),
        UnicodeForm::Nfd => text.nfd().collect(),
        UnicodeForm::Nfkc => text.nfkc().collect(),
        UnicodeForm::Nfkd => text.nfkd().collect(),
        UnicodeForm::None => text.to_string(),
    }
}

/// Decodes UTF-8, silently dropping invalid byte sequences.
///
/// Unlike [`String::from_utf8_lossy`] no replacement characters are
/// inserted, so a stray byte does not leave a visible `�` behind.
///
/// ```rust
/// use inboxpack::parsing::decode_utf8_dropping;
///
/// assert_eq!(decode_utf8_dropping(b"caf\xc3\xa9"), "café");
/// assert_eq!(decode_utf8_dropping(b"ab\xffcd"), "abcd");
/// ```
pub fn decode_utf8_dropping(bytes: &[u8]) -> Cow<'_, str> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(bytes.len());
    let mut dropped = 0usize;
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
        dropped += chunk.invalid().len();
    }
    tracing::debug!(dropped, "dropped invalid UTF-8 bytes");
    Cow::Owned(out)
}

/// Reverses Latin-1 mojibake.
///
/// Meta exports sometimes store each UTF-8 byte as its own code point.
/// The repair only applies when every char fits in a byte and the bytes
/// form valid UTF-8; anything else is returned unchanged.
pub fn repair_mojibake(text: &str) -> Cow<'_, str> {
    if text.is_ascii() || text.chars().any(|c| u32::from(c) > 0xFF) {
        return Cow::Borrowed(text);
    }

    #[allow(clippy::cast_possible_truncation)]
    let bytes: Vec<u8> = text.chars().map(|c| u32::from(c) as u8).collect();
    match String::from_utf8(bytes) {
        Ok(fixed) => Cow::Owned(fixed),
        Err(_) => Cow::Borrowed(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nfc(s: &str) -> String {
        s.nfc().collect()
    }

    // =========================================================================
    // normalize tests
    // =========================================================================

    #[test]
    fn test_normalize_empty_and_none() {
        let n = TextNormalizer::new();
        assert_eq!(n.normalize(""), "");
        assert_eq!(n.normalize_opt(None::<&str>), "");
        assert_eq!(n.normalize_opt(Some("  hi  ")), "hi");
    }

    #[test]
    fn test_normalize_bytes_utf8() {
        let n = TextNormalizer::new();
        let out = n.normalize(b"caf\xc3\xa9");
        // NFKD splits the accent off; recomposing shows the same text.
        assert_eq!(out, "cafe\u{301}");
        assert_eq!(nfc(&out), "café");
    }

    #[test]
    fn test_normalize_drops_invalid_bytes() {
        let n = TextNormalizer::new();
        assert_eq!(n.normalize(b"he\xffllo\xfe"), "hello");
    }

    #[test]
    fn test_normalize_decodes_entities() {
        let n = TextNormalizer::new();
        assert_eq!(n.normalize("it&#039;s"), "it's");
        assert_eq!(n.normalize("a &lt; b &amp;&amp; c"), "a < b && c");
    }

    #[test]
    fn test_normalize_entity_output_is_decomposed() {
        let n = TextNormalizer::new();
        assert_eq!(n.normalize("caf&eacute;"), "cafe\u{301}");
    }

    #[test]
    fn test_normalize_trims() {
        let n = TextNormalizer::new();
        assert_eq!(n.normalize("\n\t  hello world \u{a0}"), "hello world");
    }

    #[test]
    fn test_normalize_compatibility_forms() {
        let n = TextNormalizer::new();
        // NFKD folds ligatures and full-width letters.
        assert_eq!(n.normalize("\u{fb01}ne"), "fine");
        assert_eq!(n.normalize("\u{ff21}"), "A");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let n = TextNormalizer::new();
        for input in ["café", "Привет мир", "Tom &amp; Jerry", "  🎉 party  ", "ﬁ\u{a0}x"] {
            let once = n.normalize(input);
            assert_eq!(n.normalize(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_normalize_without_entities() {
        let n = TextNormalizer::with_config(NormalizerConfig::new().with_decode_entities(false));
        assert_eq!(n.normalize("a &amp; b"), "a &amp; b");
    }

    #[test]
    fn test_normalize_form_none_keeps_precomposed() {
        let n = TextNormalizer::with_config(NormalizerConfig::new().with_form(UnicodeForm::None));
        assert_eq!(n.normalize("café"), "café");
    }

    #[test]
    fn test_normalize_text_free_function() {
        assert_eq!(normalize_text("  x  "), "x");
    }

    // =========================================================================
    // Decoding and mojibake tests
    // =========================================================================

    #[test]
    fn test_decode_valid_is_borrowed() {
        assert!(matches!(decode_utf8_dropping(b"plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_decode_truncated_sequence() {
        // Lone lead byte of a 3-byte sequence at the end
        assert_eq!(decode_utf8_dropping(b"ok\xe2\x82"), "ok");
    }

    #[test]
    fn test_repair_mojibake() {
        let broken: String = "Привет".bytes().map(char::from).collect();
        assert_eq!(repair_mojibake(&broken), "Привет");
    }

    #[test]
    fn test_repair_mojibake_leaves_real_text() {
        assert_eq!(repair_mojibake("Hello"), "Hello");
        assert_eq!(repair_mojibake("Привет"), "Привет");
        // Latin-1 text that is not valid UTF-8 once re-encoded
        assert_eq!(repair_mojibake("naïve"), "naïve");
    }

    #[test]
    fn test_normalize_with_mojibake_repair() {
        let n = TextNormalizer::with_config(
            NormalizerConfig::new()
                .with_repair_mojibake(true)
                .with_form(UnicodeForm::Nfc),
        );
        let broken: String = "Café".bytes().map(char::from).collect();
        assert_eq!(n.normalize(&broken), "Café");
    }
}
