//! Per-document extraction pipeline.
//!
//! One HTML document flows through these stages:
//!
//! 1. [`DocumentExtractor`] locates the title, participants and message
//!    sections using a [`MarkupProfile`], yielding [`RawBundle`]s
//! 2. [`MessageAssembler`] normalizes each bundle with [`TextNormalizer`],
//!    parses its timestamp with [`TimestampParser`] and builds a
//!    [`Message`](crate::Message) or discards it
//!
//! Directory walking and accumulation live in
//! [`aggregator`](crate::aggregator).

pub mod assemble;
pub mod extract;
pub mod normalize;
pub mod profile;
pub mod timestamp;

pub use assemble::{DiscardReason, MessageAssembler};
pub use extract::{DocumentExtractor, ExtractedDocument, RawBundle, SectionStats, SkipReason};
pub use normalize::{TextNormalizer, decode_utf8_dropping, normalize_text, repair_mojibake};
pub use profile::{CompiledProfile, MarkupProfile};
pub use timestamp::{TimestampFormat, TimestampParser, parse_timestamp};
