//! Record filtering, text normalization, and enrichment
//!
//! Reposts never reach the output; their ids go to the run-wide skipped
//! side channel. Records missing required fields are malformed: logged at
//! warn and dropped without aborting the batch. Everything else becomes a
//! `ProcessedPost` plus a corpus line and a length row.

use chrono::{DateTime, NaiveDate};

use crate::location::{CityGazetteer, PlaceResolver, infer_location};
use crate::record::{LengthRow, ProcessedPost, RawPost};

/// Token standing in for line breaks in normalized text.
pub const PARAGRAPH_MARKER: &str = "<p>";

/// Legacy timestamp layout still used by parts of the lookup service.
const LEGACY_TIMESTAMP: &str = "%a %b %d %H:%M:%S %z %Y";

/// Result of processing one raw record.
#[derive(Debug)]
pub enum Outcome {
    Kept {
        post: Box<ProcessedPost>,
        /// Normalized text for the corpus artifact.
        text: String,
        /// Word count of the raw text, before normalization.
        word_count: usize,
    },
    /// Repost of another post — filtered, id goes to the side channel.
    Repost { id: u64 },
    /// Required field missing or unparseable.
    Malformed { id: u64, reason: &'static str },
}

/// Per-batch aggregation of processed records.
#[derive(Debug, Default)]
pub struct ProcessedBatch {
    pub posts: Vec<ProcessedPost>,
    /// Normalized texts, co-indexed with `posts`.
    pub texts: Vec<String>,
    pub lengths: Vec<LengthRow>,
    pub reposts: Vec<u64>,
    pub malformed: usize,
}

/// Filters and enriches raw records.
pub struct RecordProcessor {
    resolver: Box<dyn PlaceResolver>,
}

impl Default for RecordProcessor {
    fn default() -> Self {
        Self::new(Box::new(CityGazetteer))
    }
}

impl RecordProcessor {
    pub fn new(resolver: Box<dyn PlaceResolver>) -> Self {
        Self { resolver }
    }

    /// Process one record.
    pub fn process(&self, raw: &RawPost) -> Outcome {
        if raw.is_repost() {
            return Outcome::Repost { id: raw.id };
        }

        let Some(text) = raw.text.as_deref() else {
            return Outcome::Malformed {
                id: raw.id,
                reason: "missing text",
            };
        };
        let Some(created_at) = raw.created_at.as_deref() else {
            return Outcome::Malformed {
                id: raw.id,
                reason: "missing created_at",
            };
        };
        let Some(date) = parse_date(created_at) else {
            return Outcome::Malformed {
                id: raw.id,
                reason: "unparseable created_at",
            };
        };
        let Some(author) = raw.author.as_ref() else {
            return Outcome::Malformed {
                id: raw.id,
                reason: "missing author",
            };
        };

        let word_count = text.split_whitespace().count();
        let post = ProcessedPost {
            id: raw.id,
            date: date.format("%Y-%m-%d").to_string(),
            location: infer_location(raw, self.resolver.as_ref()),
            language: raw.lang.clone(),
            hashtags: raw.entities.hashtags.iter().map(|h| h.text.clone()).collect(),
            urls: raw
                .entities
                .urls
                .iter()
                .map(|u| u.expanded_url.clone())
                .collect(),
            mentions: raw.entities.mentions.iter().map(|m| m.id).collect(),
            like_count: raw.like_count,
            repost_count: raw.repost_count,
            in_reply_to_post_id: raw.in_reply_to_post_id,
            in_reply_to_user_id: raw.in_reply_to_user_id,
            author: author.id,
            author_name: author.name.clone(),
            author_followers: author.followers_count,
            author_post_count: author.post_count,
            author_verified: author.verified,
        };

        Outcome::Kept {
            post: Box::new(post),
            text: normalize_text(text),
            word_count,
        }
    }

    /// Process a whole hydrated batch, splitting outcomes.
    pub fn process_batch(&self, raw: &[RawPost]) -> ProcessedBatch {
        let mut batch = ProcessedBatch::default();
        for record in raw {
            match self.process(record) {
                Outcome::Kept {
                    post,
                    text,
                    word_count,
                } => {
                    batch.lengths.push(LengthRow {
                        id: post.id,
                        word_count,
                    });
                    batch.texts.push(text);
                    batch.posts.push(*post);
                }
                Outcome::Repost { id } => batch.reposts.push(id),
                Outcome::Malformed { id, reason } => {
                    log::warn!("post {id}: {reason}, skipping");
                    batch.malformed += 1;
                }
            }
        }
        batch
    }
}

/// Normalize post text: strip carriage returns, encode line breaks as a
/// paragraph marker, collapse run-together markers and double spaces.
pub fn normalize_text(raw: &str) -> String {
    let text = raw
        .replace('\r', "")
        .replace('\n', &format!(" {PARAGRAPH_MARKER} "));
    text.replace(
        &format!("{PARAGRAPH_MARKER}  {PARAGRAPH_MARKER}"),
        PARAGRAPH_MARKER,
    )
    .replace("  ", " ")
}

/// RFC 3339 first, then the legacy layout.
fn parse_date(s: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_str(s, LEGACY_TIMESTAMP))
        .map(|dt| dt.date_naive())
        .ok()
}
