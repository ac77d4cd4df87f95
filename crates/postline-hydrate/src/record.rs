//! Typed models for hydrated post records
//!
//! `RawPost` mirrors the lookup service payload. Only `id` is required at
//! the deserialization layer; everything else is optional so that a record
//! with missing fields still reaches the processor, which decides whether
//! it is malformed. `ProcessedPost` is the enriched metadata bundle
//! written to the batch JSON artifact.

use serde::{Deserialize, Serialize};

/// Raw post as returned by the lookup service, before filtering.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPost {
    pub id: u64,
    /// Full post text. Required downstream; absence marks the record malformed.
    #[serde(default)]
    pub text: Option<String>,
    /// Creation timestamp, RFC 3339 or legacy `%a %b %d %H:%M:%S %z %Y`.
    #[serde(default)]
    pub created_at: Option<String>,
    /// BCP-47 language tag
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub repost_count: u64,
    /// Present when this post is a repost of another post (the original's id).
    #[serde(default)]
    pub repost_of: Option<u64>,
    #[serde(default)]
    pub in_reply_to_post_id: Option<u64>,
    #[serde(default)]
    pub in_reply_to_user_id: Option<u64>,
    #[serde(default)]
    pub entities: Entities,
    #[serde(default)]
    pub author: Option<Author>,
    /// Structured place attached to the post, if the author geotagged it.
    #[serde(default)]
    pub place: Option<Place>,
}

impl RawPost {
    /// Repost marker — reposts are filtered out, never enriched.
    pub fn is_repost(&self) -> bool {
        self.repost_of.is_some()
    }
}

/// Structured sub-entities extracted by the lookup service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Entities {
    #[serde(default)]
    pub hashtags: Vec<Hashtag>,
    #[serde(default)]
    pub urls: Vec<UrlEntity>,
    #[serde(default)]
    pub mentions: Vec<Mention>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hashtag {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UrlEntity {
    pub expanded_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Mention {
    pub id: u64,
}

/// Author profile attributes carried on each hydrated post.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    /// Free-text self-reported location ("Austin, TX, USA", "somewhere \u{1f30d}", ...)
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub post_count: u64,
    #[serde(default)]
    pub verified: bool,
}

/// Structured geotag; `country` feeds the location heuristic directly.
#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    #[serde(default)]
    pub country: Option<String>,
}

/// Enriched metadata for one post that survived filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedPost {
    pub id: u64,
    /// YYYY-MM-DD
    pub date: String,
    pub location: Option<String>,
    pub language: Option<String>,
    pub hashtags: Vec<String>,
    pub urls: Vec<String>,
    pub mentions: Vec<u64>,
    pub like_count: u64,
    pub repost_count: u64,
    pub in_reply_to_post_id: Option<u64>,
    pub in_reply_to_user_id: Option<u64>,
    pub author: u64,
    pub author_name: String,
    pub author_followers: u64,
    pub author_post_count: u64,
    pub author_verified: bool,
}

/// One row of the lengths artifact: word count of the raw text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthRow {
    pub id: u64,
    pub word_count: usize,
}
