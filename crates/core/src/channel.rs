//! Chat channels (Facebook pages, Instagram accounts) connected by an owner.
//!
//! The stored API token is never serialized in clear; responses carry the
//! masked form produced by [`ApiToken::masked`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::CoreError;
use crate::faq::require_text;
use crate::types::{DbId, OwnerId, Timestamp};

/// Entity name used in not-found errors.
pub const CHANNEL_ENTITY: &str = "Channel";

/// Length of a masked token, in characters.
const MASK_LEN: usize = 30;

/// Trailing token characters left visible once the token is long enough.
const VISIBLE_SUFFIX: usize = 4;

/// Tokens shorter than this are masked completely.
const MIN_LEN_FOR_SUFFIX: usize = 12;

const MASK_CHAR: char = '•';

// ---------------------------------------------------------------------------
// Kind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Facebook,
    Instagram,
}

impl ChannelKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Facebook => "facebook",
            Self::Instagram => "instagram",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "facebook" => Ok(Self::Facebook),
            "instagram" => Ok(Self::Instagram),
            other => Err(CoreError::Validation(format!(
                "Unknown channel type '{other}'. Must be one of: facebook, instagram"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

/// A channel's API token. `Debug` and `Serialize` only ever show the mask.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The clear-text token, for persistence only.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Fixed-width mask; long tokens keep their last four characters.
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() < MIN_LEN_FOR_SUFFIX {
            return MASK_CHAR.to_string().repeat(MASK_LEN);
        }
        let suffix: String = chars[chars.len() - VISIBLE_SUFFIX..].iter().collect();
        format!(
            "{}{suffix}",
            MASK_CHAR.to_string().repeat(MASK_LEN - VISIBLE_SUFFIX)
        )
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiToken").field(&self.masked()).finish()
    }
}

impl Serialize for ApiToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.masked())
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A connected channel as returned by a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelRecord {
    pub id: DbId,
    pub owner: OwnerId,
    #[serde(rename = "type")]
    pub kind: ChannelKind,
    pub name: String,
    #[serde(rename = "token")]
    pub api_token: ApiToken,
    pub created_at: Timestamp,
}

impl ChannelRecord {
    /// Case-insensitive substring match on the name or the channel type.
    /// A blank query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.name.to_lowercase().contains(&query)
            || self.kind.as_str().contains(&query)
    }
}

/// Keep the channels matching `query`, preserving order.
pub fn filter_channels(channels: Vec<ChannelRecord>, query: Option<&str>) -> Vec<ChannelRecord> {
    match query {
        Some(query) => channels.into_iter().filter(|c| c.matches(query)).collect(),
        None => channels,
    }
}

/// Fields for connecting a new channel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewChannel {
    #[serde(rename = "type")]
    pub kind: ChannelKind,
    pub name: String,
    pub token: ApiToken,
}

impl NewChannel {
    /// Trim the name and token; both must be non-blank.
    pub fn validated(self) -> Result<Self, CoreError> {
        require_text("name", &self.name)?;
        require_text("token", self.token.expose())?;
        Ok(Self {
            kind: self.kind,
            name: self.name.trim().to_string(),
            token: ApiToken::new(self.token.expose().trim()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn record(kind: ChannelKind, name: &str) -> ChannelRecord {
        ChannelRecord {
            id: 1,
            owner: uuid::Uuid::new_v4(),
            kind,
            name: name.to_string(),
            api_token: ApiToken::new("EAAB-secret-page-token-1234"),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("Facebook".parse::<ChannelKind>().unwrap(), ChannelKind::Facebook);
        assert_eq!(" instagram ".parse::<ChannelKind>().unwrap(), ChannelKind::Instagram);
        assert_matches!("tiktok".parse::<ChannelKind>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn long_token_keeps_last_four() {
        let masked = ApiToken::new("EAAB-secret-page-token-1234").masked();
        assert_eq!(masked.chars().count(), 30);
        assert!(masked.ends_with("1234"));
        assert!(!masked.contains("secret"));
    }

    #[test]
    fn short_token_is_fully_masked() {
        let masked = ApiToken::new("abc123").masked();
        assert_eq!(masked, "•".repeat(30));
    }

    #[test]
    fn token_never_serializes_or_debugs_in_clear() {
        let channel = record(ChannelKind::Facebook, "Acme FB Page");

        let json = serde_json::to_value(&channel).unwrap();
        assert_eq!(json["type"], "facebook");
        assert_eq!(json["token"], channel.api_token.masked());
        assert!(!format!("{channel:?}").contains("secret"));
    }

    #[test]
    fn search_matches_name_or_type_ignoring_case() {
        let fb = record(ChannelKind::Facebook, "Acme FB Page");
        let ig = record(ChannelKind::Instagram, "Acme IG");

        assert!(fb.matches("acme"));
        assert!(fb.matches("PAGE"));
        assert!(ig.matches("insta"));
        assert!(!ig.matches("facebook"));
        assert!(ig.matches("   "));
    }

    #[test]
    fn filter_keeps_order_and_handles_no_query() {
        let channels = vec![
            record(ChannelKind::Facebook, "Acme FB Page"),
            record(ChannelKind::Instagram, "Acme IG"),
        ];

        assert_eq!(filter_channels(channels.clone(), None).len(), 2);
        let found = filter_channels(channels, Some("ig"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Acme IG");
    }

    #[test]
    fn new_channel_requires_name_and_token() {
        let input = NewChannel {
            kind: ChannelKind::Instagram,
            name: "  Acme IG ".to_string(),
            token: ApiToken::new(" token-value "),
        };
        let valid = input.clone().validated().unwrap();
        assert_eq!(valid.name, "Acme IG");
        assert_eq!(valid.token.expose(), "token-value");

        let blank_name = NewChannel {
            name: " ".to_string(),
            ..input.clone()
        };
        assert_matches!(blank_name.validated(), Err(CoreError::Validation(_)));

        let blank_token = NewChannel {
            token: ApiToken::new(""),
            ..input
        };
        assert_matches!(blank_token.validated(), Err(CoreError::Validation(_)));
    }
}
