//! Registry record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::extractor::ExtractedExpansion;

/// One expansion known to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expansion {
    /// Display name; the registry's only identity.
    pub name: String,
    /// Origin URL the entry was scraped from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
    /// Short code derived from the last segment of `source_path`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_code: Option<String>,
    /// Number of cards in the expansion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_count: Option<u32>,
    /// Release date as printed on the page, not normalized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    /// Expansion logo/image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// When the expansion was first observed. Immutable after creation.
    pub first_seen_at: DateTime<Utc>,
    /// When the expansion was last observed.
    pub last_seen_at: DateTime<Utc>,
    /// Number of observations, starts at 1 and only grows.
    pub times_seen: u32,
}

impl Expansion {
    /// A fresh record carrying only a name.
    pub fn new(name: &str, now: DateTime<Utc>) -> Self {
        Self {
            name: name.to_string(),
            source_path: None,
            set_code: None,
            card_count: None,
            release_date: None,
            image_url: None,
            first_seen_at: now,
            last_seen_at: now,
            times_seen: 1,
        }
    }

    /// A fresh record from an extracted entry, stored as given.
    pub fn from_extracted(entry: &ExtractedExpansion, now: DateTime<Utc>) -> Self {
        Self {
            name: entry.name.clone(),
            source_path: entry.source_path.clone(),
            set_code: entry.set_code.clone(),
            card_count: entry.card_count,
            release_date: entry.release_date.clone(),
            image_url: entry.image_url.clone(),
            first_seen_at: now,
            last_seen_at: now,
            times_seen: 1,
        }
    }

    /// Record one more observation, overlaying any present incoming field.
    ///
    /// Absent/empty incoming values never erase existing ones.
    pub fn merge_observation(&mut self, entry: &ExtractedExpansion, now: DateTime<Utc>) {
        self.last_seen_at = now;
        self.times_seen += 1;

        overlay(&mut self.source_path, &entry.source_path);
        overlay(&mut self.set_code, &entry.set_code);
        overlay(&mut self.release_date, &entry.release_date);
        overlay(&mut self.image_url, &entry.image_url);
        if let Some(count) = entry.card_count {
            self.card_count = Some(count);
        }
    }
}

fn overlay(existing: &mut Option<String>, incoming: &Option<String>) {
    if let Some(value) = incoming {
        if !value.is_empty() {
            *existing = Some(value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_omits_absent_fields() {
        let expansion = Expansion::new("Alpha", Utc::now());
        let json = serde_json::to_string(&expansion).unwrap();
        assert!(json.contains("\"name\":\"Alpha\""));
        assert!(!json.contains("source_path"));
        assert!(!json.contains("card_count"));
        assert!(json.contains("times_seen"));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut expansion = Expansion::new("Alpha", Utc::now());
        expansion.set_code = Some("alpha".to_string());
        expansion.card_count = Some(75);
        expansion.release_date = Some("5. Dezember 2025".to_string());

        let json = serde_json::to_string(&expansion).unwrap();
        let parsed: Expansion = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, expansion);
    }

    #[test]
    fn test_merge_preserves_absent_incoming_fields() {
        let now = Utc::now();
        let mut existing = Expansion::new("Alpha", now);
        existing.release_date = Some("5. Dezember 2025".to_string());
        existing.image_url = Some("https://img.example.com/a.png".to_string());

        let incoming = ExtractedExpansion {
            card_count: Some(75),
            ..ExtractedExpansion::named("Alpha")
        };
        existing.merge_observation(&incoming, now);

        assert_eq!(existing.card_count, Some(75));
        assert_eq!(existing.release_date.as_deref(), Some("5. Dezember 2025"));
        assert_eq!(
            existing.image_url.as_deref(),
            Some("https://img.example.com/a.png")
        );
        assert_eq!(existing.times_seen, 2);
    }

    #[test]
    fn test_merge_ignores_empty_strings() {
        let now = Utc::now();
        let mut existing = Expansion::new("Alpha", now);
        existing.set_code = Some("alpha".to_string());

        let incoming = ExtractedExpansion {
            set_code: Some(String::new()),
            ..ExtractedExpansion::named("Alpha")
        };
        existing.merge_observation(&incoming, now);
        assert_eq!(existing.set_code.as_deref(), Some("alpha"));
    }

    #[test]
    fn test_merge_keeps_first_seen() {
        let t0 = Utc::now();
        let mut existing = Expansion::new("Alpha", t0);
        let t1 = t0 + chrono::Duration::seconds(60);
        existing.merge_observation(&ExtractedExpansion::named("Alpha"), t1);
        assert_eq!(existing.first_seen_at, t0);
        assert_eq!(existing.last_seen_at, t1);
    }
}
