//! Catalog record types - raw wire shape and the projected public shape.

use serde::{Deserialize, Serialize};

/// One raw record from the bulk data file.
///
/// Mirrors the producer's snake-case JSON keys; unknown keys are ignored
/// and missing keys map to `None`. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogCard {
    pub name: Option<String>,
    pub set: Option<String>,
    pub set_name: Option<String>,
    pub collector_number: Option<String>,
    pub rarity: Option<String>,
    pub mana_cost: Option<String>,
    pub type_line: Option<String>,
    pub oracle_text: Option<String>,
    pub power: Option<String>,
    pub toughness: Option<String>,
    pub colors: Option<Vec<String>>,
    pub color_identity: Option<Vec<String>>,
    pub image_uris: Option<CardImageUris>,
    pub prices: Option<CardPrices>,
    pub scryfall_uri: Option<String>,
}

/// Image variants per card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardImageUris {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub png: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub art_crop: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_crop: Option<String>,
}

/// Price variants per card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardPrices {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usd_foil: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eur: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eur_foil: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tix: Option<String>,
}

/// The reduced card shape handed to the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collector_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mana_cost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oracle_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toughness: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_identity: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_uris: Option<CardImageUris>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prices: Option<CardPrices>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scryfall_uri: Option<String>,
}

impl From<&CatalogCard> for Card {
    fn from(raw: &CatalogCard) -> Self {
        Self {
            name: raw.name.clone().unwrap_or_default(),
            set_code: raw.set.clone(),
            set_name: raw.set_name.clone(),
            collector_number: raw.collector_number.clone(),
            rarity: raw.rarity.clone(),
            mana_cost: raw.mana_cost.clone(),
            type_line: raw.type_line.clone(),
            oracle_text: raw.oracle_text.clone(),
            power: raw.power.clone(),
            toughness: raw.toughness.clone(),
            colors: raw.colors.clone(),
            color_identity: raw.color_identity.clone(),
            image_uris: raw.image_uris.clone(),
            prices: raw.prices.clone(),
            scryfall_uri: raw.scryfall_uri.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_ignores_unknown_keys() {
        let json = r#"{
            "name": "Black Lotus",
            "set": "lea",
            "collector_number": "232",
            "object": "card",
            "legalities": {"vintage": "restricted"}
        }"#;
        let card: CatalogCard = serde_json::from_str(json).unwrap();
        assert_eq!(card.name.as_deref(), Some("Black Lotus"));
        assert_eq!(card.set.as_deref(), Some("lea"));
        assert_eq!(card.rarity, None);
    }

    #[test]
    fn test_deserialize_nested_shapes() {
        let json = r#"{
            "name": "Shivan Dragon",
            "set": "lea",
            "colors": ["R"],
            "color_identity": ["R"],
            "image_uris": {"small": "https://img/s.jpg", "art_crop": "https://img/a.jpg"},
            "prices": {"usd": "1200.00", "eur_foil": null}
        }"#;
        let card: CatalogCard = serde_json::from_str(json).unwrap();
        assert_eq!(card.colors.as_deref(), Some(&["R".to_string()][..]));
        let images = card.image_uris.as_ref().unwrap();
        assert_eq!(images.small.as_deref(), Some("https://img/s.jpg"));
        assert_eq!(images.normal, None);
        assert_eq!(card.prices.as_ref().unwrap().usd.as_deref(), Some("1200.00"));
        assert_eq!(card.prices.as_ref().unwrap().eur_foil, None);
    }

    #[test]
    fn test_projection_carries_fields_over() {
        let raw = CatalogCard {
            name: Some("Counterspell".to_string()),
            set: Some("lea".to_string()),
            set_name: Some("Limited Edition Alpha".to_string()),
            collector_number: Some("54".to_string()),
            rarity: Some("common".to_string()),
            mana_cost: Some("{U}{U}".to_string()),
            type_line: Some("Instant".to_string()),
            oracle_text: Some("Counter target spell.".to_string()),
            power: None,
            toughness: None,
            colors: Some(vec!["U".to_string()]),
            color_identity: Some(vec!["U".to_string()]),
            image_uris: None,
            prices: None,
            scryfall_uri: Some("https://scryfall.com/card/lea/54".to_string()),
        };
        let card = Card::from(&raw);
        assert_eq!(card.name, "Counterspell");
        assert_eq!(card.set_code.as_deref(), Some("lea"));
        assert_eq!(card.mana_cost.as_deref(), Some("{U}{U}"));
        assert_eq!(card.power, None);
    }

    #[test]
    fn test_projection_defaults_missing_name() {
        let raw: CatalogCard = serde_json::from_str(r#"{"set": "lea"}"#).unwrap();
        assert_eq!(Card::from(&raw).name, "");
    }
}
