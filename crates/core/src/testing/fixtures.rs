//! Canned payloads shaped like the real upstream responses.

/// A listing page with two expansion entries.
///
/// "Alpha Edition" carries every field and nests further divs inside its
/// block; "Beta Edition" has only the mandatory attributes.
pub fn listing_html() -> String {
    r#"<!DOCTYPE html>
<html>
<body>
<div class="table-body">
  <div class="row expansion-row" data-url="https://example.com/de/Magic/Products/Singles/alpha" data-local-name="Alpha Edition">
    <div class="col-thumb">
      <div class="thumb-frame"><img data-echo="https://static.example.com/img/sets/alpha.png" /></div>
    </div>
    <div class="col-meta">
      <span>75 Karten</span>
      <span>5. Dezember 2025</span>
    </div>
  </div>
  <div class="row expansion-row" data-url="https://example.com/de/Magic/Products/Singles/beta" data-local-name="Beta Edition">
    <div class="col-meta"><span>demn&auml;chst</span></div>
  </div>
</div>
</body>
</html>
"#
    .to_string()
}

/// A small bulk file: five cards over two sets, collector numbers out of
/// order so sorting is observable.
pub fn catalog_json() -> String {
    r#"[
  {"name": "Forcefield", "set": "lea", "set_name": "Limited Edition Alpha", "collector_number": "10", "rarity": "rare"},
  {"name": "Balance", "set": "lea", "set_name": "Limited Edition Alpha", "collector_number": "2", "rarity": "rare",
   "mana_cost": "{1}{W}", "type_line": "Sorcery", "colors": ["W"], "color_identity": ["W"],
   "prices": {"usd": "800.00", "eur": "650.00"}},
  {"name": "Ankh of Mishra", "set": "lea", "set_name": "Limited Edition Alpha", "collector_number": "1", "rarity": "rare",
   "image_uris": {"small": "https://img.example.com/ankh-s.jpg", "normal": "https://img.example.com/ankh-n.jpg"}},
  {"name": "Army of Allah", "set": "arn", "set_name": "Arabian Nights", "collector_number": "3", "rarity": "common"},
  {"name": "Bazaar of Baghdad", "set": "arn", "set_name": "Arabian Nights", "collector_number": "5", "rarity": "uncommon"}
]"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogCard;

    #[test]
    fn test_listing_fixture_has_both_entries() {
        let html = listing_html();
        assert!(html.contains(r#"data-local-name="Alpha Edition""#));
        assert!(html.contains(r#"data-local-name="Beta Edition""#));
    }

    #[test]
    fn test_catalog_fixture_parses() {
        let cards: Vec<CatalogCard> = serde_json::from_str(&catalog_json()).unwrap();
        assert_eq!(cards.len(), 5);
        assert_eq!(cards.iter().filter(|c| c.set.as_deref() == Some("lea")).count(), 3);
    }
}
