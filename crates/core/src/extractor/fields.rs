//! Single-field matchers for expansion entry markup.
//!
//! Each matcher finds the first occurrence of one known pattern inside a
//! text block and returns the captured value, or `None`. Matchers never
//! fail and are independent of each other.

use once_cell::sync::Lazy;
use regex_lite::Regex;

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"data-local-name="([^"]+)""#).unwrap());

static SOURCE_PATH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"data-url="([^"]+)""#).unwrap());

static IMAGE_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"data-echo="([^"]+)""#).unwrap());

// The count is only trusted when it sits directly after a tag boundary and
// is followed by the literal unit word, e.g. ">75 Karten".
static CARD_COUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r">([0-9]+) Karten").unwrap());

// German long-form date between tag boundaries, e.g. ">5. Dezember 2025<".
// Kept verbatim; the page format is not worth normalizing.
static RELEASE_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r">([0-9]{1,2}\. [A-Za-zÄÖÜäöüß]+ [0-9]{4})<").unwrap());

/// Expansion display name from the `data-local-name` attribute.
pub fn local_name(block: &str) -> Option<String> {
    NAME_RE.captures(block).map(|c| c[1].to_string())
}

/// Entry origin URL from the `data-url` attribute.
pub fn source_path(block: &str) -> Option<String> {
    SOURCE_PATH_RE.captures(block).map(|c| c[1].to_string())
}

/// Expansion image URL from the `data-echo` attribute.
pub fn image_url(block: &str) -> Option<String> {
    IMAGE_URL_RE.captures(block).map(|c| c[1].to_string())
}

/// Card count, absent unless the `>N Karten` markers match exactly.
pub fn card_count(block: &str) -> Option<u32> {
    CARD_COUNT_RE
        .captures(block)
        .and_then(|c| c[1].parse::<u32>().ok())
}

/// Release date token, stored verbatim.
pub fn release_date(block: &str) -> Option<String> {
    RELEASE_DATE_RE.captures(block).map(|c| c[1].to_string())
}

/// Short set code: the segment after the final `/` of the source path.
pub fn set_code_from_path(path: &str) -> Option<String> {
    path.rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_name() {
        let block = r#"<div data-url="/x" data-local-name="Alpha Edition">"#;
        assert_eq!(local_name(block), Some("Alpha Edition".to_string()));
    }

    #[test]
    fn test_local_name_first_match_wins() {
        let block = r#"data-local-name="First" data-local-name="Second""#;
        assert_eq!(local_name(block), Some("First".to_string()));
    }

    #[test]
    fn test_local_name_absent() {
        assert_eq!(local_name("<div class=\"row\">"), None);
    }

    #[test]
    fn test_attribute_names_case_sensitive() {
        assert_eq!(local_name(r#"DATA-LOCAL-NAME="Alpha""#), None);
        assert_eq!(source_path(r#"Data-Url="/x""#), None);
    }

    #[test]
    fn test_source_path_and_image() {
        let block = r#"<div data-url="https://example.com/de/Products/alpha"
            data-echo="https://static.example.com/alpha.png">"#;
        assert_eq!(
            source_path(block),
            Some("https://example.com/de/Products/alpha".to_string())
        );
        assert_eq!(
            image_url(block),
            Some("https://static.example.com/alpha.png".to_string())
        );
    }

    #[test]
    fn test_card_count() {
        assert_eq!(card_count("<span>75 Karten</span>"), Some(75));
    }

    #[test]
    fn test_card_count_requires_unit_word() {
        assert_eq!(card_count("<span>75 Cards</span>"), None);
        assert_eq!(card_count("<span>75</span>"), None);
    }

    #[test]
    fn test_card_count_requires_tag_boundary() {
        assert_eq!(card_count("insgesamt 75 Karten"), None);
    }

    #[test]
    fn test_card_count_overflow_is_absent() {
        assert_eq!(card_count("<span>99999999999999999999 Karten</span>"), None);
    }

    #[test]
    fn test_release_date() {
        assert_eq!(
            release_date("<span>5. Dezember 2025</span>"),
            Some("5. Dezember 2025".to_string())
        );
        assert_eq!(
            release_date("<td>17. März 2024</td>"),
            Some("17. März 2024".to_string())
        );
    }

    #[test]
    fn test_release_date_requires_boundaries() {
        assert_eq!(release_date("erschienen am 5. Dezember 2025 in"), None);
    }

    #[test]
    fn test_set_code_from_path() {
        assert_eq!(
            set_code_from_path("https://example.com/de/Products/alpha"),
            Some("alpha".to_string())
        );
        assert_eq!(set_code_from_path("alpha"), Some("alpha".to_string()));
        assert_eq!(set_code_from_path("https://example.com/alpha/"), None);
        assert_eq!(set_code_from_path(""), None);
    }
}
