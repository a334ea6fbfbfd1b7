//! Entry discovery and span scanning for listing pages.

use tracing::debug;

use crate::config::ExtractorConfig;

use super::fields;
use super::types::ExtractedExpansion;

// The nesting scan tracks the `div` tag type: expansion entries are div
// blocks that routinely contain further divs of their own.
const OPEN_TAG: &str = "<div";
const CLOSE_TAG: &str = "</div";

/// Finds expansion entries in a page and pulls structured fields from each.
///
/// Never errors on any input; malformed or truncated markup degrades to a
/// bounded-length slice so the scan always terminates.
pub struct BlockExtractor {
    max_entry_span: usize,
}

impl Default for BlockExtractor {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}

impl BlockExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            max_entry_span: config.max_entry_span_bytes,
        }
    }

    /// Extract all expansion entries in document order.
    ///
    /// Duplicate names are not merged here; that is the registry's job.
    pub fn extract(&self, html: &str) -> Vec<ExtractedExpansion> {
        let mut entries = Vec::new();

        for start in entry_offsets(html) {
            let span = self.entry_span(html, start);

            // The marker guarantees a name attribute in the opening tag, but
            // a capped span could in principle cut it off.
            let Some(name) = fields::local_name(span) else {
                continue;
            };
            let source_path = fields::source_path(span);
            let set_code = source_path.as_deref().and_then(fields::set_code_from_path);

            entries.push(ExtractedExpansion {
                name,
                source_path,
                set_code,
                card_count: fields::card_count(span),
                release_date: fields::release_date(span),
                image_url: fields::image_url(span),
            });
        }

        debug!(entries = entries.len(), "extracted expansion entries");
        entries
    }

    /// Determine the extent of the entry starting at `start`.
    ///
    /// Nesting-aware: the counter starts at 1 once the opening tag's `>` is
    /// reached, every further `<div` opening increments it and every `</div`
    /// closing decrements it; the span ends at the closing tag that brings
    /// the counter to 0. A naive "first closing tag" match would terminate
    /// early inside nested divs. If the counter never reaches 0, fall back
    /// to a capped slice.
    fn entry_span<'a>(&self, html: &'a str, start: usize) -> &'a str {
        let Some(rel) = html[start..].find('>') else {
            return self.capped_span(html, start);
        };

        let mut depth = 1usize;
        let mut pos = start + rel + 1;

        loop {
            let open = find_open_tag(html, pos);
            let close = find_close_tag(html, pos);

            match (open, close) {
                (Some(o), Some(c)) if o < c => {
                    depth += 1;
                    pos = o + OPEN_TAG.len();
                }
                (_, Some(c)) => {
                    depth -= 1;
                    let end = html[c..]
                        .find('>')
                        .map(|i| c + i + 1)
                        .unwrap_or(html.len());
                    if depth == 0 {
                        return &html[start..end];
                    }
                    pos = end;
                }
                // No closing tag left before the document ends.
                _ => return self.capped_span(html, start),
            }
        }
    }

    fn capped_span<'a>(&self, html: &'a str, start: usize) -> &'a str {
        let mut end = (start + self.max_entry_span).min(html.len());
        while !html.is_char_boundary(end) {
            end -= 1;
        }
        &html[start..end]
    }
}

/// Start offsets of entry opening tags: a `<div` whose attributes carry both
/// `data-url` and `data-local-name`.
fn entry_offsets(html: &str) -> Vec<usize> {
    let mut offsets = Vec::new();
    let mut pos = 0;

    while let Some(at) = find_open_tag(html, pos) {
        let after = at + OPEN_TAG.len();
        let head_end = html[after..].find('>').map(|i| after + i).unwrap_or(html.len());
        let head = &html[at..head_end];
        if head.contains("data-url=\"") && head.contains("data-local-name=\"") {
            offsets.push(at);
        }
        pos = after;
    }

    offsets
}

/// Next `<div` opening at or after `pos` that is a real tag start (followed
/// by whitespace, `>` or `/`), skipping things like `<divider`.
fn find_open_tag(html: &str, mut pos: usize) -> Option<usize> {
    while let Some(rel) = html[pos..].find(OPEN_TAG) {
        let at = pos + rel;
        let after = at + OPEN_TAG.len();
        match html[after..].chars().next() {
            Some(c) if c.is_ascii_whitespace() || c == '>' || c == '/' => return Some(at),
            Some(_) => pos = after,
            None => return None,
        }
    }
    None
}

/// Next `</div` closing at or after `pos`, with the same tag-boundary check
/// so a `</divider` does not count.
fn find_close_tag(html: &str, mut pos: usize) -> Option<usize> {
    while let Some(rel) = html[pos..].find(CLOSE_TAG) {
        let at = pos + rel;
        let after = at + CLOSE_TAG.len();
        match html[after..].chars().next() {
            Some(c) if c.is_ascii_whitespace() || c == '>' => return Some(at),
            Some(_) => pos = after,
            None => return None,
        }
    }
    None
}

/// Every `data-local-name` value in the page, in document order.
///
/// The lightweight name-only path: no span scanning, no other fields.
pub fn extract_names(html: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = html;
    while let Some(name) = fields::local_name(rest) {
        // Advance past this occurrence before searching again.
        let marker = format!("data-local-name=\"{}\"", name);
        match rest.find(&marker) {
            Some(at) => {
                names.push(name);
                rest = &rest[at + marker.len()..];
            }
            None => break,
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, path: &str, body: &str) -> String {
        format!(
            r#"<div class="expansion-row" data-url="{path}" data-local-name="{name}">{body}</div>"#
        )
    }

    #[test]
    fn test_no_entries_yields_empty() {
        let extractor = BlockExtractor::default();
        assert!(extractor.extract("").is_empty());
        assert!(extractor.extract("<html><body><p>nothing</p></body></html>").is_empty());
        // A div without both marker attributes is not an entry.
        assert!(extractor
            .extract(r#"<div data-url="/only-url">x</div>"#)
            .is_empty());
    }

    #[test]
    fn test_single_entry_all_fields() {
        let html = entry(
            "Alpha",
            "https://example.com/de/Products/alpha",
            r#"<div class="thumb"><img data-echo="https://img.example.com/alpha.png" /></div>
               <div class="meta"><span>75 Karten</span><span>5. Dezember 2025</span></div>"#,
        );
        let entries = BlockExtractor::default().extract(&html);
        assert_eq!(entries.len(), 1);
        let e = &entries[0];
        assert_eq!(e.name, "Alpha");
        assert_eq!(e.set_code.as_deref(), Some("alpha"));
        assert_eq!(e.card_count, Some(75));
        assert_eq!(e.release_date.as_deref(), Some("5. Dezember 2025"));
        assert_eq!(
            e.image_url.as_deref(),
            Some("https://img.example.com/alpha.png")
        );
    }

    #[test]
    fn test_nested_divs_close_at_structural_boundary() {
        // Two levels of nested divs before the entry closes; the text after
        // the entry must not leak into the span.
        let html = format!(
            "{}<span>999 Karten</span>",
            entry(
                "Nested",
                "/x/nested",
                "<div><div><span>12 Karten</span></div></div>"
            )
        );
        let entries = BlockExtractor::default().extract(&html);
        assert_eq!(entries.len(), 1);
        // 12 comes from inside the entry; 999 sits outside it.
        assert_eq!(entries[0].card_count, Some(12));
    }

    #[test]
    fn test_custom_element_tags_do_not_affect_nesting() {
        // Neither <divider> nor </divider> may touch the depth counter; a
        // counted </divider would end the span before the real content.
        let html = format!(
            "{}<span>999 Karten</span>",
            entry(
                "Custom",
                "/x/custom",
                "<divider>rule</divider><div><span>42 Karten</span></div>"
            )
        );
        let entries = BlockExtractor::default().extract(&html);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].card_count, Some(42));
    }

    #[test]
    fn test_unbalanced_markup_falls_back_to_capped_span() {
        let mut html = entry("Broken", "/x/broken", "<div><div>never closed");
        html.truncate(html.len() - "</div>".len());
        html.push_str(&"x".repeat(5000));

        let extractor = BlockExtractor::default();
        let entries = extractor.extract(&html);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Broken");
    }

    #[test]
    fn test_capped_span_respects_char_boundaries() {
        let mut html = String::from(r#"<div data-url="/x/a" data-local-name="A">"#);
        html.push_str(&"ä".repeat(3000)); // multi-byte, never closed
        let entries = BlockExtractor::default().extract(&html);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "A");
    }

    #[test]
    fn test_two_entries_in_document_order() {
        let html = format!(
            "{}\n{}",
            entry("Beta", "/x/beta", ""),
            entry("Alpha", "/x/alpha", "")
        );
        let entries = BlockExtractor::default().extract(&html);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Beta");
        assert_eq!(entries[1].name, "Alpha");
    }

    #[test]
    fn test_duplicate_names_not_merged_here() {
        let html = format!(
            "{}{}",
            entry("Same", "/x/same", ""),
            entry("Same", "/x/same", "")
        );
        assert_eq!(BlockExtractor::default().extract(&html).len(), 2);
    }

    #[test]
    fn test_missing_optional_fields_stay_absent() {
        let html = entry("Beta", "/x/beta", "<p>no count, no date</p>");
        let entries = BlockExtractor::default().extract(&html);
        let e = &entries[0];
        assert_eq!(e.name, "Beta");
        assert_eq!(e.set_code.as_deref(), Some("beta"));
        assert_eq!(e.card_count, None);
        assert_eq!(e.release_date, None);
        assert_eq!(e.image_url, None);
    }

    #[test]
    fn test_extract_names() {
        let html = format!(
            "{}{}",
            entry("Alpha", "/x/a", ""),
            entry("Beta", "/x/b", "")
        );
        assert_eq!(extract_names(&html), vec!["Alpha", "Beta"]);
        assert!(extract_names("<p>none</p>").is_empty());
    }
}
