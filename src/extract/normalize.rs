//! Markup to single-line text conversion

use scraper::{Html, Node};

/// Elements whose text is never visible page content
const SKIPPED_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

/// Convert an HTML document into one whitespace-collapsed line of text
///
/// Every text node is trimmed and joined with a single space, so keywords
/// and values that sit in neighbouring elements end up separated by exactly
/// one space. Broken markup is recovered by the HTML parser; input without
/// any tags is treated as body text.
///
/// # Arguments
///
/// * `html` - The raw document
///
/// # Returns
///
/// The normalized text, possibly empty
pub fn normalize_html(html: &str) -> String {
    let document = Html::parse_document(html);

    let text = document
        .root_element()
        .descendants()
        .filter_map(|node| match node.value() {
            Node::Text(text) => {
                let skipped = node
                    .parent()
                    .and_then(|parent| {
                        parent
                            .value()
                            .as_element()
                            .map(|element| SKIPPED_ELEMENTS.contains(&element.name()))
                    })
                    .unwrap_or(false);
                (!skipped).then_some(&**text)
            }
            _ => None,
        })
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    collapse_whitespace(&text)
}

/// Collapse every whitespace run (newlines included) into one space and trim
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
