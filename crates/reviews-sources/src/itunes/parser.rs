use crate::error::FeedError;
use reviews_models::FeedReview;
use roxmltree::{Document, Node};
use tracing::{debug, warn};

pub const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
pub const ITUNES_NS: &str = "http://itunes.apple.com/rss";

/// Parse one customer-reviews feed page.
///
/// Only entries carrying an `im:rating` element are reviews; the first entry
/// of a page usually describes the app itself and is skipped. Entries are
/// returned in document order.
pub fn parse_reviews(xml: &str) -> Result<Vec<FeedReview>, FeedError> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();

    let mut reviews = Vec::new();
    let mut skipped = 0;

    for entry in root.children().filter(|n| n.has_tag_name((ATOM_NS, "entry"))) {
        let Some(rating_text) = child_text(entry, ITUNES_NS, "rating") else {
            skipped += 1;
            continue;
        };

        let rating_text = rating_text.trim();
        let rating = rating_text.parse::<u8>().map_err(|source| FeedError::InvalidRating {
            value: rating_text.to_string(),
            source,
        })?;
        if !(1..=5).contains(&rating) {
            warn!(rating, "Feed entry rating outside the expected 1-5 range");
        }

        // Prefer the update time; an empty <updated/> falls through to <published>
        let published_at = child_text(entry, ATOM_NS, "updated")
            .filter(|s| !s.is_empty())
            .or_else(|| child_text(entry, ATOM_NS, "published"))
            .unwrap_or_default();

        let username = entry
            .children()
            .filter(|n| n.has_tag_name((ATOM_NS, "author")))
            .find_map(|author| child_text(author, ATOM_NS, "name"))
            .unwrap_or_default();

        reviews.push(FeedReview {
            username: username.trim().to_string(),
            published_at: published_at.trim().to_string(),
            rating,
            title: text_or_empty(entry, ATOM_NS, "title"),
            content: text_or_empty(entry, ATOM_NS, "content"),
        });
    }

    debug!(reviews = reviews.len(), skipped, "Parsed review feed page");
    Ok(reviews)
}

/// Text of the first matching child. `Some("")` when the element exists but is empty.
fn child_text<'a>(node: Node<'a, '_>, ns: &str, name: &str) -> Option<&'a str> {
    node.children()
        .find(|n| n.has_tag_name((ns, name)))
        .map(|n| n.text().unwrap_or(""))
}

fn text_or_empty(node: Node<'_, '_>, ns: &str, name: &str) -> String {
    child_text(node, ns, name).unwrap_or_default().trim().to_string()
}

#[cfg(test)]
mod tests;
