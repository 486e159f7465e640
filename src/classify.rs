//! Decides whether a discovered hyperlink is a candidate recipe page.
//!
//! An allow-list anchored on the `/recipe/` path prefix, guarded by a fixed
//! deny-list of known non-recipe sections and file extensions. The deny-list
//! is checked first, so it rejects even links that also sit under `/recipe/`.
//! Deliberately favors precision over recall.

/// Substrings that disqualify a link regardless of its path prefix:
/// pagination, category/tag/search/author/legal pages, subscription
/// funnels, and binary or feed file extensions.
const DENY_SUBSTRINGS: &[&str] = &[
    "/search",
    "/category",
    "/tag",
    "/author",
    "/about",
    "/contact",
    "/privacy",
    "/terms",
    "/advertise",
    "/subscribe",
    "/newsletter",
    "/page/",
    ".jpg",
    ".jpeg",
    ".png",
    ".gif",
    ".pdf",
    ".xml",
    ".rss",
    "mailto:",
    "javascript:",
    "tel:",
    "#",
];

/// Returns true if `href` looks like a recipe page link.
pub fn is_recipe_url(href: &str) -> bool {
    if href.is_empty() {
        return false;
    }

    let href_lower = href.to_lowercase();

    if !href_lower.starts_with("http://")
        && !href_lower.starts_with("https://")
        && !href_lower.starts_with('/')
    {
        return false;
    }

    if DENY_SUBSTRINGS
        .iter()
        .any(|pattern| href_lower.contains(pattern))
    {
        return false;
    }

    path_of(&href_lower).starts_with("/recipe/")
}

/// Path component of an already-lowercased href; relative links are their
/// own path.
fn path_of(href_lower: &str) -> &str {
    if let Some(rest) = href_lower
        .strip_prefix("https://")
        .or_else(|| href_lower.strip_prefix("http://"))
    {
        match rest.find('/') {
            Some(slash) => &rest[slash..],
            None => "",
        }
    } else {
        href_lower
    }
}
