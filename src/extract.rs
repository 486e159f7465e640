//! Pulls hyperlinks and JSON-LD regions out of loosely-structured HTML.
//!
//! The tag scanning is isolated behind `extract_hrefs` and
//! `extract_json_ld_blocks` so the rest of the crawler never touches raw
//! markup. Parsing goes through `scraper` rather than pattern matching, which
//! tolerates the usual run of unclosed tags on listing pages.

use log::{debug, warn};
use scraper::{Html, Selector};
use serde_json::Value;

/// Every `<a href>` attribute value in document order, duplicates included.
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").unwrap();

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// Parse every `<script type="application/ld+json">` region into JSON values.
///
/// A block that fails to parse is skipped with a warning and scanning
/// continues. Top-level arrays are flattened into the result sequence.
pub fn extract_json_ld_blocks(html: &str) -> Vec<Value> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("script[type='application/ld+json']").unwrap();

    let mut blocks = Vec::new();
    for script in document.select(&selector) {
        let raw = script.inner_html();
        match serde_json::from_str::<Value>(raw.trim()) {
            Ok(Value::Array(items)) => blocks.extend(items),
            Ok(value) => blocks.push(value),
            Err(err) => warn!("Skipping malformed JSON-LD block: {err}"),
        }
    }

    debug!("Extracted {} JSON-LD block(s)", blocks.len());
    blocks
}

/// Find the first schema.org Recipe among the parsed blocks.
///
/// Each candidate is matched under three shapes, tried in order: a direct
/// `@type: "Recipe"`, a `@graph` array holding a Recipe element, and a
/// `@type` array that lists `"Recipe"`. The first match in document order
/// wins; later blocks are not inspected once one is found. `None` means the
/// page simply has no recipe markup.
pub fn locate_recipe_object(blocks: &[Value]) -> Option<&Value> {
    for block in blocks {
        if type_is_recipe(block) {
            return Some(block);
        }

        if let Some(graph) = block.get("@graph").and_then(Value::as_array) {
            if let Some(node) = graph.iter().find(|node| type_is_recipe(node)) {
                return Some(node);
            }
        }

        if type_list_contains_recipe(block) {
            return Some(block);
        }
    }

    None
}

fn type_is_recipe(value: &Value) -> bool {
    value.get("@type").and_then(Value::as_str) == Some("Recipe")
}

fn type_list_contains_recipe(value: &Value) -> bool {
    value
        .get("@type")
        .and_then(Value::as_array)
        .is_some_and(|types| types.iter().any(|t| t.as_str() == Some("Recipe")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_hrefs_in_document_order() {
        let html = r#"
            <html><body>
                <a href="/recipe/one">One</a>
                <div><a href="/recipe/two">Two</a></div>
                <a>no href</a>
                <a href="/recipe/one">One again</a>
            </body></html>
        "#;

        let hrefs = extract_hrefs(html);
        assert_eq!(hrefs, vec!["/recipe/one", "/recipe/two", "/recipe/one"]);
    }

    #[test]
    fn test_malformed_block_is_skipped() {
        let html = r#"
            <html><head>
                <script type="application/ld+json">{not valid json</script>
                <script type="application/ld+json">{"@type": "Recipe", "name": "Soup"}</script>
            </head><body></body></html>
        "#;

        let blocks = extract_json_ld_blocks(html);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0]["name"], "Soup");
    }

    #[test]
    fn test_array_block_is_flattened() {
        let html = r#"
            <html><head>
                <script type="application/ld+json">
                    [{"@type": "WebSite"}, {"@type": "Recipe", "name": "Stew"}]
                </script>
            </head><body></body></html>
        "#;

        let blocks = extract_json_ld_blocks(html);
        assert_eq!(blocks.len(), 2);
        assert_eq!(locate_recipe_object(&blocks).unwrap()["name"], "Stew");
    }

    #[test]
    fn test_locate_recipe_in_graph() {
        let blocks = vec![
            json!({"@type": "WebSite", "name": "Site"}),
            json!({"@type": "BreadcrumbList"}),
            json!({"@graph": [
                {"@type": "Organization"},
                {"@type": "Recipe", "name": "Nested"}
            ]}),
        ];

        let found = locate_recipe_object(&blocks).unwrap();
        assert_eq!(found["name"], "Nested");
    }

    #[test]
    fn test_locate_recipe_in_type_array() {
        let blocks = vec![json!({"@type": ["NewsArticle", "Recipe"], "name": "Hybrid"})];
        assert_eq!(locate_recipe_object(&blocks).unwrap()["name"], "Hybrid");
    }

    #[test]
    fn test_first_match_in_document_order_wins() {
        let blocks = vec![
            json!({"@type": "Recipe", "name": "First"}),
            json!({"@type": "Recipe", "name": "Second"}),
        ];
        assert_eq!(locate_recipe_object(&blocks).unwrap()["name"], "First");
    }

    #[test]
    fn test_no_recipe_yields_none() {
        let blocks = vec![json!({"@type": "WebSite"}), json!({"@graph": []})];
        assert!(locate_recipe_object(&blocks).is_none());
    }
}
