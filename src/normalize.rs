//! Maps heterogeneous schema.org Recipe shapes onto one canonical record.
//!
//! Source sites disagree on almost every field: instructions arrive as plain
//! strings, arrays of strings, or arrays of `HowToStep` objects; images as a
//! string, an `ImageObject`, or an array of either; authors as a string or a
//! `Person` object. Each ambiguous field is deserialized into an untagged
//! variant and resolved by one exhaustive match, so malformed input degrades
//! to empty defaults instead of failing the whole record.

use std::collections::BTreeMap;

use chrono::Utc;
use html_escape::decode_html_entities;
use serde::Deserialize;
use serde_json::Value;

use crate::model::Recipe;

/// Raw recipe shape at the parsing boundary. Aliases accept the canonical
/// field names too, which is what makes `normalize` idempotent over its own
/// output.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRecipe {
    name: Option<TextField>,
    headline: Option<TextField>,
    description: Option<TextField>,
    image: Option<ImageField>,
    author: Option<AuthorField>,
    #[serde(rename = "datePublished")]
    date_published: Option<TextField>,
    #[serde(rename = "prepTime")]
    prep_time: Option<TextField>,
    #[serde(rename = "cookTime")]
    cook_time: Option<TextField>,
    #[serde(rename = "totalTime")]
    total_time: Option<TextField>,
    #[serde(rename = "recipeYield")]
    recipe_yield: Option<TextField>,
    #[serde(rename = "recipeCategory")]
    recipe_category: Option<TextField>,
    #[serde(rename = "recipeCuisine")]
    recipe_cuisine: Option<TextField>,
    keywords: Option<TextField>,
    #[serde(rename = "recipeIngredient", alias = "ingredients")]
    recipe_ingredient: Option<Items>,
    #[serde(rename = "recipeInstructions", alias = "instructions")]
    recipe_instructions: Option<Items>,
    nutrition: Option<MapField>,
    #[serde(rename = "aggregateRating")]
    aggregate_rating: Option<MapField>,
    #[serde(rename = "extractedAt")]
    extracted_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextField {
    Text(String),
    Number(serde_json::Number),
    Other(Value),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Item {
    Text(String),
    Keyed { text: String },
    Other(Value),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Items {
    Many(Vec<Item>),
    One(Item),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageField {
    Url(String),
    Keyed { url: String },
    Many(Vec<ImageField>),
    Other(Value),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AuthorField {
    Name(String),
    Keyed { name: String },
    Other(Value),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MapField {
    Map(BTreeMap<String, Value>),
    Other(Value),
}

/// Normalize one located Recipe object into the canonical record.
///
/// Infallible: every field independently defends against absent or
/// malformed input and falls back to its empty default.
pub fn normalize(recipe_object: &Value, source_url: &str) -> Recipe {
    let raw: RawRecipe = serde_json::from_value(recipe_object.clone()).unwrap_or_default();

    Recipe {
        name: text_or_empty(raw.name.or(raw.headline)),
        description: text_or_empty(raw.description),
        url: source_url.to_string(),
        image: raw.image.map(resolve_image).unwrap_or_default(),
        author: raw.author.map(resolve_author).unwrap_or_default(),
        date_published: text_or_empty(raw.date_published),
        prep_time: text_or_empty(raw.prep_time),
        cook_time: text_or_empty(raw.cook_time),
        total_time: text_or_empty(raw.total_time),
        recipe_yield: text_or_empty(raw.recipe_yield),
        recipe_category: text_or_empty(raw.recipe_category),
        recipe_cuisine: text_or_empty(raw.recipe_cuisine),
        keywords: text_or_empty(raw.keywords),
        ingredients: raw.recipe_ingredient.map(resolve_items).unwrap_or_default(),
        instructions: raw
            .recipe_instructions
            .map(resolve_items)
            .unwrap_or_default(),
        nutrition: raw
            .nutrition
            .map(|field| match field {
                MapField::Map(map) => map
                    .into_iter()
                    .map(|(key, value)| (key, stringify(&value)))
                    .collect(),
                MapField::Other(_) => BTreeMap::new(),
            })
            .unwrap_or_default(),
        aggregate_rating: raw
            .aggregate_rating
            .map(|field| match field {
                MapField::Map(map) => map,
                MapField::Other(_) => BTreeMap::new(),
            })
            .unwrap_or_default(),
        extracted_at: raw
            .extracted_at
            .unwrap_or_else(|| Utc::now().to_rfc3339()),
    }
}

fn text_or_empty(field: Option<TextField>) -> String {
    match field {
        Some(TextField::Text(text)) => decode_html_symbols(&text),
        Some(TextField::Number(number)) => number.to_string(),
        Some(TextField::Other(_)) | None => String::new(),
    }
}

fn resolve_item(item: Item) -> String {
    match item {
        Item::Text(text) => decode_html_symbols(&text),
        Item::Keyed { text } => decode_html_symbols(&text),
        Item::Other(value) => stringify(&value),
    }
}

fn resolve_items(items: Items) -> Vec<String> {
    match items {
        Items::Many(list) => list.into_iter().map(resolve_item).collect(),
        Items::One(item) => vec![resolve_item(item)],
    }
}

fn resolve_image(image: ImageField) -> String {
    match image {
        ImageField::Url(url) => url,
        ImageField::Keyed { url } => url,
        ImageField::Many(list) => list.into_iter().next().map(resolve_image).unwrap_or_default(),
        ImageField::Other(_) => String::new(),
    }
}

fn resolve_author(author: AuthorField) -> String {
    match author {
        AuthorField::Name(name) => decode_html_symbols(&name),
        AuthorField::Keyed { name } => decode_html_symbols(&name),
        AuthorField::Other(_) => String::new(),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => decode_html_symbols(text),
        other => other.to_string(),
    }
}

fn decode_html_symbols(text: &str) -> String {
    // some sites double-encode entities, decode twice to get clean text
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_howto_steps_flatten_to_text() {
        let object = json!({
            "@type": "Recipe",
            "name": "Tiramisu",
            "recipeIngredient": ["mascarpone", "espresso"],
            "recipeInstructions": [
                {"@type": "HowToStep", "text": "Mix"},
                {"@type": "HowToStep", "text": "Chill"}
            ]
        });

        let recipe = normalize(&object, "https://example.com/recipe/tiramisu");

        assert_eq!(recipe.name, "Tiramisu");
        assert_eq!(recipe.ingredients, vec!["mascarpone", "espresso"]);
        assert_eq!(recipe.instructions, vec!["Mix", "Chill"]);
        assert_eq!(recipe.url, "https://example.com/recipe/tiramisu");
        assert!(!recipe.extracted_at.is_empty());
    }

    #[test]
    fn test_headline_fallback_for_name() {
        let object = json!({"headline": "Weeknight Ragu"});
        let recipe = normalize(&object, "u");
        assert_eq!(recipe.name, "Weeknight Ragu");

        let object = json!({"name": "Ragu", "headline": "Weeknight Ragu"});
        assert_eq!(normalize(&object, "u").name, "Ragu");
    }

    #[test]
    fn test_single_instruction_is_wrapped() {
        let object = json!({"name": "Toast", "recipeInstructions": "Toast the bread."});
        let recipe = normalize(&object, "u");
        assert_eq!(recipe.instructions, vec!["Toast the bread."]);
    }

    #[test]
    fn test_image_shapes() {
        let array = json!({"name": "A", "image": ["https://img/1.jpg", "https://img/2.jpg"]});
        assert_eq!(normalize(&array, "u").image, "https://img/1.jpg");

        let object = json!({"name": "A", "image": {"@type": "ImageObject", "url": "https://img/o.jpg"}});
        assert_eq!(normalize(&object, "u").image, "https://img/o.jpg");

        let plain = json!({"name": "A", "image": "https://img/p.jpg"});
        assert_eq!(normalize(&plain, "u").image, "https://img/p.jpg");

        let empty = json!({"name": "A", "image": []});
        assert_eq!(normalize(&empty, "u").image, "");

        let junk = json!({"name": "A", "image": 42});
        assert_eq!(normalize(&junk, "u").image, "");
    }

    #[test]
    fn test_author_shapes() {
        let object = json!({"name": "A", "author": {"@type": "Person", "name": "Ada"}});
        assert_eq!(normalize(&object, "u").author, "Ada");

        let string = json!({"name": "A", "author": "Ada"});
        assert_eq!(normalize(&string, "u").author, "Ada");

        let nameless = json!({"name": "A", "author": {"@type": "Person"}});
        assert_eq!(normalize(&nameless, "u").author, "");
    }

    #[test]
    fn test_single_ingredient_is_wrapped() {
        let object = json!({"name": "A", "recipeIngredient": "salt"});
        assert_eq!(normalize(&object, "u").ingredients, vec!["salt"]);
    }

    #[test]
    fn test_nutrition_and_rating_pass_through() {
        let object = json!({
            "name": "A",
            "nutrition": {"@type": "NutritionInformation", "calories": "240 kcal"},
            "aggregateRating": {"ratingValue": 4.7, "ratingCount": 31}
        });

        let recipe = normalize(&object, "u");
        assert_eq!(recipe.nutrition["calories"], "240 kcal");
        assert_eq!(recipe.aggregate_rating["ratingValue"], json!(4.7));
        assert_eq!(recipe.aggregate_rating["ratingCount"], json!(31));
    }

    #[test]
    fn test_durations_left_unconverted() {
        let object = json!({"name": "A", "prepTime": "PT15M", "totalTime": "PT1H"});
        let recipe = normalize(&object, "u");
        assert_eq!(recipe.prep_time, "PT15M");
        assert_eq!(recipe.total_time, "PT1H");
        assert_eq!(recipe.cook_time, "");
    }

    #[test]
    fn test_html_entities_are_decoded() {
        let object = json!({"name": "Mac &amp;amp; Cheese"});
        assert_eq!(normalize(&object, "u").name, "Mac & Cheese");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let object = json!({
            "@type": "Recipe",
            "name": "Tiramisu",
            "author": {"name": "Ada"},
            "image": ["https://img/1.jpg"],
            "prepTime": "PT20M",
            "recipeIngredient": ["mascarpone"],
            "recipeInstructions": [{"@type": "HowToStep", "text": "Mix"}],
            "aggregateRating": {"ratingValue": 5}
        });

        let url = "https://example.com/recipe/tiramisu";
        let once = normalize(&object, url);
        let twice = normalize(&serde_json::to_value(&once).unwrap(), url);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_non_object_input_degrades_to_default() {
        let recipe = normalize(&json!("not a recipe"), "u");
        assert!(!recipe.is_valid());
        assert_eq!(recipe.url, "u");
    }
}
