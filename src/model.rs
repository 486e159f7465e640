use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical recipe record every extraction path converges to.
///
/// Field names serialize in schema.org camelCase so the run report matches
/// what downstream save operations expect. Duration fields keep their
/// ISO-8601 source values unconverted; yield and category stay free text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Source page URL, natural key for downstream saves
    #[serde(default)]
    pub url: String,
    /// Single image URL, first of any array/collection
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub author: String,
    #[serde(default, rename = "datePublished")]
    pub date_published: String,
    #[serde(default, rename = "prepTime")]
    pub prep_time: String,
    #[serde(default, rename = "cookTime")]
    pub cook_time: String,
    #[serde(default, rename = "totalTime")]
    pub total_time: String,
    #[serde(default, rename = "recipeYield")]
    pub recipe_yield: String,
    #[serde(default, rename = "recipeCategory")]
    pub recipe_category: String,
    #[serde(default, rename = "recipeCuisine")]
    pub recipe_cuisine: String,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Flattened step texts in source order
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Passthrough, unvalidated
    #[serde(default)]
    pub nutrition: BTreeMap<String, String>,
    /// Passthrough, values stay string or number as the source had them
    #[serde(default, rename = "aggregateRating")]
    pub aggregate_rating: BTreeMap<String, Value>,
    #[serde(default, rename = "extractedAt")]
    pub extracted_at: String,
}

impl Recipe {
    /// A record is usable iff it carries a non-empty name.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// Outcome of processing one discovered URL.
///
/// Exactly one of `data` / `error` is populated; `None` fields are omitted
/// from the report so each entry reads as either a success or a failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlOutcome {
    pub success: bool,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Recipe>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UrlOutcome {
    pub fn success(url: impl Into<String>, recipe: Recipe) -> Self {
        Self {
            success: true,
            url: url.into(),
            data: Some(recipe),
            error: None,
        }
    }

    pub fn failure(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            url: url.into(),
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Counters accumulated across the processing loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatistics {
    pub discovered: usize,
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub has_structured_data: usize,
    pub no_structured_data: usize,
}

impl RunStatistics {
    pub fn success_rate(&self) -> f64 {
        if self.processed == 0 {
            0.0
        } else {
            self.succeeded as f64 / self.processed as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_is_invalid() {
        let recipe = Recipe {
            name: "   ".to_string(),
            ..Recipe::default()
        };
        assert!(!recipe.is_valid());
    }

    #[test]
    fn test_named_recipe_is_valid() {
        let recipe = Recipe {
            name: "Tiramisu".to_string(),
            ..Recipe::default()
        };
        assert!(recipe.is_valid());
    }

    #[test]
    fn test_outcome_serializes_without_empty_sides() {
        let failure = UrlOutcome::failure("https://example.com/recipe/a", "HTTP 404");
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "HTTP 404");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_recipe_round_trips_camel_case() {
        let recipe = Recipe {
            name: "Pasta".to_string(),
            prep_time: "PT15M".to_string(),
            ..Recipe::default()
        };
        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json["prepTime"], "PT15M");
        let back: Recipe = serde_json::from_value(json).unwrap();
        assert_eq!(back, recipe);
    }

    #[test]
    fn test_success_rate() {
        let stats = RunStatistics {
            processed: 4,
            succeeded: 3,
            ..RunStatistics::default()
        };
        assert!((stats.success_rate() - 75.0).abs() < f64::EPSILON);
        assert_eq!(RunStatistics::default().success_rate(), 0.0);
    }
}
