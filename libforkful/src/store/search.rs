//! Recipe search predicate
//!
//! A recipe matches when the text query is a case-insensitive substring
//! of its title, description or author name, and it carries at least one
//! of the requested tags. An empty query or empty tag list matches
//! everything. Results keep collection order.

use serde::{Deserialize, Serialize};

use crate::types::Recipe;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            query: query.into(),
            tags,
        }
    }

    pub fn text(query: impl Into<String>) -> Self {
        Self::new(query, Vec::new())
    }

    pub fn tags(tags: Vec<String>) -> Self {
        Self::new(String::new(), tags)
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.tags.is_empty()
    }

    /// Lowercase the query once for repeated matching
    pub fn matcher(&self) -> Matcher<'_> {
        Matcher {
            needle: self.query.to_lowercase(),
            tags: &self.tags,
        }
    }

    /// Stable filter over `recipes`
    pub fn filter<'a>(&self, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
        let matcher = self.matcher();
        recipes.iter().filter(|r| matcher.matches(r)).collect()
    }
}

pub struct Matcher<'q> {
    needle: String,
    tags: &'q [String],
}

impl Matcher<'_> {
    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.matches_text(recipe) && self.matches_tags(recipe)
    }

    fn matches_text(&self, recipe: &Recipe) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        [&recipe.title, &recipe.description, &recipe.author_name]
            .iter()
            .any(|field| field.to_lowercase().contains(&self.needle))
    }

    fn matches_tags(&self, recipe: &Recipe) -> bool {
        self.tags.is_empty() || self.tags.iter().any(|tag| recipe.has_tag(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn recipe(id: &str, title: &str, author: &str, tags: &[&str]) -> Recipe {
        Recipe {
            id: id.to_string(),
            title: title.to_string(),
            description: format!("About {}", title),
            image: String::new(),
            ingredients: vec!["x".to_string()],
            instructions: vec!["y".to_string()],
            tags: tags.iter().map(|t| t.to_string()).collect(),
            author_id: "u1".to_string(),
            author_name: author.to_string(),
            author_avatar: String::new(),
            likes: 0,
            comments: vec![],
            cook_time: "5 min".to_string(),
            servings: 1,
            created_at: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        }
    }

    fn sample() -> Vec<Recipe> {
        vec![
            recipe("r1", "Classic Margherita Pizza", "Luca Rossi", &["italian"]),
            recipe("r2", "Chocolate Mousse", "Amara Okafor", &["dessert", "vegan"]),
            recipe("r3", "Dan Dan Noodles", "James Chen", &["asian", "spicy"]),
            recipe("r4", "Quinoa Salad", "Amara Okafor", &["vegan", "healthy"]),
        ]
    }

    fn ids(results: &[&Recipe]) -> Vec<String> {
        results.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let recipes = sample();
        let results = SearchQuery::default().filter(&recipes);
        assert_eq!(ids(&results), vec!["r1", "r2", "r3", "r4"]);
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let recipes = sample();
        for q in ["pizza", "PIZZA", "Piz"] {
            let results = SearchQuery::text(q).filter(&recipes);
            assert_eq!(ids(&results), vec!["r1"], "query {:?}", q);
        }
    }

    #[test]
    fn test_query_matches_description_and_author() {
        let recipes = sample();
        assert_eq!(ids(&SearchQuery::text("about dan").filter(&recipes)), vec!["r3"]);
        assert_eq!(ids(&SearchQuery::text("okafor").filter(&recipes)), vec!["r2", "r4"]);
    }

    #[test]
    fn test_query_is_not_trimmed() {
        let recipes = sample();
        assert!(SearchQuery::text(" pizza ").filter(&recipes).is_empty());
    }

    #[test]
    fn test_tags_use_any_semantics() {
        let recipes = sample();
        let query = SearchQuery::tags(vec!["dessert".to_string(), "vegan".to_string()]);
        assert_eq!(ids(&query.filter(&recipes)), vec!["r2", "r4"]);
    }

    #[test]
    fn test_tag_match_is_exact() {
        let recipes = sample();
        let query = SearchQuery::tags(vec!["Vegan".to_string()]);
        assert!(query.filter(&recipes).is_empty());
    }

    #[test]
    fn test_query_and_tags_combine_with_and() {
        let recipes = sample();
        let query = SearchQuery::new("salad", vec!["vegan".to_string()]);
        assert_eq!(ids(&query.filter(&recipes)), vec!["r4"]);

        let query = SearchQuery::new("pizza", vec!["vegan".to_string()]);
        assert!(query.filter(&recipes).is_empty());
    }
}
