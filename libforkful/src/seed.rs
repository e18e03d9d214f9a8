//! Seed data loading
//!
//! A store starts from a fixed set of users and recipes, read either from
//! the bundled dataset or from a JSON file of the same shape:
//!
//! ```json
//! { "users": [...], "recipes": [...], "tags": ["vegan", "quick"] }
//! ```
//!
//! `tags` is optional. Without it the known tags are the recipe tags in
//! first-seen order.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{Result, SeedError};
use crate::types::{Recipe, User};

const BUILTIN_SEED: &str = include_str!("../data/seed.json");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    pub users: Vec<User>,
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SeedData {
    pub fn new(users: Vec<User>, recipes: Vec<Recipe>) -> Self {
        Self {
            users,
            recipes,
            tags: Vec::new(),
        }
    }

    /// The dataset bundled with the library
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_SEED)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let seed: SeedData = serde_json::from_str(json).map_err(SeedError::ParseError)?;
        Ok(seed)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(SeedError::ReadError)?;
        let seed = Self::from_json_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            users = seed.users.len(),
            recipes = seed.recipes.len(),
            "Loaded seed file"
        );
        Ok(seed)
    }

    /// Check the cross-record rules a store relies on
    ///
    /// - at least one user (the session user is picked from them)
    /// - user, recipe and comment ids unique within their collection
    /// - every recipe author is a known user
    pub fn validate(&self) -> Result<()> {
        if self.users.is_empty() {
            return Err(SeedError::NoUsers.into());
        }

        ensure_unique("user", self.users.iter().map(|u| u.id.as_str()))?;
        ensure_unique("recipe", self.recipes.iter().map(|r| r.id.as_str()))?;
        ensure_unique(
            "comment",
            self.recipes
                .iter()
                .flat_map(|r| r.comments.iter().map(|c| c.id.as_str())),
        )?;

        let user_ids: HashSet<&str> = self.users.iter().map(|u| u.id.as_str()).collect();
        if let Some(recipe) = self
            .recipes
            .iter()
            .find(|r| !user_ids.contains(r.author_id.as_str()))
        {
            return Err(SeedError::UnknownAuthor {
                recipe_id: recipe.id.clone(),
                author_id: recipe.author_id.clone(),
            }
            .into());
        }

        Ok(())
    }

    /// Tags offered as filters and on the creation form
    pub fn known_tags(&self) -> Vec<String> {
        if !self.tags.is_empty() {
            return self.tags.clone();
        }

        let mut seen = HashSet::new();
        self.recipes
            .iter()
            .flat_map(|r| r.tags.iter())
            .filter(|tag| seen.insert(tag.as_str()))
            .cloned()
            .collect()
    }
}

fn ensure_unique<'a>(kind: &'static str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(SeedError::DuplicateId {
                kind,
                id: id.to_string(),
            }
            .into());
        }
    }
    Ok(())
}
