//! Core types for Forkful
//!
//! Field names serialize in camelCase so seed files and snapshots keep
//! the shape the client renders from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,
    pub avatar: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
    /// Ids of recipes this user authored
    #[serde(default)]
    pub recipes: Vec<String>,
}

/// A comment on a recipe
///
/// Author identity is captured when the comment is written and is not
/// re-resolved later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_avatar: String,
    pub text: String,
    pub created_at: NaiveDate,
}

impl Comment {
    /// Create a comment by `author` with a fresh id
    pub fn new(author: &User, text: String, created_at: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: author.id.clone(),
            user_name: author.name.clone(),
            user_avatar: author.avatar.clone(),
            text,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub author_id: String,
    pub author_name: String,
    pub author_avatar: String,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub cook_time: String,
    pub servings: u32,
    pub created_at: NaiveDate,
}

impl Recipe {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }
}

/// Input for creating a recipe
///
/// Everything the author types into the creation form. Identity, likes,
/// comments and the creation date are filled in by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub title: String,
    pub description: String,
    /// Image URI; the configured placeholder is used when absent or blank
    #[serde(default)]
    pub image: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub cook_time: String,
    pub servings: u32,
}

impl RecipeDraft {
    /// Ingredient lines that are not blank, kept as typed
    pub fn filled_ingredients(&self) -> Vec<String> {
        filled(&self.ingredients)
    }

    /// Instruction lines that are not blank, kept as typed
    pub fn filled_instructions(&self) -> Vec<String> {
        filled(&self.instructions)
    }
}

fn filled(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .cloned()
        .collect()
}
