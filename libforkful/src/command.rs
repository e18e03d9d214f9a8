//! Commands a front-end sends to the store
//!
//! Every store operation has a `Command` variant, so a presentation layer
//! can drive the store with plain data (for example JSON lines read from
//! a pipe) and get an `Outcome` back. Dispatch goes through
//! [`Store::apply`], which calls the same methods a Rust caller would.
//!
//! ```
//! use libforkful::command::{Command, Outcome};
//! use libforkful::seed::SeedData;
//! use libforkful::store::{Store, StoreSettings};
//!
//! # fn example() -> libforkful::Result<()> {
//! let mut store = Store::new(SeedData::builtin()?, StoreSettings::default())?;
//!
//! let command: Command = serde_json::from_str(r#"{"type":"toggle_save","recipe_id":"r1"}"#)
//!     .expect("valid command");
//! let outcome = store.apply(command)?;
//! assert_eq!(outcome, Outcome::Saved { recipe_id: "r1".to_string(), saved: true });
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::search::SearchQuery;
use crate::store::Store;
use crate::types::{Comment, Recipe, RecipeDraft};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    // === Membership ===
    ToggleLike {
        recipe_id: String,
    },

    ToggleSave {
        recipe_id: String,
    },

    ToggleFollow {
        user_id: String,
    },

    // === Content ===
    AddComment {
        recipe_id: String,
        text: String,
    },

    AddRecipe {
        recipe: RecipeDraft,
    },

    // === UI ===
    ToggleDarkMode,

    // === Queries ===
    Search {
        #[serde(default)]
        query: String,
        #[serde(default)]
        tags: Vec<String>,
    },

    Trending,

    Latest,
}

impl Command {
    /// True for commands that change store state
    pub fn is_mutation(&self) -> bool {
        !matches!(
            self,
            Command::Search { .. } | Command::Trending | Command::Latest
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outcome {
    Liked {
        recipe_id: String,
        liked: bool,
        likes: u32,
    },

    Saved {
        recipe_id: String,
        saved: bool,
    },

    Followed {
        user_id: String,
        following: bool,
    },

    CommentAdded {
        recipe_id: String,
        comment: Comment,
    },

    RecipeCreated {
        recipe: Recipe,
    },

    DarkMode {
        enabled: bool,
    },

    Recipes {
        recipes: Vec<Recipe>,
    },
}

impl Store {
    /// Run a command against the store
    ///
    /// Errors are the errors of the underlying operation.
    pub fn apply(&mut self, command: Command) -> Result<Outcome> {
        tracing::trace!(?command, "Applying command");

        let outcome = match command {
            Command::ToggleLike { recipe_id } => {
                let state = self.toggle_like(&recipe_id)?;
                Outcome::Liked {
                    recipe_id,
                    liked: state.liked,
                    likes: state.likes,
                }
            }

            Command::ToggleSave { recipe_id } => {
                let saved = self.toggle_save(&recipe_id)?;
                Outcome::Saved { recipe_id, saved }
            }

            Command::ToggleFollow { user_id } => {
                let following = self.toggle_follow(&user_id)?;
                Outcome::Followed { user_id, following }
            }

            Command::AddComment { recipe_id, text } => {
                let comment = self.add_comment(&recipe_id, &text)?;
                Outcome::CommentAdded { recipe_id, comment }
            }

            Command::AddRecipe { recipe } => Outcome::RecipeCreated {
                recipe: self.add_recipe(recipe)?,
            },

            Command::ToggleDarkMode => Outcome::DarkMode {
                enabled: self.toggle_dark_mode(),
            },

            Command::Search { query, tags } => Outcome::Recipes {
                recipes: owned(self.search(&SearchQuery::new(query, tags))),
            },

            Command::Trending => Outcome::Recipes {
                recipes: owned(self.trending()),
            },

            Command::Latest => Outcome::Recipes {
                recipes: owned(self.latest()),
            },
        };

        Ok(outcome)
    }
}

fn owned(recipes: Vec<&Recipe>) -> Vec<Recipe> {
    recipes.into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForkfulError;
    use crate::seed::SeedData;
    use crate::store::StoreSettings;

    fn store() -> Store {
        Store::new(SeedData::builtin().unwrap(), StoreSettings::default()).unwrap()
    }

    #[test]
    fn test_apply_toggle_like() {
        let mut store = store();
        let likes = store.recipe("r3").unwrap().likes;

        let outcome = store
            .apply(Command::ToggleLike {
                recipe_id: "r3".to_string(),
            })
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Liked {
                recipe_id: "r3".to_string(),
                liked: true,
                likes: likes + 1,
            }
        );
    }

    #[test]
    fn test_apply_propagates_errors() {
        let mut store = store();
        let result = store.apply(Command::AddComment {
            recipe_id: "r1".to_string(),
            text: "   ".to_string(),
        });
        assert!(matches!(result, Err(ForkfulError::Validation(_))));
    }

    #[test]
    fn test_apply_search() {
        let mut store = store();
        let outcome = store
            .apply(Command::Search {
                query: String::new(),
                tags: vec!["spicy".to_string()],
            })
            .unwrap();

        match outcome {
            Outcome::Recipes { recipes } => {
                assert_eq!(recipes.len(), 1);
                assert_eq!(recipes[0].id, "r3");
            }
            other => panic!("Expected recipes, got {:?}", other),
        }
    }

    #[test]
    fn test_command_json_shapes() {
        let command: Command =
            serde_json::from_str(r#"{"type":"toggle_follow","user_id":"u2"}"#).unwrap();
        assert_eq!(
            command,
            Command::ToggleFollow {
                user_id: "u2".to_string()
            }
        );

        let command: Command = serde_json::from_str(r#"{"type":"search"}"#).unwrap();
        assert_eq!(
            command,
            Command::Search {
                query: String::new(),
                tags: vec![]
            }
        );

        let command: Command = serde_json::from_str(r#"{"type":"toggle_dark_mode"}"#).unwrap();
        assert!(command.is_mutation());
        assert!(!Command::Trending.is_mutation());
    }

    #[test]
    fn test_add_recipe_command_uses_camel_case_draft() {
        let json = r#"{
            "type": "add_recipe",
            "recipe": {
                "title": "Granola",
                "description": "Crunchy oat clusters",
                "ingredients": ["oats", "honey"],
                "instructions": ["Mix", "Bake"],
                "cookTime": "40 min",
                "servings": 6
            }
        }"#;

        let mut store = store();
        let outcome = store.apply(serde_json::from_str(json).unwrap()).unwrap();
        match outcome {
            Outcome::RecipeCreated { recipe } => {
                assert_eq!(recipe.cook_time, "40 min");
                assert_eq!(store.recipes()[0].id, recipe.id);
            }
            other => panic!("Expected created recipe, got {:?}", other),
        }
    }
}
