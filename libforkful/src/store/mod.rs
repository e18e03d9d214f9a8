//! Session state store
//!
//! `Store` is the single source of truth for one client session: the
//! recipe and user collections, the session user's liked/saved/followed
//! membership sets and the dark-mode flag. Every operation runs
//! synchronously to completion, so a read after a mutation always sees
//! the mutation.
//!
//! Operations that name a missing recipe or user fail with
//! [`NotFoundError`] and leave the state untouched. Creation and comment
//! input is validated here rather than trusted from the caller.
//!
//! # Example
//!
//! ```
//! use libforkful::seed::SeedData;
//! use libforkful::store::{Store, StoreSettings};
//!
//! # fn example() -> libforkful::Result<()> {
//! let mut store = Store::new(SeedData::builtin()?, StoreSettings::default())?;
//!
//! let state = store.toggle_like("r1")?;
//! assert!(state.liked);
//!
//! let results = store.search_recipes("pizza", &[]);
//! assert_eq!(results[0].id, "r1");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod search;
pub mod shared;
pub mod views;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::config::{Config, DEFAULT_PLACEHOLDER_IMAGE, DEFAULT_TRENDING_LIMIT};
use crate::error::{ForkfulError, NotFoundError, Result};
use crate::events::{EventBus, EventReceiver, StoreEvent};
use crate::seed::SeedData;
use crate::types::{Comment, Recipe, RecipeDraft, User};
use crate::validation;

use self::search::SearchQuery;

/// Store options that do not come from seed data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    /// Session user; the first seed user when `None`
    pub current_user_id: Option<String>,
    /// Image for recipes created without one
    pub placeholder_image: String,
    /// Size of the trending view
    pub trending_limit: usize,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            current_user_id: None,
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            trending_limit: DEFAULT_TRENDING_LIMIT,
        }
    }
}

impl From<&Config> for StoreSettings {
    fn from(config: &Config) -> Self {
        Self {
            current_user_id: config.session.user_id.clone(),
            placeholder_image: config.defaults.placeholder_image.clone(),
            trending_limit: config.defaults.trending_limit,
        }
    }
}

/// Result of a like toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeState {
    pub liked: bool,
    pub likes: u32,
}

/// Owned copy of everything a renderer reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub recipes: Vec<Recipe>,
    pub users: Vec<User>,
    pub current_user: User,
    pub liked_recipes: Vec<String>,
    pub saved_recipes: Vec<String>,
    pub followed_users: Vec<String>,
    pub dark_mode: bool,
}

pub struct Store {
    recipes: Vec<Recipe>,
    users: Vec<User>,
    /// Index of the session user in `users`
    current_user: usize,
    tags: Vec<String>,
    liked: HashSet<String>,
    saved: HashSet<String>,
    followed: HashSet<String>,
    dark_mode: bool,
    settings: StoreSettings,
    clock: Arc<dyn Clock>,
    events: EventBus,
}

impl Store {
    /// Build a store over validated seed data using the system clock
    ///
    /// # Errors
    ///
    /// Returns an error if the seed data fails validation or the
    /// configured session user is not a seed user.
    pub fn new(seed: SeedData, settings: StoreSettings) -> Result<Self> {
        Self::with_clock(seed, settings, Arc::new(SystemClock))
    }

    /// Build a store with an explicit date source
    pub fn with_clock(
        seed: SeedData,
        settings: StoreSettings,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        seed.validate()?;
        let tags = seed.known_tags();

        let current_user = match &settings.current_user_id {
            Some(id) => seed
                .users
                .iter()
                .position(|u| &u.id == id)
                .ok_or_else(|| NotFoundError::User(id.clone()))?,
            None => 0,
        };

        tracing::info!(
            users = seed.users.len(),
            recipes = seed.recipes.len(),
            session_user = %seed.users[current_user].id,
            "Store initialized"
        );

        Ok(Self {
            recipes: seed.recipes,
            users: seed.users,
            current_user,
            tags,
            liked: HashSet::new(),
            saved: HashSet::new(),
            followed: HashSet::new(),
            dark_mode: false,
            settings,
            clock,
            events: EventBus::default(),
        })
    }

    /// Build a store from configuration, loading the configured seed file
    /// or the bundled dataset
    pub fn from_config(config: &Config) -> Result<Self> {
        let seed = match config.seed_path() {
            Some(path) => SeedData::load_from_path(&path)?,
            None => SeedData::builtin()?,
        };
        Self::new(seed, StoreSettings::from(config))
    }

    /// Receive a `StoreEvent` for every successful mutation from now on
    pub fn subscribe(&self) -> EventReceiver {
        self.events.subscribe()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    // === Reads ===

    /// Recipes in collection order (newly created first)
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn current_user(&self) -> &User {
        &self.users[self.current_user]
    }

    pub fn recipe(&self, recipe_id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == recipe_id)
    }

    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }

    /// Known tags, for filter chips and the creation form
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn is_liked(&self, recipe_id: &str) -> bool {
        self.liked.contains(recipe_id)
    }

    pub fn is_saved(&self, recipe_id: &str) -> bool {
        self.saved.contains(recipe_id)
    }

    pub fn is_following(&self, user_id: &str) -> bool {
        self.followed.contains(user_id)
    }

    pub fn liked_ids(&self) -> &HashSet<String> {
        &self.liked
    }

    pub fn saved_ids(&self) -> &HashSet<String> {
        &self.saved
    }

    pub fn followed_ids(&self) -> &HashSet<String> {
        &self.followed
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Liked recipes in collection order
    pub fn liked_recipes(&self) -> Vec<&Recipe> {
        self.recipes.iter().filter(|r| self.is_liked(&r.id)).collect()
    }

    /// Saved recipes in collection order
    pub fn saved_recipes(&self) -> Vec<&Recipe> {
        self.recipes.iter().filter(|r| self.is_saved(&r.id)).collect()
    }

    /// Recipes written by `user_id`, in collection order
    pub fn recipes_by_author(&self, user_id: &str) -> Result<Vec<&Recipe>> {
        self.require_user(user_id)?;
        Ok(self
            .recipes
            .iter()
            .filter(|r| r.author_id == user_id)
            .collect())
    }

    /// Follower count as shown on a profile: the stored count plus the
    /// session user's follow
    pub fn displayed_followers(&self, user_id: &str) -> Result<u32> {
        let user = self.require_user(user_id)?;
        let own = u32::from(self.is_following(user_id));
        Ok(user.followers.saturating_add(own))
    }

    /// Recipes matching `query` and any of `tags`, in collection order
    pub fn search_recipes(&self, query: &str, tags: &[String]) -> Vec<&Recipe> {
        self.search(&SearchQuery::new(query, tags.to_vec()))
    }

    pub fn search(&self, query: &SearchQuery) -> Vec<&Recipe> {
        query.filter(&self.recipes)
    }

    /// Most-liked recipes, limited by the configured trending size
    pub fn trending(&self) -> Vec<&Recipe> {
        views::trending(&self.recipes, self.settings.trending_limit)
    }

    /// All recipes, newest first
    pub fn latest(&self) -> Vec<&Recipe> {
        views::latest(&self.recipes)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            recipes: self.recipes.clone(),
            users: self.users.clone(),
            current_user: self.current_user().clone(),
            liked_recipes: sorted(&self.liked),
            saved_recipes: sorted(&self.saved),
            followed_users: sorted(&self.followed),
            dark_mode: self.dark_mode,
        }
    }

    // === Mutations ===

    /// Like or unlike a recipe for the session user
    ///
    /// The recipe's like counter moves with the membership change: +1 on
    /// like, -1 on unlike.
    ///
    /// # Errors
    ///
    /// `NotFound` if the recipe does not exist; neither the liked set nor
    /// any counter changes.
    pub fn toggle_like(&mut self, recipe_id: &str) -> Result<LikeState> {
        let index = self.recipe_index(recipe_id)?;
        let recipe = &mut self.recipes[index];

        let liked = if self.liked.remove(recipe_id) {
            recipe.likes = recipe.likes.saturating_sub(1);
            false
        } else {
            self.liked.insert(recipe_id.to_string());
            recipe.likes = recipe.likes.saturating_add(1);
            true
        };
        let likes = recipe.likes;

        tracing::debug!(recipe_id, liked, likes, "Toggled like");
        self.events.emit(StoreEvent::LikeToggled {
            recipe_id: recipe_id.to_string(),
            liked,
            likes,
        });

        Ok(LikeState { liked, likes })
    }

    /// Save or unsave a recipe; returns whether it is saved now
    pub fn toggle_save(&mut self, recipe_id: &str) -> Result<bool> {
        self.recipe_index(recipe_id)?;
        let saved = toggle(&mut self.saved, recipe_id);

        tracing::debug!(recipe_id, saved, "Toggled save");
        self.events.emit(StoreEvent::SaveToggled {
            recipe_id: recipe_id.to_string(),
            saved,
        });

        Ok(saved)
    }

    /// Follow or unfollow a user; returns whether the session user follows
    /// them now
    ///
    /// Stored follower counts are left alone; see
    /// [`Store::displayed_followers`].
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown user, `InvalidInput` for the session user.
    pub fn toggle_follow(&mut self, user_id: &str) -> Result<bool> {
        self.require_user(user_id)?;
        if user_id == self.current_user().id {
            tracing::warn!(user_id, "Rejected follow of session user");
            return Err(ForkfulError::InvalidInput(
                "You cannot follow yourself".to_string(),
            ));
        }

        let following = toggle(&mut self.followed, user_id);

        tracing::debug!(user_id, following, "Toggled follow");
        self.events.emit(StoreEvent::FollowToggled {
            user_id: user_id.to_string(),
            following,
        });

        Ok(following)
    }

    /// Append a comment by the session user to a recipe
    ///
    /// The text is trimmed. The comment carries the session user's
    /// identity and today's date from the store clock.
    ///
    /// # Errors
    ///
    /// `Validation` on field `text` if the text is blank, `NotFound` if
    /// the recipe does not exist. Nothing is appended in either case.
    pub fn add_comment(&mut self, recipe_id: &str, text: &str) -> Result<Comment> {
        let text = validation::validate_comment(text)?;
        let index = self.recipe_index(recipe_id)?;

        let comment = Comment::new(self.current_user(), text, self.clock.today());
        self.recipes[index].comments.push(comment.clone());

        tracing::debug!(recipe_id, comment_id = %comment.id, "Added comment");
        self.events.emit(StoreEvent::CommentAdded {
            recipe_id: recipe_id.to_string(),
            comment_id: comment.id.clone(),
        });

        Ok(comment)
    }

    /// Publish a new recipe by the session user
    ///
    /// The draft is validated first. On success the recipe gets a fresh
    /// id, the session user's identity, zero likes, no comments and
    /// today's date, and is placed at the front of the collection. Blank
    /// ingredient and instruction lines are dropped, a blank image falls
    /// back to the placeholder, and repeated tags are collapsed.
    ///
    /// # Errors
    ///
    /// `Validation` with one message per failing field; the collection is
    /// unchanged.
    pub fn add_recipe(&mut self, draft: RecipeDraft) -> Result<Recipe> {
        if let Err(errors) = validation::validate_draft(&draft) {
            tracing::warn!(%errors, "Rejected recipe draft");
            return Err(errors.into());
        }

        let image = draft
            .image
            .as_deref()
            .map(str::trim)
            .filter(|image| !image.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.settings.placeholder_image.clone());

        let author = self.current_user();
        let recipe = Recipe {
            id: Uuid::new_v4().to_string(),
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            image,
            ingredients: draft.filled_ingredients(),
            instructions: draft.filled_instructions(),
            tags: dedup_tags(&draft.tags),
            author_id: author.id.clone(),
            author_name: author.name.clone(),
            author_avatar: author.avatar.clone(),
            likes: 0,
            comments: Vec::new(),
            cook_time: draft.cook_time.trim().to_string(),
            servings: draft.servings,
            created_at: self.clock.today(),
        };

        self.recipes.insert(0, recipe.clone());
        self.users[self.current_user].recipes.push(recipe.id.clone());

        tracing::debug!(recipe_id = %recipe.id, title = %recipe.title, "Created recipe");
        self.events.emit(StoreEvent::RecipeCreated {
            recipe_id: recipe.id.clone(),
        });

        Ok(recipe)
    }

    /// Flip the dark-mode flag; returns the new value
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        tracing::debug!(enabled = self.dark_mode, "Toggled dark mode");
        self.events.emit(StoreEvent::DarkModeToggled {
            enabled: self.dark_mode,
        });
        self.dark_mode
    }

    fn recipe_index(&self, recipe_id: &str) -> Result<usize> {
        self.recipes
            .iter()
            .position(|r| r.id == recipe_id)
            .ok_or_else(|| {
                tracing::warn!(recipe_id, "Unknown recipe");
                NotFoundError::Recipe(recipe_id.to_string()).into()
            })
    }

    fn require_user(&self, user_id: &str) -> Result<&User> {
        self.user(user_id).ok_or_else(|| {
            tracing::warn!(user_id, "Unknown user");
            NotFoundError::User(user_id.to_string()).into()
        })
    }
}

/// Flip membership of `id`; returns whether it is a member afterwards
fn toggle(set: &mut HashSet<String>, id: &str) -> bool {
    if set.remove(id) {
        false
    } else {
        set.insert(id.to_string());
        true
    }
}

fn dedup_tags(tags: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty() && seen.insert(tag.to_string()))
        .map(str::to_string)
        .collect()
}

fn sorted(set: &HashSet<String>) -> Vec<String> {
    let mut ids: Vec<String> = set.iter().cloned().collect();
    ids.sort();
    ids
}
