//! Forkful - session state for a recipe-sharing client
//!
//! This library holds the recipes, users and the session user's likes,
//! saves and follows for one client session, and exposes the operations
//! a front-end calls: toggles, comments, recipe creation and search.

pub mod clock;
pub mod command;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod seed;
pub mod store;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use command::{Command, Outcome};
pub use config::Config;
pub use error::{ForkfulError, NotFoundError, Result, ValidationErrors};
pub use seed::SeedData;
pub use store::shared::SharedStore;
pub use store::{LikeState, Snapshot, Store, StoreSettings};
pub use types::{Comment, Recipe, RecipeDraft, User};
