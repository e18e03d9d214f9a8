//! Error types for Forkful

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ForkfulError>;

#[derive(Error, Debug)]
pub enum ForkfulError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(#[from] NotFoundError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Seed data error: {0}")]
    Seed(#[from] SeedError),
}

impl ForkfulError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ForkfulError::Validation(_) => 3,
            ForkfulError::InvalidInput(_) => 3,
            ForkfulError::NotFound(_) => 4,
            ForkfulError::Config(_) => 1,
            ForkfulError::Seed(_) => 1,
        }
    }

    /// True for conditions the caller can check and carry on from
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ForkfulError::Validation(_) | ForkfulError::NotFound(_) | ForkfulError::InvalidInput(_)
        )
    }
}

/// Field-level validation failures, keyed by field name
///
/// Ordered by field name so messages render deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field, replacing any earlier one
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields.insert(field.to_string(), message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Message attached to `field`, if it failed
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// `Ok(())` when nothing failed, otherwise the collected errors
    pub fn into_result(self) -> std::result::Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("recipe '{0}' does not exist")]
    Recipe(String),

    #[error("user '{0}' does not exist")]
    User(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse seed file: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },

    #[error("Recipe '{recipe_id}' references unknown author '{author_id}'")]
    UnknownAuthor { recipe_id: String, author_id: String },

    #[error("Seed data contains no users")]
    NoUsers,
}
