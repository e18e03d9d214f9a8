//! Input validation for recipe drafts and comments
//!
//! Errors are keyed by the field name the creation form uses, so a
//! front-end can attach each message to its input.

use crate::error::ValidationErrors;
use crate::types::RecipeDraft;

pub const FIELD_TITLE: &str = "title";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_INGREDIENTS: &str = "ingredients";
pub const FIELD_INSTRUCTIONS: &str = "instructions";
pub const FIELD_COOK_TIME: &str = "cookTime";
pub const FIELD_SERVINGS: &str = "servings";
pub const FIELD_TEXT: &str = "text";

/// Check every required field of a recipe draft
///
/// All failures are collected; the first one does not short-circuit.
pub fn validate_draft(draft: &RecipeDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if draft.title.trim().is_empty() {
        errors.add(FIELD_TITLE, "Title is required");
    }

    if draft.description.trim().is_empty() {
        errors.add(FIELD_DESCRIPTION, "Description is required");
    }

    if draft.filled_ingredients().is_empty() {
        errors.add(FIELD_INGREDIENTS, "At least one ingredient required");
    }

    if draft.filled_instructions().is_empty() {
        errors.add(FIELD_INSTRUCTIONS, "At least one step required");
    }

    if draft.cook_time.trim().is_empty() {
        errors.add(FIELD_COOK_TIME, "Cook time is required");
    }

    if draft.servings < 1 {
        errors.add(FIELD_SERVINGS, "Servings must be at least 1");
    }

    errors.into_result()
}

/// Check comment text, returning it trimmed
pub fn validate_comment(text: &str) -> Result<String, ValidationErrors> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        let mut errors = ValidationErrors::new();
        errors.add(FIELD_TEXT, "Comment cannot be empty");
        return Err(errors);
    }
    Ok(trimmed.to_string())
}
