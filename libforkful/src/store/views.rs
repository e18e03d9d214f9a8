//! Derived recipe views for the home feed
//!
//! Both views are recomputed from the collection on demand. Sorting is
//! stable, so recipes that tie keep their collection order.

use crate::types::Recipe;

/// Most-liked recipes first, at most `limit` of them
pub fn trending(recipes: &[Recipe], limit: usize) -> Vec<&Recipe> {
    let mut sorted: Vec<&Recipe> = recipes.iter().collect();
    sorted.sort_by(|a, b| b.likes.cmp(&a.likes));
    sorted.truncate(limit);
    sorted
}

/// Newest recipes first
pub fn latest(recipes: &[Recipe]) -> Vec<&Recipe> {
    let mut sorted: Vec<&Recipe> = recipes.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
}
