//! Rendering of store views for the terminal
//!
//! `text` is for people, `json` prints one document, `jsonl` prints one
//! object per line for piping into other tools.

use std::io::Write;
use std::str::FromStr;

use anyhow::{bail, Result};
use libforkful::{Recipe, Store, User};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
    Jsonl,
}

impl FromStr for Format {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            "jsonl" => Ok(Format::Jsonl),
            other => bail!("Invalid format '{}'. Valid formats: text, json, jsonl", other),
        }
    }
}

/// A recipe plus the session user's relation to it
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeView<'a> {
    #[serde(flatten)]
    pub recipe: &'a Recipe,
    pub liked: bool,
    pub saved: bool,
}

impl<'a> RecipeView<'a> {
    pub fn new(store: &Store, recipe: &'a Recipe) -> Self {
        Self {
            recipe,
            liked: store.is_liked(&recipe.id),
            saved: store.is_saved(&recipe.id),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileView<'a> {
    #[serde(flatten)]
    user: &'a User,
    displayed_followers: u32,
    is_following: bool,
    is_session_user: bool,
    #[serde(rename = "authoredRecipes")]
    recipes: Vec<RecipeView<'a>>,
}

pub struct Printer<W: Write> {
    out: W,
    format: Format,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, format: Format) -> Self {
        Self { out, format }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn recipes(&mut self, store: &Store, recipes: Vec<&Recipe>) -> Result<()> {
        let views: Vec<RecipeView> = recipes
            .into_iter()
            .map(|recipe| RecipeView::new(store, recipe))
            .collect();

        match self.format {
            Format::Json => self.json(&views),
            Format::Jsonl => {
                for view in &views {
                    writeln!(self.out, "{}", serde_json::to_string(view)?)?;
                }
                Ok(())
            }
            Format::Text => {
                for view in &views {
                    writeln!(self.out, "{}", summary_line(view))?;
                }
                Ok(())
            }
        }
    }

    pub fn recipe_detail(&mut self, store: &Store, recipe: &Recipe) -> Result<()> {
        let view = RecipeView::new(store, recipe);
        if self.format != Format::Text {
            return self.json_line(&view);
        }

        let out = &mut self.out;
        writeln!(out, "{}", recipe.title)?;
        writeln!(out, "by {} | {}", recipe.author_name, recipe.created_at)?;
        writeln!(out, "{}", recipe.description)?;
        writeln!(
            out,
            "{} | serves {} | {} likes{}{}",
            recipe.cook_time,
            recipe.servings,
            recipe.likes,
            if view.liked { " (liked)" } else { "" },
            if view.saved { " (saved)" } else { "" },
        )?;
        if !recipe.tags.is_empty() {
            writeln!(out, "tags: {}", recipe.tags.join(", "))?;
        }

        writeln!(out)?;
        writeln!(out, "Ingredients:")?;
        for ingredient in &recipe.ingredients {
            writeln!(out, "  - {}", ingredient)?;
        }

        writeln!(out)?;
        writeln!(out, "Instructions:")?;
        for (step, instruction) in recipe.instructions.iter().enumerate() {
            writeln!(out, "  {}. {}", step + 1, instruction)?;
        }

        writeln!(out)?;
        writeln!(out, "Comments ({}):", recipe.comments.len())?;
        if recipe.comments.is_empty() {
            writeln!(out, "  No comments yet.")?;
        }
        for comment in &recipe.comments {
            writeln!(
                out,
                "  {} ({}): {}",
                comment.user_name, comment.created_at, comment.text
            )?;
        }

        Ok(())
    }

    pub fn profile(&mut self, store: &Store, user_id: &str) -> Result<()> {
        let recipes = store.recipes_by_author(user_id)?;
        let displayed_followers = store.displayed_followers(user_id)?;
        let user = store
            .user(user_id)
            .ok_or_else(|| anyhow::anyhow!("user '{}' disappeared", user_id))?;

        let view = ProfileView {
            user,
            displayed_followers,
            is_following: store.is_following(user_id),
            is_session_user: store.current_user().id == user.id,
            recipes: recipes
                .into_iter()
                .map(|recipe| RecipeView::new(store, recipe))
                .collect(),
        };

        if self.format != Format::Text {
            return self.json_line(&view);
        }

        let out = &mut self.out;
        writeln!(out, "{} (@{})", user.name, user.username)?;
        if !user.bio.is_empty() {
            writeln!(out, "{}", user.bio)?;
        }
        writeln!(
            out,
            "{} followers | {} following{}",
            view.displayed_followers,
            user.following,
            if view.is_following { " | you follow" } else { "" },
        )?;

        writeln!(out)?;
        let heading = if view.is_session_user {
            "My Recipes".to_string()
        } else {
            format!("{}'s Recipes", user.name)
        };
        writeln!(out, "{}:", heading)?;
        if view.recipes.is_empty() {
            writeln!(out, "  No recipes yet.")?;
        }
        for recipe in &view.recipes {
            writeln!(out, "  {}", summary_line(recipe))?;
        }

        Ok(())
    }

    pub fn tags(&mut self, tags: &[String]) -> Result<()> {
        match self.format {
            Format::Json => self.json(&tags),
            Format::Jsonl | Format::Text => {
                for tag in tags {
                    writeln!(self.out, "{}", tag)?;
                }
                Ok(())
            }
        }
    }

    fn json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        writeln!(self.out, "{}", serde_json::to_string_pretty(value)?)?;
        Ok(())
    }

    /// Single documents print pretty for `json`, compact for `jsonl`
    fn json_line<T: Serialize>(&mut self, value: &T) -> Result<()> {
        match self.format {
            Format::Jsonl => {
                writeln!(self.out, "{}", serde_json::to_string(value)?)?;
                Ok(())
            }
            _ => self.json(value),
        }
    }
}

fn summary_line(view: &RecipeView) -> String {
    let recipe = view.recipe;
    let heart = if view.liked { "♥" } else { "♡" };
    let mut line = format!(
        "{} | {} | by {} | {} {} | {} comments",
        recipe.id,
        recipe.title,
        recipe.author_name,
        heart,
        recipe.likes,
        recipe.comments.len()
    );
    if !recipe.tags.is_empty() {
        line.push_str(&format!(" | {}", recipe.tags.join(", ")));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use libforkful::{SeedData, StoreSettings};

    fn store() -> Store {
        Store::new(SeedData::builtin().unwrap(), StoreSettings::default()).unwrap()
    }

    fn render(format: Format, f: impl FnOnce(&mut Printer<Vec<u8>>) -> Result<()>) -> String {
        let mut printer = Printer::new(Vec::new(), format);
        f(&mut printer).unwrap();
        String::from_utf8(printer.into_inner()).unwrap()
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("jsonl".parse::<Format>().unwrap(), Format::Jsonl);
        assert!("csv".parse::<Format>().is_err());
    }

    #[test]
    fn test_text_summary_marks_liked() {
        let mut store = store();
        store.toggle_like("r1").unwrap();
        let recipe = store.recipe("r1").unwrap();

        let text = render(Format::Text, |p| p.recipes(&store, vec![recipe]));
        assert!(text.starts_with("r1 | Classic Margherita Pizza | by Luca Rossi | ♥ 343"));
    }

    #[test]
    fn test_jsonl_one_object_per_recipe() {
        let store = store();
        let text = render(Format::Jsonl, |p| p.recipes(&store, store.latest()));

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), store.recipes().len());
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["id"], "r4");
        assert_eq!(first["liked"], false);
        assert!(first["authorName"].is_string());
    }

    #[test]
    fn test_profile_json_shows_displayed_followers() {
        let mut store = store();
        store.toggle_follow("u2").unwrap();

        let text = render(Format::Json, |p| p.profile(&store, "u2"));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["displayedFollowers"], 861);
        assert_eq!(value["followers"], 860);
        assert_eq!(value["isFollowing"], true);
        assert_eq!(value["authoredRecipes"][0]["id"], "r3");
    }

    #[test]
    fn test_own_profile_heading() {
        let store = store();
        let text = render(Format::Text, |p| p.profile(&store, "u1"));
        assert!(text.contains("My Recipes:"));
    }

    #[test]
    fn test_detail_lists_numbered_steps() {
        let store = store();
        let recipe = store.recipe("r4").unwrap();
        let text = render(Format::Text, |p| p.recipe_detail(&store, recipe));
        assert!(text.contains("  1. Blend everything until smooth."));
        assert!(text.contains("Comments (0):"));
    }
}
