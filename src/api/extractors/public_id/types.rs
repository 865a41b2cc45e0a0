/**
 * Responsibility
 * - Declare typed public ids per resource
 * - Everything `pub` here is re-exported by ./mod.rs
 */
use super::core::PublicId;

// recipes
pub enum RecipeTag {}
pub type PublicRecipeId = PublicId<RecipeTag>;
