mod ingredients;
mod recipe;

pub use ingredients::{normalize_ingredient, normalize_ingredients};
pub use recipe::Recipe;
