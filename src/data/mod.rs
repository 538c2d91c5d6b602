mod loader;
mod repository;

pub use loader::{load_questions_from_json, load_tips_from_json, LoadError};
pub use repository::{category_color, category_icon, ContentRepository, TOPICS};
