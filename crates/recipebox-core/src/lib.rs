// ABOUTME: Core library for recipebox, containing the recipe model and the recipe store.
// ABOUTME: Storage backends plug in through the Storage trait; this crate owns all CRUD semantics.

pub mod edit_link;
pub mod error;
pub mod filter;
pub mod import;
pub mod input;
pub mod preferences;
pub mod recipe;
pub mod storage;
pub mod store;

pub use edit_link::{EditForm, EditLink, EditLinkError};
pub use error::StoreError;
pub use filter::RecipeFilter;
pub use input::RecipeInput;
pub use preferences::Preferences;
pub use recipe::{KNOWN_CATEGORIES, Recipe};
pub use storage::{MemoryStorage, Storage, StorageError};
pub use store::{RECIPES_KEY, RecipeStore};
