//! Users module - the authenticated identity acting on finances.

mod users_model;

pub use users_model::{resolve_editor_name, Editor, Role, UNKNOWN_EDITOR_NAME};
