//! Authentication route handlers

pub mod login;
pub mod profile;
pub mod register;

// Re-export route handlers
pub use login::{get_login, post_login, post_logout};
pub use profile::{get_profile, post_profile};
pub use register::{get_register, post_register};

/// First human-readable message out of a set of validation errors
pub(crate) fn first_validation_message(
    errors: &validator::ValidationErrors,
    fallback: &str,
) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|field| field.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| fallback.to_string())
}
