//! Value objects - immutable types that represent domain concepts

mod category;
mod identity;
mod image;
mod role;
mod status;

pub use category::Category;
pub use identity::{CredentialFailure, Identity};
pub use image::ImageKind;
pub use role::{Role, RoleSet};
pub use status::ApplicationStatus;

/// Error returned when a wire or storage string does not name a known value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind}: {value}")]
pub struct ParseValueError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseValueError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
