//! File storage for avatar images

mod avatar_store;

pub use avatar_store::{AvatarStore, StoredAvatar, APPLICATION_DIR, REFERENCE_PREFIX};
