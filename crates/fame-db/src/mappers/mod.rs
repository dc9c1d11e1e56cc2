//! Model → entity mappers
//!
//! - `TryFrom<Model> for Entity`: convert rows to domain objects; enum columns are
//!   parsed and an unknown value becomes a `DatabaseError`
//! - `*Insert`/`*Update` structs: borrow entity data for binding

mod application;
mod member;
mod user;

pub use application::ApplicationInsert;
pub use member::{MemberInsert, MemberUpdate};
pub use user::UserInsert;

use fame_core::DomainError;
use std::str::FromStr;

/// Parse an enum-like column, reporting corrupt rows as database errors
pub(crate) fn parse_column<T>(column: &str, value: &str) -> Result<T, DomainError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| DomainError::DatabaseError(format!("Corrupt {column} column: {e}")))
}
