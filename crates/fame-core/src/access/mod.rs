//! Authorization gate
//!
//! Every privileged operation names its admitted roles once, in [`Operation::required_roles`].
//! Services call [`authorize_operation`] before touching storage.

mod gate;

pub use gate::{authorize, authorize_operation, Operation};
