//! Route handlers
//!
//! All HTTP request handlers organized by area.

pub mod admin;
pub mod applications;
pub mod auth;
pub mod health;
pub mod members;
