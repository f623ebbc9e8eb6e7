//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `recipe` - Recipe aggregate, authoring drafts and catalog queries
//! - `session` - The cooking session state machine and its events

pub mod foundation;
pub mod recipe;
pub mod session;
