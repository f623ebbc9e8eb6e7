//! Recipe Session - Recipe catalog with a drift-corrected cooking timer
//!
//! This crate keeps a catalog of recipes and runs one cooking session at a
//! time, counting each step down from timestamps so late ticks never make
//! the countdown drift.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
