//! On-disk path definitions for Folio resources.
//!
//! This module defines where each resource lives relative to its collection root.
//! It contains **no I/O logic** - only typed path construction.

pub mod posts;
pub mod projects;
