//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the importer:
//! - Math types and the fixed coordinate conversions
//! - Injected logging capability

pub mod math;
pub mod logging;
