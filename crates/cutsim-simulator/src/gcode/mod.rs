//! G-code parsing and arc interpolation
//!
//! This module provides:
//! - Word scanning with modal X/Y/Z/F state
//! - Retroactive back-fill of axes first seen mid-program
//! - Arc sampling for G2/G3 with I/J or R center formats

pub mod arc;
pub mod parser;

pub use arc::{convert_r_to_ij, sample_arc, signed_sweep, ArcDirection};
pub use parser::{GcodeParser, PathPoint};
