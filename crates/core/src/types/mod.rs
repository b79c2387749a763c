//! Core types for Vitrine.
//!
//! This module provides type-safe wrappers for catalog domain concepts.

pub mod id;
pub mod options;
pub mod price;
pub mod product;

pub use id::*;
pub use options::{OptionValue, SelectedOptions};
pub use price::RegularPrice;
pub use product::{Brand, Product};
