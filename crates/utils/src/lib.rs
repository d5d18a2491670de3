//! Common utility for extended `std` types
//!
//! These are left public for convenience.
//!
//! For example, blank padding a title into a fixed-width record field or
//! writing coordinates without a stray `-0.000` are useful everywhere.

// Alias for the format! macro
pub use std::format as f;

// Modules
mod option_ext;
mod string_ext;
mod value_ext;

// Flatten
pub use option_ext::OptionExt;
pub use string_ext::{trim_fixed, StringExt};
pub use value_ext::ValueExt;
