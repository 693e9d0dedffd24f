//! Color parsing and WCAG contrast math for showkit.
//!
//! This crate is pure and stateless: it parses the color notations a page
//! surface reports (`rgb()`/`rgba()` functional notation and 6+ digit hex)
//! and computes WCAG relative-luminance contrast ratios from them.

mod contrast;
mod rgb;

pub use contrast::{contrast_between, contrast_ratio, luminance};
pub use rgb::{ColorParseError, Rgb};
