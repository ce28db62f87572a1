//! Output strategies over the assembled report tree.
//!
//! Both renderers are pure projections of the same [`Report`]; exactly
//! one runs per invocation. The text strategy marks requested-but-empty
//! sections explicitly, the JSON strategy omits them.

mod json;
mod text;

pub use json::JsonRenderer;
pub use text::TextRenderer;

use std::io::Write;

use crate::error::ScanError;
use crate::report::Report;

/// A rendering strategy.
pub trait Render {
    fn render(&self, report: &Report, out: &mut dyn Write) -> Result<(), ScanError>;
}
