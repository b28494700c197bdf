//! Structured output envelope and payload models.

mod data;
mod format;
mod model;
mod result_builder;

pub use data::*;
pub use format::OutputFormat;
pub use model::*;
pub use result_builder::{ResultBuilder, TextRender, print_error_stderr, print_result};
