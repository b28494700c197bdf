//! Strip selected markdown syntax from text while keeping its layout.
//!
//! The pipeline runs one rule per [`Category`] in a fixed order, from the most
//! structural constructs (code blocks) through inline markup (links, emphasis)
//! to line prefixes and whole-line constructs (lists, rules, tables). Each rule
//! either strips its category or leaves it in place, depending on
//! [`CleaningOptions`]. Line breaks survive every rule.
//!
//! ```ignore
//! use mdclean::{CleaningOptions, clean};
//!
//! let text = clean("# Title\nSome **bold** text.", &CleaningOptions::default());
//! assert_eq!(text, "Title\nSome **bold** text.");
//! ```

mod error;
mod lines;
mod options;
mod pipeline;
mod report;
mod rules;
mod shield;

pub use error::{Error, Result};
pub use options::{Category, CleaningOptions};
pub use pipeline::{clean, clean_with_report, inspect};
pub use report::{Cleaned, ElementCounts};
