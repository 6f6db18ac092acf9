//! Command templates with `$role` placeholders.
//!
//! Stage commands and output file names are written as plain text with
//! embedded role references, e.g. `aplmask -lev1 $level1b -mask ${mask}`.
//! A literal dollar sign is written `$$`.

#[macro_use]
mod macros;
mod parse;
pub use parse::{parse, Error, Piece};

mod template;
pub use template::{MissingRole, Segment, Template};
