//! XML parsing and output.
//!
//! The parser builds a lossless tree and the printer writes it back, so a
//! document that was not modified round-trips byte-for-byte, in the
//! encoding it was stored in.

mod encoding;
mod format;
mod parser;
mod printer;

pub use format::{OutputFormat, TextMode};
pub use parser::{parse_bytes, parse_file, parse_str, XmlParser};
pub use printer::{print_to_string, XmlPrinter};
