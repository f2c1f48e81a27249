//! Resource loading
//!
//! Text resources read from disk: dialogue scripts and the property file
//! format they share with configuration.

pub mod propfile;
pub mod script;

pub use propfile::{parse_entries, PropEntry, PropertyError};
pub use script::{load_line_set, parse_line_set};
