//! Configuration types and parsing
//!
//! The firmware embeds a TOML file and parses it at boot with
//! [`parse_config`]; anything the file leaves out keeps its default.

pub mod toml;
pub mod types;

pub use toml::{parse_config, ParseError, ParseErrorKind};
pub use types::*;
