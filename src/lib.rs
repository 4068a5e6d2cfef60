//! Configurable BBCode formatter with pluggable tag behaviors, overlapping-tag
//! handling, and an all-or-nothing rejection mode for untrusted input.

mod config;
mod engine;
mod parser;
mod tag;

pub use config::{FormatFlags, FormatOverrides, SettingValue, Settings};
pub use engine::{BBFormatter, BBFormatterBuilder, ConfigError};
pub use parser::{Token, TokenKind, TokenStatus};
pub use tag::{TagBehavior, TagRegistry, GLOBAL_NAME};

#[cfg(feature = "html")]
pub mod html;
