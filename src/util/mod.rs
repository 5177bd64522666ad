//! Utility modules

pub mod text;

pub use text::{char_type, change_extension, word_count, CharType};
