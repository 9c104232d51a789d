// src/core/mod.rs

pub mod html;
pub mod sanitize;
pub mod symbols;

pub use html::{RawRow, Tag, Token};
