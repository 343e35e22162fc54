//! Compact token composition and parsing

mod composer;
mod parsed;

pub use composer::{sign, TokenComposer};
pub use parsed::{parse, ParsedToken};
