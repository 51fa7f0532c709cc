//! Portable pixel formats and the translator interface backends implement
//!
//! `InternalFormat` is what the GL-facing API speaks. Each backend provides a
//! `FormatTranslator` mapping it to and from its own native formats.

mod internal_format;
mod translator;

pub use internal_format::*;
pub use translator::*;
