//! Response handling module.
//!
//! This module provides the [`ResponseFormat`] trait that an operation's
//! output type is declared with, the format implementations, and the
//! interpreter that turns an HTTP response into the operation's result.

mod format;
mod interpret;

pub use format::{BinaryFormat, JsonFormat, PlainTextFormat, ResponseFormat, VoidFormat};
pub use interpret::{extract_message, interpret};
