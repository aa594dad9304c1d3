//! Decimal parsing and arithmetic.
//!
//! All monetary values enter the crate here. Input of any shape
//! ([`NumericInput`]) is parsed into a [`DecimalValue`]: exact base-10, no
//! binary floating point, no panics.
//!
//! ## Components
//!
//! - [`DecimalValue`]: finite decimal or explicit non-finite state
//! - [`NumericInput`]: text, float, decimal or missing input
//! - [`parse`] / [`try_parse`]: lenient linear-time parser
//! - [`add`], [`subtract`], [`multiply`], [`divide`], [`round_up`],
//!   [`round_down`], [`round_down_to_multiple`]: arithmetic over raw input
//!
//! ## Fail-Safe Parsing
//!
//! Unparseable input becomes zero at the [`parse`] boundary. Internally the
//! distinction is kept by [`try_parse`] and its [`ParseError`].

mod input;
mod ops;
mod parse;
mod value;

pub use input::NumericInput;
pub use ops::{add, divide, multiply, round_down, round_down_to_multiple, round_up, subtract};
pub use parse::{parse, try_parse, ParseError};
pub use value::DecimalValue;
