//! Shared regex patterns for value cleanup.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Any run of whitespace, including non-breaking spaces.
    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"[\s\u{00a0}]+").unwrap();
}
