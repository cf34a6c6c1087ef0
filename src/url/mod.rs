//! URL handling module
//!
//! This module provides the [`Address`] type used to identify pages
//! throughout a crawl.

mod address;

pub use address::Address;
