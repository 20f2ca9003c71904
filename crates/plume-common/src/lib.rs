//! Common utilities for the Plume renderer.
//!
//! This crate provides shared infrastructure used by all renderer components:
//! - **Warning System** - deduplicated warnings for unsupported style values
//! - **XML Builder** - markup fragments with escaped attributes and compact numbers

pub mod warning;
pub mod xml;

pub use xml::{XmlElement, escape, fmt_num};
