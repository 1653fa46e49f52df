#![forbid(unsafe_code)]

//! Path-data algebra for SVG `d` attributes.
//!
//! Parsing is delegated to `svgtypes`; this crate only adds the operations a uniform
//! scale + translate normalizer needs (translate, scale, absolute/relative re-encoding,
//! error-carrying rounding) and a compact serializer whose output matches the widely used
//! `svgpath` JS library.

mod ellipse;
pub mod error;
pub mod number;
mod path;
mod segment;

pub use error::{Error, Result};
pub use path::PathData;
pub use segment::{Command, Segment};
