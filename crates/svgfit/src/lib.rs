#![forbid(unsafe_code)]

//! `svgfit` rewrites SVG icons so they share one coordinate system.
//!
//! Given a target edge length, every document is scaled so its longer side fills a square
//! `viewBox` and the shorter side is padded to center the artwork. Without a target, a plain
//! uniform scale is applied.
//!
//! # Features
//!
//! - `raster`: PNG/JPG previews of normalized output via pure-Rust rasterization
//!   (`svgfit::raster`)

pub use svgfit_core::*;

/// Path-data algebra used for `d` attributes.
pub mod path {
    pub use svgfit_path::{Command, Error, PathData, Result, Segment, number};
}

#[cfg(feature = "raster")]
pub mod raster;
