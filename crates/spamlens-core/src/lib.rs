//! SpamLens Core
//!
//! Core types, traits, and utilities shared across SpamLens components.
//!
//! This crate provides:
//! - The content and result data model (`ContentItem`, `SubScore`, `AnalysisResult`)
//! - Error types and result handling
//! - A bounds-checked pixel grid and the `PixelSource` decode boundary

pub mod error;
pub mod pixels;
pub mod types;

pub use error::{Error, Result};
pub use pixels::{Axis, PixelGrid, PixelSource, RawRgba, Rgba, Tile};
pub use types::{
    AnalysisResult, ContentItem, DetectorCategory, Evidence, ImageAnalysisResult, ImageContent,
    RiskLevel, SignalDetail, SubScore, TextContent,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::pixels::{PixelGrid, PixelSource, Rgba};
    pub use crate::types::{AnalysisResult, DetectorCategory, Evidence, RiskLevel, SubScore};
}
