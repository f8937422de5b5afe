//! Color space conversion and distance utilities

pub mod conversion;

pub use conversion::ColorConverter;
