//! Image intake for the relay.
//!
//! Decodes base64 data URLs and verifies that uploaded bytes are a loadable
//! raster image before anything is sent upstream.
//!
//! # Submodules
//!
//! - `models`: Image formats, size limits, and the verified image type.
//! - `decode`: Data URL decoding and decoder-backed verification.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod decode;
pub mod models;

pub use decode::{decode_data_url, verify_image};
pub use models::{DecodedImage, ImageFormat, OUTBOUND_IMAGE_MIME};
