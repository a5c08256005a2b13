//! Codec adapter: decode a source once, re-encode it at many qualities.
//!
//! This module provides functionality for:
//! - Identifying and decoding JPEG and PNG containers
//! - Re-encoding decoded pixels at a quality value (JPEG quality, or PNG
//!   compression effort)
//!
//! # Architecture
//!
//! The search controller only talks to the [`Codec`] trait. [`ImageCodec`]
//! is the implementation backed by the `image` crate; tests can substitute a
//! scripted codec to drive the search deterministically.

mod decode;
mod encode;
mod types;

pub use decode::decode_image;
pub use encode::{
    compression_for_effort, encode_image, encode_jpeg, encode_png, png_effort, MAX_PNG_EFFORT,
};
pub use types::SourceImage;

use crate::error::CompressResult;

/// Decode/encode seam used by the quality search.
pub trait Codec {
    /// Decode container bytes into pixels plus their format.
    fn decode(&self, bytes: &[u8]) -> CompressResult<SourceImage>;

    /// Encode pixels back into the image's own format at `quality` (0-100).
    fn encode(&self, image: &SourceImage, quality: u8) -> CompressResult<Vec<u8>>;
}

/// [`Codec`] backed by the `image` crate's JPEG and PNG codecs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCodec;

impl Codec for ImageCodec {
    fn decode(&self, bytes: &[u8]) -> CompressResult<SourceImage> {
        decode_image(bytes)
    }

    fn encode(&self, image: &SourceImage, quality: u8) -> CompressResult<Vec<u8>> {
        encode_image(image, quality)
    }
}
