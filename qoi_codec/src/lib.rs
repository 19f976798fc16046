//! This crate implements a lossless encoder and decoder for the
//! [QOI image format](https://qoiformat.org).
//!
//! The two primary exports are the `encode_file` and `decode_file`
//! functions, which turn an [Image] into a complete QOI file and back. Both
//! work on in-memory buffers only; reading and writing files is left to the
//! caller.
//!
//! For image libraries that hand out interleaved RGB or RGBA bytes,
//! `encode_raw` and `decode_raw` do the same from and to such a buffer plus
//! an [ImageMeta].
//!
//! The building blocks are public as well: `build_header` / `parse_header`,
//! one encoder and decoder per chunk kind, `encode_stream` / `decode_stream`
//! for the bare chunk stream, and the byte helpers in [bytes].
//!
//! Each call owns its color cache and previous pixel, so calls on separate
//! inputs can run in parallel without coordination.
//!
//! # Encode example
//!
//! ```rust
//! use qoi_codec::{decode_file, encode_file, Channels, Colorspace, Image};
//!
//! // A 2x1 image made up of two opaque black pixels, packed as 0xRRGGBBAA.
//! let image = Image::new(vec![vec![0x0000_00ff, 0x0000_00ff]], Channels::Rgb, Colorspace::Srgb)
//!   .expect("Failed to create image");
//!
//! match encode_file(&image) {
//!   Ok(encoded) => {
//!     // Header, a single run chunk, and the end marker.
//!     assert_eq!(encoded.len(), 14 + 1 + 8);
//!     assert_eq!(decode_file(&encoded), Ok(image));
//!   }
//!   Err(e) => {
//!     // See `error.rs` for all possible errors.
//!     panic!("{}", e);
//!   }
//! }
//! ```
//!
//! # Raw buffer example
//!
//! ```rust
//! use qoi_codec::{decode_raw, encode_raw, Channels, Colorspace, ImageMeta};
//!
//! // A 1x2 representation of an image's pixel data, one red and one green
//! // pixel.
//! let image_source = vec![255, 0, 0, 0, 255, 0];
//!
//! // Metadata describing the image to be encoded.
//! let image_meta = ImageMeta {
//!   width: 1,
//!   height: 2,
//!   channels: Channels::Rgb,
//!   colorspace: Colorspace::Srgb,
//! };
//!
//! let encoded = encode_raw(&image_source, &image_meta).expect("Failed to encode image");
//! let (decoded_meta, decoded) = decode_raw(&encoded).expect("Failed to decode image");
//!
//! assert_eq!(decoded_meta, image_meta);
//! assert_eq!(decoded, image_source);
//! ```
//!

pub use crate::decode::{
  decode_diff, decode_file, decode_luma, decode_raw, decode_rgb, decode_rgba, decode_run,
  decode_stream, parse_header,
};
pub use crate::encode::{
  build_header, encode_diff, encode_file, encode_index, encode_luma, encode_raw, encode_rgb,
  encode_rgba, encode_run, encode_stream,
};
pub use crate::error::Error;
pub use crate::image::Image;
pub use crate::meta::{
  Channels, Colorspace, ImageMeta, QOI_BYTES_END, QOI_BYTES_MAGIC, QOI_CACHE_LEN, QOI_HEADER_LEN,
  QOI_MAX_RUN,
};
pub use crate::op::{Op, Tag};
pub use crate::pixel::Pixel;

pub mod bytes;
mod decode;
mod encode;
mod error;
mod image;
mod meta;
mod op;
mod pixel;
mod state;
