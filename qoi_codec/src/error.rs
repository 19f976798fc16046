use std::error;
use std::fmt;

/// An enumeration of all error values this crate may produce.
///
/// Every variant is a violated precondition: the codec either produces a
/// complete result or fails before writing any part of the offending chunk.
#[derive(Clone, PartialEq, Eq)]
pub enum Error {
  /// A channel count other than 3 (RGB) or 4 (RGBA).
  InvalidChannels(u8),
  /// Failed to derive a supported colorspace from a QOI image.
  InvalidColorspace(u8),
  /// The image width or height is zero, or their product does not fit in
  /// memory.
  InvalidDimensions,
  /// The encoded image does not end with the QOI end marker.
  InvalidEndMarker,
  /// Failed to decode a QOI image with a missing or malformed header.
  InvalidHeader,
  /// A cache index outside of `0..=63`.
  InvalidIndex(u8),
  /// A buffer that must have an exact length has another one.
  InvalidLength { expected: usize, found: usize },
  /// A sub-range that does not lie within its source buffer.
  InvalidRange { start: usize, length: usize, len: usize },
  /// A run length outside of `1..=62`.
  InvalidRun(u8),
  /// Red, green, and blue differences that do not fit a `QOI_OP_DIFF` chunk.
  InvalidDiff(i8, i8, i8),
  /// Red, green, and blue differences that do not fit a `QOI_OP_LUMA` chunk.
  InvalidLuma(i8, i8, i8),
  /// A chunk decoder was handed a byte carrying another chunk's tag.
  InvalidTag(u8),
  /// The number of pixels does not match the image dimensions.
  PixelCountMismatch { expected: usize, found: usize },
  /// The rows of a pixel grid are not all the same length.
  RaggedRows,
  /// Unexpectedly reached the end of an encoded image before a chunk or the
  /// header was complete.
  UnexpectedEof,
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Error::InvalidChannels(byte) => {
        write!(f, "invalid channel count {}, expected 3 for RGB or 4 for RGBA", byte)
      }
      Error::InvalidColorspace(byte) => {
        write!(f, "invalid image colorspace {}, expected 0 for sRGB or 1 for linear", byte)
      }
      Error::InvalidDimensions => {
        write!(f, "invalid image width or height")
      }
      Error::InvalidEndMarker => {
        write!(f, "missing or malformed QOI end marker")
      }
      Error::InvalidHeader => {
        write!(f, "invalid or malformed QOI image header")
      }
      Error::InvalidIndex(index) => {
        write!(f, "invalid index {}, expected a value below 64", index)
      }
      Error::InvalidLength { expected, found } => {
        write!(f, "invalid length {}, expected {}", found, expected)
      }
      Error::InvalidRange { start, length, len } => {
        write!(f, "range of {} bytes at {} is out of bounds for length {}", length, start, len)
      }
      Error::InvalidRun(count) => {
        write!(f, "invalid run length {}, expected 1 to 62", count)
      }
      Error::InvalidDiff(dr, dg, db) => {
        write!(f, "difference ({}, {}, {}) does not fit a diff chunk", dr, dg, db)
      }
      Error::InvalidLuma(dr, dg, db) => {
        write!(f, "difference ({}, {}, {}) does not fit a luma chunk", dr, dg, db)
      }
      Error::InvalidTag(byte) => {
        write!(f, "unexpected encoding `{:08b}`", byte)
      }
      Error::PixelCountMismatch { expected, found } => {
        write!(f, "expected {} pixels, found {}", expected, found)
      }
      Error::RaggedRows => {
        write!(f, "pixel rows have different lengths")
      }
      Error::UnexpectedEof => {
        write!(f, "unexpectedly reached end of file before decoding was completed")
      }
    }
  }
}

impl fmt::Debug for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self)
  }
}

impl error::Error for Error {}
