use crate::error::Error;

pub const QOI_BYTES_END: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];
pub const QOI_BYTES_MAGIC: [u8; 4] = *b"qoif";
pub const QOI_CACHE_LEN: usize = 64;
pub const QOI_HEADER_LEN: usize = 14;
pub const QOI_MAX_RUN: u8 = 62;

/// Metadata describing an image, exactly what a QOI header stores.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageMeta {
  /// The number of color channels the image's pixels contain, see
  /// [Channels]. Color channels are assumed to not be pre-multiplied with the
  /// alpha channel ("un-premultiplied alpha").
  pub channels: Channels,
  /// The image's colorspace, see [Colorspace].
  pub colorspace: Colorspace,
  /// The image's height.
  pub height: u32,
  /// The image's width.
  pub width: u32,
}

impl ImageMeta {
  /// Returns the total number of pixels that make up the image, or `None`
  /// when it does not fit in a `usize`.
  pub fn num_pixels(&self) -> Option<usize> {
    (self.width as usize).checked_mul(self.height as usize)
  }
}

/// The number of channels an image declares. The header value is
/// informative only, every chunk carries enough to rebuild RGBA pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channels {
  Rgb = 3,
  Rgba = 4,
}

impl Channels {
  /// Number of bytes one pixel takes up in an interleaved buffer.
  pub fn count(self) -> usize {
    self as usize
  }
}

impl TryFrom<u8> for Channels {
  type Error = Error;

  fn try_from(byte: u8) -> Result<Self, Self::Error> {
    match byte {
      3 => Ok(Channels::Rgb),
      4 => Ok(Channels::Rgba),
      _ => Err(Error::InvalidChannels(byte)),
    }
  }
}

/// How an image's color channels are to be interpreted. Like the channel
/// count, it does not change how pixels are encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Colorspace {
  /// sRGB color channels with a linear alpha channel.
  Srgb = 0,
  /// All channels linear.
  Linear = 1,
}

/// `0` maps to `Colorspace::Srgb`, and `1` maps to `Colorspace::Linear`. All
/// other `u8` values are invalid.
impl TryFrom<u8> for Colorspace {
  type Error = Error;

  fn try_from(byte: u8) -> Result<Self, Self::Error> {
    let linear_u8 = Colorspace::Linear as u8;
    let srgb_u8 = Colorspace::Srgb as u8;

    match byte {
      _ if byte == linear_u8 => Ok(Colorspace::Linear),
      _ if byte == srgb_u8 => Ok(Colorspace::Srgb),
      _ => Err(Error::InvalidColorspace(byte)),
    }
  }
}
