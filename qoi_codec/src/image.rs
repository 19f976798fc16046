use crate::error::Error;
use crate::meta::{Channels, Colorspace, ImageMeta};

/// A decoded image: a non-empty, rectangular, row-major grid of pixels packed
/// as `0xRRGGBBAA`, plus the channel count and colorspace a QOI header
/// records for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
  channels: Channels,
  colorspace: Colorspace,
  height: u32,
  pixels: Vec<Vec<u32>>,
  width: u32,
}

impl Image {
  /// Wraps a pixel grid. Fails when the grid is empty, its rows differ in
  /// length, or a dimension does not fit in a `u32`.
  pub fn new(
    pixels: Vec<Vec<u32>>,
    channels: Channels,
    colorspace: Colorspace,
  ) -> Result<Self, Error> {
    let row_len = pixels.first().map_or(0, Vec::len);

    if pixels.iter().any(|row| row.len() != row_len) {
      return Err(Error::RaggedRows);
    }

    if row_len == 0 {
      return Err(Error::InvalidDimensions);
    }

    let width = u32::try_from(row_len).map_err(|_| Error::InvalidDimensions)?;
    let height = u32::try_from(pixels.len()).map_err(|_| Error::InvalidDimensions)?;

    Ok(Self { channels, colorspace, height, pixels, width })
  }

  pub fn width(&self) -> u32 {
    self.width
  }

  pub fn height(&self) -> u32 {
    self.height
  }

  pub fn channels(&self) -> Channels {
    self.channels
  }

  pub fn colorspace(&self) -> Colorspace {
    self.colorspace
  }

  /// The pixel rows, top to bottom.
  pub fn pixels(&self) -> &[Vec<u32>] {
    &self.pixels
  }

  pub fn into_pixels(self) -> Vec<Vec<u32>> {
    self.pixels
  }

  /// The header fields describing this image.
  pub fn meta(&self) -> ImageMeta {
    ImageMeta {
      channels: self.channels,
      colorspace: self.colorspace,
      height: self.height,
      width: self.width,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_image() {
    let image = Image::new(vec![vec![1, 2, 3], vec![4, 5, 6]], Channels::Rgb, Colorspace::Linear)
      .expect("Failed to create image");

    assert_eq!(
      image.meta(),
      ImageMeta { width: 3, height: 2, channels: Channels::Rgb, colorspace: Colorspace::Linear }
    );
    assert_eq!(image.pixels()[1], vec![4, 5, 6]);
  }

  #[test]
  fn test_new_image_ragged_rows() {
    let result = Image::new(vec![vec![1, 2], vec![3]], Channels::Rgba, Colorspace::Srgb);

    assert_eq!(result, Err(Error::RaggedRows));
  }

  #[test]
  fn test_new_empty_image() {
    assert_eq!(
      Image::new(Vec::new(), Channels::Rgba, Colorspace::Srgb),
      Err(Error::InvalidDimensions)
    );
    assert_eq!(
      Image::new(vec![Vec::new()], Channels::Rgba, Colorspace::Srgb),
      Err(Error::InvalidDimensions)
    );
  }
}
