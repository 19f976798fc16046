//! Byte level helpers shared by the encoder and decoder: comparison,
//! splicing, big-endian integers, and reformatting pixels between the packed
//! image grid and the flat channel buffer the codec works on.

use crate::error::Error;
use crate::pixel::Pixel;

/// Returns `true` when both slices hold the same bytes. Slices of different
/// lengths are never equal.
pub fn bytes_equal(a: &[u8], b: &[u8]) -> bool {
  a == b
}

/// Row-wise variant of [bytes_equal].
pub fn rows_equal<A: AsRef<[u8]>, B: AsRef<[u8]>>(a: &[A], b: &[B]) -> bool {
  a.len() == b.len() && a.iter().zip(b).all(|(x, y)| bytes_equal(x.as_ref(), y.as_ref()))
}

/// Reads a big-endian `u32` from exactly four bytes.
pub fn to_u32_be(bytes: &[u8]) -> Result<u32, Error> {
  let bytes: [u8; 4] = bytes
    .try_into()
    .map_err(|_| Error::InvalidLength { expected: 4, found: bytes.len() })?;

  Ok(u32::from_be_bytes(bytes))
}

/// Writes a `u32` as four big-endian bytes.
pub fn from_u32_be(value: u32) -> [u8; 4] {
  value.to_be_bytes()
}

/// Joins the given parts, in order, into one buffer.
pub fn concat(parts: &[&[u8]]) -> Vec<u8> {
  parts.concat()
}

/// Copies `length` bytes of `input` starting at `start`.
pub fn extract(input: &[u8], start: usize, length: usize) -> Result<Vec<u8>, Error> {
  let range_error = Error::InvalidRange { start, length, len: input.len() };
  let end = start.checked_add(length).ok_or_else(|| range_error.clone())?;

  input
    .get(start..end)
    .map(<[u8]>::to_vec)
    .ok_or(range_error)
}

/// Splits `input` into consecutive pieces of the given `sizes`. The sizes must
/// add up to the length of `input`.
pub fn partition(input: &[u8], sizes: &[usize]) -> Result<Vec<Vec<u8>>, Error> {
  let total = sizes
    .iter()
    .try_fold(0usize, |total, size| total.checked_add(*size));

  if total != Some(input.len()) {
    return Err(Error::InvalidLength {
      expected: total.unwrap_or(usize::MAX),
      found: input.len(),
    });
  }

  let mut start = 0;
  let mut pieces = Vec::with_capacity(sizes.len());

  for &size in sizes {
    pieces.push(extract(input, start, size)?);
    start += size;
  }

  Ok(pieces)
}

/// Flattens a grid of `0xRRGGBBAA` packed pixels into alpha, red, green,
/// blue ordered channel quadruples, row by row.
pub fn image_to_channels<R: AsRef<[u32]>>(grid: &[R]) -> Result<Vec<[u8; 4]>, Error> {
  let width = grid.first().map_or(0, |row| row.as_ref().len());

  if grid.iter().any(|row| row.as_ref().len() != width) {
    return Err(Error::RaggedRows);
  }

  let channels = grid
    .iter()
    .flat_map(|row| row.as_ref().iter())
    .map(|&packed| {
      let [r, g, b, a] = from_u32_be(packed);
      Pixel::new(r, g, b, a).to_argb()
    })
    .collect();

  Ok(channels)
}

/// Inverse of [image_to_channels]: rebuilds a `height` x `width` grid of
/// `0xRRGGBBAA` packed pixels from alpha, red, green, blue quadruples.
pub fn channels_to_image(
  channels: &[[u8; 4]],
  height: usize,
  width: usize,
) -> Result<Vec<Vec<u32>>, Error> {
  let expected = height.checked_mul(width).ok_or(Error::InvalidDimensions)?;

  if channels.len() != expected {
    return Err(Error::PixelCountMismatch { expected, found: channels.len() });
  }

  if width == 0 {
    return Ok(vec![Vec::new(); height]);
  }

  let grid: Vec<Vec<u32>> = channels
    .chunks_exact(width)
    .map(|row| {
      row
        .iter()
        .map(|&argb| {
          let pixel = Pixel::from_argb(argb);
          u32::from_be_bytes([pixel.r, pixel.g, pixel.b, pixel.a])
        })
        .collect()
    })
    .collect();

  Ok(grid)
}
