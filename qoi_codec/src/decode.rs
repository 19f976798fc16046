use log::{debug, trace};

use crate::bytes::{bytes_equal, channels_to_image, partition, to_u32_be};
use crate::error::Error;
use crate::image::Image;
use crate::meta::{
  Channels, Colorspace, ImageMeta, QOI_BYTES_END, QOI_BYTES_MAGIC, QOI_CACHE_LEN, QOI_HEADER_LEN,
  QOI_MAX_RUN,
};
use crate::op::{Op, Tag};
use crate::pixel::{Pixel, PixelDiff};
use crate::state::State;

/// Decodes a complete QOI file into an `Image`.
///
/// The end marker is checked and stripped, the header parsed, and the chunk
/// stream decoded into pixels which are then packed as `0xRRGGBBAA` rows.
/// The returned image carries the channel count and colorspace recorded in
/// the header.
pub fn decode_file(bytes: &[u8]) -> Result<Image, Error> {
  let (meta, channels) = decode_channels(bytes)?;
  let grid = channels_to_image(&channels, meta.height as usize, meta.width as usize)?;

  Image::new(grid, meta.channels, meta.colorspace)
}

/// Decodes a complete QOI file into an interleaved buffer of raw pixel data,
/// returning it along with the image's `ImageMeta`.
///
/// Pixels are written as red, green, blue for three channel images and red,
/// green, blue, alpha for four channel images.
pub fn decode_raw(bytes: &[u8]) -> Result<(ImageMeta, Vec<u8>), Error> {
  let (meta, channels) = decode_channels(bytes)?;
  let channel_count = meta.channels.count();
  let mut data = Vec::with_capacity(channels.len() * channel_count);

  for &argb in &channels {
    let pixel = Pixel::from_argb(argb);

    match meta.channels {
      Channels::Rgb => data.extend_from_slice(&[pixel.r, pixel.g, pixel.b]),
      Channels::Rgba => data.extend_from_slice(&[pixel.r, pixel.g, pixel.b, pixel.a]),
    }
  }

  Ok((meta, data))
}

fn decode_channels(bytes: &[u8]) -> Result<(ImageMeta, Vec<[u8; 4]>), Error> {
  let framing_len = QOI_HEADER_LEN + QOI_BYTES_END.len();

  if bytes.len() < framing_len {
    return Err(Error::UnexpectedEof);
  }

  let parts = partition(
    bytes,
    &[QOI_HEADER_LEN, bytes.len() - framing_len, QOI_BYTES_END.len()],
  )?;

  if !bytes_equal(&parts[2], &QOI_BYTES_END) {
    return Err(Error::InvalidEndMarker);
  }

  let meta = parse_header(&parts[0])?;
  let channels = decode_stream(&parts[1], meta.width, meta.height)?;

  debug!(
    "decoded {}x{} image ({} pixels) from {} bytes",
    meta.width,
    meta.height,
    channels.len(),
    bytes.len(),
  );

  Ok((meta, channels))
}

/// Parses a 14 byte QOI header. Fails on wrong magic bytes, a channel count
/// other than 3 or 4, or a colorspace other than 0 or 1.
pub fn parse_header(header: &[u8]) -> Result<ImageMeta, Error> {
  if header.len() != QOI_HEADER_LEN {
    return Err(Error::InvalidLength { expected: QOI_HEADER_LEN, found: header.len() });
  }

  let fields = partition(header, &[4, 4, 4, 1, 1])?;

  if !bytes_equal(&fields[0], &QOI_BYTES_MAGIC) {
    return Err(Error::InvalidHeader);
  }

  let meta = ImageMeta {
    width: to_u32_be(&fields[1])?,
    height: to_u32_be(&fields[2])?,
    channels: Channels::try_from(fields[3][0])?,
    colorspace: Colorspace::try_from(fields[4][0])?,
  };

  trace!("parsed header {:?}", meta);

  Ok(meta)
}

// Reads the chunk at the start of `bytes`, failing unless it carries the
// `expected` tag. Returns the leading byte along with the chunk.
fn read_tagged(bytes: &[u8], expected: Tag) -> Result<(u8, Op), Error> {
  let byte = *bytes.first().ok_or(Error::UnexpectedEof)?;

  if Tag::of(byte) != expected {
    return Err(Error::InvalidTag(byte));
  }

  Ok((byte, Op::read_from(bytes)?))
}

/// Decodes a `QOI_OP_RGB` chunk, tag byte included. The pixel's alpha is
/// carried over from the previous pixel.
pub fn decode_rgb(chunk: &[u8], alpha: u8) -> Result<Pixel, Error> {
  match read_tagged(chunk, Tag::Rgb)? {
    (_, Op::Rgb(r, g, b)) => Ok(Pixel { r, g, b, a: alpha }),
    (byte, _) => Err(Error::InvalidTag(byte)),
  }
}

/// Decodes a `QOI_OP_RGBA` chunk, tag byte included.
pub fn decode_rgba(chunk: &[u8]) -> Result<Pixel, Error> {
  match read_tagged(chunk, Tag::Rgba)? {
    (_, Op::Rgba(r, g, b, a)) => Ok(Pixel { r, g, b, a }),
    (byte, _) => Err(Error::InvalidTag(byte)),
  }
}

/// Decodes a `QOI_OP_DIFF` chunk against the previous pixel.
pub fn decode_diff(prev: Pixel, byte: u8) -> Result<Pixel, Error> {
  match read_tagged(&[byte], Tag::Diff)? {
    (_, Op::Diff(diff_r, diff_g, diff_b)) => {
      Ok(Pixel::from_diff(PixelDiff::Color(diff_r, diff_g, diff_b), &prev))
    }
    (byte, _) => Err(Error::InvalidTag(byte)),
  }
}

/// Decodes a two byte `QOI_OP_LUMA` chunk against the previous pixel.
pub fn decode_luma(prev: Pixel, chunk: &[u8]) -> Result<Pixel, Error> {
  match read_tagged(chunk, Tag::Luma)? {
    (_, Op::Luma(diff_g, luma_rg, luma_bg)) => {
      Ok(Pixel::from_diff(PixelDiff::Luma(diff_g, luma_rg, luma_bg), &prev))
    }
    (byte, _) => Err(Error::InvalidTag(byte)),
  }
}

/// Decodes a `QOI_OP_RUN` chunk by appending `pixel` to `buffer` as many
/// times as the run is long, and returns that count.
///
/// Fails, leaving `buffer` untouched, when the run would grow it past
/// `capacity` pixels.
pub fn decode_run(
  buffer: &mut Vec<[u8; 4]>,
  pixel: Pixel,
  byte: u8,
  capacity: usize,
) -> Result<usize, Error> {
  let count = match read_tagged(&[byte], Tag::Run)? {
    (_, Op::Run(count)) => count as usize,
    (byte, _) => return Err(Error::InvalidTag(byte)),
  };

  let found = buffer.len() + count;

  if found > capacity {
    return Err(Error::PixelCountMismatch { expected: capacity, found });
  }

  buffer.resize(found, pixel.to_argb());

  Ok(count)
}

fn decode_index(cache: &[Pixel; QOI_CACHE_LEN], byte: u8) -> Result<Pixel, Error> {
  match read_tagged(&[byte], Tag::Index)? {
    (_, Op::Index(index)) => Ok(cache[index as usize]),
    (byte, _) => Err(Error::InvalidTag(byte)),
  }
}

/// Decodes a QOI chunk stream, without header or end marker, into
/// `width * height` pixels in alpha, red, green, blue channel order.
///
/// Fails on zero dimensions, a truncated chunk, or a stream that does not
/// decode to exactly `width * height` pixels.
pub fn decode_stream(bytes: &[u8], width: u32, height: u32) -> Result<Vec<[u8; 4]>, Error> {
  let num_pixels = (width as usize)
    .checked_mul(height as usize)
    .filter(|&num_pixels| num_pixels > 0)
    .ok_or(Error::InvalidDimensions)?;

  // A single chunk yields at most a full run of pixels, which bounds what
  // the stream can fill regardless of the declared dimensions.
  let capacity = num_pixels.min(bytes.len().saturating_mul(QOI_MAX_RUN as usize));
  let mut pixels = Vec::with_capacity(capacity);
  let mut state = State::new();
  let mut pos = 0;

  while let Some(&byte) = bytes.get(pos) {
    let chunk = &bytes[pos..];
    let tag = Tag::of(byte);

    let pixel = match tag {
      Tag::Index => decode_index(&state.cache, byte)?,
      Tag::Diff => decode_diff(state.prev_pixel, byte)?,
      Tag::Luma => decode_luma(state.prev_pixel, chunk)?,
      Tag::Rgb => decode_rgb(chunk, state.prev_pixel.a)?,
      Tag::Rgba => decode_rgba(chunk)?,
      Tag::Run => {
        let count = decode_run(&mut pixels, state.prev_pixel, byte, num_pixels)?;
        trace!("run of {} pixels at {}", count, pos);

        pos += tag.chunk_len();
        continue;
      }
    };

    if pixels.len() == num_pixels {
      return Err(Error::PixelCountMismatch { expected: num_pixels, found: num_pixels + 1 });
    }

    // An index hit already sits in its slot.
    if tag != Tag::Index {
      state.cache_insert(pixel);
    }

    state.prev_pixel = pixel;
    pixels.push(pixel.to_argb());
    pos += tag.chunk_len();
  }

  if pixels.len() != num_pixels {
    return Err(Error::PixelCountMismatch { expected: num_pixels, found: pixels.len() });
  }

  Ok(pixels)
}
