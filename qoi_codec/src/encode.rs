use log::{debug, trace};

use crate::bytes::{concat, from_u32_be, image_to_channels};
use crate::error::Error;
use crate::image::Image;
use crate::meta::{ImageMeta, QOI_BYTES_END, QOI_BYTES_MAGIC, QOI_MAX_RUN};
use crate::op::Op;
use crate::pixel::{Pixel, PixelDiff};
use crate::state::State;

/// Encodes an `Image` into a complete QOI file: header, chunk stream, and
/// end marker.
///
/// The image's packed `0xRRGGBBAA` pixels are first reordered into the
/// alpha, red, green, blue channel layout [encode_stream] works on.
pub fn encode_file(image: &Image) -> Result<Vec<u8>, Error> {
  let channels = image_to_channels(image.pixels())?;

  Ok(encode_channels(&image.meta(), &channels))
}

/// Encodes an interleaved buffer of raw pixel data, described by `meta`, into
/// a complete QOI file.
///
/// `data` holds `meta.channels` bytes per pixel in red, green, blue(, alpha)
/// order, row by row. Pixels of three channel images are encoded as opaque.
pub fn encode_raw(data: &[u8], meta: &ImageMeta) -> Result<Vec<u8>, Error> {
  let num_pixels = meta
    .num_pixels()
    .filter(|&num_pixels| num_pixels > 0)
    .ok_or(Error::InvalidDimensions)?;

  let channel_count = meta.channels.count();
  let expected = num_pixels
    .checked_mul(channel_count)
    .ok_or(Error::InvalidDimensions)?;

  if data.len() != expected {
    return Err(Error::InvalidLength { expected, found: data.len() });
  }

  let channels: Vec<[u8; 4]> = data
    .chunks_exact(channel_count)
    .map(|pixel_buf| {
      Pixel {
        r: pixel_buf[0],
        g: pixel_buf[1],
        b: pixel_buf[2],
        a: pixel_buf.get(3).copied().unwrap_or(255),
      }
      .to_argb()
    })
    .collect();

  Ok(encode_channels(meta, &channels))
}

fn encode_channels(meta: &ImageMeta, channels: &[[u8; 4]]) -> Vec<u8> {
  let header = build_header(meta);
  let stream = encode_stream(channels);
  let encoded = concat(&[&header, &stream, &QOI_BYTES_END]);

  debug!(
    "encoded {}x{} image ({} pixels) into {} bytes",
    meta.width,
    meta.height,
    channels.len(),
    encoded.len(),
  );

  encoded
}

/// Builds the 14 byte QOI header: magic bytes, big-endian width and height,
/// channel count, and colorspace.
pub fn build_header(meta: &ImageMeta) -> Vec<u8> {
  trace!("building header for {:?}", meta);

  concat(&[
    &QOI_BYTES_MAGIC,
    &from_u32_be(meta.width),
    &from_u32_be(meta.height),
    &[meta.channels as u8, meta.colorspace as u8],
  ])
}

/// Encodes a `QOI_OP_RGB` chunk. The pixel's alpha is left out.
pub fn encode_rgb(pixel: Pixel) -> Vec<u8> {
  let mut out = Vec::with_capacity(4);
  Op::Rgb(pixel.r, pixel.g, pixel.b).write_to(&mut out);
  out
}

/// Encodes a `QOI_OP_RGBA` chunk.
pub fn encode_rgba(pixel: Pixel) -> Vec<u8> {
  let mut out = Vec::with_capacity(5);
  Op::Rgba(pixel.r, pixel.g, pixel.b, pixel.a).write_to(&mut out);
  out
}

/// Encodes a `QOI_OP_INDEX` chunk. `slot` must be below 64.
pub fn encode_index(slot: u8) -> Result<Vec<u8>, Error> {
  Op::index(slot)?.to_bytes()
}

/// Encodes a `QOI_OP_DIFF` chunk. Every difference must be in `-2..=1`.
pub fn encode_diff(diff_r: i8, diff_g: i8, diff_b: i8) -> Result<Vec<u8>, Error> {
  Op::diff(diff_r, diff_g, diff_b)?.to_bytes()
}

/// Encodes a `QOI_OP_LUMA` chunk from the red, green, and blue differences.
/// `diff_g` must be in `-32..=31`, and both `diff_r - diff_g` and
/// `diff_b - diff_g` in `-8..=7`.
pub fn encode_luma(diff_r: i8, diff_g: i8, diff_b: i8) -> Result<Vec<u8>, Error> {
  Op::luma(diff_r, diff_g, diff_b)?.to_bytes()
}

/// Encodes a `QOI_OP_RUN` chunk. `count` must be in `1..=62`.
pub fn encode_run(count: u8) -> Result<Vec<u8>, Error> {
  Op::run(count)?.to_bytes()
}

/// Encodes pixels in alpha, red, green, blue channel order into a stream of
/// QOI chunks, without header or end marker.
///
/// Each pixel gets the most compact chunk available: a run of the previous
/// pixel, then a cache index, a diff, a luma, and finally a full RGB or RGBA
/// chunk. A run still open when the pixels end is flushed as well.
pub fn encode_stream(pixels: &[[u8; 4]]) -> Vec<u8> {
  let mut state = State::new();
  let mut out = Vec::with_capacity(pixels.len());

  for &argb in pixels {
    let pixel = Pixel::from_argb(argb);

    encode_pixel(&mut state, pixel, &mut out);
    state.prev_pixel = pixel;
  }

  if state.run_count > 0 {
    flush_run(&mut state, &mut out);
  }

  out
}

fn flush_run(state: &mut State, out: &mut Vec<u8>) {
  trace!("run of {} pixels", state.run_count);

  Op::Run(state.run_count).write_to(out);
  state.run_count = 0;
}

// Encodes the provided pixel using the QOI OP encoding scheme and provided
// `state`. Leaves `state.prev_pixel` to the caller.
fn encode_pixel(state: &mut State, pixel: Pixel, out: &mut Vec<u8>) {
  if pixel == state.prev_pixel {
    state.run_count += 1;

    if state.run_count == QOI_MAX_RUN {
      flush_run(state, out);
    }

    return;
  }

  if state.run_count > 0 {
    flush_run(state, out);
  }

  if let Some(index) = state.cache_match_or_replace(pixel) {
    Op::Index(index).write_to(out);
    return;
  }

  let op = match pixel.diff(&state.prev_pixel) {
    Some(PixelDiff::Color(diff_r, diff_g, diff_b)) => Op::Diff(diff_r, diff_g, diff_b),
    Some(PixelDiff::Luma(diff_g, luma_rg, luma_bg)) => Op::Luma(diff_g, luma_rg, luma_bg),
    None if pixel.a == state.prev_pixel.a => Op::Rgb(pixel.r, pixel.g, pixel.b),
    None => Op::Rgba(pixel.r, pixel.g, pixel.b, pixel.a),
  };

  op.write_to(out);
}
