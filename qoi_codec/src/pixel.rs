use crate::meta::QOI_CACHE_LEN;
use crate::op::Op;

// An enumeration of the possible pixel "diffs", holding signed differences
// from the previous pixel.
#[derive(Debug, PartialEq)]
pub(crate) enum PixelDiff {
  // A `QOI_OP_DIFF` diff as (dr, dg, db).
  Color(i8, i8, i8),
  // A `QOI_OP_LUMA` diff as (dg, dr - dg, db - dg).
  Luma(i8, i8, i8),
}

/// A single RGBA pixel. Channel arithmetic wraps around modulo 256.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pixel {
  /// Red channel value.
  pub r: u8,
  /// Green channel value.
  pub g: u8,
  /// Blue channel value.
  pub b: u8,
  /// Alpha channel value.
  pub a: u8,
}

/// Opaque black, the "previous pixel" both ends start from.
impl Default for Pixel {
  fn default() -> Self {
    Self { r: 0, g: 0, b: 0, a: 255 }
  }
}

impl Pixel {
  /// Fully transparent black, the initial value of every cache slot.
  pub const ZERO: Pixel = Pixel { r: 0, g: 0, b: 0, a: 0 };

  pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
    Self { r, g, b, a }
  }

  /// Reads a pixel stored in the internal alpha, red, green, blue order.
  pub fn from_argb([a, r, g, b]: [u8; 4]) -> Self {
    Self { r, g, b, a }
  }

  /// Writes the pixel in the internal alpha, red, green, blue order.
  pub fn to_argb(self) -> [u8; 4] {
    [self.a, self.r, self.g, self.b]
  }

  // Attempts to produce a `PixelDiff` against the provided `prev` pixel.
  // Returns `None` when alpha differs or no diff is within range.
  pub(crate) fn diff(&self, prev: &Pixel) -> Option<PixelDiff> {
    if self.a != prev.a {
      return None;
    }

    let diff_r = self.r.wrapping_sub(prev.r) as i8;
    let diff_g = self.g.wrapping_sub(prev.g) as i8;
    let diff_b = self.b.wrapping_sub(prev.b) as i8;

    if Op::DIFF_RANGE.contains(&diff_r)
      && Op::DIFF_RANGE.contains(&diff_g)
      && Op::DIFF_RANGE.contains(&diff_b)
    {
      return Some(PixelDiff::Color(diff_r, diff_g, diff_b));
    }

    if !Op::LUMA_G_RANGE.contains(&diff_g) {
      return None;
    }

    // With dg limited to -32..=31 a wrapped dr - dg can only land in
    // -8..=7 when the true difference does.
    let luma_rg = diff_r.wrapping_sub(diff_g);
    let luma_bg = diff_b.wrapping_sub(diff_g);

    if Op::LUMA_RB_RANGE.contains(&luma_rg) && Op::LUMA_RB_RANGE.contains(&luma_bg) {
      return Some(PixelDiff::Luma(diff_g, luma_rg, luma_bg));
    }

    None
  }

  // Recreates a `Pixel` from the provided `diff` against `prev`.
  pub(crate) fn from_diff(diff: PixelDiff, prev: &Pixel) -> Self {
    let (diff_r, diff_g, diff_b) = match diff {
      PixelDiff::Color(diff_r, diff_g, diff_b) => (diff_r, diff_g, diff_b),
      PixelDiff::Luma(diff_g, luma_rg, luma_bg) => {
        (luma_rg.wrapping_add(diff_g), diff_g, luma_bg.wrapping_add(diff_g))
      }
    };

    Self {
      r: prev.r.wrapping_add(diff_r as u8),
      g: prev.g.wrapping_add(diff_g as u8),
      b: prev.b.wrapping_add(diff_b as u8),
      a: prev.a,
    }
  }

  /// QOI color hash function, not implemented via the `Hash` trait to keep
  /// things simple.
  pub fn qoi_hash(&self) -> usize {
    let r = self.r as usize;
    let g = self.g as usize;
    let b = self.b as usize;
    let a = self.a as usize;

    r * 3 + g * 5 + b * 7 + a * 11
  }

  /// The color cache slot this pixel lives in.
  pub fn cache_slot(&self) -> u8 {
    (self.qoi_hash() % QOI_CACHE_LEN) as u8
  }
}
