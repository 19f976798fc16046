use std::ops::RangeInclusive;

use crate::error::Error;
use crate::meta::{QOI_CACHE_LEN, QOI_MAX_RUN};

/// The kind of chunk a leading byte starts, read from its 2-bit tag or, for
/// `0xfe` and `0xff`, from the whole byte.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Tag {
  Index,
  Diff,
  Luma,
  Run,
  Rgb,
  Rgba,
}

impl Tag {
  /// Classifies a leading byte. Every byte belongs to exactly one chunk kind.
  pub fn of(byte: u8) -> Tag {
    match byte {
      Op::TAG_RGB => Tag::Rgb,
      Op::TAG_RGBA => Tag::Rgba,
      _ => match byte & Op::MASK_TAG {
        Op::TAG_INDEX => Tag::Index,
        Op::TAG_DIFF => Tag::Diff,
        Op::TAG_LUMA => Tag::Luma,
        _ => Tag::Run,
      },
    }
  }

  /// Number of bytes, tag included, a chunk of this kind takes up.
  pub fn chunk_len(self) -> usize {
    match self {
      Tag::Index | Tag::Diff | Tag::Run => 1,
      Tag::Luma => 2,
      Tag::Rgb => 4,
      Tag::Rgba => 5,
    }
  }
}

/// An enumeration of each possible QOI encoding "chunk", or Op. Payloads are
/// kept unbiased, biases are only applied on the wire.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Op {
  // `QOI_OP_DIFF`, the red, green, and blue difference from the previous
  // pixel, each in -2..=1 and stored with a bias of +2.
  //
  // | 7 6   5  4  3  2  1  0 |
  // |------------------------|
  // | 0 1 |  dr |  dg |  db  |
  //
  Diff(i8, i8, i8),

  // `QOI_OP_INDEX`, index into the state's pixel cache.
  //
  // | 7 6   5  4  3  2  1  0 |
  // |------------------------|
  // | 0 0 |      index       |
  //
  Index(u8),

  // `QOI_OP_LUMA`, the green difference from the previous pixel followed by
  // the red-green and blue-green differences. The green difference has a
  // bias of +32, the other two a bias of +8.
  //
  // | 7 6   5  4  3  2  1  0 | 7  6  5  4   3  2  1  0 |
  // |------------------------|-------------------------|
  // | 1 0 |       dg         |   dr - dg  |   db - dg  |
  //
  Luma(i8, i8, i8),

  // `QOI_OP_RGB`, the red, green, and blue values of a pixel.
  //
  // | 7  6  5  4  3  2  1  0 | 7..0 | 7..0 | 7..0 |
  // |------------------------|------|------|------|
  // | 1  1  1  1  1  1  1  0 |   r  |   g  |   b  |
  //
  Rgb(u8, u8, u8),

  // `QOI_OP_RGBA`, the red, green, blue, and alpha values of a pixel.
  //
  // | 7  6  5  4  3  2  1  0 | 7..0 | 7..0 | 7..0 | 7..0 |
  // |------------------------|------|------|------|------|
  // | 1  1  1  1  1  1  1  1 |   r  |   g  |   b  |   a  |
  //
  Rgba(u8, u8, u8, u8),

  // `QOI_OP_RUN`, the length of the run, stored with a bias of -1.
  //
  // | 7 6   5  4  3  2  1  0 |
  // |------------------------|
  // | 1 1 |      run         |
  Run(u8),
}

impl Op {
  const MASK_DIFF: u8 = 0x03;
  const MASK_INDEX: u8 = 0x3f;
  const MASK_LUMA_1: u8 = 0x3f;
  const MASK_LUMA_2: u8 = 0x0f;
  const MASK_RUN: u8 = 0x3f;
  const MASK_TAG: u8 = 0xc0;

  const TAG_DIFF: u8 = 0x40;
  const TAG_INDEX: u8 = 0x00;
  const TAG_LUMA: u8 = 0x80;
  const TAG_RGB: u8 = 0xfe;
  const TAG_RGBA: u8 = 0xff;
  const TAG_RUN: u8 = 0xc0;

  const BIAS_DIFF: i8 = 2;
  const BIAS_LUMA_G: i8 = 32;
  const BIAS_LUMA_RB: i8 = 8;

  pub const DIFF_RANGE: RangeInclusive<i8> = -2..=1;
  pub const LUMA_G_RANGE: RangeInclusive<i8> = -32..=31;
  pub const LUMA_RB_RANGE: RangeInclusive<i8> = -8..=7;

  /// An index chunk for the given cache slot.
  pub fn index(slot: u8) -> Result<Op, Error> {
    if slot as usize >= QOI_CACHE_LEN {
      return Err(Error::InvalidIndex(slot));
    }

    Ok(Op::Index(slot))
  }

  /// A diff chunk for the given red, green, and blue differences.
  pub fn diff(diff_r: i8, diff_g: i8, diff_b: i8) -> Result<Op, Error> {
    let in_range = [diff_r, diff_g, diff_b]
      .iter()
      .all(|diff| Op::DIFF_RANGE.contains(diff));

    if !in_range {
      return Err(Error::InvalidDiff(diff_r, diff_g, diff_b));
    }

    Ok(Op::Diff(diff_r, diff_g, diff_b))
  }

  /// A luma chunk for the given red, green, and blue differences.
  pub fn luma(diff_r: i8, diff_g: i8, diff_b: i8) -> Result<Op, Error> {
    let luma_rg = i16::from(diff_r) - i16::from(diff_g);
    let luma_bg = i16::from(diff_b) - i16::from(diff_g);
    let rb_range = -8..=7;

    if !Op::LUMA_G_RANGE.contains(&diff_g)
      || !rb_range.contains(&luma_rg)
      || !rb_range.contains(&luma_bg)
    {
      return Err(Error::InvalidLuma(diff_r, diff_g, diff_b));
    }

    Ok(Op::Luma(diff_g, luma_rg as i8, luma_bg as i8))
  }

  /// A run chunk repeating the previous pixel `count` times.
  pub fn run(count: u8) -> Result<Op, Error> {
    if !(1..=QOI_MAX_RUN).contains(&count) {
      return Err(Error::InvalidRun(count));
    }

    Ok(Op::Run(count))
  }

  pub fn tag(&self) -> Tag {
    match self {
      Op::Diff(..) => Tag::Diff,
      Op::Index(_) => Tag::Index,
      Op::Luma(..) => Tag::Luma,
      Op::Rgb(..) => Tag::Rgb,
      Op::Rgba(..) => Tag::Rgba,
      Op::Run(_) => Tag::Run,
    }
  }

  /// Number of bytes the chunk takes up once encoded.
  pub fn encoded_len(&self) -> usize {
    self.tag().chunk_len()
  }

  /// Checks that the payload fits the chunk's bit fields, with the same
  /// ranges the constructors enforce.
  pub fn validate(&self) -> Result<(), Error> {
    match *self {
      Op::Diff(diff_r, diff_g, diff_b) => Op::diff(diff_r, diff_g, diff_b).map(|_| ()),
      Op::Index(index) => Op::index(index).map(|_| ()),
      Op::Luma(diff_g, luma_rg, luma_bg) => {
        let diff_r = luma_rg.wrapping_add(diff_g);
        let diff_b = luma_bg.wrapping_add(diff_g);

        Op::luma(diff_r, diff_g, diff_b).map(|_| ())
      }
      Op::Rgb(..) | Op::Rgba(..) => Ok(()),
      Op::Run(count) => Op::run(count).map(|_| ()),
    }
  }

  // Appends the encoded bytes to `out`. The payload must already be in range,
  // out of range fields would spill into the tag bits.
  pub(crate) fn write_to(&self, out: &mut Vec<u8>) {
    match *self {
      Op::Diff(diff_r, diff_g, diff_b) => {
        let r = biased(diff_r, Op::BIAS_DIFF);
        let g = biased(diff_g, Op::BIAS_DIFF);
        let b = biased(diff_b, Op::BIAS_DIFF);

        out.push(Op::TAG_DIFF | r << 4 | g << 2 | b);
      }
      Op::Index(index) => {
        out.push(Op::TAG_INDEX | index);
      }
      Op::Luma(diff_g, luma_rg, luma_bg) => {
        out.extend_from_slice(&[
          Op::TAG_LUMA | biased(diff_g, Op::BIAS_LUMA_G),
          biased(luma_rg, Op::BIAS_LUMA_RB) << 4 | biased(luma_bg, Op::BIAS_LUMA_RB),
        ]);
      }
      Op::Rgb(r, g, b) => {
        out.extend_from_slice(&[Op::TAG_RGB, r, g, b]);
      }
      Op::Rgba(r, g, b, a) => {
        out.extend_from_slice(&[Op::TAG_RGBA, r, g, b, a]);
      }
      Op::Run(run_count) => {
        out.push(Op::TAG_RUN | (run_count.wrapping_sub(1) & Op::MASK_RUN));
      }
    }
  }

  /// Encodes the `Op` into a fresh buffer. Fails when the payload does not
  /// fit the chunk, see [Op::validate].
  pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
    self.validate()?;

    let mut out = Vec::with_capacity(self.encoded_len());
    self.write_to(&mut out);
    Ok(out)
  }

  /// Attempts to decode the `Op` at the start of `bytes`. Trailing bytes
  /// are left alone, use `encoded_len` to advance past the chunk.
  pub fn read_from(bytes: &[u8]) -> Result<Op, Error> {
    let (&byte, rest) = bytes.split_first().ok_or(Error::UnexpectedEof)?;

    match Tag::of(byte) {
      Tag::Index => {
        Ok(Op::Index(byte & Op::MASK_INDEX))
      }
      Tag::Diff => {
        Ok(Op::Diff(
          unbiased(byte >> 4 & Op::MASK_DIFF, Op::BIAS_DIFF),
          unbiased(byte >> 2 & Op::MASK_DIFF, Op::BIAS_DIFF),
          unbiased(byte & Op::MASK_DIFF, Op::BIAS_DIFF),
        ))
      }
      Tag::Luma => {
        let next_byte = *rest.first().ok_or(Error::UnexpectedEof)?;

        Ok(Op::Luma(
          unbiased(byte & Op::MASK_LUMA_1, Op::BIAS_LUMA_G),
          unbiased(next_byte >> 4 & Op::MASK_LUMA_2, Op::BIAS_LUMA_RB),
          unbiased(next_byte & Op::MASK_LUMA_2, Op::BIAS_LUMA_RB),
        ))
      }
      Tag::Run => {
        Ok(Op::Run((byte & Op::MASK_RUN) + 1))
      }
      Tag::Rgb => match rest {
        [r, g, b, ..] => Ok(Op::Rgb(*r, *g, *b)),
        _ => Err(Error::UnexpectedEof),
      },
      Tag::Rgba => match rest {
        [r, g, b, a, ..] => Ok(Op::Rgba(*r, *g, *b, *a)),
        _ => Err(Error::UnexpectedEof),
      },
    }
  }
}

fn biased(value: i8, bias: i8) -> u8 {
  value.wrapping_add(bias) as u8
}

fn unbiased(field: u8, bias: i8) -> i8 {
  (field as i8).wrapping_sub(bias)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_tag_of() {
    assert_eq!(Tag::of(0x00), Tag::Index);
    assert_eq!(Tag::of(0x3f), Tag::Index);
    assert_eq!(Tag::of(0x40), Tag::Diff);
    assert_eq!(Tag::of(0x80), Tag::Luma);
    assert_eq!(Tag::of(0xc0), Tag::Run);
    assert_eq!(Tag::of(0xfd), Tag::Run);
    assert_eq!(Tag::of(0xfe), Tag::Rgb);
    assert_eq!(Tag::of(0xff), Tag::Rgba);
  }

  #[test]
  fn test_diff_bytes() {
    assert_eq!(Op::Diff(1, 1, 1).to_bytes(), Ok(vec![0x7f]));
    assert_eq!(Op::Diff(-2, -2, -2).to_bytes(), Ok(vec![0x40]));
    assert_eq!(Op::read_from(&[0x6a]), Ok(Op::Diff(0, 0, 0)));
  }

  #[test]
  fn test_luma_bytes() {
    // dg = 8, dr - dg = -8, db - dg = -8
    assert_eq!(Op::Luma(8, -8, -8).to_bytes(), Ok(vec![0x80 | 40, 0]));
    assert_eq!(Op::read_from(&[0x80 | 24, 0xff]), Ok(Op::Luma(-8, 7, 7)));
  }

  #[test]
  fn test_run_bytes() {
    assert_eq!(Op::Run(1).to_bytes(), Ok(vec![0xc0]));
    assert_eq!(Op::Run(62).to_bytes(), Ok(vec![0xfd]));
    assert_eq!(Op::read_from(&[0xfd]), Ok(Op::Run(62)));
  }

  #[test]
  fn test_read_ignores_trailing_bytes() {
    let bytes = [0xfe, 1, 2, 3, 0xc0];
    let op = Op::read_from(&bytes).expect("Failed to read op");

    assert_eq!(op, Op::Rgb(1, 2, 3));
    assert_eq!(op.encoded_len(), 4);
  }

  #[test]
  fn test_read_truncated_chunks() {
    assert_eq!(Op::read_from(&[]), Err(Error::UnexpectedEof));
    assert_eq!(Op::read_from(&[0x80]), Err(Error::UnexpectedEof));
    assert_eq!(Op::read_from(&[0xfe, 1, 2]), Err(Error::UnexpectedEof));
    assert_eq!(Op::read_from(&[0xff, 1, 2, 3]), Err(Error::UnexpectedEof));
  }

  #[test]
  fn test_constructors_validate() {
    assert_eq!(Op::index(63), Ok(Op::Index(63)));
    assert_eq!(Op::index(64), Err(Error::InvalidIndex(64)));
    assert_eq!(Op::diff(1, -2, 0), Ok(Op::Diff(1, -2, 0)));
    assert_eq!(Op::diff(2, 0, 0), Err(Error::InvalidDiff(2, 0, 0)));
    assert_eq!(Op::luma(2, 0, 0), Ok(Op::Luma(0, 2, 0)));
    assert_eq!(Op::luma(0, 32, 0), Err(Error::InvalidLuma(0, 32, 0)));
    assert_eq!(Op::luma(127, -32, 0), Err(Error::InvalidLuma(127, -32, 0)));
    assert_eq!(Op::run(0), Err(Error::InvalidRun(0)));
    assert_eq!(Op::run(63), Err(Error::InvalidRun(63)));
  }

  #[test]
  fn test_out_of_range_payloads_have_no_bytes() {
    // Unchecked, these would land on another chunk's tag.
    assert_eq!(Op::Run(63).to_bytes(), Err(Error::InvalidRun(63)));
    assert_eq!(Op::Run(0).to_bytes(), Err(Error::InvalidRun(0)));
    assert_eq!(Op::Index(64).to_bytes(), Err(Error::InvalidIndex(64)));
    assert_eq!(Op::Index(200).to_bytes(), Err(Error::InvalidIndex(200)));
    assert_eq!(Op::Diff(3, 3, 3).to_bytes(), Err(Error::InvalidDiff(3, 3, 3)));
    assert_eq!(Op::Luma(40, 0, 0).to_bytes(), Err(Error::InvalidLuma(40, 40, 40)));
    assert_eq!(Op::Luma(0, 8, 0).to_bytes(), Err(Error::InvalidLuma(8, 0, 0)));
    assert_eq!(Op::Rgba(1, 2, 3, 4).to_bytes(), Ok(vec![0xff, 1, 2, 3, 4]));
  }
}
