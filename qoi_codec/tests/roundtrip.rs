use proptest::prelude::*;
use qoi_codec::bytes::{channels_to_image, from_u32_be, image_to_channels, to_u32_be};
use qoi_codec::{
  build_header, decode_file, decode_raw, decode_stream, encode_file, encode_raw, encode_stream,
  parse_header, Channels, Colorspace, Image, ImageMeta,
};

// Packed pixels drawn mostly from a small palette and small steps, so the
// streams exercise runs, cache hits, diffs, and lumas as well as full chunks.
fn packed_pixel() -> impl Strategy<Value = u32> {
  prop_oneof![
    4 => Just(0x0000_00ff),
    4 => prop::sample::select(vec![0x1020_30ff, 0xffff_ffff, 0x8040_2080, 0x0000_0000]),
    4 => (0u32..4, 0u32..4, 0u32..4).prop_map(|(r, g, b)| r << 24 | g << 16 | b << 8 | 0xff),
    2 => (0u32..40, 0u32..40).prop_map(|(r, g)| (0x80 + r) << 24 | (0x80 + g) << 16 | 0x80ff),
    3 => any::<u32>(),
  ]
}

fn channels() -> impl Strategy<Value = Channels> {
  prop_oneof![Just(Channels::Rgb), Just(Channels::Rgba)]
}

fn colorspace() -> impl Strategy<Value = Colorspace> {
  prop_oneof![Just(Colorspace::Srgb), Just(Colorspace::Linear)]
}

fn image() -> impl Strategy<Value = Image> {
  (1usize..24, 1usize..24, channels(), colorspace()).prop_flat_map(
    |(width, height, channels, colorspace)| {
      prop::collection::vec(prop::collection::vec(packed_pixel(), width), height).prop_map(
        move |pixels| Image::new(pixels, channels, colorspace).expect("Generated a ragged image"),
      )
    },
  )
}

proptest! {
  #[test]
  fn image_round_trips(image in image()) {
    let encoded = encode_file(&image).expect("Failed to encode image");

    prop_assert_eq!(decode_file(&encoded), Ok(image));
  }

  #[test]
  fn re_encoding_is_canonical(image in image()) {
    let encoded = encode_file(&image).expect("Failed to encode image");
    let decoded = decode_file(&encoded).expect("Failed to decode image");

    prop_assert_eq!(encode_file(&decoded), Ok(encoded));
  }

  #[test]
  fn stream_round_trips(pixels in prop::collection::vec(packed_pixel(), 1..300)) {
    let channels = image_to_channels(&[pixels.clone()]).expect("Failed to reformat pixels");
    let stream = encode_stream(&channels);

    prop_assert_eq!(decode_stream(&stream, pixels.len() as u32, 1), Ok(channels));
  }

  #[test]
  fn header_round_trips(
    width in any::<u32>(),
    height in any::<u32>(),
    channels in channels(),
    colorspace in colorspace()
  ) {
    let meta = ImageMeta { width, height, channels, colorspace };

    prop_assert_eq!(parse_header(&build_header(&meta)), Ok(meta));
  }

  #[test]
  fn u32_round_trips(value in any::<u32>()) {
    prop_assert_eq!(to_u32_be(&from_u32_be(value)), Ok(value));
  }

  #[test]
  fn channel_layout_round_trips(pixels in prop::collection::vec(any::<u32>(), 12)) {
    let grid: Vec<Vec<u32>> = pixels.chunks(4).map(<[u32]>::to_vec).collect();
    let channels = image_to_channels(&grid).expect("Failed to reformat pixels");

    prop_assert_eq!(channels_to_image(&channels, 3, 4), Ok(grid));
  }

  #[test]
  fn raw_rgba_round_trips(data in prop::collection::vec(any::<u8>(), 4 * 35)) {
    let meta = ImageMeta {
      width: 5,
      height: 7,
      channels: Channels::Rgba,
      colorspace: Colorspace::Srgb,
    };
    let encoded = encode_raw(&data, &meta).expect("Failed to encode image");

    prop_assert_eq!(decode_raw(&encoded), Ok((meta, data)));
  }
}
