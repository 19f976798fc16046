use qoi_codec::{
  encode_file, encode_raw, encode_stream, Channels, Colorspace, Error, Image, ImageMeta,
  QOI_BYTES_END, QOI_HEADER_LEN,
};

// Opaque black in the alpha, red, green, blue channel order.
const OPAQUE_BLACK: [u8; 4] = [255, 0, 0, 0];

#[test]
fn test_encoding_two_pixel_run_image() {
  let image = Image::new(vec![vec![0x0000_00ff, 0x0000_00ff]], Channels::Rgb, Colorspace::Srgb)
    .expect("Failed to create image");

  let encoded = encode_file(&image).expect("Failed to encode image");

  assert_eq!(
    encoded,
    vec![
      b'q', b'o', b'i', b'f', // Magic bytes
      0, 0, 0, 2, // Width
      0, 0, 0, 1, // Height
      3, 0, // Channels, colorspace
      0xc1, // Op::Run(2)
      0, 0, 0, 0, 0, 0, 0, 1, // End marker
    ]
  );
}

#[test]
fn test_encoding_max_run() {
  assert_eq!(encode_stream(&[OPAQUE_BLACK; 62]), vec![0xfd]);
}

#[test]
fn test_encoding_run_past_max() {
  assert_eq!(encode_stream(&[OPAQUE_BLACK; 63]), vec![0xfd, 0xc0]);
  assert_eq!(encode_stream(&[OPAQUE_BLACK; 124]), vec![0xfd, 0xfd]);
}

#[test]
fn test_encoding_diff_boundaries() {
  let prev = [255, 100, 100, 100];

  // (1, 1, 1) fits a diff chunk.
  assert_eq!(
    encode_stream(&[prev, [255, 101, 101, 101]])[4..],
    [0x7f]
  );

  // (2, 0, 0) does not, it becomes a luma chunk.
  assert_eq!(
    encode_stream(&[prev, [255, 102, 100, 100]])[4..],
    [0x80 | 32, 10 << 4 | 8]
  );
}

#[test]
fn test_encoding_alpha_change() {
  let encoded = encode_stream(&[[255, 100, 2, 3], [128, 100, 2, 3], [128, 200, 2, 3]]);

  assert_eq!(
    encoded,
    vec![
      0xfe, 100, 2, 3, // Op::Rgb(100, 2, 3)
      0xff, 100, 2, 3, 128, // Op::Rgba(100, 2, 3, 128)
      0xfe, 200, 2, 3, // Op::Rgb(200, 2, 3), alpha carries over
    ]
  );
}

#[test]
fn test_encoding_image_framing() {
  let pixels = (0..16u32)
    .map(|y| (0..16u32).map(|x| (x * 16) << 24 | (y * 16) << 16 | 0xff).collect::<Vec<u32>>())
    .collect();

  let image = Image::new(pixels, Channels::Rgba, Colorspace::Linear)
    .expect("Failed to create image");
  let encoded = encode_file(&image).expect("Failed to encode image");

  assert_eq!(&encoded[..4], b"qoif");
  assert_eq!(&encoded[4..QOI_HEADER_LEN], &[0, 0, 0, 16, 0, 0, 0, 16, 4, 1]);
  assert_eq!(&encoded[encoded.len() - 8..], &QOI_BYTES_END);
}

#[test]
fn test_encoding_blank_raw_image() {
  let result = encode_raw(
    &[],
    &ImageMeta {
      width: 0,
      height: 0,
      channels: Channels::Rgba,
      colorspace: Colorspace::Srgb,
    },
  );

  assert_eq!(result, Err(Error::InvalidDimensions));
}

#[test]
fn test_encoding_raw_image_with_bad_dimensions() {
  let source = [101, 102, 103];

  let result = encode_raw(
    &source,
    &ImageMeta {
      width: 999,
      height: 1,
      channels: Channels::Rgba,
      colorspace: Colorspace::Srgb,
    },
  );

  assert_eq!(result, Err(Error::InvalidLength { expected: 3996, found: 3 }));
}

#[test]
fn test_encoding_raw_matches_image() {
  let raw = [10, 20, 30, 40, 10, 20, 30, 40, 50, 60, 70, 80];
  let meta = ImageMeta {
    width: 3,
    height: 1,
    channels: Channels::Rgba,
    colorspace: Colorspace::Srgb,
  };
  let image = Image::new(
    vec![vec![0x0a14_1e28, 0x0a14_1e28, 0x323c_4650]],
    Channels::Rgba,
    Colorspace::Srgb,
  )
  .expect("Failed to create image");

  assert_eq!(encode_raw(&raw, &meta), encode_file(&image));
}
