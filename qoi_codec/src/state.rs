use crate::meta::QOI_CACHE_LEN;
use crate::pixel::Pixel;

// The cache and previous pixel shared, by replay, between an encoder and a
// decoder. Owned by a single encode or decode call.
pub struct State {
  // A cache of previously seen pixels, indexed by their hash value % 64.
  pub cache: [Pixel; QOI_CACHE_LEN],
  // The previously decoded/encoded pixel.
  pub prev_pixel: Pixel,
  // Length of the current run (Op::Run) (if any). Only the encoder uses it.
  pub run_count: u8,
}

impl State {
  pub fn new() -> Self {
    Self {
      cache: [Pixel::ZERO; QOI_CACHE_LEN],
      prev_pixel: Pixel::default(),
      run_count: 0,
    }
  }

  // Inserts the given pixel into the cache. Overwrites any pixel that was
  // previously cached at the computed index.
  pub fn cache_insert(&mut self, pixel: Pixel) {
    self.cache[pixel.cache_slot() as usize] = pixel;
  }

  // Checks if the given pixel matches the cached pixel at the computed index
  // and returns the index. If there is no match, the given pixel is inserted,
  // overwriting the pixel that was previously cached, and the index is not
  // returned.
  pub fn cache_match_or_replace(&mut self, pixel: Pixel) -> Option<u8> {
    let slot = pixel.cache_slot();

    if self.cache[slot as usize] == pixel {
      return Some(slot);
    }

    self.cache[slot as usize] = pixel;

    None
  }
}
