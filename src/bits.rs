pub const BITS_PER_BYTE: usize = 8;

/// Iterator over fixed-size chunks of a bit string.
///
/// Yields non-overlapping substrings of `chunk_size` characters, left to
/// right. The final chunk is shorter when the string length is not a
/// multiple of the chunk size; an empty trailing chunk is never produced.
///
/// With a chunk size of 8 each chunk holds one byte's worth of bits.
#[derive(Debug, Clone)]
pub struct BitChunks<'a> {
    value: &'a str,
    chunk_size: usize,
    position: usize,
}

impl<'a> BitChunks<'a> {
    /// Creates a chunking iterator over `value`.
    ///
    /// `chunk_size` must be greater than zero.
    pub fn new(value: &'a str, chunk_size: usize) -> Self {
        debug_assert!(chunk_size > 0, "chunk size must be greater than zero");
        BitChunks {
            value,
            chunk_size,
            position: 0,
        }
    }
}

impl<'a> Iterator for BitChunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let remaining = self.value.len() - self.position;
        if remaining == 0 {
            return None;
        }
        let size = remaining.min(self.chunk_size);
        let chunk = &self.value[self.position..self.position + size];
        self.position += size;
        Some(chunk)
    }
}

/// Converts bytes to a bit string, most-significant bit first.
pub fn bytes_to_bits(data: &[u8]) -> String {
    let mut bits = String::with_capacity(data.len() * BITS_PER_BYTE);
    for &byte in data {
        for shift in (0..BITS_PER_BYTE).rev() {
            bits.push(if byte >> shift & 1 == 1 { '1' } else { '0' });
        }
    }
    bits
}

/// Converts a bit string back to bytes.
///
/// Returns `None` when the length is not a multiple of 8 or a chunk fails
/// to parse as a binary number.
pub fn bits_to_bytes(bits: &str) -> Option<Vec<u8>> {
    if bits.len() % BITS_PER_BYTE != 0 {
        return None;
    }
    BitChunks::new(bits, BITS_PER_BYTE)
        .map(|chunk| u8::from_str_radix(chunk, 2).ok())
        .collect()
}
