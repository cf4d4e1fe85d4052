//! # Response Padding
//!
//! Execute answers are padded with trailing spaces so that every operation,
//! successful or not, produces a body of the same length. Trailing
//! whitespace is insignificant to JSON parsers.

/// Pad `message` with spaces up to the next multiple of `block_size`.
///
/// Bodies already on a block boundary (including the empty body) are left
/// as they are. A zero block size disables padding.
pub fn space_pad(message: &mut Vec<u8>, block_size: usize) {
    if block_size == 0 {
        return;
    }
    let surplus = message.len() % block_size;
    if surplus == 0 {
        return;
    }
    let missing = block_size - surplus;
    message.reserve(missing);
    message.extend(std::iter::repeat(b' ').take(missing));
}

/// Length `len` bytes occupy once padded.
#[must_use]
pub fn padded_len(len: usize, block_size: usize) -> usize {
    if block_size == 0 {
        return len;
    }
    len.div_ceil(block_size) * block_size
}
