use log::debug;

use crate::error::Error;

/// Bit width of every masked field we decode
pub const MASK_WIDTH: u8 = 32;

/// Number of bits set to 1 in `mask`.
pub fn count_set_bits(mask: u32) -> u32 {
    let mut mask = mask;
    let mut count = 0;
    while mask != 0 {
        count += mask & 1;
        mask >>= 1;
    }
    count
}

/// Returns the position (bit index, 0 = LSB) of all bits set in `mask`,
/// in ascending order. The full [MASK_WIDTH] is always scanned.
/// When `expected` is provided, it must match the number of bits found,
/// otherwise the input is considered corrupt.
pub fn find_all_set_bits(mask: u32, expected: Option<u32>) -> Result<Vec<u8>, Error> {
    let mut positions = Vec::with_capacity(MASK_WIDTH as usize);

    for pos in 0..MASK_WIDTH {
        if mask & (1 << pos) != 0 {
            positions.push(pos);
        }
    }

    if let Some(expected) = expected {
        let found = positions.len() as u32;
        if found != expected {
            debug!("mask {:#034b} - expected {} bits, found {}", mask, expected, found);
            return Err(Error::InconsistentBitCount { expected, found });
        }
    }

    Ok(positions)
}
