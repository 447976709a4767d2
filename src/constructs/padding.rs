//! Zero-fill alignment padding: advances the stream to the next
//! multiple of `align_to` bytes, first rounding up to a byte boundary
//! if the stream is mid-byte.

use crate::bitstream::{BitReader, BitWriter};
use crate::result::{Error, Result};

pub fn encode(out: &mut BitWriter, align_to: usize) -> Result<()> {
    if align_to == 0 {
        return Err(Error::invalid_value("padding alignment must be nonzero"));
    }
    if !out.is_aligned() {
        out.write_bits(0, 8 - out.bit_position())?;
    }
    let remainder = out.byte_offset() % align_to;
    if remainder != 0 {
        out.write_bytes(&vec![0u8; align_to - remainder]);
    }
    Ok(())
}

pub fn decode(input: &mut BitReader, align_to: usize) -> Result<()> {
    if align_to == 0 {
        return Err(Error::invalid_value("padding alignment must be nonzero"));
    }
    if !input.is_aligned() {
        input.read_bits(8 - input.bit_offset())?;
    }
    let remainder = input.position() % align_to;
    if remainder != 0 {
        input.read_bytes(align_to - remainder)?;
    }
    Ok(())
}
