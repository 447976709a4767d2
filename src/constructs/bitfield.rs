//! A fixed-width integer presented to the schema as a set of named
//! sub-fields, each an `(offset, size)` pair in bits. The wire form is
//! a single integer of the declared width, sub-fields packed MSB-first
//! within it, matching the way the reference DNS header flags field
//! composes its sub-fields by writing each one's bits in turn.

use crate::bitstream::{BitReader, BitWriter};
use crate::result::Result;

/// Describes one named sub-field's position within the packed integer.
#[derive(Debug, Clone, Copy)]
pub struct Subfield {
    pub name: &'static str,
    pub offset: u32,
    pub size: u32,
}

fn mask(size: u32) -> u64 {
    if size >= 64 {
        u64::MAX
    } else {
        (1u64 << size) - 1
    }
}

/// Packs `(subfield, value)` pairs into the aggregate raw integer.
pub fn pack(subfields: &[(Subfield, u64)]) -> u64 {
    subfields.iter().fold(0u64, |raw, (spec, value)| raw | ((value & mask(spec.size)) << spec.offset))
}

/// Extracts one sub-field's value out of the aggregate raw integer.
pub fn unpack(raw: u64, spec: &Subfield) -> u64 {
    (raw >> spec.offset) & mask(spec.size)
}

pub fn encode(raw: u64, width_bits: u32, out: &mut BitWriter) -> Result<()> {
    out.write_bits(raw, width_bits as u8)
}

pub fn decode(width_bits: u32, input: &mut BitReader) -> Result<u64> {
    input.read_bits(width_bits as u8)
}
