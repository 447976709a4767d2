//! A value preceded by a presence marker, either a single bit or a
//! whole byte depending on how the schema declares it.

use crate::bitstream::{BitReader, BitWriter};
use crate::context::EncodeContext;
use crate::result::Result;
use crate::{Decode, Encode, EncodedSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Bit,
    Byte,
}

fn write_presence(present: bool, presence: Presence, out: &mut BitWriter) -> Result<()> {
    match presence {
        Presence::Bit => out.write_bits(if present { 1 } else { 0 }, 1),
        Presence::Byte => {
            out.write_uint8(if present { 1 } else { 0 });
            Ok(())
        }
    }
}

fn read_presence(presence: Presence, input: &mut BitReader) -> Result<bool> {
    Ok(match presence {
        Presence::Bit => input.read_bits(1)? != 0,
        Presence::Byte => input.read_uint8()? != 0,
    })
}

pub fn encode<A: Encode>(value: Option<&A>, presence: Presence, ctx: &EncodeContext, out: &mut BitWriter) -> Result<()> {
    write_presence(value.is_some(), presence, out)?;
    if let Some(inner) = value {
        inner.encode(ctx, out)?;
    }
    Ok(())
}

pub fn decode<A: Decode>(presence: Presence, input: &mut BitReader) -> Result<Option<A>> {
    if read_presence(presence, input)? {
        Ok(Some(A::decode(input)?))
    } else {
        Ok(None)
    }
}

pub fn encoded_size<A: EncodedSize>(value: Option<&A>, presence: Presence, ctx: &EncodeContext) -> usize {
    let marker = match presence {
        Presence::Bit => 0, // sub-byte; caller accounts for it alongside sibling bits
        Presence::Byte => 1,
    };
    marker + value.map_or(0, |inner| inner.encoded_size(ctx))
}
