//! The five array kinds: `fixed` (a compile-time constant count),
//! `field_referenced` (the count was already decoded as a sibling
//! field), `computed_count` (the count comes from a computed
//! expression), `length_prefixed` (this array writes its own item
//! count), and `byte_length_prefixed`/`terminated` (the array's extent
//! is signalled some other way than an item count).
//!
//! `field_referenced` and `computed_count` are mechanically identical
//! to `fixed` from this module's point of view — the only difference
//! is *where* the generated code got the count from — so they are
//! thin re-exports rather than separate implementations.

use crate::bitstream::{BitReader, BitWriter};
use crate::context::EncodeContext;
use crate::result::{Error, Result};
use crate::varint::VarintEncoding;
use crate::{Decode, Encode, EncodedSize};

/// How a `length_prefixed` array's own count is written on the wire.
#[derive(Debug, Clone, Copy)]
pub enum LengthEncoding {
    Fixed8,
    Fixed16(crate::bitstream::Endianness),
    Fixed32(crate::bitstream::Endianness),
    Varint(VarintEncoding),
}

fn write_length(len: usize, encoding: LengthEncoding, out: &mut BitWriter) -> Result<()> {
    match encoding {
        LengthEncoding::Fixed8 => {
            let len_u8 = u8::try_from(len).map_err(|_| Error::invalid_value(format!("length {} does not fit in 8 bits", len)))?;
            out.write_uint8(len_u8);
        }
        LengthEncoding::Fixed16(endian) => {
            let len_u16 = u16::try_from(len).map_err(|_| Error::invalid_value(format!("length {} does not fit in 16 bits", len)))?;
            out.write_uint16(len_u16, endian);
        }
        LengthEncoding::Fixed32(endian) => {
            let len_u32 = u32::try_from(len).map_err(|_| Error::invalid_value(format!("length {} does not fit in 32 bits", len)))?;
            out.write_uint32(len_u32, endian);
        }
        LengthEncoding::Varint(varint) => out.write_varint(len as u64, varint)?,
    }
    Ok(())
}

fn read_length(encoding: LengthEncoding, input: &mut BitReader) -> Result<usize> {
    Ok(match encoding {
        LengthEncoding::Fixed8 => input.read_uint8()? as usize,
        LengthEncoding::Fixed16(endian) => input.read_uint16(endian)? as usize,
        LengthEncoding::Fixed32(endian) => input.read_uint32(endian)? as usize,
        LengthEncoding::Varint(varint) => input.read_varint(varint)? as usize,
    })
}

/// A count known ahead of time, either a schema constant or a value
/// already available from a sibling field or computed expression.
pub mod fixed {
    use super::*;

    pub fn encode<A: Encode>(items: &[A], ctx: &EncodeContext, out: &mut BitWriter) -> Result<()> {
        for item in items {
            item.encode(ctx, out)?;
        }
        Ok(())
    }

    pub fn decode<A: Decode>(count: usize, input: &mut BitReader) -> Result<Vec<A>> {
        (0..count).map(|_| A::decode(input)).collect()
    }

    pub fn encoded_size<A: EncodedSize>(items: &[A], ctx: &EncodeContext) -> usize {
        items.iter().map(|item| item.encoded_size(ctx)).sum()
    }
}

pub mod field_referenced {
    pub use super::fixed::{decode, encode, encoded_size};
}

pub mod computed_count {
    pub use super::fixed::{decode, encode, encoded_size};
}

pub mod length_prefixed {
    use super::*;

    pub fn encode<A: Encode>(items: &[A], length_encoding: LengthEncoding, ctx: &EncodeContext, out: &mut BitWriter) -> Result<()> {
        write_length(items.len(), length_encoding, out)?;
        super::fixed::encode(items, ctx, out)
    }

    pub fn decode<A: Decode>(length_encoding: LengthEncoding, input: &mut BitReader) -> Result<Vec<A>> {
        let count = read_length(length_encoding, input)?;
        super::fixed::decode(count, input)
    }

    pub fn encoded_size<A: EncodedSize>(items: &[A], length_encoding: LengthEncoding, ctx: &EncodeContext) -> usize {
        let length_width = match length_encoding {
            LengthEncoding::Fixed8 => 1,
            LengthEncoding::Fixed16(_) => 2,
            LengthEncoding::Fixed32(_) => 4,
            LengthEncoding::Varint(_) => 0, // variable; callers needing an exact size must encode and measure
        };
        length_width + super::fixed::encoded_size(items, ctx)
    }
}

/// The length prefix is a byte span rather than an item count; decode
/// keeps pulling items until that many bytes have been consumed.
pub mod byte_length_prefixed {
    use super::*;

    pub fn encode<A: Encode>(items: &[A], length_encoding: LengthEncoding, ctx: &EncodeContext, out: &mut BitWriter) -> Result<()> {
        let mut scratch = BitWriter::new(out.bit_order());
        super::fixed::encode(items, ctx, &mut scratch)?;
        let body = scratch.finish();
        write_length(body.len(), length_encoding, out)?;
        out.write_bytes(&body);
        Ok(())
    }

    pub fn decode<A: Decode>(length_encoding: LengthEncoding, input: &mut BitReader) -> Result<Vec<A>> {
        let byte_span = read_length(length_encoding, input)?;
        let start = input.position();
        let end = start + byte_span;
        let mut items = Vec::new();
        while input.position() < end {
            items.push(A::decode(input)?);
        }
        if input.position() != end {
            return Err(Error::invalid_value(format!(
                "byte-length-prefixed array overran its span: expected to land at {}, landed at {}",
                end,
                input.position()
            )));
        }
        Ok(items)
    }
}

/// The array ends when the decoder sees a reserved terminator value,
/// rather than carrying its own count. `terminated::null` covers the
/// common single-byte-terminator case (e.g. a null-terminated domain
/// name label run); `terminated::variant` covers the case where the
/// terminal condition is "the last decoded item was itself a terminal
/// variant" (e.g. a compressed-label pointer that ends the run).
pub mod terminated {
    use super::*;

    pub mod null {
        use super::*;

        pub fn encode<A: Encode>(items: &[A], terminator: u8, ctx: &EncodeContext, out: &mut BitWriter) -> Result<()> {
            super::super::fixed::encode(items, ctx, out)?;
            out.write_uint8(terminator);
            Ok(())
        }

        pub fn decode<A: Decode>(terminator: u8, input: &mut BitReader) -> Result<Vec<A>> {
            let mut items = Vec::new();
            loop {
                if input.peek_uint8()? == terminator {
                    input.read_uint8()?;
                    break;
                }
                items.push(A::decode(input)?);
            }
            Ok(items)
        }
    }

    pub mod variant {
        use super::*;

        /// Encodes every item; the caller is responsible for having
        /// made the last item's own encoding self-terminating (e.g. a
        /// compressed-label pointer variant that needs no trailing
        /// marker).
        pub fn encode<A: Encode>(items: &[A], ctx: &EncodeContext, out: &mut BitWriter) -> Result<()> {
            super::super::fixed::encode(items, ctx, out)
        }

        /// Decodes items until `is_terminal` reports the most recently
        /// decoded item ends the run.
        pub fn decode<A: Decode>(input: &mut BitReader, is_terminal: impl Fn(&A) -> bool) -> Result<Vec<A>> {
            let mut items = Vec::new();
            loop {
                let item = A::decode(input)?;
                let terminal = is_terminal(&item);
                items.push(item);
                if terminal {
                    break;
                }
            }
            Ok(items)
        }
    }
}
