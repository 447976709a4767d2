//! Back-reference compression, modeled on DNS message-compression
//! pointers: a value that has already been written once earlier in the
//! stream is replaced by a token pointing back at that earlier
//! occurrence instead of being written inline again.
//!
//! Encoding is speculative: the value is encoded into a scratch buffer
//! first, and only emitted as a token if its exact encoded bytes are
//! already in the dictionary. Decoding a token seeks to the recorded
//! offset, decodes the value there, and seeks back — the reader's
//! cheap position save/restore (`BitReader::seek`/`position`) is what
//! makes that affordable.

use crate::bitstream::{BitOrder, BitReader, BitWriter};
use crate::context::EncodeContext;
use crate::result::{Error, Result};
use crate::{Decode, Encode, EncodedSize};

/// Describes how a reference token is distinguished from an inline
/// value and how the offset is packed into it. DNS compression uses
/// `token_bits = 16`, `tag_bits = 0xC000`, `offset_mask = 0x3FFF`.
#[derive(Debug, Clone, Copy)]
pub struct BackrefFormat {
    pub token_bits: u8,
    pub tag_bits: u64,
    pub offset_mask: u64,
}

impl BackrefFormat {
    /// The classic two-byte DNS compression pointer: top two bits set,
    /// low 14 bits carry the offset.
    pub const DNS: BackrefFormat = BackrefFormat { token_bits: 16, tag_bits: 0xC000, offset_mask: 0x3FFF };

    /// Whether the first byte alone — where the tag bits live — signals a
    /// reference token, without needing the rest of the token in hand.
    fn first_byte_looks_like_token(&self, first_byte: u8) -> bool {
        let shift = self.token_bits as u32 - 8;
        let byte_mask = (!self.offset_mask >> shift) as u8;
        let byte_tag = (self.tag_bits >> shift) as u8;
        first_byte & byte_mask == byte_tag
    }
}

pub fn encode<A: Encode + EncodedSize>(
    value: &A,
    format: &BackrefFormat,
    ctx: &EncodeContext,
    out: &mut BitWriter,
) -> Result<()> {
    let mut scratch = BitWriter::new(out.bit_order());
    value.encode(ctx, &mut scratch)?;
    let inline_bytes = scratch.finish();

    if let Some(dict) = ctx.compression_dict() {
        let existing_offset = dict.borrow().get(&inline_bytes).copied();
        if let Some(offset) = existing_offset {
            if offset as u64 > format.offset_mask {
                // Too far back to address with this token width; fall through to inline.
            } else {
                let token = format.tag_bits | (offset as u64 & format.offset_mask);
                out.write_bits(token, format.token_bits)?;
                return Ok(());
            }
        }
        dict.borrow_mut().entry(inline_bytes.clone()).or_insert(ctx.base_offset() + out.byte_offset());
    }

    out.write_bytes(&inline_bytes);
    Ok(())
}

pub fn decode<A: Decode>(input: &mut BitReader, format: &BackrefFormat) -> Result<A> {
    let start = input.position();
    // Disambiguate on the first byte alone (its top bits carry the tag):
    // peeking the full token width would overread and reject an inline
    // value shorter than `token_bits` sitting within one byte of the end.
    let looks_like_token = input.is_aligned() && input.remaining() > 0 && {
        let first_byte = input.peek_uint8()?;
        format.first_byte_looks_like_token(first_byte)
    };

    if !looks_like_token {
        return A::decode(input);
    }

    let token = input.read_bits(format.token_bits)?;
    let offset = (token & format.offset_mask) as usize;

    // A pointer must point strictly backward; one that targets itself
    // or anything at or after its own position would make the decoder
    // loop forever chasing it, so this is treated as malformed input
    // rather than followed.
    if offset >= start {
        return Err(Error::invalid_value(format!(
            "back-reference at byte {} points forward or at itself (offset {})",
            start, offset
        )));
    }

    let resume = input.position();
    input.seek(offset)?;
    let value = A::decode(input)?;
    input.seek(resume)?;
    Ok(value)
}

/// Helper for scratch-encoding a value with a chosen bit order, used
/// when comparing candidate encodings against the compression
/// dictionary independent of the outer stream's configuration.
pub fn encode_standalone<A: Encode>(value: &A, bit_order: BitOrder, ctx: &EncodeContext) -> Result<Vec<u8>> {
    let mut scratch = BitWriter::new(bit_order);
    value.encode(ctx, &mut scratch)?;
    Ok(scratch.finish())
}
