//! UTF-8 text, encoded as a run of bytes under the same length
//! conventions an array of `u8` would use. Decoding validates UTF-8 and
//! reports `Error::InvalidUtf8` at the start of the run if it doesn't
//! hold, rather than handing back raw bytes with no encoding applied.

use crate::bitstream::{BitReader, BitWriter};
use crate::constructs::array::{self, LengthEncoding};
use crate::context::EncodeContext;
use crate::result::{Error, Result};

fn validate(bytes: Vec<u8>, position: usize) -> Result<String> {
    String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8 { position })
}

/// A byte count already known from a sibling field or schema constant.
pub mod fixed {
    use super::*;

    pub fn encode(value: &str, out: &mut BitWriter) -> Result<()> {
        out.write_bytes(value.as_bytes());
        Ok(())
    }

    pub fn decode(byte_len: usize, input: &mut BitReader) -> Result<String> {
        let position = input.position();
        validate(input.read_bytes(byte_len)?, position)
    }

    pub fn encoded_size(value: &str) -> usize {
        value.len()
    }
}

/// The string carries its own byte-length prefix.
pub mod length_prefixed {
    use super::*;

    pub fn encode(value: &str, length_encoding: LengthEncoding, ctx: &EncodeContext, out: &mut BitWriter) -> Result<()> {
        array::length_prefixed::encode(value.as_bytes(), length_encoding, ctx, out)
    }

    pub fn decode(length_encoding: LengthEncoding, input: &mut BitReader) -> Result<String> {
        let position = input.position();
        let bytes: Vec<u8> = array::length_prefixed::decode(length_encoding, input)?;
        validate(bytes, position)
    }

    pub fn encoded_size(value: &str, length_encoding: LengthEncoding, ctx: &EncodeContext) -> usize {
        array::length_prefixed::encoded_size(value.as_bytes(), length_encoding, ctx)
    }
}
