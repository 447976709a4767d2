//! A field whose value is fixed by the schema rather than supplied by
//! the caller: encoding always writes the declared constant, decoding
//! reads a value off the wire and rejects it if it doesn't match.

use std::fmt::Debug;

use crate::bitstream::{BitReader, BitWriter};
use crate::context::EncodeContext;
use crate::result::{Error, Result};
use crate::{Decode, Encode};

pub fn encode<A: Encode>(value: &A, ctx: &EncodeContext, out: &mut BitWriter) -> Result<()> {
    value.encode(ctx, out)
}

pub fn decode<A: Decode + PartialEq + Debug>(expected: &A, input: &mut BitReader) -> Result<A> {
    let position = input.position();
    let actual = A::decode(input)?;
    if &actual != expected {
        return Err(Error::invalid_value(format!(
            "const field at byte {}: expected {:?}, found {:?}",
            position, expected, actual
        )));
    }
    Ok(actual)
}
