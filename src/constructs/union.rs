//! Discriminated unions and inline choices.
//!
//! A discriminated union reads a scalar discriminator up front and
//! dispatches to the matching variant; that dispatch is a `match`
//! generated code writes per schema (this crate does not own the
//! variant type), so this module's job is the bit around the match:
//! reading/writing the discriminator itself and constructing a
//! consistent error when no arm matches.
//!
//! An inline choice has no discriminator at all — the decoder tries
//! each variant in schema order and keeps the first one that decodes
//! without error, restoring its position between attempts via
//! `BitReader::try_decode`.

use crate::bitstream::BitReader;
use crate::result::Error;

/// Builds the error for a discriminator value with no matching variant.
pub fn unknown_discriminator(discriminator: impl std::fmt::Display, position: usize) -> Error {
    Error::InvalidVariant { discriminator: discriminator.to_string(), position }
}

pub mod inline_choice {
    use super::*;
    use crate::result::Result;

    /// Tries each decode attempt in order, keeping the first success
    /// and restoring the reader's position after every failure. Returns
    /// `InvalidValue` if every attempt fails, naming the position where
    /// the choice began.
    pub fn decode<A>(input: &mut BitReader, attempts: &[&dyn Fn(&mut BitReader) -> Result<A>]) -> Result<A> {
        let start = input.position();
        for attempt in attempts {
            if let Some(value) = input.try_decode(|r| attempt(r)) {
                return Ok(value);
            }
        }
        Err(Error::invalid_value(format!("no inline choice variant matched at byte {}", start)))
    }
}
