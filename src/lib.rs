//! Runtime engine for a schema-driven binary codec.
//!
//! This crate does not parse schemas or generate code; it is the
//! runtime the generated code is written against: a bit-level stream
//! pair ([`bitstream::BitWriter`]/[`bitstream::BitReader`]), an encode
//! context threading parent-field lookups, array iteration state, and
//! a back-reference compression dictionary ([`context::EncodeContext`]),
//! and the composition rules ([`constructs`]) by which a schema's type
//! constructors combine them.
//!
//! Every constructor is written against the three traits below rather
//! than a concrete field type, since the field types themselves come
//! from an external code generator this crate does not own.

pub mod bitstream;
pub mod constructs;
pub mod context;
pub mod result;
pub mod varint;

pub use bitstream::{BigEndian, BitOrder, BitReader, BitWriter, Endianness, LittleEndian};
pub use context::{EncodeContext, FieldValue, IntoFieldValue};
pub use result::{Error, Result};
pub use varint::VarintEncoding;

/// Encodes `self` onto a [`BitWriter`], given the context threaded down
/// from the root of the value being built.
pub trait Encode {
    fn encode(&self, ctx: &EncodeContext, out: &mut BitWriter) -> Result<()>;
}

/// Decodes a `Self` off a [`BitReader`]. Unlike [`Encode`], decoding
/// does not need an [`EncodeContext`]: a back-reference's dictionary
/// and base offset are implicit in the decoder's absolute byte
/// position, and a decoded sibling's value is available to later
/// fields through the decoded struct itself rather than through a
/// parallel context.
pub trait Decode: Sized {
    fn decode(input: &mut BitReader) -> Result<Self>;
}

/// Reports how many bytes `self` would occupy if encoded now, given
/// the same context an actual `encode` call would see. Used by
/// `byte_length_prefixed` arrays and computed-size expressions without
/// requiring a throwaway encode pass.
pub trait EncodedSize {
    fn encoded_size(&self, ctx: &EncodeContext) -> usize;
}
