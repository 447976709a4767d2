//! Type constructors: the composition rules a schema's generated code
//! calls to combine the bitstream primitives and `EncodeContext` into
//! round-trippable values. Each submodule is free functions generic
//! over `A: Encode + Decode + EncodedSize` rather than a wrapper type,
//! since the concrete field types are produced by an external
//! generator this crate does not own.

pub mod array;
pub mod backref;
pub mod bitfield;
pub mod computed;
pub mod constant;
pub mod optional;
pub mod padding;
pub mod sequence;
pub mod string;
pub mod union;
