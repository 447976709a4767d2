//! Sequence (struct) composition: fields encode left-to-right, and
//! each field's computed expressions may reference the fields encoded
//! before it via the context's parent frame.
//!
//! A schema type with no computed or const fields compiles to a single
//! Rust type shared by both directions. One with computed or const
//! fields compiles to an `Input`/`Output` pair instead — the caller
//! supplies the fields it can name on encode (`Input`) and gets back
//! everything including the computed ones on decode (`Output`). That
//! split is a property of the generated code, not of this module;
//! `FieldAccumulator` below is the piece of runtime support both sides
//! of the split need in common.

use std::collections::HashMap;

use crate::context::{FieldValue, IntoFieldValue};

/// Builds up the `fields 0..i` map a sequence hands to
/// `EncodeContext::extend_with_parent` as it encodes each field in
/// turn, so that field `i`'s computed expression can see field `i-1`'s
/// value without the generated code threading it through by hand.
#[derive(Debug, Default, Clone)]
pub struct FieldAccumulator {
    fields: HashMap<String, FieldValue>,
}

impl FieldAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: impl Into<String>, value: impl IntoFieldValue) -> &mut Self {
        self.fields.insert(name.into(), value.into_field_value());
        self
    }

    pub fn record_value(&mut self, name: impl Into<String>, value: FieldValue) -> &mut Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// A snapshot of everything recorded so far, suitable for handing
    /// to `EncodeContext::extend_with_parent` before a nested sequence
    /// or array is encoded.
    pub fn snapshot(&self) -> HashMap<String, FieldValue> {
        self.fields.clone()
    }

    pub fn into_fields(self) -> HashMap<String, FieldValue> {
        self.fields
    }
}
