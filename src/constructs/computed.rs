//! Computed-field expression helpers. A schema's computed field names a
//! sibling or ancestor field plus an operation to derive a value from
//! it; resolving *which* field that is (walking a `../` path) is the
//! generator's job, since paths are schema syntax this crate does not
//! parse. What this module provides is the small set of operations
//! those resolved lookups feed into.

use std::collections::HashMap;

use crate::context::{EncodeContext, FieldValue};

/// `length_of(field)`: the byte/element length of an already-resolved
/// field value.
pub fn length_of(value: &FieldValue) -> usize {
    value.length_of_value()
}

/// `sum_of_type_sizes(field, "TypeName")`: total encoded size of every
/// entry in an already-resolved `TypeSizes` field tagged with that type.
pub fn sum_of_type_sizes(value: &FieldValue, type_name: &str) -> usize {
    value.sum_type_sizes(type_name)
}

/// `sum_all_sizes(field)`: total encoded size across every entry in an
/// already-resolved `TypeSizes` field, regardless of type.
pub fn sum_all_sizes(value: &FieldValue) -> usize {
    value.sum_all_sizes()
}

/// `corresponding<Type>(items_field, "field")`: reads `field` off the
/// `index`-th item tagged with `type_name` inside an already-resolved
/// `Items` field. `index` is ordinarily the current array iteration
/// count, via `EncodeContext::get_array_iteration`/`get_any_array_iteration`.
pub fn corresponding<'a>(
    items_field: &'a FieldValue,
    type_name: &str,
    index: usize,
    field: &str,
) -> Option<&'a FieldValue> {
    items_field.get_nth_item_of_type(type_name, index)?.get(field)
}

/// Convenience wrapper that pulls `index` from the context, preferring
/// the named array's own iteration count and falling back to whichever
/// array is currently iterating.
pub fn corresponding_in_context<'a>(
    ctx: &EncodeContext,
    items_field: &'a FieldValue,
    array: &str,
    type_name: &str,
    field: &str,
) -> Option<&'a FieldValue> {
    let index = ctx
        .get_array_iteration(array)
        .or_else(|| ctx.get_any_array_iteration().map(|(_, index)| index))?;
    corresponding(items_field, type_name, index, field)
}
