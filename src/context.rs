use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A value captured for later reference by a computed field, carrying
/// enough shape information for `length_of`/`sum_of_type_sizes`/
/// `corresponding<Type>` expressions to walk it without knowing the
/// originating Rust type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Bool(bool),
    String(String),
    Bytes(Vec<u8>),
    /// One entry per type encountered in a union/choice array, carrying
    /// that type's encoded size in bytes — feeds `sum_of_type_sizes`.
    TypeSizes(Vec<(String, usize)>),
    /// Decoded-so-far items of an array, each tagged with the name of
    /// the union/choice variant it decoded as — feeds `corresponding<Type>`.
    Items(Vec<(String, HashMap<String, FieldValue>)>),
}

impl FieldValue {
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            FieldValue::Bytes(bytes) => Some(bytes),
            FieldValue::String(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            FieldValue::U8(v) => Some(v as u64),
            FieldValue::U16(v) => Some(v as u64),
            FieldValue::U32(v) => Some(v as u64),
            FieldValue::U64(v) => Some(v),
            FieldValue::I8(v) if v >= 0 => Some(v as u64),
            FieldValue::I16(v) if v >= 0 => Some(v as u64),
            FieldValue::I32(v) if v >= 0 => Some(v as u64),
            FieldValue::I64(v) if v >= 0 => Some(v as u64),
            _ => None,
        }
    }

    /// The value a `length_of` expression would report for this field:
    /// string/byte length for those variants, encoded element count for
    /// arrays, and the scalar's own numeric value (1/0 for `Bool`)
    /// everywhere else — a numeric field is its own length.
    pub fn length_of_value(&self) -> usize {
        match self {
            FieldValue::U8(v) => *v as usize,
            FieldValue::U16(v) => *v as usize,
            FieldValue::U32(v) => *v as usize,
            FieldValue::U64(v) => *v as usize,
            FieldValue::I8(v) => *v as usize,
            FieldValue::I16(v) => *v as usize,
            FieldValue::I32(v) => *v as usize,
            FieldValue::I64(v) => *v as usize,
            FieldValue::F32(v) => *v as usize,
            FieldValue::F64(v) => *v as usize,
            FieldValue::Bool(b) => {
                if *b {
                    1
                } else {
                    0
                }
            }
            FieldValue::String(s) => s.len(),
            FieldValue::Bytes(bytes) => bytes.len(),
            FieldValue::Items(items) => items.len(),
            FieldValue::TypeSizes(sizes) => sizes.len(),
        }
    }

    /// Sums the recorded sizes of every entry tagged with `type_name`.
    pub fn sum_type_sizes(&self, type_name: &str) -> usize {
        match self {
            FieldValue::TypeSizes(sizes) => {
                sizes.iter().filter(|(name, _)| name == type_name).map(|(_, size)| size).sum()
            }
            _ => 0,
        }
    }

    /// Sums every recorded size regardless of type tag.
    pub fn sum_all_sizes(&self) -> usize {
        match self {
            FieldValue::TypeSizes(sizes) => sizes.iter().map(|(_, size)| size).sum(),
            _ => 0,
        }
    }

    /// The `index`-th item tagged with `type_name`, if this is an
    /// `Items` value and it has that many.
    pub fn get_nth_item_of_type(&self, type_name: &str, index: usize) -> Option<&HashMap<String, FieldValue>> {
        match self {
            FieldValue::Items(items) => {
                items.iter().filter(|(name, _)| name == type_name).map(|(_, fields)| fields).nth(index)
            }
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.length_of_value() == 0
    }

    /// Flattens this value back to its wire bytes, where that is
    /// well-defined (strings and byte runs only).
    pub fn to_bytes(&self) -> Option<Vec<u8>> {
        self.as_bytes().map(|b| b.to_vec())
    }
}

/// Converts a primitive Rust value into the `FieldValue` an
/// `EncodeContext` parent frame records for it. Generated encode code
/// calls this when building the map it hands to `extend_with_parent`.
pub trait IntoFieldValue {
    fn into_field_value(self) -> FieldValue;
}

macro_rules! impl_into_field_value {
    ($ty:ty, $variant:ident) => {
        impl IntoFieldValue for $ty {
            fn into_field_value(self) -> FieldValue {
                FieldValue::$variant(self)
            }
        }
    };
}

impl_into_field_value!(u8, U8);
impl_into_field_value!(u16, U16);
impl_into_field_value!(u32, U32);
impl_into_field_value!(u64, U64);
impl_into_field_value!(i8, I8);
impl_into_field_value!(i16, I16);
impl_into_field_value!(i32, I32);
impl_into_field_value!(i64, I64);
impl_into_field_value!(f32, F32);
impl_into_field_value!(f64, F64);
impl_into_field_value!(bool, Bool);
impl_into_field_value!(String, String);
impl_into_field_value!(Vec<u8>, Bytes);

impl IntoFieldValue for &str {
    fn into_field_value(self) -> FieldValue {
        FieldValue::String(self.to_string())
    }
}

impl IntoFieldValue for &[u8] {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Bytes(self.to_vec())
    }
}

pub type CompressionDict = Rc<RefCell<HashMap<Vec<u8>, usize>>>;

/// Threads the state a schema's computed fields, array iterations, and
/// back-reference compression need as a value is encoded. One
/// `EncodeContext` is created per root encode and cloned-with-extension
/// as encoding descends into nested sequences and arrays.
#[derive(Debug, Clone, Default)]
pub struct EncodeContext {
    parents: Vec<HashMap<String, FieldValue>>,
    positions: HashMap<String, Vec<usize>>,
    array_iterations: HashMap<String, usize>,
    type_indices: HashMap<String, usize>,
    current_array: Option<String>,
    compression_dict: Option<CompressionDict>,
    base_offset: usize,
}

impl EncodeContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a context with one more parent frame pushed, holding the
    /// fields already encoded at the level that is about to recurse.
    pub fn extend_with_parent(&self, fields: HashMap<String, FieldValue>) -> Self {
        let mut next = self.clone();
        next.parents.push(fields);
        next
    }

    pub fn has_parents(&self) -> bool {
        !self.parents.is_empty()
    }

    pub fn parent_count(&self) -> usize {
        self.parents.len()
    }

    /// `levels_up == 1` is the immediately enclosing frame.
    pub fn get_parent_field(&self, levels_up: usize, name: &str) -> Option<&FieldValue> {
        if levels_up == 0 || levels_up > self.parents.len() {
            return None;
        }
        let frame = &self.parents[self.parents.len() - levels_up];
        frame.get(name)
    }

    /// Searches from the outermost (root) frame inward for the first one
    /// carrying `name`, regardless of depth.
    pub fn find_parent_field(&self, name: &str) -> Option<&FieldValue> {
        self.parents.iter().find_map(|frame| frame.get(name))
    }

    pub fn track_position(&mut self, name: impl Into<String>, position: usize) {
        self.positions.entry(name.into()).or_default().push(position);
    }

    pub fn get_first_position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).and_then(|positions| positions.first().copied())
    }

    pub fn get_last_position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).and_then(|positions| positions.last().copied())
    }

    pub fn get_position(&self, name: &str, occurrence: usize) -> Option<usize> {
        self.positions.get(name).and_then(|positions| positions.get(occurrence).copied())
    }

    pub fn set_array_iteration(&mut self, array: impl Into<String>, index: usize) {
        let array = array.into();
        self.current_array = Some(array.clone());
        self.array_iterations.insert(array, index);
    }

    pub fn get_array_iteration(&self, array: &str) -> Option<usize> {
        self.array_iterations.get(array).copied()
    }

    pub fn is_current_array(&self, array: &str) -> bool {
        self.current_array.as_deref() == Some(array)
    }

    /// Falls back to whatever array is currently iterating when the
    /// schema doesn't name one explicitly (a `corresponding<Type>`
    /// expression used inside the array it is cross-referencing).
    pub fn get_any_array_iteration(&self) -> Option<(&str, usize)> {
        let array = self.current_array.as_deref()?;
        let index = self.array_iterations.get(array).copied()?;
        Some((array, index))
    }

    pub fn increment_type_index(&mut self, type_name: impl Into<String>) -> usize {
        let entry = self.type_indices.entry(type_name.into()).or_insert(0);
        let index = *entry;
        *entry += 1;
        index
    }

    pub fn get_type_index(&self, type_name: &str) -> usize {
        self.type_indices.get(type_name).copied().unwrap_or(0)
    }

    /// Lazily creates the shared compression dictionary for this root
    /// encode if one has not been created yet. Must be called before
    /// any back-reference constructor runs, since `Encode` only ever
    /// sees `&EncodeContext`.
    pub fn ensure_compression_dict(&mut self) {
        if self.compression_dict.is_none() {
            self.compression_dict = Some(Rc::new(RefCell::new(HashMap::new())));
        }
    }

    pub fn compression_dict(&self) -> Option<CompressionDict> {
        self.compression_dict.clone()
    }

    pub fn base_offset(&self) -> usize {
        self.base_offset
    }

    pub fn with_base_offset(&self, base_offset: usize) -> Self {
        let mut next = self.clone();
        next.base_offset = base_offset;
        next
    }
}
