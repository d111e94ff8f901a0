use std::fmt;

use colvet_error::Result;

use crate::datatype::{ElementType, ExtraTypeInfo, TimeUnit};

/// A borrowed view describing a column's shape and type.
///
/// The view doesn't own any of the memory it points to. Buffers are managed
/// elsewhere and must outlive the view.
///
/// Constructing a view performs no checks. Views built from raw parts should
/// be passed through [`validate`](crate::validate::validate) before being
/// handed to anything that relies on their fields being consistent.
#[derive(Clone, Copy)]
pub struct ColumnView<'a> {
    /// Element data. May only be absent for empty columns.
    pub(crate) data: Option<&'a [u8]>,
    /// Number of elements.
    pub(crate) size: usize,
    /// Raw element type code.
    pub(crate) dtype: i32,
    /// Validity bitmask. A column is nullable iff this is present.
    pub(crate) validity: Option<&'a [u8]>,
    pub(crate) null_count: usize,
    pub(crate) extra_type_info: ExtraTypeInfo<'a>,
}

impl<'a> ColumnView<'a> {
    pub fn new(element_type: ElementType, data: &'a [u8], size: usize) -> Self {
        ColumnView {
            data: Some(data),
            size,
            dtype: element_type.code(),
            validity: None,
            null_count: 0,
            extra_type_info: ExtraTypeInfo::None,
        }
    }

    /// Create a view of an empty column with no backing data.
    pub fn empty(element_type: ElementType) -> Self {
        ColumnView {
            data: None,
            size: 0,
            dtype: element_type.code(),
            validity: None,
            null_count: 0,
            extra_type_info: ExtraTypeInfo::None,
        }
    }

    /// Create a view directly from its raw fields.
    ///
    /// `dtype` is the raw element type code and isn't required to be a known
    /// type.
    pub fn from_raw_parts(
        data: Option<&'a [u8]>,
        size: usize,
        dtype: i32,
        validity: Option<&'a [u8]>,
        null_count: usize,
        extra_type_info: ExtraTypeInfo<'a>,
    ) -> Self {
        ColumnView {
            data,
            size,
            dtype,
            validity,
            null_count,
            extra_type_info,
        }
    }

    pub fn with_validity(mut self, validity: &'a [u8]) -> Self {
        self.validity = Some(validity);
        self
    }

    pub fn with_null_count(mut self, null_count: usize) -> Self {
        self.null_count = null_count;
        self
    }

    pub fn with_extra_type_info(mut self, info: ExtraTypeInfo<'a>) -> Self {
        self.extra_type_info = info;
        self
    }

    pub fn with_time_unit(self, unit: TimeUnit) -> Self {
        self.with_extra_type_info(ExtraTypeInfo::timestamp(unit))
    }

    pub const fn has_data(&self) -> bool {
        self.data.is_some()
    }

    pub const fn data(&self) -> Option<&'a [u8]> {
        self.data
    }

    pub const fn len(&self) -> usize {
        self.size
    }

    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Return if this column is able to record nulls.
    ///
    /// This is independent of whether any values are actually null.
    pub const fn is_nullable(&self) -> bool {
        self.validity.is_some()
    }

    pub const fn validity(&self) -> Option<&'a [u8]> {
        self.validity
    }

    pub const fn null_count(&self) -> usize {
        self.null_count
    }

    pub const fn dtype_code(&self) -> i32 {
        self.dtype
    }

    /// Get the element type, erroring if the code isn't a known type.
    pub fn element_type(&self) -> Result<ElementType> {
        ElementType::try_from(self.dtype)
    }

    pub const fn extra_type_info(&self) -> &ExtraTypeInfo<'a> {
        &self.extra_type_info
    }
}

/// Buffers are printed as their lengths only.
impl<'a> fmt::Debug for ColumnView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnView")
            .field("data_len", &self.data.map(|d| d.len()))
            .field("size", &self.size)
            .field("dtype", &self.dtype)
            .field("validity_len", &self.validity.map(|v| v.len()))
            .field("null_count", &self.null_count)
            .field("extra_type_info", &self.extra_type_info)
            .finish()
    }
}
