use std::any::Any;
use std::fmt;

use colvet_error::{ColvetError, ErrorKind};

/// Element representation of a column.
///
/// Discriminants are the codes upstream producers write into raw column
/// descriptors. `Invalid` is reserved and never valid on a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i32)]
pub enum ElementType {
    /// Reserved "unset" type.
    Invalid = 0,
    Int8 = 1,
    Int16 = 2,
    Int32 = 3,
    Int64 = 4,
    Float32 = 5,
    Float64 = 6,
    /// Boolean stored as one byte per value.
    Bool8 = 7,
    /// Days since epoch.
    Date32 = 8,
    /// Milliseconds since epoch.
    Date64 = 9,
    /// 64-bit timestamp, unit carried in the extra type info.
    Timestamp = 10,
    /// Dictionary encoded values, keys index into a category table.
    Category = 11,
    String = 12,
    StringCategory = 13,
}

impl ElementType {
    pub const ALL: [ElementType; 14] = [
        Self::Invalid,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Float32,
        Self::Float64,
        Self::Bool8,
        Self::Date32,
        Self::Date64,
        Self::Timestamp,
        Self::Category,
        Self::String,
        Self::StringCategory,
    ];

    pub const fn code(&self) -> i32 {
        *self as i32
    }

    pub const fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid)
    }

    /// Return if columns of this type carry representation specific
    /// metadata.
    pub const fn has_extra_type_info(&self) -> bool {
        matches!(self, Self::Timestamp | Self::Category)
    }
}

impl TryFrom<i32> for ElementType {
    type Error = ColvetError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
            .ok_or_else(|| {
                ColvetError::new(
                    ErrorKind::InvalidColumn,
                    format!("Unknown column element type code: {code}"),
                )
            })
    }
}

impl From<ElementType> for i32 {
    fn from(value: ElementType) -> Self {
        value.code()
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid => write!(f, "Invalid"),
            Self::Int8 => write!(f, "Int8"),
            Self::Int16 => write!(f, "Int16"),
            Self::Int32 => write!(f, "Int32"),
            Self::Int64 => write!(f, "Int64"),
            Self::Float32 => write!(f, "Float32"),
            Self::Float64 => write!(f, "Float64"),
            Self::Bool8 => write!(f, "Bool8"),
            Self::Date32 => write!(f, "Date32"),
            Self::Date64 => write!(f, "Date64"),
            Self::Timestamp => write!(f, "Timestamp"),
            Self::Category => write!(f, "Category"),
            Self::String => write!(f, "String"),
            Self::StringCategory => write!(f, "StringCategory"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Second,
    Millisecond,
    Microsecond,
    Nanosecond,
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Second => write!(f, "s"),
            Self::Millisecond => write!(f, "ms"),
            Self::Microsecond => write!(f, "μs"),
            Self::Nanosecond => write!(f, "ns"),
        }
    }
}

/// Opaque reference to an externally owned category table.
///
/// The table is never inspected, only carried along with the column.
#[derive(Clone, Copy)]
pub struct CategoryRef<'a>(pub &'a (dyn Any + Send + Sync));

impl<'a> fmt::Debug for CategoryRef<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CategoryRef({:p})", self.0)
    }
}

/// Representation specific metadata attached to a column.
///
/// Only the variants for types that need extra information exist, so a time
/// unit can only be read off a timestamp column.
#[derive(Debug, Clone, Copy, Default)]
pub enum ExtraTypeInfo<'a> {
    #[default]
    None,
    Timestamp { time_unit: Option<TimeUnit> },
    Category(Option<CategoryRef<'a>>),
}

impl<'a> ExtraTypeInfo<'a> {
    pub const fn timestamp(unit: TimeUnit) -> Self {
        ExtraTypeInfo::Timestamp {
            time_unit: Some(unit),
        }
    }

    pub const fn time_unit(&self) -> Option<TimeUnit> {
        match self {
            Self::Timestamp { time_unit } => *time_unit,
            _ => None,
        }
    }

    pub const fn category(&self) -> Option<CategoryRef<'a>> {
        match self {
            Self::Category(table) => *table,
            _ => None,
        }
    }
}
