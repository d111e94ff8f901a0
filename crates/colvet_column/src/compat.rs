//! Type compatibility between validated columns.
//!
//! Everything here assumes its inputs already passed
//! [`validate`](crate::validate::validate). Nothing is re-checked, and the
//! result for unvalidated columns is unspecified.
use std::fmt;

use colvet_error::{ColvetError, ErrorKind, Result};
use tracing::trace;

use crate::column::ColumnView;
use crate::datatype::{ElementType, TimeUnit};

/// How extra type info for category columns is compared.
///
/// Comparing category tables isn't well defined yet, so the only policy is to
/// skip the comparison and treat the columns as compatible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryComparison {
    /// Unsupported comparison, treated as compatible.
    Unsupported,
}

impl CategoryComparison {
    pub const CURRENT: Self = CategoryComparison::Unsupported;

    /// Compare the category tables of two columns.
    pub const fn difference(&self) -> Option<TypeDifference> {
        match self {
            Self::Unsupported => None,
        }
    }
}

/// The first aspect in which two column types differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDifference {
    ElementType { left: i32, right: i32 },
    Nullability { left: bool, right: bool },
    /// Only timestamps can differ here, category tables are never compared.
    TimeUnit {
        left: Option<TimeUnit>,
        right: Option<TimeUnit>,
    },
}

impl fmt::Display for TypeDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ElementType { left, right } => write!(
                f,
                "Element types differ: {} and {}",
                TypeCodeDisplay(*left),
                TypeCodeDisplay(*right)
            ),
            Self::Nullability { left, right } => {
                write!(f, "Nullability differs: {left} and {right}")
            }
            Self::TimeUnit { left, right } => write!(
                f,
                "Timestamp units differ: {} and {}",
                TimeUnitDisplay(*left),
                TimeUnitDisplay(*right)
            ),
        }
    }
}

/// Displays a type code using its name when known.
struct TypeCodeDisplay(i32);

impl fmt::Display for TypeCodeDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match ElementType::try_from(self.0) {
            Ok(typ) => write!(f, "{typ}"),
            Err(_) => write!(f, "<code {}>", self.0),
        }
    }
}

struct TimeUnitDisplay(Option<TimeUnit>);

impl fmt::Display for TimeUnitDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(unit) => write!(f, "{unit}"),
            None => write!(f, "none"),
        }
    }
}

/// Compare extra type info of two columns sharing `common` as their element
/// type.
fn extra_type_info_difference(
    common: ElementType,
    a: &ColumnView,
    b: &ColumnView,
) -> Option<TypeDifference> {
    if !common.has_extra_type_info() {
        return None;
    }

    match common {
        ElementType::Timestamp => {
            let left = a.extra_type_info().time_unit();
            let right = b.extra_type_info().time_unit();
            if left == right {
                None
            } else {
                Some(TypeDifference::TimeUnit { left, right })
            }
        }
        ElementType::Category => CategoryComparison::CURRENT.difference(),
        _ => None,
    }
}

/// Find the first difference between the types of two validated columns.
pub fn type_difference(
    a: ColumnView,
    b: ColumnView,
    ignore_extra_type_info: bool,
) -> Option<TypeDifference> {
    if a.dtype_code() != b.dtype_code() {
        return Some(TypeDifference::ElementType {
            left: a.dtype_code(),
            right: b.dtype_code(),
        });
    }

    if a.is_nullable() ^ b.is_nullable() {
        return Some(TypeDifference::Nullability {
            left: a.is_nullable(),
            right: b.is_nullable(),
        });
    }

    if ignore_extra_type_info {
        return None;
    }

    // Unknown codes can't appear on validated columns. If they do anyways,
    // there's no extra info to compare.
    let common = match a.element_type() {
        Ok(typ) => typ,
        Err(_) => return None,
    };

    extra_type_info_difference(common, &a, &b)
}

/// Check if two validated columns have the same type.
///
/// Element types and nullability must match exactly. Unless
/// `ignore_extra_type_info` is set, representation specific info must match
/// as well (e.g. timestamp units).
pub fn have_same_type(a: ColumnView, b: ColumnView, ignore_extra_type_info: bool) -> bool {
    match type_difference(a, b, ignore_extra_type_info) {
        Some(diff) => {
            trace!(%diff, "columns have different types");
            false
        }
        None => true,
    }
}

/// Same as [`have_same_type`], taking the columns by reference.
pub fn have_same_type_ref(a: &ColumnView, b: &ColumnView, ignore_extra_type_info: bool) -> bool {
    have_same_type(*a, *b, ignore_extra_type_info)
}

/// Error if two validated columns don't have the same type.
pub fn ensure_same_type(
    a: &ColumnView,
    b: &ColumnView,
    ignore_extra_type_info: bool,
) -> Result<()> {
    match type_difference(*a, *b, ignore_extra_type_info) {
        Some(diff) => Err(ColvetError::new(ErrorKind::TypeMismatch, diff.to_string())),
        None => Ok(()),
    }
}

/// Check if two sets of columns have pairwise matching types.
pub fn have_same_types(
    left: &[ColumnView],
    right: &[ColumnView],
    ignore_extra_type_info: bool,
) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .all(|(a, b)| have_same_type_ref(a, b, ignore_extra_type_info))
}

/// Check that every column has the same type as the first.
pub fn all_have_same_type(columns: &[ColumnView], ignore_extra_type_info: bool) -> bool {
    match columns.split_first() {
        Some((first, rest)) => rest
            .iter()
            .all(|col| have_same_type_ref(first, col, ignore_extra_type_info)),
        None => true,
    }
}
