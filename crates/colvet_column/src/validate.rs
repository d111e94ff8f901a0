//! Structural checks for column views.
//!
//! Every kernel operating on a column assumes these hold. Checks run in a
//! fixed order and stop at the first violation.
use std::fmt;

use colvet_error::{ColvetError, ErrorKind, OptionExt, Result, ResultExt};
use tracing::trace;

use crate::column::ColumnView;

/// A violated column invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnViolation {
    /// Column has rows but no data buffer.
    MissingData { size: usize },
    /// Column uses the reserved invalid element type.
    InvalidElementType,
    /// Element type code is outside the known set of types.
    UnknownElementType { code: i32 },
    /// Column records nulls but has no validity mask to record them in.
    NullsWithoutValidity { null_count: usize },
    /// More nulls than elements.
    NullCountExceedsSize { null_count: usize, size: usize },
}

impl ColumnViolation {
    /// Find the first invariant the column violates, if any.
    pub fn check(column: &ColumnView) -> Option<ColumnViolation> {
        if !column.has_data() && column.len() != 0 {
            return Some(ColumnViolation::MissingData {
                size: column.len(),
            });
        }

        match column.element_type() {
            Ok(typ) if typ.is_invalid() => return Some(ColumnViolation::InvalidElementType),
            Ok(_) => (),
            Err(_) => {
                return Some(ColumnViolation::UnknownElementType {
                    code: column.dtype_code(),
                })
            }
        }

        if !column.is_nullable() && column.null_count() != 0 {
            return Some(ColumnViolation::NullsWithoutValidity {
                null_count: column.null_count(),
            });
        }

        if column.null_count() > column.len() {
            return Some(ColumnViolation::NullCountExceedsSize {
                null_count: column.null_count(),
                size: column.len(),
            });
        }

        None
    }
}

impl fmt::Display for ColumnViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingData { size } => write!(
                f,
                "No column data despite there supposedly being rows ({size} rows)"
            ),
            Self::InvalidElementType => write!(f, "Cannot use the 'invalid' column element type"),
            Self::UnknownElementType { code } => {
                write!(f, "Unknown column element type (code {code})")
            }
            Self::NullsWithoutValidity { null_count } => write!(
                f,
                "Column supposedly has {null_count} null values, but no place to record them"
            ),
            Self::NullCountExceedsSize { null_count, size } => write!(
                f,
                "Column claims to have more null elements than elements overall ({null_count} > {size})"
            ),
        }
    }
}

impl From<ColumnViolation> for ColvetError {
    fn from(value: ColumnViolation) -> Self {
        ColvetError::new(ErrorKind::InvalidColumn, value.to_string())
    }
}

/// Ensure a column view is internally consistent.
pub fn validate(column: ColumnView) -> Result<()> {
    match ColumnViolation::check(&column) {
        Some(violation) => {
            trace!(%violation, ?column, "column failed validation");
            Err(violation.into())
        }
        None => Ok(()),
    }
}

/// Validate a column that may not have been provided.
///
/// A missing column is reported as a null reference rather than an invalid
/// column.
pub fn validate_ref(column: Option<&ColumnView>) -> Result<()> {
    let column = column.required("column reference")?;
    validate(*column)
}

/// Validate each column in order, stopping at the first invalid one.
pub fn validate_all(columns: &[ColumnView]) -> Result<()> {
    for (idx, column) in columns.iter().enumerate() {
        validate(*column).context_fn(|| format!("Column {idx} failed validation"))?;
    }
    Ok(())
}
