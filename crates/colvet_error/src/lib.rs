use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

pub type Result<T, E = ColvetError> = std::result::Result<T, E>;

/// Broad category of an error.
///
/// Callers should treat every kind as non-recoverable for the operation in
/// progress and propagate it upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A required reference was absent.
    NullReference,
    /// A column descriptor violates one of its structural invariants.
    InvalidColumn,
    /// Two columns were required to have the same type but don't.
    TypeMismatch,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullReference => write!(f, "Null reference"),
            Self::InvalidColumn => write!(f, "Invalid column"),
            Self::TypeMismatch => write!(f, "Type mismatch"),
        }
    }
}

#[derive(Debug)]
pub struct ColvetError {
    kind: ErrorKind,
    msg: String,
    /// Additional context added while the error propagated, innermost first.
    context: Vec<String>,
}

impl ColvetError {
    pub fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        ColvetError {
            kind,
            msg: msg.into(),
            context: Vec::new(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn get_msg(&self) -> &str {
        self.msg.as_str()
    }

    pub fn get_context(&self) -> &[String] {
        &self.context
    }

    pub fn add_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }
}

impl fmt::Display for ColvetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.msg)?;
        for context in &self.context {
            write!(f, "\n  {context}")?;
        }
        Ok(())
    }
}

impl Error for ColvetError {}

/// Attach additional context to an error as it's propagated.
pub trait ResultExt<T> {
    fn context(self, msg: &'static str) -> Result<T>;

    /// Like `context`, but only builds the message if there's an error.
    fn context_fn<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, msg: &'static str) -> Result<T> {
        self.map_err(|e| e.add_context(msg))
    }

    fn context_fn<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| e.add_context(f()))
    }
}

pub trait OptionExt<T> {
    /// Return an error if the option is None.
    ///
    /// `what` names the missing thing.
    fn required(self, what: &'static str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn required(self, what: &'static str) -> Result<T> {
        self.ok_or_else(|| ColvetError::new(ErrorKind::NullReference, format!("Null {what}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_with_context() {
        let res: Result<()> = Err(ColvetError::new(ErrorKind::InvalidColumn, "bad column"));
        let err = res.context("validating input").unwrap_err();

        assert_eq!(ErrorKind::InvalidColumn, err.kind());
        assert_eq!("Invalid column: bad column\n  validating input", err.to_string());
    }

    #[test]
    fn context_fn_is_lazy() {
        let res: Result<u32> = Ok(4);
        let v = res
            .context_fn(|| -> String { panic!("should not be called") })
            .unwrap();
        assert_eq!(4, v);
    }

    #[test]
    fn required_produces_null_reference() {
        let err = None::<u8>.required("column reference").unwrap_err();
        assert_eq!(ErrorKind::NullReference, err.kind());
        assert_eq!("Null column reference", err.get_msg());
    }
}
