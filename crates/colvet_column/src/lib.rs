//! Column views and the structural rules every column handed to a kernel
//! must follow.
pub mod column;
pub mod compat;
pub mod datatype;
pub mod validate;
