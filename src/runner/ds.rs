//! Data structures: the sparse sequence container and the host values built
//! on top of it.

pub mod array_object;
pub mod error;
pub mod operations;
pub mod sequence;
pub mod storage;
pub mod value;
