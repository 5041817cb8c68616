pub mod relative_index;
pub mod type_conversion;
