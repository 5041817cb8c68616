//! Standard library built-in objects: `Array`, `console` and `print`.

pub mod array;
pub mod console;
pub mod core;

pub use self::core::register_core_builtins;
