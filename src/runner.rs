//! Script execution: values and containers, built-ins, and the evaluator.

pub mod ds;
pub mod eval;
pub mod plugin;
pub mod std_lib;
