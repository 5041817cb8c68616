//! # sparse-seq - sparse, resizable sequences
//!
//! A `u32`-indexed sequence container with JavaScript array semantics:
//! - Holes that read as absent and survive every operation
//! - Packed or sparse backing storage, chosen by density
//! - `splice`, `shift`, `unshift`, `slice` and `concat` with the relative
//!   index arithmetic scripts expect
//! - A small script runner for array fixtures, built on a PEG parser
//!
//! ## Quick Start
//!
//! ### Using the container
//!
//! ```
//! use sparse_seq::runner::ds::sequence::Sequence;
//!
//! let mut seq = Sequence::from_values(vec![1, 2, 3, 4, 5]);
//! let removed = seq.splice(Some(1.0), Some(2.0), vec![9]).unwrap();
//! assert_eq!(removed.to_vec(), vec![Some(2), Some(3)]);
//! assert_eq!(seq.to_vec(), vec![Some(1), Some(9), Some(4), Some(5)]);
//!
//! // Writing far past the end leaves holes, not allocated slots.
//! seq.set(100_000, 7).unwrap();
//! assert_eq!(seq.len(), 100_001);
//! assert_eq!(seq.get(50_000), None);
//! ```
//!
//! ### Running a fixture script
//!
//! ```
//! use sparse_seq::runner::eval::evaluate_script;
//! use sparse_seq::runner::plugin::types::EvalContext;
//!
//! let mut ctx = EvalContext::new();
//! let code = "var a = new Array(5); a[1] = 'x'; print(a.slice(-4, 2), a.length);";
//! evaluate_script(code, &mut ctx).unwrap();
//! assert_eq!(ctx.output(), &["x 5".to_string()]);
//! ```
//!
//! ## Storage
//!
//! Each sequence carries a [`StorageConfig`](runner::ds::storage::StorageConfig).
//! Under the default adaptive policy a write that would open a long run of
//! holes switches the sequence to an ordered map, and a sparse sequence that
//! fills back up returns to a packed vector. The mode is never observable
//! through the API; `AlwaysPacked` and `AlwaysSparse` pin it for testing.
//!
//! ## Architecture
//!
//! - **[`parser`]** - PEG grammar and AST for fixture scripts
//! - **[`runner`]**
//!   - **[`runner::ds`]** - The sequence, its storage and the host array values
//!   - **[`runner::plugin`]** - Built-in registry, context and configuration
//!   - **[`runner::std_lib`]** - `Array`, `console.log` and `print`
//!   - **[`runner::eval`]** - Tree-walking evaluator

#[macro_use]
extern crate lazy_static;

pub mod parser;
pub mod runner;
