//! Storage-mode equivalence.
//!
//! The same operation list is replayed against a packed-only, a sparse-only
//! and an adaptive sequence; after every step all three must agree on
//! length, element values, holes and iteration order.

extern crate sparse_seq;

use sparse_seq::runner::ds::sequence::{ConcatArg, Sequence};
use sparse_seq::runner::ds::storage::{StorageConfig, StoragePolicy};

#[derive(Debug, Clone)]
enum Op {
    Set(u32, i64),
    Delete(u32),
    SetLength(f64),
    Splice(Option<f64>, Option<f64>, Vec<i64>),
    Shift,
    Unshift(Vec<i64>),
    Push(i64),
    Pop,
    Reverse,
    SliceInto(Option<f64>, Option<f64>),
    ConcatSelf,
}

fn apply(seq: &mut Sequence<i64>, op: &Op) -> String {
    match op {
        Op::Set(i, v) => format!("{:?}", seq.set(*i, *v)),
        Op::Delete(i) => format!("{:?}", seq.delete(*i)),
        Op::SetLength(n) => format!("{:?}", seq.set_length(*n)),
        Op::Splice(start, count, items) => match seq.splice(*start, *count, items.clone()) {
            Ok(removed) => format!("{:?}", removed.to_vec()),
            Err(e) => format!("{:?}", e),
        },
        Op::Shift => format!("{:?}", seq.shift()),
        Op::Unshift(items) => format!("{:?}", seq.unshift(items.clone())),
        Op::Push(v) => format!("{:?}", seq.push(*v)),
        Op::Pop => format!("{:?}", seq.pop()),
        Op::Reverse => {
            seq.reverse();
            String::new()
        }
        Op::SliceInto(start, end) => {
            *seq = seq.slice(*start, *end);
            String::new()
        }
        Op::ConcatSelf => {
            let copy = seq.clone();
            match seq.concat(vec![ConcatArg::Spread(&copy), ConcatArg::Value(-1)]) {
                Ok(joined) => {
                    *seq = joined;
                    String::new()
                }
                Err(e) => format!("{:?}", e),
            }
        }
    }
}

fn observe(seq: &Sequence<i64>) -> (u32, Vec<(u32, i64)>) {
    (seq.len(), seq.entries().map(|(i, v)| (i, *v)).collect())
}

fn replay(ops: &[Op]) {
    let configs = vec![
        StorageConfig::default(),
        StorageConfig::sparse(),
        StorageConfig::packed(),
        // Small thresholds make the adaptive sequence switch often.
        StorageConfig {
            policy: StoragePolicy::Adaptive,
            max_gap: 2,
            sparse_min_length: 4,
        },
    ];
    let mut seqs: Vec<Sequence<i64>> = configs.into_iter().map(Sequence::with_config).collect();

    for (step, op) in ops.iter().enumerate() {
        let results: Vec<String> = seqs.iter_mut().map(|s| apply(s, op)).collect();
        let states: Vec<_> = seqs.iter().map(observe).collect();
        for (mode, (result, state)) in results.iter().zip(states.iter()).enumerate().skip(1) {
            assert_eq!(result, &results[0], "step {} {:?}: result of mode {}", step, op, mode);
            assert_eq!(state, &states[0], "step {} {:?}: state of mode {}", step, op, mode);
        }
        for s in &seqs[1..] {
            assert_eq!(s, &seqs[0]);
            assert_eq!(s.to_vec(), seqs[0].to_vec());
        }
    }
}

#[test]
fn test_element_operations_agree() {
    replay(&[
        Op::Set(0, 1),
        Op::Set(5, 6),
        Op::Set(40, 41),
        Op::Delete(5),
        Op::Delete(99),
        Op::Push(7),
        Op::SetLength(12.0),
        Op::SetLength(1.5),
        Op::Set(3, 4),
        Op::Pop,
        Op::Pop,
        Op::SetLength(0.0),
        Op::Pop,
    ]);
}

#[test]
fn test_splice_operations_agree() {
    replay(&[
        Op::Set(10, 10),
        Op::Set(12, 12),
        Op::Set(17, 17),
        Op::Splice(Some(17.0), Some(1.0), vec![1]),
        Op::Splice(Some(10.0), Some(5.0), vec![-1, -2, -3, -4]),
        Op::Splice(Some(-3.0), None, vec![]),
        Op::Splice(None, None, vec![9]),
        Op::Splice(Some(2.0), Some(-1.0), vec![8, 8, 8]),
        Op::Splice(Some(100.0), Some(100.0), vec![5]),
        Op::Splice(Some(0.0), Some(2.0), vec![]),
        Op::Splice(Some(f64::NAN), Some(1.0), vec![]),
    ]);
}

#[test]
fn test_shift_unshift_agree() {
    replay(&[
        Op::Shift,
        Op::Unshift(vec![1, 2, 3]),
        Op::Set(30, 30),
        Op::Shift,
        Op::Delete(0),
        Op::Shift,
        Op::Unshift(vec![]),
        Op::Unshift(vec![0]),
        Op::Reverse,
        Op::Shift,
        Op::Reverse,
    ]);
}

#[test]
fn test_copy_operations_agree() {
    replay(&[
        Op::Set(2, 2),
        Op::Set(9, 9),
        Op::ConcatSelf,
        Op::SliceInto(Some(1.0), Some(-2.0)),
        Op::ConcatSelf,
        Op::SliceInto(Some(-5.0), None),
        Op::SliceInto(Some(4.0), Some(2.0)),
        Op::ConcatSelf,
    ]);
}
