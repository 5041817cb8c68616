//! End-to-end tests: fixture-style scripts run through the parser and the
//! evaluator, checked by their printed output.

extern crate sparse_seq;

use sparse_seq::runner::ds::error::JErrorType;
use sparse_seq::runner::ds::storage::{StorageConfig, StoragePolicy};
use sparse_seq::runner::ds::value::JsValue;
use sparse_seq::runner::eval::evaluate_script;
use sparse_seq::runner::plugin::config::HarnessConfig;
use sparse_seq::runner::plugin::registry::BuiltInRegistry;
use sparse_seq::runner::plugin::types::EvalContext;

fn run_with(code: &str, storage: StorageConfig) -> Vec<String> {
    let mut ctx = EvalContext::with_registry(BuiltInRegistry::with_core(), storage);
    if let Err(e) = evaluate_script(code, &mut ctx) {
        panic!("script failed: {}\n{}", e, code);
    }
    ctx.take_output()
}

/// Runs `code` under every storage policy and checks they print the same.
fn run(code: &str) -> Vec<String> {
    let adaptive = run_with(code, StorageConfig::default());
    assert_eq!(run_with(code, StorageConfig::sparse()), adaptive, "sparse vs adaptive");
    adaptive
}

fn run_err(code: &str) -> JErrorType {
    let mut ctx = EvalContext::new();
    match evaluate_script(code, &mut ctx) {
        Ok(c) => panic!("expected an error, got {:?}", c.get_value()),
        Err(e) => e,
    }
}

fn lines(expected: &[&str]) -> Vec<String> {
    expected.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// Splice fixtures
// ============================================================================

mod splice_fixture_tests {
    use super::*;

    #[test]
    fn test_splice_double() {
        let out = run(r#"
            var a = [0.6, 1.34, 2.5, 3.34, 4.454, 5.65, 6.634];
            var r = a.splice(-100, -100);
            print(r.length, a.length);
            r = a.splice();
            print(r.length, a);
            r = a.splice(2, 2);
            print(r, "|", a);
        "#);
        assert_eq!(
            out,
            lines(&[
                "0 7",
                "0 0.6,1.34,2.5,3.34,4.454,5.65,6.634",
                "2.5,3.34 | 0.6,1.34,4.454,5.65,6.634",
            ])
        );
    }

    #[test]
    fn test_splice_grow_and_shrink() {
        let out = run(r#"
            var a = [1, 2, 3, 4, 5, 6, 7, 8];
            print(a.splice(0, 3, 1, 2, 3, 4), "|", a, a.length);
            var b = [1, 2, 3, 4, 5, 6, 7, 8];
            print(b.splice(4, 10, 1, 2, 3, 4, 5), "|", b, b.length);
            var c = [1, 2, 3, 4, 5, 6, 7, 8];
            print(c.splice(7, -4, 8, 9, 10), "|", c);
        "#);
        assert_eq!(
            out,
            lines(&[
                "1,2,3 | 1,2,3,4,4,5,6,7,8 9",
                "5,6,7,8 | 1,2,3,4,1,2,3,4,5 9",
                " | 1,2,3,4,5,6,7,8,9,10,8",
            ])
        );
    }

    #[test]
    fn test_splice_on_sparse_array() {
        let out = run(r#"
            var a = new Array();
            a[10] = 10; a[11] = 11; a[12] = 12; a[13] = 13;
            a[14] = 14; a[15] = 15; a[16] = 16; a[17] = 17;
            var r = a.splice(17, 1, 1);
            print(r, a.length, a[17], a[9]);
            r = a.splice(10, 5, "a", "b", "c", "d");
            print(r, a.length, a.indexOf("d"), a[14]);
        "#);
        assert_eq!(
            out,
            lines(&[
                "17 18 1 undefined",
                "10,11,12,13,14 17 13 15",
            ])
        );
    }

    #[test]
    fn test_splice_keeps_holes() {
        let out = run(r#"
            var a = [1, , 3, , 5];
            var r = a.splice(1, 2);
            print(r.length, r.indexOf(3), r.includes(undefined), a);
        "#);
        assert_eq!(out, lines(&["2 1 true 1,,5"]));
    }
}

// ============================================================================
// Sparse array fixtures
// ============================================================================

mod sparse_fixture_tests {
    use super::*;

    #[test]
    fn test_concat_two_large_sparse_arrays() {
        let out = run(r#"
            var a = new Array(0x15000);
            var b = new Array(0x15000);
            a[0] = "a0";
            a[0x14fff] = "alast";
            b[1] = "b1";
            var c = a.concat(b);
            print(c.length, c[0], c[0x14fff], c[0x15001], c[0x15000]);
            print(c.indexOf("b1"));
        "#);
        assert_eq!(
            out,
            lines(&["172032 a0 alast b1 undefined", "86017"])
        );
    }

    #[test]
    fn test_length_boundaries() {
        let out = run(r#"
            var a = new Array(4294967295);
            print(a.length);
            a = [];
            a[4294967294] = 1;
            print(a.length);
            var b = [];
            b[4294967295] = "named";
            print(b.length, b[4294967295]);
            b.length = 3;
            print(b.length, b[4294967295]);
        "#);
        assert_eq!(
            out,
            lines(&["4294967295", "4294967295", "0 named", "3 named"])
        );
    }

    #[test]
    fn test_invalid_lengths_throw_range_error() {
        assert!(matches!(run_err("new Array(-0.01)"), JErrorType::RangeError(_)));
        assert!(matches!(run_err("new Array(4294967296)"), JErrorType::RangeError(_)));
        assert!(matches!(run_err("var a = []; a.length = 1.5;"), JErrorType::RangeError(_)));
        assert!(matches!(run_err("var a = []; a.length = -1;"), JErrorType::RangeError(_)));
    }

    #[test]
    fn test_push_at_max_length() {
        let err = run_err("var a = new Array(4294967295); a.push(1);");
        assert!(matches!(err, JErrorType::TypeError(_)));
    }

    #[test]
    fn test_delete_leaves_hole() {
        let out = run(r#"
            var a = [1, 2, 3];
            delete a[1];
            print(a.length, a, a.includes(undefined), a.indexOf(undefined));
            delete a.length;
            print(a.length);
        "#);
        assert_eq!(out, lines(&["3 1,,3 true -1", "3"]));
    }

    #[test]
    fn test_shift_on_sparse_array() {
        let out = run(r#"
            var a = [];
            a[0] = "x";
            a[100000] = "y";
            print(a.shift(), a.length, a[99999]);
            print(a.shift(), a.length);
            a.unshift(1, 2);
            print(a.length, a[100000]);
        "#);
        assert_eq!(
            out,
            lines(&["x 100000 y", "undefined 99999", "100001 y"])
        );
    }
}

// ============================================================================
// Language and dispatch
// ============================================================================

mod language_tests {
    use super::*;

    #[test]
    fn test_completion_value() {
        let mut ctx = EvalContext::new();
        let c = evaluate_script("var a = [1, 2]; a.length; var b;", &mut ctx).unwrap();
        assert_eq!(c.get_value(), JsValue::integer(2));
    }

    #[test]
    fn test_array_constructor_call_forms() {
        let out = run(r#"
            print(Array(3).length, new Array(1, 2).length, Array.isArray([]), Array.isArray(1));
            console.log([1, [2, 3], null, undefined, true]);
        "#);
        assert_eq!(out, lines(&["3 2 true false", "1,2,3,,,true"]));
    }

    #[test]
    fn test_string_arguments_are_coerced() {
        let out = run(r#"
            var a = [1, 2, 3, 4];
            print(a.slice("1", "-1"), a.splice("2"), a);
        "#);
        assert_eq!(out, lines(&["2,3 3,4 1,2"]));
    }

    #[test]
    fn test_self_referencing_join() {
        let out = run("var a = [1, 2]; a[2] = a; print(a);");
        assert_eq!(out, lines(&["1,2,"]));
    }

    #[test]
    fn test_splice_undefined_arguments_convert_to_zero() {
        let out = run(r#"
            var a = [1, 2, 3];
            var b = [1, 2, 3];
            print(a.splice(undefined), a.length, b.splice(undefined, undefined).length, b);
        "#);
        assert_eq!(out, lines(&["1,2,3 0 0 1,2,3"]));
    }

    #[test]
    fn test_length_assigned_from_same_array() {
        let out = run("var a = [2]; a.length = a; print(a.length, a);");
        assert_eq!(out, lines(&["2 2,"]));
    }

    #[test]
    fn test_binding_shadows_builtin() {
        let out = run("var console = [5]; print(console.length);");
        assert_eq!(out, lines(&["1"]));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(run_err("nope"), JErrorType::ReferenceError(_)));
        assert!(matches!(run_err("nope()"), JErrorType::ReferenceError(_)));
        assert!(matches!(run_err("var x; x.length"), JErrorType::TypeError(_)));
        assert!(matches!(run_err("[].frobnicate()"), JErrorType::TypeError(_)));
        assert!(matches!(run_err("var n = 1; n()"), JErrorType::TypeError(_)));
        assert!(matches!(run_err("new Nope()"), JErrorType::TypeError(_)));
        assert!(matches!(run_err("var = ;"), JErrorType::SyntaxError(_)));
    }

    #[test]
    fn test_config_drives_new_arrays() {
        let config = HarnessConfig::parse("[storage]\npolicy = \"packed\"\n").unwrap();
        assert_eq!(config.storage.policy, StoragePolicy::AlwaysPacked);
        let mut ctx = EvalContext::from_config(&config);
        evaluate_script("var a = [1, , 3]; a[10] = 4;", &mut ctx).unwrap();
        match ctx.get_binding("a").unwrap() {
            JsValue::Array(a) => {
                let a = a.borrow();
                assert_eq!(a.elements().config().policy, StoragePolicy::AlwaysPacked);
                assert_eq!(a.length(), 11);
            }
            other => panic!("expected an array, got {:?}", other),
        }
    }
}
