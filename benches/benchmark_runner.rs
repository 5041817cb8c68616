/// Benchmark runner for sequence operations and fixture scripts.
///
/// Each case runs once per storage policy so the packed and sparse paths
/// can be compared side by side.

extern crate sparse_seq;

use sparse_seq::parser::ScriptParser;
use sparse_seq::runner::ds::sequence::Sequence;
use sparse_seq::runner::ds::storage::{StorageConfig, StoragePolicy};
use sparse_seq::runner::eval::evaluate_script;
use sparse_seq::runner::eval::statement::execute_program;
use sparse_seq::runner::plugin::registry::BuiltInRegistry;
use sparse_seq::runner::plugin::types::EvalContext;
use std::time::{Duration, Instant};

const POLICIES: [StoragePolicy; 3] = [
    StoragePolicy::Adaptive,
    StoragePolicy::AlwaysPacked,
    StoragePolicy::AlwaysSparse,
];

fn config_for(policy: StoragePolicy) -> StorageConfig {
    StorageConfig::new().with_policy(policy)
}

/// Run a script benchmark and return the execution time.
fn run_script_benchmark(name: &str, code: &str, iterations: u32, config: StorageConfig) -> Duration {
    let ast = ScriptParser::parse_to_ast_from_str(code)
        .unwrap_or_else(|e| panic!("Failed to parse benchmark {}: {}", name, e));

    let start = Instant::now();

    for _ in 0..iterations {
        let mut ctx = EvalContext::with_registry(BuiltInRegistry::with_core(), config);
        let _ = execute_program(&ast, &mut ctx);
    }

    start.elapsed()
}

/// Run a native benchmark and return the execution time.
fn run_native_benchmark(op: fn(StorageConfig), iterations: u32, config: StorageConfig) -> Duration {
    let start = Instant::now();
    for _ in 0..iterations {
        op(config);
    }
    start.elapsed()
}

/// Get the printed output of running code.
fn run_and_get_output(code: &str, config: StorageConfig) -> String {
    let mut ctx = EvalContext::with_registry(BuiltInRegistry::with_core(), config);
    match evaluate_script(code, &mut ctx) {
        Ok(_) => ctx.take_output().join("\n"),
        Err(e) => format!("{}", e),
    }
}

// ============================================================================
// Native benchmarks
// ============================================================================

fn bench_push_pop(config: StorageConfig) {
    let mut s = Sequence::with_config(config);
    for i in 0..2_000u32 {
        let _ = s.push(i);
    }
    while s.pop().is_some() {}
}

fn bench_front_splice(config: StorageConfig) {
    let mut s = Sequence::from_values_with_config(0..1_000u32, config);
    for i in 0..200u32 {
        let _ = s.splice(Some(0.0), Some(1.0), vec![i, i + 1]);
    }
}

fn bench_shift_unshift(config: StorageConfig) {
    let mut s = Sequence::from_values_with_config(0..500u32, config);
    for i in 0..200u32 {
        let _ = s.unshift(vec![i]);
        s.shift();
    }
}

fn bench_scattered_writes(config: StorageConfig) {
    let mut s = Sequence::with_config(config);
    for i in 0..256u32 {
        let _ = s.set(i * 97, i);
    }
    let _ = s.slice(Some(100.0), Some(20_000.0));
}

fn bench_concat(config: StorageConfig) {
    let a = Sequence::from_values_with_config(0..1_000u32, config);
    let b = Sequence::from_slots_with_config((0..1_000u32).map(|i| if i % 3 == 0 { None } else { Some(i) }), config);
    let mut c = a.clone();
    let _ = c.append(&b);
    let _ = c.slice(Some(-500.0), None);
}

// ============================================================================
// Script benchmarks
// ============================================================================

const BENCH_LITERAL_SPLICE: &str = r#"
var a = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19];
var r = a.splice(5, 5, "a", "b", "c");
a.splice(-3, 1);
a.splice(0, 0, r);
var b = a.slice(2, -2);
var c = a.concat(b, [20, , 22]);
"#;

const BENCH_FAR_HOLES: &str = r#"
var a = [];
a[0] = 1;
a[1000] = 2;
a[100000] = 3;
a[4294967290] = 4;
a.splice(1, 0, "x");
a.length = 5;
"#;

const BENCH_SHIFT_UNSHIFT: &str = r#"
var a = [1, , 3, , 5, , 7, , 9];
a.unshift(-1, 0);
a.shift();
a.shift();
a.push(10, 11);
a.pop();
a.reverse();
"#;

const BENCH_SEARCH: &str = r#"
var a = new Array(5000);
a[4999] = "needle";
a[2500] = NaN;
var i = a.indexOf("needle");
var n = a.includes(NaN);
var u = a.includes(undefined);
"#;

fn main() {
    println!("=======================================================");
    println!("  Sparse Sequence - Performance Benchmarks");
    println!("  Adaptive vs Packed vs Sparse storage");
    println!("=======================================================\n");

    let natives: Vec<(&str, fn(StorageConfig), u32)> = vec![
        ("Push/Pop (2K)", bench_push_pop, 200),
        ("Front Splice (200)", bench_front_splice, 50),
        ("Shift/Unshift (200)", bench_shift_unshift, 50),
        ("Scattered Writes (256)", bench_scattered_writes, 50),
        ("Concat + Slice (2K)", bench_concat, 100),
    ];

    let scripts: Vec<(&str, &str, u32)> = vec![
        ("Literal Splice", BENCH_LITERAL_SPLICE, 1000),
        ("Far Holes", BENCH_FAR_HOLES, 1000),
        ("Shift/Unshift Script", BENCH_SHIFT_UNSHIFT, 1000),
        ("Search (5K holes)", BENCH_SEARCH, 100),
    ];

    println!("{:<26} {:>12} {:>12} {:>12}", "Benchmark", "adaptive", "packed", "sparse");
    println!("{}", "-".repeat(66));

    let mut totals = [Duration::ZERO; 3];

    for (name, op, iterations) in &natives {
        let mut row = [Duration::ZERO; 3];
        for (i, policy) in POLICIES.iter().enumerate() {
            row[i] = run_native_benchmark(*op, *iterations, config_for(*policy));
            totals[i] += row[i];
        }
        println!("{:<26} {:>10.2?} {:>10.2?} {:>10.2?}", name, row[0], row[1], row[2]);
    }

    for (name, code, iterations) in &scripts {
        let mut row = [Duration::ZERO; 3];
        for (i, policy) in POLICIES.iter().enumerate() {
            // Packed storage would materialize billions of holes here.
            if *policy == StoragePolicy::AlwaysPacked && *code == BENCH_FAR_HOLES {
                continue;
            }
            row[i] = run_script_benchmark(name, code, *iterations, config_for(*policy));
            totals[i] += row[i];
        }
        println!("{:<26} {:>10.2?} {:>10.2?} {:>10.2?}", name, row[0], row[1], row[2]);
    }

    println!("{}", "-".repeat(66));
    println!(
        "{:<26} {:>10.2?} {:>10.2?} {:>10.2?}",
        "TOTAL", totals[0], totals[1], totals[2]
    );

    // Verify correctness
    println!("\n=======================================================");
    println!("  Correctness Verification");
    println!("=======================================================\n");

    let verifications: Vec<(&str, &str, &str)> = vec![
        (
            "Splice",
            "var a = [1, 2, 3, 4, 5]; var r = a.splice(1, 2, 9); print(a, r);",
            "1,9,4,5 2,3",
        ),
        (
            "Holes",
            "var a = [1, , 3]; a.unshift(0); print(a.length, a);",
            "4 0,1,,3",
        ),
        (
            "Max length",
            "var a = new Array(4294967295); print(a.length);",
            "4294967295",
        ),
        (
            "Concat",
            "print([1, 2].concat([3, , 5], 6));",
            "1,2,3,,5,6",
        ),
    ];

    println!("{:<14} {:>12} {:>12}", "Test", "adaptive", "sparse");
    println!("{}", "-".repeat(40));

    for (name, code, expected) in verifications {
        let adaptive = run_and_get_output(code, config_for(StoragePolicy::Adaptive));
        let sparse = run_and_get_output(code, config_for(StoragePolicy::AlwaysSparse));
        let a_status = if adaptive == expected { "✓" } else { "✗" };
        let s_status = if sparse == expected { "✓" } else { "✗" };
        println!("{:<14} {:>12} {:>12}", name, a_status, s_status);
    }
}
