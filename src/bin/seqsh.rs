//! Command-line runner for array fixture scripts.
//!
//! Usage:
//!   seqsh <file.js>              # Execute a script file
//!   seqsh -e "code"              # Evaluate code
//!   seqsh                        # Start REPL (interactive mode)
//!
//! Options (before the mode arguments):
//!   --config <path>              # Load a harness config file
//!   --storage <policy>           # adaptive | packed | sparse

use sparse_seq::runner::ds::storage::StoragePolicy;
use sparse_seq::runner::ds::value::JsValue;
use sparse_seq::runner::eval::evaluate_script;
use sparse_seq::runner::plugin::config::HarnessConfig;
use sparse_seq::runner::plugin::types::EvalContext;
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let (config, rest) = match parse_options(&args) {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("{}", msg);
            print_usage();
            process::exit(1);
        }
    };

    match rest {
        [] => run_repl(&config),
        [arg] if arg == "-h" || arg == "--help" => {
            print_usage();
            process::exit(0);
        }
        [flag, code] if flag == "-e" || flag == "--eval" => eval_code(code, &config),
        [file] => run_file(file, &config),
        _ => {
            print_usage();
            process::exit(1);
        }
    }
}

/// Strips `--config` and `--storage` from the front of `args`.
fn parse_options(args: &[String]) -> Result<(HarnessConfig, &[String]), String> {
    let mut config = HarnessConfig::new();
    let mut storage_override = None;
    let mut rest = args;

    loop {
        match rest {
            [flag, path, tail @ ..] if flag == "--config" => {
                config = HarnessConfig::load(Path::new(path)).map_err(|e| e.to_string())?;
                rest = tail;
            }
            [flag, policy, tail @ ..] if flag == "--storage" => {
                storage_override = Some(policy.parse::<StoragePolicy>()?);
                rest = tail;
            }
            _ => break,
        }
    }

    // The command-line policy wins over the config file regardless of order.
    if let Some(policy) = storage_override {
        config.storage.policy = policy;
    }
    Ok((config, rest))
}

fn print_usage() {
    eprintln!("seqsh - sparse array script runner");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  seqsh [options] <file.js>        Execute a script file");
    eprintln!("  seqsh [options] -e \"code\"        Evaluate code");
    eprintln!("  seqsh [options]                  Start REPL (interactive mode)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>                  Load a harness config file");
    eprintln!("  --storage <policy>               adaptive | packed | sparse");
}

fn flush_output(ctx: &mut EvalContext) {
    for line in ctx.take_output() {
        println!("{}", line);
    }
}

fn run_file(filename: &str, config: &HarnessConfig) {
    let source = match fs::read_to_string(filename) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", filename, e);
            process::exit(1);
        }
    };

    let mut ctx = EvalContext::from_config(config);
    let result = evaluate_script(&source, &mut ctx);
    flush_output(&mut ctx);
    if let Err(e) = result {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn eval_code(code: &str, config: &HarnessConfig) {
    let mut ctx = EvalContext::from_config(config);
    let result = evaluate_script(code, &mut ctx);
    flush_output(&mut ctx);
    match result {
        Ok(completion) => {
            // Print the last value if it's not undefined
            let value = completion.get_value();
            if !matches!(value, JsValue::Undefined) {
                println!("{:?}", value);
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

fn run_repl(config: &HarnessConfig) {
    println!("seqsh v{} ({} storage)", env!("CARGO_PKG_VERSION"), config.storage.policy);
    println!("Type code and press Enter. Type .exit to quit.");
    println!();

    let mut ctx = EvalContext::from_config(config);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        if let Err(e) = stdout.flush() {
            eprintln!("Error writing prompt: {}", e);
            break;
        }

        let mut input = String::new();
        match stdin.read_line(&mut input) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
        }

        let input = input.trim();

        if input == ".exit" || input == ".quit" {
            break;
        }

        if input.is_empty() {
            continue;
        }

        let result = evaluate_script(input, &mut ctx);
        flush_output(&mut ctx);
        match result {
            Ok(completion) => {
                if let Some(val) = completion.value {
                    if !matches!(val, JsValue::Undefined) {
                        println!("{:?}", val);
                    }
                }
            }
            Err(e) => eprintln!("{}", e),
        }
    }

    println!("Goodbye!");
}
