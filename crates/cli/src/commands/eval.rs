use std::path::Path;
use std::process;

use cartrule_eval::{eval_traced, evaluate_ast, EvalOptions, TraceStyle};

use crate::{report_error, OutputFormat};

pub(crate) fn cmd_eval(
    predicate: &str,
    context_path: &Path,
    trace: bool,
    plain: bool,
    coerce_bool_literals: bool,
    output: OutputFormat,
) {
    // Read and parse the context file
    let ctx_str = match std::fs::read_to_string(context_path) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", context_path.display(), e);
            report_error(&msg, output);
            process::exit(1);
        }
    };

    let ctx: serde_json::Value = match serde_json::from_str(&ctx_str) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("error parsing JSON in '{}': {}", context_path.display(), e);
            report_error(&msg, output);
            process::exit(1);
        }
    };

    // Parse the predicate
    let expr = match cartrule_core::parse(predicate) {
        Ok(e) => e,
        Err(e) => {
            report_error(&format!("error: {}", e), output);
            process::exit(1);
        }
    };

    let opts = EvalOptions {
        coerce_bool_literals,
    };

    // JSON output always carries the plain-marker trace
    let style = if plain || output == OutputFormat::Json {
        TraceStyle::Plain
    } else {
        TraceStyle::Terminal
    };

    if trace {
        match eval_traced(&expr, &ctx, &opts, style) {
            Ok((verdict, rendered)) => match output {
                OutputFormat::Text => {
                    print!("{}", rendered);
                    println!("{}", verdict);
                }
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::json!({ "result": verdict, "trace": rendered })
                    );
                }
            },
            Err(e) => {
                report_error(&format!("error: {}", e), output);
                process::exit(1);
            }
        }
        return;
    }

    match evaluate_ast(&expr, &ctx, &opts) {
        Ok(verdict) => match output {
            OutputFormat::Text => println!("{}", verdict),
            OutputFormat::Json => println!("{}", serde_json::json!({ "result": verdict })),
        },
        Err(e) => {
            report_error(&format!("error: {}", e), output);
            process::exit(1);
        }
    }
}
