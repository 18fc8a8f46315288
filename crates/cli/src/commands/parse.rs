use std::process;

use crate::{report_error, OutputFormat};

pub(crate) fn cmd_parse(predicate: &str, output: OutputFormat) {
    let expr = match cartrule_core::parse(predicate) {
        Ok(e) => e,
        Err(e) => {
            report_error(&format!("error: {}", e), output);
            process::exit(1);
        }
    };

    match output {
        OutputFormat::Text => println!("{}", expr),
        OutputFormat::Json => match serde_json::to_string_pretty(&expr) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                report_error(&format!("error serializing expression tree: {}", e), output);
                process::exit(1);
            }
        },
    }
}
