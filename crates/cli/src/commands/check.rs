use std::path::Path;
use std::process;

use jsont_core::TypeDescriptor;

use crate::{read_json, report_error, OutputFormat};

pub(crate) fn cmd_check(file: &Path, output: OutputFormat, quiet: bool) {
    let doc = read_json(file, output, quiet);
    let descriptor = match TypeDescriptor::from_json(&doc) {
        Ok(d) => d,
        Err(e) => {
            let msg = format!("invalid type descriptor '{}': {}", file.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => {
            let result = serde_json::json!({
                "descriptor": descriptor.to_json(),
                "display": descriptor.to_string(),
            });
            let json = serde_json::to_string_pretty(&result)
                .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
            println!("{}", json);
        }
        OutputFormat::Text => println!("{}", descriptor),
    }
}
