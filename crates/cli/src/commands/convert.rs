use std::path::Path;
use std::process;

use jsont_core::{ConvertOptions, Registry, TypeDescriptor};
use tracing::debug;

use crate::config::{apply_flags, read_options};
use crate::{read_json, report_error, OutputFormat};

pub(crate) struct ConvertArgs<'a> {
    pub input: &'a Path,
    pub descriptor: &'a Path,
    pub config: Option<&'a Path>,
    pub strict: bool,
    pub max_depth: Option<usize>,
}

pub(crate) fn cmd_convert(args: &ConvertArgs<'_>, output: OutputFormat, quiet: bool) {
    let base = match args.config {
        Some(path) => match read_options(path) {
            Ok(o) => o,
            Err(e) => {
                report_error(&e, output, quiet);
                process::exit(1);
            }
        },
        None => ConvertOptions::default(),
    };
    let options = apply_flags(base, args.strict, args.max_depth);
    debug!(?options, "conversion options");

    let descriptor_doc = read_json(args.descriptor, output, quiet);
    let descriptor = match TypeDescriptor::from_json(&descriptor_doc) {
        Ok(d) => d,
        Err(e) => {
            let msg = format!("invalid type descriptor '{}': {}", args.descriptor.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let input = read_json(args.input, output, quiet);
    let registry = Registry::new(options);

    match registry.convert(&input, &descriptor) {
        Ok(value) => {
            debug!(value = value.type_name(), "converted");
            let json = serde_json::to_string_pretty(&value.to_json())
                .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
            println!("{}", json);
        }
        Err(e) => {
            if !quiet {
                match output {
                    OutputFormat::Json => {
                        let err_json = serde_json::to_string_pretty(&e.to_json())
                            .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", e.kind.code()));
                        eprintln!("{}", err_json);
                    }
                    OutputFormat::Text => eprintln!("{}", e.report()),
                }
            }
            process::exit(1);
        }
    }
}
