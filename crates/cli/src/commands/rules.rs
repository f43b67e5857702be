use jsont_core::Registry;

use crate::OutputFormat;

pub(crate) fn cmd_rules(output: OutputFormat) {
    let names = Registry::default().rule_names();
    match output {
        OutputFormat::Json => println!("{}", serde_json::json!(names)),
        OutputFormat::Text => {
            for (i, name) in names.iter().enumerate() {
                println!("{:>2}. {}", i + 1, name);
            }
        }
    }
}
