use std::path::Path;

use erp_core::{parse_job_str, DocumentFormat, ParseError, ParsedJob, Validate};
use serde::Serialize;

use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::OutputArgs;

#[derive(Serialize)]
struct ValidateResult {
    valid: bool,
    format: String,
    operations: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

/// Read and parse a job file, reporting failures. `Err` holds the exit code.
pub fn read_job(path: &Path, output: &OutputArgs) -> Result<ParsedJob, i32> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        print_error(
            output.format,
            output.quiet,
            &format!("failed to read {}: {e}", path.display()),
        );
        exit_codes::RUNTIME_ERROR
    })?;

    parse_job_str(&content, DocumentFormat::Auto).map_err(|e| {
        let message = match e {
            ParseError::Json(e) => format!("JSON parse failed: {e}"),
            ParseError::Yaml(e) => format!("YAML parse failed: {e}"),
        };
        print_error(output.format, output.quiet, &message);
        exit_codes::VALIDATION_FAILED
    })
}

pub async fn validate_cmd(path: &Path, output: OutputArgs) -> i32 {
    let parsed = match read_job(path, &output) {
        Ok(p) => p,
        Err(code) => return code,
    };

    let operations = parsed.job.operations.len();
    match parsed.job.validate() {
        Ok(()) => {
            let result = ValidateResult {
                valid: true,
                format: format!("{:?}", parsed.format),
                operations,
                errors: vec![],
            };
            if output.format == OutputFormat::Text && !output.quiet {
                println!(
                    "ok: valid job document ({:?}, {operations} operations)",
                    parsed.format
                );
            } else {
                print_result(output.format, output.quiet, &result);
            }
            exit_codes::SUCCESS
        }
        Err(err) => {
            let errors: Vec<String> = err
                .violations
                .iter()
                .map(|v| format!("{}: {}", v.path, v.message))
                .collect();
            if output.format == OutputFormat::Text && !output.quiet {
                eprintln!("error: validation failed");
                for e in &errors {
                    eprintln!("- {e}");
                }
            } else {
                let result = ValidateResult {
                    valid: false,
                    format: format!("{:?}", parsed.format),
                    operations,
                    errors,
                };
                print_result(output.format, output.quiet, &result);
            }
            exit_codes::VALIDATION_FAILED
        }
    }
}
