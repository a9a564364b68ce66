use crate::error::ParseError;
use crate::types::JobDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Auto,
}

#[derive(Debug, Clone)]
pub struct ParsedJob {
    pub job: JobDocument,
    pub format: DocumentFormat,
}

pub fn parse_job_str(input: &str, format: DocumentFormat) -> Result<ParsedJob, ParseError> {
    match format {
        DocumentFormat::Json => Ok(ParsedJob {
            job: serde_json::from_str::<JobDocument>(input)?,
            format,
        }),
        DocumentFormat::Yaml => Ok(ParsedJob {
            job: serde_yaml::from_str::<JobDocument>(input)?,
            format,
        }),
        DocumentFormat::Auto => parse_job_auto(input),
    }
}

/// Parse a JSON or YAML value without a schema, using the same detection as jobs.
pub fn parse_value_str(input: &str) -> Result<serde_json::Value, ParseError> {
    let trimmed = input.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        if let Ok(v) = serde_json::from_str(input) {
            return Ok(v);
        }
    }
    Ok(serde_yaml::from_str(input)?)
}

fn parse_job_auto(input: &str) -> Result<ParsedJob, ParseError> {
    // JSON always starts with `{` or `[` after trimming.
    let trimmed = input.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return match serde_json::from_str::<JobDocument>(input) {
            Ok(job) => Ok(ParsedJob {
                job,
                format: DocumentFormat::Json,
            }),
            Err(e) => match serde_yaml::from_str::<JobDocument>(input) {
                Ok(job) => Ok(ParsedJob {
                    job,
                    format: DocumentFormat::Yaml,
                }),
                // JSON was tried first, so its error is the useful one.
                Err(_) => Err(ParseError::Json(e)),
            },
        };
    }

    match serde_yaml::from_str::<JobDocument>(input) {
        Ok(job) => Ok(ParsedJob {
            job,
            format: DocumentFormat::Yaml,
        }),
        Err(e) => {
            if let Ok(job) = serde_json::from_str::<JobDocument>(input) {
                return Ok(ParsedJob {
                    job,
                    format: DocumentFormat::Json,
                });
            }
            Err(ParseError::Yaml(e))
        }
    }
}
