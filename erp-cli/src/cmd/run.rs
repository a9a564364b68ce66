use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use erp_core::Validate;
use erp_exec::executor::{NoOpEventSink, StdoutEventSink, TracingEventSink};
use erp_exec::{Adaptor, ClientConfig, EventSink, ReqwestHttpClient};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::utils::{apply_env_fallbacks, load_state, merge_set_configuration};
use crate::{EventsTarget, OutputArgs};

use super::validate::read_job;

#[derive(Serialize)]
struct RunFailure {
    status: &'static str,
    kind: &'static str,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    http_status: Option<u16>,
}

pub async fn run_cmd(
    path: &Path,
    state_path: Option<&Path>,
    set: &[String],
    events: EventsTarget,
    timeout_ms: u64,
    output: OutputArgs,
) -> i32 {
    let parsed = match read_job(path, &output) {
        Ok(p) => p,
        Err(code) => return code,
    };

    if let Err(err) = parsed.job.validate() {
        print_error(output.format, output.quiet, &err.to_string());
        for v in &err.violations {
            print_error(output.format, output.quiet, &format!("{}: {}", v.path, v.message));
        }
        return exit_codes::VALIDATION_FAILED;
    }

    let mut overrides = match state_path.map(load_state).transpose() {
        Ok(v) => v.unwrap_or(JsonValue::Null),
        Err(message) => {
            print_error(output.format, output.quiet, &message);
            return exit_codes::RUNTIME_ERROR;
        }
    };
    let prepared = merge_set_configuration(&mut overrides, set).and_then(|()| {
        apply_env_fallbacks(&mut overrides, parsed.job.state.as_ref(), |var| {
            std::env::var(var).ok()
        })
    });
    if let Err(message) = prepared {
        print_error(output.format, output.quiet, &message);
        return exit_codes::RUNTIME_ERROR;
    }

    let http = match ReqwestHttpClient::try_new() {
        Ok(c) => c,
        Err(e) => {
            print_error(
                output.format,
                output.quiet,
                &format!("failed to create HTTP client: {e}"),
            );
            return exit_codes::RUNTIME_ERROR;
        }
    };

    let event_sink: Arc<dyn EventSink> = match events {
        EventsTarget::None => Arc::new(NoOpEventSink),
        EventsTarget::Stdout => Arc::new(StdoutEventSink),
        EventsTarget::Tracing => {
            init_tracing();
            Arc::new(TracingEventSink)
        }
    };

    let adaptor = Adaptor::new(Arc::new(http))
        .with_event_sink(event_sink)
        .with_client_config(ClientConfig {
            timeout: Duration::from_millis(timeout_ms),
            ..ClientConfig::default()
        });

    let overrides = (!overrides.is_null()).then_some(overrides);
    match adaptor.run_job(&parsed.job, overrides).await {
        Ok(state) => {
            print_result(output.format, output.quiet, &state.to_json());
            exit_codes::SUCCESS
        }
        Err(e) => {
            let failure = RunFailure {
                status: "failed",
                kind: e.kind(),
                error: e.to_string(),
                http_status: e.status_code(),
            };
            match output.format {
                OutputFormat::Json => {
                    if !output.quiet {
                        eprintln!("{}", serde_json::to_string(&failure).unwrap_or_default());
                    }
                }
                OutputFormat::Text => {
                    print_error(output.format, output.quiet, &failure.error);
                }
            }
            exit_codes::RUN_FAILED
        }
    }
}

/// Structured logs on stderr so stdout keeps only the final state.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
