pub mod glass;
pub mod recommend;
pub mod validate;

use std::path::Path;

use anyhow::Context;
use envelop_core::CustomerRequest;
use serde::Serialize;
use tracing::warn;

/// Exit code for configuration, catalog or request validation failures.
pub const EXIT_VALIDATION: u8 = 2;
/// Exit code for the no-eligible-material / no-eligible-glazing condition.
pub const EXIT_NO_ELIGIBLE: u8 = 3;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct FailurePayload {
    command: String,
    status: String,
    error_class: String,
    message: String,
}

impl CommandResult {
    pub fn rendered(output: impl Into<String>) -> Self {
        Self { exit_code: 0, output: output.into() }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = FailurePayload {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: error_class.to_string(),
            message: message.into(),
        };
        let output = serde_json::to_string(&payload).unwrap_or_else(|error| {
            format!(
                "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
                error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
            )
        });
        Self { exit_code, output }
    }
}

/// Build the customer request from an optional TOML file plus `KEY=VALUE`
/// constraint overrides. In lenient mode an unparsable override is logged
/// and treated as absent instead of failing the command.
pub(crate) fn build_request(
    path: Option<&Path>,
    overrides: &[String],
    lenient: bool,
) -> anyhow::Result<CustomerRequest> {
    let mut request = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading request file {}", path.display()))?;
            toml::from_str(&raw)
                .with_context(|| format!("parsing request file {}", path.display()))?
        }
        None => CustomerRequest::new(),
    };

    for pair in overrides {
        let Some((key, value)) = pair.split_once('=') else {
            anyhow::bail!("override {pair:?} is not KEY=VALUE");
        };
        if let Err(error) = request.set_numeric_constraint(key.trim(), value) {
            if lenient {
                warn!(%error, "ignoring unparsable constraint override");
            } else {
                return Err(error.into());
            }
        }
    }

    Ok(request)
}
