use inkpage_prompt::ContractError;
use inkpage_spec::ColoringPageSpec;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{ConfigError, InkpageConfig, check_min_confidence};

/// Unreadable or malformed input: exit 1.
pub fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("error: {message}");
    std::process::exit(1);
}

/// A contract failure: exit 2. With `--json` the failure is also
/// written to stdout in its wire shape.
pub fn emit_error(err: ContractError, json_output: bool) -> ! {
    if json_output {
        match serde_json::to_string_pretty(&err) {
            Ok(rendered) => println!("{rendered}"),
            Err(render_err) => eprintln!("error: failed to render error json: {render_err}"),
        }
    }
    eprintln!("{err}");
    std::process::exit(2);
}

pub fn load_config_or_exit(path: Option<&str>) -> InkpageConfig {
    InkpageConfig::load(path.map(Path::new)).unwrap_or_else(|err: ConfigError| {
        fail(format!("{} ({})", err, err.code()));
    })
}

pub fn read_text_or_exit(path: &str, what: &str) -> String {
    let path = PathBuf::from(path);
    fs::read_to_string(&path).unwrap_or_else(|err| {
        fail(format!("failed to read {what} {}: {err}", path.display()));
    })
}

pub fn load_spec_or_exit(path: &str) -> ColoringPageSpec {
    let raw = read_text_or_exit(path, "spec file");
    serde_json::from_str(&raw).unwrap_or_else(|err| {
        fail(format!("failed to parse spec json {path}: {err}"));
    })
}

/// Reject a spec that breaks its invariants before any prompt work.
pub fn require_valid_spec(spec: &ColoringPageSpec, json_output: bool) {
    let validation = spec.validate();
    if let Some(issue) = validation.first_issue() {
        emit_error(
            ContractError::new("SPEC_INVALID", issue.message.clone())
                .with_detail("issueCount", validation.issues.len().to_string()),
            json_output,
        );
    }
}

pub fn min_confidence_or_exit(flag: Option<f64>, config: &InkpageConfig) -> f64 {
    match flag {
        Some(value) => check_min_confidence(value).unwrap_or_else(|err| fail(err)),
        None => config.detect.min_confidence,
    }
}

pub fn print_json_or_exit<T: Serialize>(value: &T, what: &str) {
    let rendered = serde_json::to_string_pretty(value).unwrap_or_else(|err| {
        fail(format!("failed to render {what} json: {err}"));
    });
    println!("{rendered}");
}

/// Pass/fail policy applied to a drift report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftGate {
    pub min_confidence: f64,
    pub fail_on_warning: bool,
}

impl DriftGate {
    pub fn resolve(
        min_confidence: Option<f64>,
        fail_on_warning: bool,
        config: &InkpageConfig,
    ) -> Self {
        Self {
            min_confidence: min_confidence_or_exit(min_confidence, config),
            fail_on_warning: fail_on_warning || config.detect.fail_on_warning,
        }
    }

    /// `None` when the report passes, else the reason it does not.
    pub fn verdict(&self, confidence_score: f64, violation_count: usize) -> Option<String> {
        if confidence_score < self.min_confidence {
            return Some(format!(
                "confidence {confidence_score:.2} is below the minimum {:.2}",
                self.min_confidence
            ));
        }
        if self.fail_on_warning && violation_count > 0 {
            return Some(format!(
                "{violation_count} drift violation(s) with fail_on_warning set"
            ));
        }
        None
    }
}

/// Output has already been written; report the failed gate and exit 2.
pub fn exit_gate_failed(reason: &str) -> ! {
    eprintln!("drift gate failed: {reason}");
    std::process::exit(2);
}
