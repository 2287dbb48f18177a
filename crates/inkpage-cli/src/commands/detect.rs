use inkpage_prompt::{ContractError, detect};
use serde_json::json;
use tracing::info;

use crate::config::InkpageConfig;
use crate::support::{
    DriftGate, emit_error, exit_gate_failed, load_spec_or_exit, print_json_or_exit,
    read_text_or_exit, require_valid_spec,
};

pub struct Args {
    pub spec: String,
    pub prompt: String,
    pub revised: Option<String>,
    pub min_confidence: Option<f64>,
    pub fail_on_warning: bool,
    pub json: bool,
}

pub fn run(args: Args, config: &InkpageConfig) {
    let spec = load_spec_or_exit(&args.spec);
    require_valid_spec(&spec, args.json);
    let gate = DriftGate::resolve(args.min_confidence, args.fail_on_warning, config);

    let prompt_sent = read_text_or_exit(&args.prompt, "prompt file");
    let revised = args
        .revised
        .as_deref()
        .map(|path| read_text_or_exit(path, "revised prompt file"));

    let report = detect(&spec, &prompt_sent, revised.as_deref())
        .unwrap_or_else(|err| emit_error(ContractError::from(&err), args.json));
    let verdict = gate.verdict(report.confidence_score, report.violations.len());
    info!(
        violations = report.violations.len(),
        confidence = report.confidence_score,
        passed = verdict.is_none(),
        "drift audited"
    );

    if args.json {
        let payload = json!({
            "violations": report.violations,
            "confidenceScore": report.confidence_score,
            "recommendedFixes": report.recommended_fixes,
            "gate": gate,
            "passed": verdict.is_none(),
        });
        print_json_or_exit(&payload, "detect");
    } else {
        println!("inkpage detect");
        println!("  Spec: {}", args.spec);
        println!(
            "  Checked: {}",
            if revised.is_some() { "revised prompt" } else { "sent prompt" }
        );
        println!("  Confidence: {:.2}", report.confidence_score);
        println!(
            "  Violations: {} ({} error, {} warning)",
            report.violations.len(),
            report.error_count(),
            report.warning_count()
        );
        for (violation, fix) in report.violations.iter().zip(&report.recommended_fixes) {
            println!("  - {}", violation.message);
            println!("    fix: {}", fix.message);
        }
    }

    if let Some(reason) = verdict {
        exit_gate_failed(&reason);
    }
}
