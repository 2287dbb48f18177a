use inkpage_generate::{GenerateRequest, GenerationPipeline, ReplayProvider};
use tracing::info;

use crate::config::InkpageConfig;
use crate::support::{
    DriftGate, emit_error, exit_gate_failed, fail, load_spec_or_exit, print_json_or_exit,
};

pub struct Args {
    pub spec: String,
    pub replay: String,
    pub style_hint: Option<String>,
    pub min_confidence: Option<f64>,
    pub fail_on_warning: bool,
    pub json: bool,
}

pub fn run(args: Args, config: &InkpageConfig) {
    let spec = load_spec_or_exit(&args.spec);
    let gate = DriftGate::resolve(args.min_confidence, args.fail_on_warning, config);
    let provider = ReplayProvider::load_json(&args.replay).unwrap_or_else(|err| {
        fail(format!("failed to load provider capture {}: {err}", args.replay));
    });

    let mut request = GenerateRequest::new(spec);
    if let Some(hint) = args.style_hint.or_else(|| config.compile.style_hint.clone()) {
        request = request.with_style_hint(hint);
    }

    let result = GenerationPipeline::new(provider)
        .run(&request)
        .unwrap_or_else(|err| emit_error(err.to_contract(), args.json));
    let verdict = gate.verdict(result.confidence_score, result.violations.len());
    info!(
        images = result.images.len(),
        confidence = result.confidence_score,
        passed = verdict.is_none(),
        "generation replayed"
    );

    if args.json {
        print_json_or_exit(&result, "generate");
    } else {
        println!("inkpage generate");
        println!("  Spec: {}", args.spec);
        println!("  Template: {}", result.template_version);
        println!("  Prompt Digest: {}", result.prompt_digest);
        println!("  Images: {}", result.images.len());
        if let Some(meta) = &result.model_metadata {
            println!("  Model: {} / {}", meta.provider, meta.model);
        }
        println!(
            "  Revised: {}",
            if result.revised_prompt.is_some() { "yes" } else { "no" }
        );
        println!("  Confidence: {:.2}", result.confidence_score);
        println!("  Violations: {}", result.violations.len());
        for violation in &result.violations {
            println!("  - {}", violation.message);
        }
    }

    if let Some(reason) = verdict {
        exit_gate_failed(&reason);
    }
}
