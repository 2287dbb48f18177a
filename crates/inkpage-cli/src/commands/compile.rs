use inkpage_prompt::{ContractError, compile};
use serde_json::json;
use tracing::info;

use crate::config::InkpageConfig;
use crate::support::{emit_error, load_spec_or_exit, print_json_or_exit, require_valid_spec};

pub fn run(
    spec_path: String,
    style_hint: Option<String>,
    config: &InkpageConfig,
    json_output: bool,
) {
    let spec = load_spec_or_exit(&spec_path);
    require_valid_spec(&spec, json_output);

    let style_hint = style_hint.or_else(|| config.compile.style_hint.clone());
    let compiled = compile(&spec, style_hint.as_deref())
        .unwrap_or_else(|err| emit_error(ContractError::from(&err), json_output));
    info!(digest = %compiled.digest(), "prompt compiled");

    if json_output {
        let payload = json!({
            "prompt": compiled.prompt,
            "templateVersion": compiled.template_version,
            "promptDigest": compiled.digest(),
            "length": compiled.char_len(),
        });
        print_json_or_exit(&payload, "compile");
        return;
    }

    println!("{}", compiled.prompt);
}
