use crate::support::{load_spec_or_exit, print_json_or_exit};

pub fn run(spec_path: String, json_output: bool) {
    let spec = load_spec_or_exit(&spec_path);
    let validation = spec.validate();

    if json_output {
        print_json_or_exit(&validation, "validation");
    } else {
        println!("inkpage validate");
        println!("  Spec: {spec_path}");
        println!("  Valid: {}", validation.ok);
        for issue in &validation.issues {
            println!("  - [{}] {}: {}", issue.code, issue.field, issue.message);
        }
    }

    if !validation.ok {
        std::process::exit(2);
    }
}
