use inkpage_prompt::vocabulary::{self, CLOSING_NEGATIVE_LINES, REQUIRED_PHRASES};
use inkpage_prompt::{Heading, TEMPLATE_VERSION};
use inkpage_spec::{
    Alignment, Border, ColorMode, ColoringPageSpec, Decorations, FontStyle, Illustrations,
    PageSize, Shading, TEXT_STROKE_RANGE,
};
use serde::Serialize;

use crate::support::{load_spec_or_exit, print_json_or_exit, require_valid_spec};

#[derive(Debug, Serialize)]
struct AxisLine {
    axis: &'static str,
    value: String,
    line: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VocabularyTable {
    template_version: &'static str,
    headings: Vec<&'static str>,
    required_phrases: Vec<&'static str>,
    closing_negative_lines: Vec<&'static str>,
    axes: Vec<AxisLine>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpecLines {
    template_version: &'static str,
    page_size_line: &'static str,
    alignment_phrase: &'static str,
    alignment_sentence: String,
    option_lines: Vec<String>,
    negative_lines: Vec<&'static str>,
    required_phrases: Vec<&'static str>,
}

fn axis<T: Copy>(
    out: &mut Vec<AxisLine>,
    name: &'static str,
    values: &[T],
    as_str: fn(T) -> &'static str,
    line: impl Fn(T) -> String,
) {
    out.extend(values.iter().map(|&value| AxisLine {
        axis: name,
        value: as_str(value).to_string(),
        line: line(value),
    }));
}

fn table() -> VocabularyTable {
    // Border widths are shown at their default.
    let defaults = ColoringPageSpec::title_only("Title");
    let mut axes = Vec::new();
    axis(&mut axes, "colorMode", ColorMode::ALL, ColorMode::as_str, |v| {
        vocabulary::color_mode_line(v).to_string()
    });
    axis(&mut axes, "pageSize", PageSize::ALL, PageSize::as_str, |v| {
        vocabulary::page_size_line(v).to_string()
    });
    axis(&mut axes, "alignment", Alignment::ALL, Alignment::as_str, |v| {
        vocabulary::alignment_phrase(v).to_string()
    });
    axis(&mut axes, "fontStyle", FontStyle::ALL, FontStyle::as_str, |v| {
        vocabulary::font_style_line(v).to_string()
    });
    axes.extend(TEXT_STROKE_RANGE.map(|width| AxisLine {
        axis: "textStrokeWidth",
        value: width.to_string(),
        line: vocabulary::text_stroke_line(width),
    }));
    axis(&mut axes, "decorations", Decorations::ALL, Decorations::as_str, |v| {
        vocabulary::decoration_line(v).to_string()
    });
    axis(&mut axes, "illustrations", Illustrations::ALL, Illustrations::as_str, |v| {
        vocabulary::illustration_line(v).to_string()
    });
    axis(&mut axes, "shading", Shading::ALL, Shading::as_str, |v| {
        vocabulary::shading_line(v).to_string()
    });
    axis(&mut axes, "border", Border::ALL, Border::as_str, |v| {
        vocabulary::border_line(v, defaults.border_thickness)
    });
    axis(&mut axes, "output", ColorMode::ALL, ColorMode::as_str, |v| {
        vocabulary::output_line(v).to_string()
    });

    VocabularyTable {
        template_version: TEMPLATE_VERSION,
        headings: Heading::ALL.iter().map(|heading| heading.as_str()).collect(),
        required_phrases: REQUIRED_PHRASES.to_vec(),
        closing_negative_lines: CLOSING_NEGATIVE_LINES.to_vec(),
        axes,
    }
}

fn spec_lines(spec: &ColoringPageSpec) -> SpecLines {
    SpecLines {
        template_version: TEMPLATE_VERSION,
        page_size_line: vocabulary::page_size_line(spec.page_size),
        alignment_phrase: vocabulary::alignment_phrase(spec.alignment),
        alignment_sentence: vocabulary::alignment_sentence(spec),
        option_lines: vocabulary::option_lines(spec),
        negative_lines: vocabulary::negative_lines(spec),
        required_phrases: REQUIRED_PHRASES.to_vec(),
    }
}

pub fn run(spec_path: Option<String>, json_output: bool) {
    let Some(spec_path) = spec_path else {
        let table = table();
        if json_output {
            print_json_or_exit(&table, "vocabulary");
            return;
        }
        println!("inkpage vocabulary ({})", table.template_version);
        println!("  Headings: {}", table.headings.join(" "));
        for phrase in &table.required_phrases {
            println!("  Required: {phrase}");
        }
        for entry in &table.axes {
            println!("  {:<14} {:<22} {}", entry.axis, entry.value, entry.line);
        }
        return;
    };

    let spec = load_spec_or_exit(&spec_path);
    require_valid_spec(&spec, json_output);
    let lines = spec_lines(&spec);

    if json_output {
        print_json_or_exit(&lines, "vocabulary");
        return;
    }

    println!("inkpage vocabulary ({})", lines.template_version);
    println!("  Spec: {spec_path}");
    println!("  Page size: {}", lines.page_size_line);
    println!("  Alignment: {}", lines.alignment_phrase);
    println!("  Alignment line: {}", lines.alignment_sentence);
    for line in &lines.option_lines {
        println!("  Option: {line}");
    }
    for line in &lines.negative_lines {
        println!("  Negative: {line}");
    }
}
