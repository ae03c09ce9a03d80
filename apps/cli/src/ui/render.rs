use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use dx_trainer::application::format::display_name;
use dx_trainer::application::CaseView;
use dx_trainer::domain::inference::posterior::{is_degenerate, ranked};
use dx_trainer::domain::{Distribution, TestResult};

use crate::ui::{Icon, Theme};

/// `"positive"`, `"negative"`, or the reported findings.
pub fn result_text(result: &TestResult) -> String {
    match result {
        TestResult::Binary(outcome) => outcome.to_string(),
        TestResult::Findings(findings) if findings.is_empty() => "no findings".to_string(),
        TestResult::Findings(findings) => findings
            .iter()
            .map(|f| display_name(f))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

pub fn case(view: &CaseView) -> String {
    let mut out = String::new();
    let d = &view.demographics;
    out.push_str(&format!(
        "{} {}\n",
        Icon::Patient,
        Theme::bold(format!(
            "{}-year-old {}, {}",
            d.age,
            d.sex.to_lowercase(),
            display_name(&d.race)
        ))
    ));

    out.push_str(&format!("\n{}\n", Theme::primary("Symptoms")));
    for (symptom, present) in &view.symptoms {
        let mark = if *present {
            Theme::success(Icon::Check)
        } else {
            Theme::muted(Icon::Cross)
        };
        out.push_str(&format!("  {} {}\n", mark, display_name(symptom)));
    }

    if !view.vitals.is_empty() {
        out.push_str(&format!("\n{}\n", Theme::primary("Vitals")));
        let width = view.vitals.keys().map(|k| k.len()).max().unwrap_or(0);
        for (vital, value) in &view.vitals {
            out.push_str(&format!(
                "  {:<width$}  {}\n",
                display_name(vital),
                value,
                width = width
            ));
        }
    }

    if !view.test_results.is_empty() {
        out.push_str(&format!("\n{}\n", Theme::primary("Test results")));
        for (test, result) in &view.test_results {
            out.push_str(&format!(
                "  {} {}: {}\n",
                Icon::Test,
                display_name(test),
                result_text(result)
            ));
        }
    }
    out
}

/// Ranked probability table, or a warning when no disease fits.
pub fn distribution(distribution: &Distribution) -> String {
    if is_degenerate(distribution) {
        return format!("{} No disease fits the evidence.", Theme::warning("!"));
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Disease", "Probability"]);
    for (disease, p) in ranked(distribution) {
        table.add_row(vec![
            Cell::new(display_name(disease)),
            Cell::new(format!("{:.1}%", p * 100.0)).set_alignment(CellAlignment::Right),
        ]);
    }
    table.to_string()
}
