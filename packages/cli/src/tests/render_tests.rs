use crate::render::{analysis_report, analysis_state_line, form_state_line, ticket_report};
use rockspace_brief::{AnalysisState, FormState};
use rockspace_core::{AIAnalysis, Ticket};

fn ticket(id: u32) -> Ticket {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "issued_at": "2026-01-01T00:00:00Z"
    }))
    .unwrap()
}

#[test]
fn test_analysis_report_lists_all_fields() {
    let analysis = AIAnalysis {
        refined_brief: "A headless storefront for sneaker drops.".to_string(),
        suggested_stack: vec!["React".to_string(), "Node.js".to_string()],
        estimated_timeline: "2-3 months".to_string(),
    };

    let report = analysis_report(&analysis);

    assert!(report.contains("A headless storefront for sneaker drops."));
    assert!(report.contains("React · Node.js"));
    assert!(report.contains("2-3 months"));
}

#[test]
fn test_analysis_report_with_empty_stack() {
    let analysis = AIAnalysis {
        refined_brief: "Landing page".to_string(),
        suggested_stack: vec![],
        estimated_timeline: "1 week".to_string(),
    };

    assert!(analysis_report(&analysis).contains("(none suggested)"));
}

#[test]
fn test_state_lines() {
    assert!(analysis_state_line(&AnalysisState::Analyzing).contains("scanning"));
    assert!(analysis_state_line(&AnalysisState::Ready(AIAnalysis::fallback()))
        .contains("manual review"));
    assert!(form_state_line(&FormState::Success(ticket(31337))).contains("#31337"));
}

#[test]
fn test_ticket_report() {
    let report = ticket_report(&ticket(123456));
    assert!(report.contains("#123456"));
    assert!(report.contains("within 24 hours"));
}
