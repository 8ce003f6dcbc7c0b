// ABOUTME: Domain types for the brief-refinement and lead-submission flows
// ABOUTME: AIAnalysis is the structured brief; QuoteRequest and Ticket model the contact form

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    FALLBACK_ESTIMATED_TIMELINE, FALLBACK_REFINED_BRIEF, FALLBACK_SUGGESTED_STACK,
};

/// Structured brief produced from a free-text project idea.
///
/// Field names on the wire are camelCase because they double as the
/// response schema keys the model is asked to emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AIAnalysis {
    pub refined_brief: String,
    pub suggested_stack: Vec<String>,
    pub estimated_timeline: String,
}

impl AIAnalysis {
    /// The generic brief used whenever the model call fails in any way
    pub fn fallback() -> Self {
        Self {
            refined_brief: FALLBACK_REFINED_BRIEF.to_string(),
            suggested_stack: FALLBACK_SUGGESTED_STACK
                .iter()
                .map(|s| s.to_string())
                .collect(),
            estimated_timeline: FALLBACK_ESTIMATED_TIMELINE.to_string(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }
}

/// Budget bracket offered by the contact form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetRange {
    #[serde(rename = "10-25k")]
    From10To25k,
    #[serde(rename = "25-50k")]
    From25To50k,
    #[serde(rename = "50k-100k")]
    From50kTo100k,
    #[serde(rename = "100k+")]
    Over100k,
}

impl BudgetRange {
    pub const ALL: [BudgetRange; 4] = [
        BudgetRange::From10To25k,
        BudgetRange::From25To50k,
        BudgetRange::From50kTo100k,
        BudgetRange::Over100k,
    ];

    /// Form value, as submitted
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetRange::From10To25k => "10-25k",
            BudgetRange::From25To50k => "25-50k",
            BudgetRange::From50kTo100k => "50k-100k",
            BudgetRange::Over100k => "100k+",
        }
    }

    /// Human-readable label shown next to the option
    pub fn label(&self) -> &'static str {
        match self {
            BudgetRange::From10To25k => "$10k - $25k",
            BudgetRange::From25To50k => "$25k - $50k",
            BudgetRange::From50kTo100k => "$50k - $100k",
            BudgetRange::Over100k => "$100k+",
        }
    }
}

impl fmt::Display for BudgetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BudgetRange::ALL
            .iter()
            .copied()
            .find(|range| range.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Unknown budget range '{}'. Expected one of: {}",
                    s,
                    BudgetRange::ALL
                        .iter()
                        .map(|r| r.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

/// Lead record collected by the contact form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub idea: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<BudgetRange>,
}

/// Receipt handed back once a lead has been accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: u32,
    pub issued_at: DateTime<Utc>,
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.id)
    }
}
