mod config;
mod rules;

pub use config::PolicyConfig;

use super::domain::TripRequest;
use rules::RuleLedger;
use serde::{Deserialize, Serialize};

/// Overall verdict: any violation sends the trip to review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Approved,
    NeedsReview,
}

impl ComplianceStatus {
    pub fn label(self) -> &'static str {
        match self {
            ComplianceStatus::Approved => "Approved",
            ComplianceStatus::NeedsReview => "Needs Review",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteKind {
    /// The rule is satisfied.
    Confirmed,
    /// Satisfied, but someone should look at it (e.g. approval needed).
    Caution,
    /// Supporting line for the preceding note.
    Detail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyNote {
    pub kind: NoteKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceResult {
    pub status: ComplianceStatus,
    pub violations: Vec<String>,
    pub notes: Vec<PolicyNote>,
}

impl ComplianceResult {
    pub fn is_approved(&self) -> bool {
        self.status == ComplianceStatus::Approved
    }
}

/// Stateless evaluator applying the policy thresholds to a trip request.
#[derive(Debug, Clone, Default)]
pub struct ComplianceEvaluator {
    config: PolicyConfig,
}

impl ComplianceEvaluator {
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    pub fn evaluate(&self, request: &TripRequest) -> ComplianceResult {
        let mut ledger = RuleLedger::default();

        rules::business_purpose(request, &mut ledger);
        rules::budget(request, &self.config, &mut ledger);
        rules::flight_class(&self.config, &mut ledger);
        rules::hotel_rate(request, &self.config, &mut ledger);
        rules::car_rental(&self.config, &mut ledger);
        rules::preferred_vendors(&self.config, &mut ledger);

        let status = if ledger.violations.is_empty() {
            ComplianceStatus::Approved
        } else {
            ComplianceStatus::NeedsReview
        };

        ComplianceResult {
            status,
            violations: ledger.violations,
            notes: ledger.notes,
        }
    }
}
