//! Serializable snapshot of the planner inputs, handed to whatever storage
//! the host application uses.

use anyhow::Context;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Debt, PlanRequest, Strategy};
use crate::validation::validate_request;

/// Saved planner inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRecord {
    /// Debts as entered in the editor.
    pub debts: Vec<Debt>,
    /// Global extra monthly payment.
    pub extra_payment: Decimal,
    /// Records written before strategies were stored load as avalanche.
    #[serde(default)]
    pub strategy: Strategy,
}

impl PlanRecord {
    /// Serializes the record for the storage collaborator.
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string(self).context("Failed to serialize plan record")
    }

    /// Parses a record previously written by `to_json`.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Failed to parse plan record")
    }

    /// Planner input built from this record.
    pub fn request(&self) -> PlanRequest {
        PlanRequest {
            debts: self.debts.clone(),
            extra_payment: self.extra_payment,
            strategy: self.strategy,
        }
    }

    /// Parses a stored record and checks it is ready to simulate.
    pub fn load_request(json: &str) -> anyhow::Result<PlanRequest> {
        let request = Self::from_json(json)?.request();
        validate_request(&request).context("Stored plan record is invalid")?;
        Ok(request)
    }
}

impl From<PlanRequest> for PlanRecord {
    fn from(request: PlanRequest) -> Self {
        Self {
            debts: request.debts,
            extra_payment: request.extra_payment,
            strategy: request.strategy,
        }
    }
}
