//! Transaction record reconstructed from a card statement row.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::calendar::MonthKey;

/// Operator name used when no known operator token appears in a row.
pub const UNKNOWN_OPERATOR: &str = "Unknown";

/// One card movement: a validation, a debit, or any other ledger entry.
///
/// Every field except `location` is fixed at creation; `location` grows
/// while wrapped continuation lines are stitched onto it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Card sequence number. Statements may reset it, so it is not a key.
    pub id: u64,
    /// Local wall-clock timestamp printed on the statement
    pub date: NaiveDateTime,
    /// Raw transaction-type label, e.g. "VALIDACIONENTRADA"
    #[serde(rename = "type")]
    pub kind: String,
    /// Canonical operator name, or [`UNKNOWN_OPERATOR`]
    pub operator: String,
    pub location: String,
    /// Signed amount in euros. Debits are negative.
    pub amount: f64,
    /// Card balance after this movement
    pub balance: f64,
}

impl Transaction {
    pub fn new(
        id: u64,
        date: NaiveDateTime,
        kind: impl Into<String>,
        operator: impl Into<String>,
        location: impl Into<String>,
        amount: f64,
        balance: f64,
    ) -> Self {
        Self {
            id,
            date,
            kind: kind.into(),
            operator: operator.into(),
            location: location.into(),
            amount,
            balance,
        }
    }

    /// Entry and single validations count as trips; exit validations don't,
    /// otherwise a round trip would be counted twice.
    pub fn is_trip(&self) -> bool {
        is_trip_kind(&self.kind)
    }

    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }

    pub fn month(&self) -> MonthKey {
        MonthKey::of(self.date.date())
    }

    /// Append a wrapped line to the location, separated by one space.
    pub fn append_location(&mut self, line: &str) {
        let joined = format!("{} {}", self.location, line);
        self.location = joined.trim().to_string();
    }
}

/// Trip predicate on a raw type label.
pub fn is_trip_kind(kind: &str) -> bool {
    let lower = kind.to_lowercase();
    (lower.contains("validacionentrada") || lower.contains("validacionunica"))
        && !lower.contains("validacionsalida")
}
