use anyhow::{Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Income and expenses recorded for a single calendar date.
///
/// Income is keyed by free-text source labels chosen by the user, so the set of
/// sources is open-ended. Several entries may exist for the same date; they are
/// summed when aggregated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub date: NaiveDate,
    #[serde(default)]
    pub income_by_source: BTreeMap<String, f64>,
    #[serde(default)]
    pub expenses: f64,
}

impl Entry {
    /// Builds a validated entry. Amounts must be finite and non-negative and
    /// source labels must not be blank.
    pub fn new(
        date: NaiveDate,
        income_by_source: BTreeMap<String, f64>,
        expenses: f64,
    ) -> Result<Self> {
        for (source, amount) in &income_by_source {
            if source.trim().is_empty() {
                bail!("Income source name cannot be empty");
            }
            if !amount.is_finite() || *amount < 0.0 {
                bail!("Income for '{source}' must be a non-negative amount, got {amount}");
            }
        }
        if !expenses.is_finite() || expenses < 0.0 {
            bail!("Expenses must be a non-negative amount, got {expenses}");
        }

        Ok(Self {
            date,
            income_by_source,
            expenses,
        })
    }

    pub fn total_income(&self) -> f64 {
        self.income_by_source.values().sum()
    }

    pub fn net(&self) -> f64 {
        self.total_income() - self.expenses
    }
}
