// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Model Pricing Table
//!
//! Editable cost-per-token rates by model, version and tier:
//! - Built-in defaults for the Gemini 2.0 / 2.5 / 3.1 families
//! - TOML seed documents (`[[rows]]`)
//! - Create / update / delete with last-write-wins semantics
//!
//! The table lives in memory only and is never read by the metrics engine.

use crate::error::{FleetviewError, PricingError};
use chrono::NaiveDate;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Pricing tier within a model version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PricingTier {
    #[default]
    Pro,
    Flash,
    Lite,
}

impl PricingTier {
    pub fn parse(s: &str) -> Result<Self, FleetviewError> {
        match s.trim().to_lowercase().as_str() {
            "pro" => Ok(PricingTier::Pro),
            "flash" => Ok(PricingTier::Flash),
            "lite" => Ok(PricingTier::Lite),
            _ => Err(FleetviewError::UnknownTier(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PricingTier::Pro => "Pro",
            PricingTier::Flash => "Flash",
            PricingTier::Lite => "Lite",
        }
    }
}

impl FromStr for PricingTier {
    type Err = FleetviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PricingTier::parse(s)
    }
}

/// One row of the pricing table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRow {
    pub id: String,
    pub model: String,
    pub version: String,
    pub tier: PricingTier,
    /// USD per input token
    pub input_cost_per_token: f64,
    /// USD per output token
    pub output_cost_per_token: f64,
    pub effective_date: NaiveDate,
}

impl PricingRow {
    /// Input rate as displayed in the table (`$0.0000100`)
    pub fn input_rate_display(&self) -> String {
        format!("${:.7}", self.input_cost_per_token)
    }

    /// Output rate as displayed in the table
    pub fn output_rate_display(&self) -> String {
        format!("${:.7}", self.output_cost_per_token)
    }
}

/// Draft row for [`PricingTable::add`]; the table assigns the id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPricingRow {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub tier: PricingTier,
    #[serde(default)]
    pub input_cost_per_token: f64,
    #[serde(default)]
    pub output_cost_per_token: f64,
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
}

impl NewPricingRow {
    fn into_row(self, id: String) -> Result<PricingRow, PricingError> {
        if self.model.trim().is_empty() {
            return Err(PricingError::MissingField("model"));
        }
        if self.version.trim().is_empty() {
            return Err(PricingError::MissingField("version"));
        }
        let effective_date = self
            .effective_date
            .ok_or(PricingError::MissingField("effective_date"))?;
        check_rates(self.input_cost_per_token, self.output_cost_per_token)?;

        Ok(PricingRow {
            id,
            model: self.model.trim().to_string(),
            version: self.version.trim().to_string(),
            tier: self.tier,
            input_cost_per_token: self.input_cost_per_token,
            output_cost_per_token: self.output_cost_per_token,
            effective_date,
        })
    }
}

fn check_rates(input: f64, output: f64) -> Result<(), PricingError> {
    if input < 0.0 || output < 0.0 || !input.is_finite() || !output.is_finite() {
        return Err(PricingError::NegativeRate);
    }
    Ok(())
}

/// Shared handle to the in-memory pricing table
#[derive(Clone, Default)]
pub struct PricingTable {
    rows: Arc<RwLock<Vec<PricingRow>>>,
}

impl PricingTable {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Table pre-populated with the built-in rates
    pub fn with_builtins() -> Self {
        Self {
            rows: Arc::new(RwLock::new(Self::builtin_rows())),
        }
    }

    fn builtin_rows() -> Vec<PricingRow> {
        let rows = [
            ("2.0", PricingTier::Pro, 0.00001, 0.00003, (2026, 1, 15)),
            ("2.0", PricingTier::Flash, 0.000005, 0.000015, (2026, 1, 15)),
            ("2.0", PricingTier::Lite, 0.000002, 0.000006, (2026, 1, 15)),
            ("2.5", PricingTier::Pro, 0.000012, 0.000035, (2026, 2, 1)),
            ("2.5", PricingTier::Flash, 0.000006, 0.000018, (2026, 2, 1)),
            ("2.5", PricingTier::Lite, 0.0000025, 0.000007, (2026, 2, 1)),
            ("3.1", PricingTier::Pro, 0.000015, 0.00004, (2026, 3, 1)),
            ("3.1", PricingTier::Flash, 0.000007, 0.00002, (2026, 3, 1)),
        ];

        rows.into_iter()
            .enumerate()
            .map(|(i, (version, tier, input, output, (y, m, d)))| PricingRow {
                id: (i + 1).to_string(),
                model: "Gemini".to_string(),
                version: version.to_string(),
                tier,
                input_cost_per_token: input,
                output_cost_per_token: output,
                effective_date: NaiveDate::from_ymd_opt(y, m, d)
                    .expect("built-in pricing dates are valid"),
            })
            .collect()
    }

    /// All rows in insertion order
    pub fn list(&self) -> Vec<PricingRow> {
        self.rows.read().clone()
    }

    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    pub fn get(&self, id: &str) -> Option<PricingRow> {
        self.rows.read().iter().find(|r| r.id == id).cloned()
    }

    /// Append a new row with a fresh id
    pub fn add(&self, draft: NewPricingRow) -> Result<PricingRow, PricingError> {
        let row = draft.into_row(uuid::Uuid::new_v4().to_string())?;
        self.rows.write().push(row.clone());
        tracing::info!(
            id = %row.id,
            model = %row.model,
            version = %row.version,
            tier = row.tier.as_str(),
            "Added pricing row"
        );
        Ok(row)
    }

    /// Replace the row with the same id
    pub fn update(&self, row: PricingRow) -> Result<PricingRow, PricingError> {
        check_rates(row.input_cost_per_token, row.output_cost_per_token)?;
        if row.model.trim().is_empty() {
            return Err(PricingError::MissingField("model"));
        }
        if row.version.trim().is_empty() {
            return Err(PricingError::MissingField("version"));
        }

        let mut rows = self.rows.write();
        let slot = rows
            .iter_mut()
            .find(|r| r.id == row.id)
            .ok_or_else(|| PricingError::NotFound(row.id.clone()))?;
        *slot = row.clone();
        drop(rows);

        tracing::info!(id = %row.id, "Updated pricing row");
        Ok(row)
    }

    pub fn delete(&self, id: &str) -> Result<(), PricingError> {
        let mut rows = self.rows.write();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        if rows.len() == before {
            return Err(PricingError::NotFound(id.to_string()));
        }
        drop(rows);

        tracing::info!(id, "Deleted pricing row");
        Ok(())
    }

    /// Seed rows from a TOML document.
    ///
    /// Rows carrying an `id` that already exists replace it; all others are
    /// appended. Every row is validated before any is applied, so a bad row
    /// leaves the table untouched. Returns the number of rows applied.
    pub fn load_toml_str(&self, content: &str) -> Result<usize, PricingError> {
        #[derive(Deserialize)]
        struct SeedFile {
            #[serde(default)]
            rows: Vec<SeedRow>,
        }

        #[derive(Deserialize)]
        struct SeedRow {
            #[serde(default)]
            id: Option<String>,
            #[serde(flatten)]
            draft: NewPricingRow,
        }

        let file: SeedFile =
            toml::from_str(content).map_err(|e| PricingError::Parse(e.to_string()))?;

        let staged = file
            .rows
            .into_iter()
            .map(|seed| {
                let id = seed.id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
                seed.draft.into_row(id)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let applied = staged.len();
        let mut rows = self.rows.write();
        for row in staged {
            match rows.iter_mut().find(|r| r.id == row.id) {
                Some(slot) => *slot = row,
                None => rows.push(row),
            }
        }
        drop(rows);

        tracing::info!(applied, "Loaded pricing seed rows");
        Ok(applied)
    }
}
