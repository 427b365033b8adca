//! Best-effort local cache of the budget config, the debt baseline and the
//! "hide numbers" display flag.
//!
//! The cache is one JSON document. Each part is read independently, so a
//! damaged part falls back to its default without discarding the others.

use crate::budget::{evaluate, BudgetResult};
use crate::config::{default_debt_baseline, BudgetConfig};
use crate::debt::{apply_payment, project_trend};
use crate::error::{BudgetError, Result};
use chrono::NaiveDateTime;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fs, io, path::Path};

#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStore {
    pub config: BudgetConfig,
    debt_baseline: f64,
    pub hide_numbers: bool,
}

impl Default for BudgetStore {
    fn default() -> Self {
        Self {
            config: BudgetConfig::default(),
            debt_baseline: default_debt_baseline(),
            hide_numbers: false,
        }
    }
}

impl BudgetStore {
    /// Load the cache at `path`, or defaults if there is no cache yet.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("no budget cache at {}, starting from defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<Value>(&contents) {
            Ok(cached) => Ok(Self::from_cached(&cached)),
            Err(e) => {
                warn!("ignoring unreadable budget cache {}: {}", path.display(), e);
                Ok(Self::default())
            }
        }
    }

    fn from_cached(cached: &Value) -> Self {
        let mut store = Self::default();

        if let Some(config) = cached.get("config") {
            match BudgetConfig::deserialize(config) {
                Ok(config) => store.config = config,
                Err(e) => warn!("ignoring cached config: {}", e),
            }
        }
        if let Some(baseline) = cached.get("debtBaseline").and_then(Value::as_f64) {
            if baseline.is_finite() && baseline > 0. {
                store.debt_baseline = baseline;
            } else {
                warn!("ignoring cached debt baseline {}", baseline);
            }
        }
        if let Some(hide_numbers) = cached.get("hideNumbers").and_then(Value::as_bool) {
            store.hide_numbers = hide_numbers;
        }
        store
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!("saved budget cache to {}", path.display());
        Ok(())
    }

    pub fn debt_baseline(&self) -> f64 {
        self.debt_baseline
    }

    pub fn set_debt_baseline(&mut self, baseline: f64) -> Result<()> {
        if !baseline.is_finite() || baseline <= 0. {
            return Err(BudgetError::InvalidBaseline(baseline));
        }
        self.debt_baseline = baseline;
        Ok(())
    }

    /// Replace the config wholesale. The baseline rises to meet a debt total
    /// above it and never falls on its own.
    pub fn set_config(&mut self, config: BudgetConfig) {
        self.config = config;
        self.ratchet_baseline();
    }

    pub fn reset_defaults(&mut self) {
        self.config = BudgetConfig::default();
        self.debt_baseline = default_debt_baseline();
    }

    pub fn toggle_hide_numbers(&mut self) {
        self.hide_numbers = !self.hide_numbers;
    }

    pub fn result(&self, now: &NaiveDateTime) -> BudgetResult {
        evaluate(&self.config, self.debt_baseline, now)
    }

    pub fn trend(&self, points: usize, now: &NaiveDateTime) -> Vec<f64> {
        project_trend(&self.config, points, now)
    }

    /// Record this cycle's paycheck B debt payment against the balances.
    /// Returns false, leaving everything untouched, when there is nothing to pay.
    pub fn apply_cycle_payment(&mut self, now: &NaiveDateTime) -> bool {
        let result = self.result(now);
        if !result.debt_mode || result.b.debt_payment <= 0. {
            return false;
        }
        info!(
            "applying debt payment ${:.2} ({})",
            result.b.debt_payment, self.config.debt_priority
        );
        self.config = apply_payment(&self.config, result.b.debt_payment);
        self.ratchet_baseline();
        true
    }

    fn ratchet_baseline(&mut self) {
        let total = self.config.debt_total();
        if total > self.debt_baseline {
            info!("raising debt baseline from {:.2} to {:.2}", self.debt_baseline, total);
            self.debt_baseline = total;
        }
    }
}
