//! Token usage accounting and cost estimation.
//!
//! Costs are computed with decimal arithmetic so the running total stays
//! exact over many small accumulations.

use chrono::{DateTime, Utc};
use exstruct_core::TokenUsage;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::Serialize;

/// Dollars per 1000 tokens, split by token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelPrice {
    /// Price per 1000 prompt tokens.
    pub prompt: Decimal,
    /// Price per 1000 completion tokens.
    pub completion: Decimal,
}

impl ModelPrice {
    /// Create a price entry.
    #[must_use]
    pub fn new(prompt: Decimal, completion: Decimal) -> Self {
        Self { prompt, completion }
    }

    /// Cost of the given usage at this price.
    #[must_use]
    pub fn cost(&self, usage: &TokenUsage) -> Decimal {
        let thousand = Decimal::from(1000u64);
        Decimal::from(usage.prompt_tokens) * self.prompt / thousand
            + Decimal::from(usage.completion_tokens) * self.completion / thousand
    }
}

/// Per-model price table with a fallback rate for unknown models.
///
/// Lookup matches the longest table entry that prefixes the model
/// identifier, so dated variants like `gpt-4o-2024-08-06` resolve to their
/// family rate.
#[derive(Debug, Clone)]
pub struct PriceTable {
    entries: Vec<(String, ModelPrice)>,
    default_price: ModelPrice,
}

impl Default for PriceTable {
    fn default() -> Self {
        let price = |p, ps, c, cs| ModelPrice::new(Decimal::new(p, ps), Decimal::new(c, cs));
        Self {
            entries: vec![
                ("gpt-4o-mini".to_string(), price(15, 5, 6, 4)),
                ("gpt-4o".to_string(), price(25, 4, 1, 2)),
                ("gpt-4-turbo".to_string(), price(1, 2, 3, 2)),
                ("gpt-4".to_string(), price(3, 2, 6, 2)),
                ("gpt-3.5-turbo".to_string(), price(5, 4, 15, 4)),
            ],
            // Matches the historical flat estimate of $0.01 per 1000 tokens.
            default_price: price(1, 2, 1, 2),
        }
    }
}

impl PriceTable {
    /// Create an empty table with the given fallback rate.
    #[must_use]
    pub fn with_default_price(default_price: ModelPrice) -> Self {
        Self {
            entries: Vec::new(),
            default_price,
        }
    }

    /// Add or override a price entry.
    #[must_use]
    pub fn with_price(mut self, model: impl Into<String>, price: ModelPrice) -> Self {
        self.entries.push((model.into(), price));
        self
    }

    /// Price for a model identifier, falling back to the default rate.
    #[must_use]
    pub fn price_for(&self, model: &str) -> ModelPrice {
        self.entries
            .iter()
            .filter(|(name, _)| model.starts_with(name.as_str()))
            .max_by_key(|(name, _)| name.len())
            .map(|(_, price)| *price)
            .unwrap_or(self.default_price)
    }
}

/// One recorded provider call.
#[derive(Debug, Clone, Serialize)]
pub struct CostRecord {
    /// Model that served the call.
    pub model: String,
    /// Token usage for the call.
    pub usage: TokenUsage,
    /// Cost of the call in dollars.
    pub cost: Decimal,
    /// When the call was recorded.
    pub timestamp: DateTime<Utc>,
}

/// Cost figures returned after recording one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostInfo {
    /// Cost of the recorded call.
    pub call_cost: Decimal,
    /// Running total across the process lifetime.
    pub cumulative_cost: Decimal,
    /// Total tokens of the recorded call.
    pub total_tokens: u64,
}

/// Aggregate figures over all recorded calls.
#[derive(Debug, Clone, Serialize)]
pub struct CostSummary {
    /// Number of recorded calls.
    pub calls: usize,
    /// Merged token usage.
    pub usage: TokenUsage,
    /// Total cost in dollars.
    pub total_cost: Decimal,
}

#[derive(Default)]
struct Ledger {
    records: Vec<CostRecord>,
    usage: TokenUsage,
    total_cost: Decimal,
}

/// Append-only usage ledger with a running cost total.
pub struct CostTracker {
    prices: PriceTable,
    ledger: Mutex<Ledger>,
}

impl Default for CostTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl CostTracker {
    /// Create a tracker with the built-in price table.
    #[must_use]
    pub fn new() -> Self {
        Self::with_prices(PriceTable::default())
    }

    /// Create a tracker with a custom price table.
    #[must_use]
    pub fn with_prices(prices: PriceTable) -> Self {
        Self {
            prices,
            ledger: Mutex::new(Ledger::default()),
        }
    }

    /// Record one call's usage and return its cost plus the running total.
    pub fn record(&self, model: &str, usage: TokenUsage) -> CostInfo {
        let cost = self.prices.price_for(model).cost(&usage);
        let mut ledger = self.ledger.lock();
        ledger.records.push(CostRecord {
            model: model.to_string(),
            usage,
            cost,
            timestamp: Utc::now(),
        });
        ledger.usage.merge(&usage);
        ledger.total_cost += cost;
        CostInfo {
            call_cost: cost,
            cumulative_cost: ledger.total_cost,
            total_tokens: usage.total_tokens,
        }
    }

    /// Aggregate figures over all recorded calls.
    #[must_use]
    pub fn summary(&self) -> CostSummary {
        let ledger = self.ledger.lock();
        CostSummary {
            calls: ledger.records.len(),
            usage: ledger.usage,
            total_cost: ledger.total_cost,
        }
    }

    /// Running total in dollars.
    #[must_use]
    pub fn total_cost(&self) -> Decimal {
        self.ledger.lock().total_cost
    }

    /// Copy of the recorded calls, oldest first.
    #[must_use]
    pub fn records(&self) -> Vec<CostRecord> {
        self.ledger.lock().records.clone()
    }
}
