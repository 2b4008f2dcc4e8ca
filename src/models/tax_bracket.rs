//! Tax bracket models.
//!
//! A bracket table is an ordered list of [`TaxBracket`] entries that
//! partitions taxable income into ranges taxed at increasing marginal rates.
//! Evaluating a table yields one [`BracketContribution`] per bracket that
//! actually taxed some income.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A contiguous taxable-income range taxed at one marginal rate.
///
/// Bounds follow the published tables, where each bracket starts one VND
/// above the previous bracket's upper bound. The top bracket has no upper
/// bound.
///
/// # Example
///
/// ```
/// use salary_engine::models::TaxBracket;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let bracket = TaxBracket {
///     lower_bound: Decimal::from(10_000_001),
///     upper_bound: Some(Decimal::from(30_000_000)),
///     rate: Decimal::from_str("0.10").unwrap(),
/// };
/// assert!(!bracket.is_unbounded());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Income at which the bracket starts.
    pub lower_bound: Decimal,
    /// Income at which the bracket ends, or `None` for the top bracket.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    /// Marginal rate as a fraction (0.05 for 5%).
    pub rate: Decimal,
}

impl TaxBracket {
    /// Returns true if the bracket has no upper bound.
    pub fn is_unbounded(&self) -> bool {
        self.upper_bound.is_none()
    }

    /// Returns the portion of `taxable_income` that falls in this bracket.
    ///
    /// Zero when the income does not exceed the bracket's lower bound.
    pub fn income_in_bracket(&self, taxable_income: Decimal) -> Decimal {
        if taxable_income <= self.lower_bound {
            return Decimal::ZERO;
        }
        let top = match self.upper_bound {
            Some(upper) => taxable_income.min(upper),
            None => taxable_income,
        };
        top - self.lower_bound
    }
}

/// The tax contributed by a single bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketContribution {
    /// The 1-based position of the bracket in its table.
    pub bracket: u32,
    /// The income taxed in this bracket.
    pub income: Decimal,
    /// The marginal rate applied, as a fraction (0.05), not the percentage
    /// (5) a display layer would show.
    pub rate: Decimal,
    /// The tax produced (`income * rate`).
    pub tax: Decimal,
}
