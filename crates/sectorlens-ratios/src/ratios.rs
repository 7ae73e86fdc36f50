//! Per-company ratios derived from one financial statement.

use sectorlens_traits::FinancialStatement;
use sectorlens_traits::stats::{difference, ratio};
use serde::{Deserialize, Serialize};

/// Figures derived from a single statement.
///
/// Each field is `None` when an operand is missing or a denominator is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedRatios {
    /// Revenue minus cost of revenue.
    pub gross_profit: Option<f64>,
    /// Gross profit minus other expenses.
    pub net_income: Option<f64>,
    /// Gross profit / revenue.
    pub gross_margin: Option<f64>,
    /// Net income / revenue.
    pub net_margin: Option<f64>,
    /// Revenue / total assets.
    pub asset_turnover: Option<f64>,
    /// Current assets / current liabilities.
    pub current_ratio: Option<f64>,
    /// (Current assets - inventory) / current liabilities.
    pub quick_ratio: Option<f64>,
    /// EBIT / interest expenses.
    pub interest_coverage: Option<f64>,
}

impl DerivedRatios {
    /// Ratios for a company with no statement: every field is `None`.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            gross_profit: None,
            net_income: None,
            gross_margin: None,
            net_margin: None,
            asset_turnover: None,
            current_ratio: None,
            quick_ratio: None,
            interest_coverage: None,
        }
    }

    /// Whether no figure could be derived.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.gross_profit.is_none()
            && self.net_income.is_none()
            && self.gross_margin.is_none()
            && self.net_margin.is_none()
            && self.asset_turnover.is_none()
            && self.current_ratio.is_none()
            && self.quick_ratio.is_none()
            && self.interest_coverage.is_none()
    }
}

impl From<&FinancialStatement> for DerivedRatios {
    fn from(statement: &FinancialStatement) -> Self {
        // Later figures reuse the intermediates, so order matters here.
        let gross_profit = difference(statement.total_revenue, statement.cost_of_revenue);
        let net_income = difference(gross_profit, statement.other_expenses);

        Self {
            gross_profit,
            net_income,
            gross_margin: ratio(gross_profit, statement.total_revenue),
            net_margin: ratio(net_income, statement.total_revenue),
            asset_turnover: ratio(statement.total_revenue, statement.total_assets),
            current_ratio: ratio(statement.current_assets, statement.current_liabilities),
            quick_ratio: ratio(
                difference(statement.current_assets, statement.inventory),
                statement.current_liabilities,
            ),
            interest_coverage: ratio(statement.ebit, statement.interest_expenses),
        }
    }
}

/// Derive a company's ratios from its statement.
///
/// An absent statement is not an error; it yields [`DerivedRatios::empty`].
#[must_use]
pub fn compute_ratios(statement: Option<&FinancialStatement>) -> DerivedRatios {
    statement.map_or_else(DerivedRatios::empty, DerivedRatios::from)
}
