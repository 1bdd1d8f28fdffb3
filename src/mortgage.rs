// 🏦 Mortgage Summary - loan snapshot, equity split, refinance outlook

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::home::sample_date;

/// Prevailing 30-year rate used for the refinance hint
pub const MARKET_RATE_PCT: f64 = 6.8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageDetails {
    /// Outstanding principal
    pub balance: f64,

    /// Annual rate in percent (6.5 = 6.5%)
    pub interest_rate: f64,

    /// Principal & interest
    pub monthly_payment: f64,

    pub lender: String,
    pub term_years: u32,
    pub start_date: NaiveDate,
}

impl MortgageDetails {
    pub fn sample() -> Self {
        MortgageDetails {
            balance: 320_000.0,
            interest_rate: 6.5,
            monthly_payment: 2150.0,
            lender: "Chase Bank".to_string(),
            term_years: 30,
            start_date: sample_date(2021, 5, 1),
        }
    }

    pub fn breakdown(&self, home_value: f64) -> EquityBreakdown {
        EquityBreakdown::new(home_value, self.balance)
    }

    pub fn refinance_outlook(&self, market_rate: f64) -> RefinanceOutlook {
        if market_rate < self.interest_rate {
            RefinanceOutlook::Favorable {
                current_rate: self.interest_rate,
                market_rate,
            }
        } else {
            RefinanceOutlook::Unfavorable {
                current_rate: self.interest_rate,
                market_rate,
            }
        }
    }
}

/// Home value minus what is still owed. Underwater loans go negative.
pub fn equity(home_value: f64, balance: f64) -> f64 {
    home_value - balance
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityBreakdown {
    pub home_value: f64,
    pub equity: f64,
    pub balance: f64,

    /// Equity as a share of home value (0-100); 0 when value is 0
    pub equity_pct: f64,
}

impl EquityBreakdown {
    pub fn new(home_value: f64, balance: f64) -> Self {
        let equity = equity(home_value, balance);
        let equity_pct = if home_value == 0.0 {
            0.0
        } else {
            equity / home_value * 100.0
        };

        EquityBreakdown {
            home_value,
            equity,
            balance,
            equity_pct,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outlook", rename_all = "lowercase")]
pub enum RefinanceOutlook {
    Favorable { current_rate: f64, market_rate: f64 },
    Unfavorable { current_rate: f64, market_rate: f64 },
}

impl RefinanceOutlook {
    pub fn message(&self) -> String {
        match self {
            RefinanceOutlook::Favorable { current_rate, market_rate } => format!(
                "Current rates are hovering around {}. You are currently at {}. \
                 Refinancing could lower your monthly payment.",
                crate::format::format_percent(*market_rate),
                crate::format::format_percent(*current_rate),
            ),
            RefinanceOutlook::Unfavorable { current_rate, market_rate } => format!(
                "Current rates are hovering around {}. You are currently at {}. \
                 It might not be the best time to refinance unless you need to tap into equity.",
                crate::format::format_percent(*market_rate),
                crate::format::format_percent(*current_rate),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equity_sample() {
        assert_eq!(equity(452_000.0, 320_000.0), 132_000.0);
    }

    #[test]
    fn test_equity_can_go_negative() {
        assert_eq!(equity(300_000.0, 320_000.0), -20_000.0);
    }

    #[test]
    fn test_breakdown() {
        let breakdown = MortgageDetails::sample().breakdown(452_000.0);
        assert_eq!(breakdown.equity, 132_000.0);
        assert_eq!(breakdown.balance, 320_000.0);
        assert!((breakdown.equity_pct - 29.2035).abs() < 0.001);
    }

    #[test]
    fn test_breakdown_zero_value() {
        let breakdown = EquityBreakdown::new(0.0, 10_000.0);
        assert_eq!(breakdown.equity_pct, 0.0);
    }

    #[test]
    fn test_refinance_outlook() {
        let mortgage = MortgageDetails::sample();

        let outlook = mortgage.refinance_outlook(MARKET_RATE_PCT);
        assert!(matches!(outlook, RefinanceOutlook::Unfavorable { .. }));
        assert!(outlook.message().contains("6.8%"));
        assert!(outlook.message().contains("6.5%"));

        let outlook = mortgage.refinance_outlook(5.9);
        assert!(matches!(outlook, RefinanceOutlook::Favorable { .. }));
    }
}
