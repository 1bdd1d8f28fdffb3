// 🏡 Home Profile - the property every panel talks about
// Sample data only: value history, neighborhood comps, value drivers

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// HOME PROFILE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeProfile {
    pub address: String,

    /// Current estimated market value (USD)
    pub current_value: f64,

    pub purchase_price: f64,
    pub purchase_date: NaiveDate,

    pub sqft: u32,
    pub beds: u32,

    /// Half baths count as 0.5
    pub baths: f64,

    pub year_built: u16,
}

impl HomeProfile {
    /// The sample home shown throughout the dashboard
    pub fn sample() -> Self {
        HomeProfile {
            address: "123 Arbor Lane, Austin TX".to_string(),
            current_value: 452_000.0,
            purchase_price: 380_000.0,
            purchase_date: sample_date(2021, 5, 1),
            sqft: 2250,
            beds: 3,
            baths: 2.5,
            year_built: 2005,
        }
    }

    /// Estimate band shown under the hero value: ±5%
    pub fn value_range(&self) -> (f64, f64) {
        (self.current_value * 0.95, self.current_value * 1.05)
    }

    /// Year-over-year change badge
    pub fn one_year_change_pct(&self) -> f64 {
        ONE_YEAR_CHANGE_PCT
    }

    /// Gain since purchase
    pub fn appreciation(&self) -> f64 {
        self.current_value - self.purchase_price
    }

    pub fn price_per_sqft(&self) -> f64 {
        price_per_sqft(self.current_value, self.sqft)
    }

    /// "3 Beds • 2.5 Baths • 2,250 Sqft"
    pub fn summary_line(&self) -> String {
        format!(
            "{} Beds • {} Baths • {} Sqft",
            self.beds,
            self.baths,
            crate::format::group_thousands(self.sqft as i64)
        )
    }
}

const ONE_YEAR_CHANGE_PCT: f64 = 4.2;

/// Sample dates are literals; an impossible one falls back to `NaiveDate::MIN`
pub(crate) fn sample_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn price_per_sqft(price: f64, sqft: u32) -> f64 {
    if sqft == 0 {
        0.0
    } else {
        price / sqft as f64
    }
}

// ============================================================================
// NEIGHBORHOOD COMPS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompHome {
    pub id: String,
    pub address: String,
    pub sold_price: f64,

    /// Relative sale date as shown ("2 weeks ago")
    pub sold_ago: String,

    pub sqft: u32,
    pub beds: u32,
    pub baths: f64,
}

impl CompHome {
    pub fn price_per_sqft(&self) -> f64 {
        price_per_sqft(self.sold_price, self.sqft)
    }
}

pub fn sample_comps() -> Vec<CompHome> {
    vec![
        comp("1", "124 Maple Ave", 465_000.0, "2 weeks ago", 2100, 4, 3.0),
        comp("2", "118 Oak St", 440_000.0, "1 month ago", 1950, 3, 2.0),
        comp("3", "205 Pine Ln", 455_000.0, "2 months ago", 2050, 3, 2.5),
    ]
}

fn comp(id: &str, address: &str, sold_price: f64, sold_ago: &str, sqft: u32, beds: u32, baths: f64) -> CompHome {
    CompHome {
        id: id.to_string(),
        address: address.to_string(),
        sold_price,
        sold_ago: sold_ago.to_string(),
        sqft,
        beds,
        baths,
    }
}

// ============================================================================
// VALUE TREND + DRIVERS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuePoint {
    pub month: String,
    pub value: f64,
}

/// Last 12 months, bi-monthly samples
pub fn value_history() -> Vec<ValuePoint> {
    [
        ("Jan", 420_000.0),
        ("Mar", 425_000.0),
        ("May", 428_000.0),
        ("Jul", 440_000.0),
        ("Sep", 445_000.0),
        ("Nov", 452_000.0),
    ]
    .iter()
    .map(|(month, value)| ValuePoint {
        month: month.to_string(),
        value: *value,
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueDriver {
    pub label: String,
    pub rating: String,
}

pub fn value_drivers() -> Vec<ValueDriver> {
    [
        ("Market Demand", "High"),
        ("Condition", "Good"),
        ("School District", "Top 10%"),
        ("Renovations", "Recent"),
    ]
    .iter()
    .map(|(label, rating)| ValueDriver {
        label: label.to_string(),
        rating: rating.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_home() {
        let home = HomeProfile::sample();
        assert_eq!(home.address, "123 Arbor Lane, Austin TX");
        assert_eq!(home.current_value, 452_000.0);
        assert_eq!(home.purchase_date, NaiveDate::from_ymd_opt(2021, 5, 1).unwrap());
    }

    #[test]
    fn test_value_range_is_five_percent_band() {
        let home = HomeProfile::sample();
        let (low, high) = home.value_range();
        assert!((low - 429_400.0).abs() < 1e-6);
        assert!((high - 474_600.0).abs() < 1e-6);
    }

    #[test]
    fn test_appreciation_since_purchase() {
        assert_eq!(HomeProfile::sample().appreciation(), 72_000.0);
    }

    #[test]
    fn test_price_per_sqft_handles_zero() {
        let mut home = HomeProfile::sample();
        assert!((home.price_per_sqft() - 200.888).abs() < 0.001);
        home.sqft = 0;
        assert_eq!(home.price_per_sqft(), 0.0);
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(HomeProfile::sample().summary_line(), "3 Beds • 2.5 Baths • 2,250 Sqft");
    }

    #[test]
    fn test_history_ends_at_current_value() {
        let history = value_history();
        assert_eq!(history.len(), 6);
        assert_eq!(history.last().unwrap().value, HomeProfile::sample().current_value);
    }

    #[test]
    fn test_comps() {
        let comps = sample_comps();
        assert_eq!(comps.len(), 3);
        assert_eq!(comps[0].address, "124 Maple Ave");
        assert!((comps[1].price_per_sqft() - 225.641).abs() < 0.001);
    }
}
