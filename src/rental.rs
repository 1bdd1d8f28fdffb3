// 🏘️ Rental Calculator - what the house would cash-flow as a rental
//
// gross          = rent × 12
// vacancy_loss   = gross × vacancy%
// management_fee = (gross − vacancy_loss) × fee%
// noi            = gross − vacancy_loss − management_fee − maintenance × 12
// annual         = noi − mortgage × 12
// monthly        = annual / 12
//
// All figures stay unrounded; rounding happens only at display time.

use serde::{Deserialize, Serialize};

// ============================================================================
// INPUTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RentalInputs {
    pub monthly_rent: f64,
    pub vacancy_pct: f64,
    pub management_fee_pct: f64,

    /// Monthly maintenance reserve
    pub maintenance: f64,
}

impl Default for RentalInputs {
    fn default() -> Self {
        RentalInputs {
            monthly_rent: 2800.0,
            vacancy_pct: 5.0,
            management_fee_pct: 8.0,
            maintenance: 150.0,
        }
    }
}

/// Form fields are free text; anything that isn't a finite number counts as zero
pub fn parse_numeric_input(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RentalField {
    MonthlyRent,
    VacancyPct,
    ManagementFeePct,
    Maintenance,
}

impl RentalField {
    pub const ALL: [RentalField; 4] = [
        RentalField::MonthlyRent,
        RentalField::VacancyPct,
        RentalField::ManagementFeePct,
        RentalField::Maintenance,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RentalField::MonthlyRent => "Expected Monthly Rent ($)",
            RentalField::VacancyPct => "Vacancy (%)",
            RentalField::ManagementFeePct => "Mgmt Fee (%)",
            RentalField::Maintenance => "Maintenance ($/mo)",
        }
    }

    pub fn get(&self, inputs: &RentalInputs) -> f64 {
        match self {
            RentalField::MonthlyRent => inputs.monthly_rent,
            RentalField::VacancyPct => inputs.vacancy_pct,
            RentalField::ManagementFeePct => inputs.management_fee_pct,
            RentalField::Maintenance => inputs.maintenance,
        }
    }

    pub fn set(&self, inputs: &mut RentalInputs, value: f64) {
        match self {
            RentalField::MonthlyRent => inputs.monthly_rent = value,
            RentalField::VacancyPct => inputs.vacancy_pct = value,
            RentalField::ManagementFeePct => inputs.management_fee_pct = value,
            RentalField::Maintenance => inputs.maintenance = value,
        }
    }
}

// ============================================================================
// CASH FLOW
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    pub gross_annual: f64,
    pub vacancy_loss: f64,
    pub management_fee: f64,
    pub annual_maintenance: f64,
    pub annual_mortgage: f64,
    pub net_operating_income: f64,
    pub annual_cash_flow: f64,
    pub monthly_cash_flow: f64,
}

impl CashFlow {
    pub fn is_positive(&self) -> bool {
        self.monthly_cash_flow > 0.0
    }

    /// "+$147" / "-$14"
    pub fn monthly_display(&self) -> String {
        crate::format::format_signed_currency(self.monthly_cash_flow)
    }
}

pub fn calculate(inputs: &RentalInputs, mortgage_payment: f64) -> CashFlow {
    let gross_annual = inputs.monthly_rent * 12.0;
    let vacancy_loss = gross_annual * (inputs.vacancy_pct / 100.0);
    let management_fee = (gross_annual - vacancy_loss) * (inputs.management_fee_pct / 100.0);
    let annual_maintenance = inputs.maintenance * 12.0;
    let annual_mortgage = mortgage_payment * 12.0;

    let net_operating_income = gross_annual - vacancy_loss - management_fee - annual_maintenance;
    let annual_cash_flow = net_operating_income - annual_mortgage;

    CashFlow {
        gross_annual,
        vacancy_loss,
        management_fee,
        annual_maintenance,
        annual_mortgage,
        net_operating_income,
        annual_cash_flow,
        monthly_cash_flow: annual_cash_flow / 12.0,
    }
}

// ============================================================================
// NEARBY RENTALS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalComps {
    pub label: String,
    pub average_rent: f64,
    pub occupancy_pct: f64,
}

pub fn nearby_rentals() -> RentalComps {
    RentalComps {
        label: "3bd/2ba Average".to_string(),
        average_rent: 2750.0,
        occupancy_pct: 96.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_sample_cash_flow() {
        let flow = calculate(&RentalInputs::default(), 2150.0);

        assert!(close(flow.gross_annual, 33_600.0));
        assert!(close(flow.vacancy_loss, 1_680.0));
        assert!(close(flow.management_fee, 2_553.6));
        assert!(close(flow.annual_maintenance, 1_800.0));
        assert!(close(flow.annual_mortgage, 25_800.0));
        assert!(close(flow.net_operating_income, 27_566.4));
        assert!(close(flow.annual_cash_flow, 1_766.4));
        assert!(close(flow.monthly_cash_flow, 147.2));
        assert!(flow.is_positive());
        assert_eq!(flow.monthly_display(), "+$147");
    }

    #[test]
    fn test_negative_cash_flow() {
        let inputs = RentalInputs {
            monthly_rent: 2000.0,
            ..RentalInputs::default()
        };
        let flow = calculate(&inputs, 2150.0);

        // 24000 - 1200 - 1824 - 1800 - 25800 = -6624
        assert!(close(flow.annual_cash_flow, -6_624.0));
        assert!(close(flow.monthly_cash_flow, -552.0));
        assert!(!flow.is_positive());
        assert_eq!(flow.monthly_display(), "-$552");
    }

    #[test]
    fn test_zero_cash_flow_is_not_positive() {
        let inputs = RentalInputs {
            monthly_rent: 0.0,
            vacancy_pct: 0.0,
            management_fee_pct: 0.0,
            maintenance: 0.0,
        };
        let flow = calculate(&inputs, 0.0);
        assert_eq!(flow.monthly_cash_flow, 0.0);
        assert!(!flow.is_positive());
    }

    #[test]
    fn test_parse_numeric_input_treats_garbage_as_zero() {
        assert_eq!(parse_numeric_input("2800"), 2800.0);
        assert_eq!(parse_numeric_input(" 7.5 "), 7.5);
        assert_eq!(parse_numeric_input(""), 0.0);
        assert_eq!(parse_numeric_input("abc"), 0.0);
        assert_eq!(parse_numeric_input("NaN"), 0.0);
        assert_eq!(parse_numeric_input("inf"), 0.0);
    }

    #[test]
    fn test_field_accessors() {
        let mut inputs = RentalInputs::default();
        for field in RentalField::ALL {
            field.set(&mut inputs, 1.0);
            assert_eq!(field.get(&inputs), 1.0);
        }
    }

    #[test]
    fn test_huge_negative_rent_still_displays() {
        let inputs = RentalInputs {
            monthly_rent: parse_numeric_input("-99999999999999999999"),
            ..RentalInputs::default()
        };
        let flow = calculate(&inputs, 2150.0);
        assert!(!flow.is_positive());
        assert!(flow.monthly_display().starts_with("-$"));

        let flow = calculate(&RentalInputs { monthly_rent: -1e30, ..RentalInputs::default() }, 2150.0);
        assert_eq!(flow.monthly_display(), "-$9,223,372,036,854,775,808");
    }
}
