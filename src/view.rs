// 🧭 Views - which panel is on screen

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Dashboard,
    Maintenance,
    Mortgage,
    Renovation,
    Rental,
    Selling,
    Advisor,
}

impl View {
    pub const ALL: [View; 7] = [
        View::Dashboard,
        View::Maintenance,
        View::Mortgage,
        View::Renovation,
        View::Rental,
        View::Selling,
        View::Advisor,
    ];

    fn position(&self) -> usize {
        View::ALL.iter().position(|v| v == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        View::ALL[(self.position() + 1) % View::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        let len = View::ALL.len();
        View::ALL[(self.position() + len - 1) % len]
    }

    /// 1-based, matching the number keys in the nav bar
    pub fn from_index(index: usize) -> Option<Self> {
        index.checked_sub(1).and_then(|i| View::ALL.get(i).copied())
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Maintenance => "Maintenance",
            View::Mortgage => "Mortgage",
            View::Renovation => "Renovation ROI",
            View::Rental => "Rental Potential",
            View::Selling => "Selling Guide & Agent Match",
            View::Advisor => "Home Advisor (AI)",
        }
    }

    /// Short nav label
    pub fn label(&self) -> &'static str {
        match self {
            View::Dashboard => "Home",
            View::Maintenance => "Tasks",
            View::Mortgage => "Mortgage",
            View::Renovation => "Reno",
            View::Rental => "Rent",
            View::Selling => "Sell",
            View::Advisor => "Advisor",
        }
    }

    /// Views that capture typed characters (digits, letters) as input
    pub fn captures_text(&self) -> bool {
        matches!(self, View::Rental | View::Advisor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_wraps() {
        assert_eq!(View::Dashboard.next(), View::Maintenance);
        assert_eq!(View::Advisor.next(), View::Dashboard);
    }

    #[test]
    fn test_previous_wraps() {
        assert_eq!(View::Dashboard.previous(), View::Advisor);
        assert_eq!(View::Rental.previous(), View::Renovation);
    }

    #[test]
    fn test_from_index() {
        assert_eq!(View::from_index(1), Some(View::Dashboard));
        assert_eq!(View::from_index(7), Some(View::Advisor));
        assert_eq!(View::from_index(0), None);
        assert_eq!(View::from_index(8), None);
    }

    #[test]
    fn test_full_cycle_visits_every_view() {
        let mut view = View::default();
        for expected in View::ALL.iter().skip(1) {
            view = view.next();
            assert_eq!(view, *expected);
        }
        assert_eq!(view.next(), View::Dashboard);
    }
}
