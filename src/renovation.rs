// 🔨 Renovation ROI - project catalog + budget slider estimate
//
// Value added is a straight line: budget × (roi / 100).
// The slider range follows the catalog entry: [min × 0.8, max × 1.5], with stops
// every 500 counted from the low end.

use serde::{Deserialize, Serialize};

pub const BUDGET_STEP: f64 = 500.0;

// Absorbs float noise when the budget already sits on a stop
const GRID_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenovationProject {
    pub id: String,
    pub name: String,
    pub category: String,
    pub cost_min: f64,
    pub cost_max: f64,

    /// Share of cost recovered at resale, in percent
    pub roi_pct: f64,

    pub description: String,
}

impl RenovationProject {
    pub fn budget_floor(&self) -> f64 {
        self.cost_min * 0.8
    }

    pub fn budget_ceiling(&self) -> f64 {
        self.cost_max * 1.5
    }

    /// Number of whole steps between the floor and the highest reachable budget
    fn budget_steps(&self) -> f64 {
        ((self.budget_ceiling() - self.budget_floor()) / BUDGET_STEP).floor().max(0.0)
    }

    /// Highest grid point at or below the ceiling: floor + k × step
    pub fn budget_max(&self) -> f64 {
        self.budget_floor() + self.budget_steps() * BUDGET_STEP
    }

    fn grid_point(&self, step: f64) -> f64 {
        self.budget_floor() + step.clamp(0.0, self.budget_steps()) * BUDGET_STEP
    }
}

pub fn catalog() -> Vec<RenovationProject> {
    vec![
        project("1", "Kitchen Remodel (Mid-Range)", "Interior", 25_000.0, 45_000.0, 55.0,
            "New cabinets, stone counters, new appliances."),
        project("2", "Bathroom Addition", "Expansion", 50_000.0, 70_000.0, 60.0,
            "Adding a full 5x8 bathroom."),
        project("3", "Wood Deck Addition", "Exterior", 15_000.0, 22_000.0, 70.0,
            "16x20 pressure treated wood deck."),
        project("4", "Garage Door Replacement", "Exterior", 1_500.0, 2_500.0, 95.0,
            "New uninsulated steel door."),
    ]
}

fn project(id: &str, name: &str, category: &str, cost_min: f64, cost_max: f64, roi_pct: f64, description: &str) -> RenovationProject {
    RenovationProject {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        cost_min,
        cost_max,
        roi_pct,
        description: description.to_string(),
    }
}

pub fn find_project<'a>(projects: &'a [RenovationProject], id: &str) -> Option<&'a RenovationProject> {
    projects.iter().find(|p| p.id == id)
}

/// Resale value a project adds for a given spend
pub fn value_added(budget: f64, roi_pct: f64) -> f64 {
    budget * (roi_pct / 100.0)
}

// ============================================================================
// ESTIMATE (selected project + budget)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenovationEstimate {
    pub project: RenovationProject,
    budget: f64,
}

impl RenovationEstimate {
    /// Selecting a project starts the budget at the low end of its cost range
    pub fn select(project: RenovationProject) -> Self {
        let budget = project.cost_min;
        RenovationEstimate { project, budget }
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    /// Set the budget, snapped to the nearest slider stop inside the range
    pub fn set_budget(&mut self, budget: f64) {
        let budget = if budget.is_finite() { budget } else { 0.0 };
        let offset = (budget - self.project.budget_floor()) / BUDGET_STEP;
        self.budget = self.project.grid_point(offset.round());
    }

    /// Move to the next slider stop above the current budget
    pub fn increase(&mut self) {
        let offset = (self.budget - self.project.budget_floor()) / BUDGET_STEP;
        self.budget = self.project.grid_point((offset + GRID_EPSILON).floor() + 1.0);
    }

    /// Move to the next slider stop below the current budget
    pub fn decrease(&mut self) {
        let offset = (self.budget - self.project.budget_floor()) / BUDGET_STEP;
        self.budget = self.project.grid_point((offset - GRID_EPSILON).ceil() - 1.0);
    }

    pub fn value_added(&self) -> f64 {
        value_added(self.budget, self.project.roi_pct)
    }

    pub fn new_home_value(&self, current_value: f64) -> f64 {
        current_value + self.value_added()
    }

    /// Advice line shown under the estimate
    pub fn tip(&self) -> String {
        format!(
            "This project typically recovers {} of its cost in resale value. \
             To maximize ROI, stick to neutral finishes and keep the budget under {}.",
            crate::format::format_percent(self.project.roi_pct),
            crate::format::format_currency(self.project.cost_max),
        )
    }
}
