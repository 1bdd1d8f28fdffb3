// 🔧 Maintenance Checklist - seasonal tasks + home health score
// Completion is local to the running process; nothing is saved

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::home::sample_date;

// ============================================================================
// TASK CATEGORY / IMPACT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskCategory {
    #[serde(rename = "HVAC")]
    Hvac,
    Plumbing,
    Electrical,
    Exterior,
    Appliance,
}

impl TaskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Hvac => "HVAC",
            TaskCategory::Plumbing => "Plumbing",
            TaskCategory::Electrical => "Electrical",
            TaskCategory::Exterior => "Exterior",
            TaskCategory::Appliance => "Appliance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::High => "High",
            Impact::Medium => "Medium",
            Impact::Low => "Low",
        }
    }
}

// ============================================================================
// MAINTENANCE TASK
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceTask {
    pub id: String,
    pub title: String,
    pub due_date: NaiveDate,
    pub category: TaskCategory,
    pub is_completed: bool,

    /// Estimated cost in dollars; 0 means DIY / free
    pub estimated_cost: f64,

    pub impact: Impact,
}

impl MaintenanceTask {
    pub fn new(
        id: &str,
        title: &str,
        due_date: NaiveDate,
        category: TaskCategory,
        estimated_cost: f64,
        impact: Impact,
    ) -> Self {
        MaintenanceTask {
            id: id.to_string(),
            title: title.to_string(),
            due_date,
            category,
            is_completed: false,
            estimated_cost,
            impact,
        }
    }

    fn completed(mut self) -> Self {
        self.is_completed = true;
        self
    }
}

pub fn sample_tasks() -> Vec<MaintenanceTask> {
    vec![
        MaintenanceTask::new("1", "Replace HVAC Filter", sample_date(2023, 10, 25), TaskCategory::Hvac, 20.0, Impact::High),
        MaintenanceTask::new("2", "Clean Gutters", sample_date(2023, 11, 1), TaskCategory::Exterior, 150.0, Impact::High),
        MaintenanceTask::new("3", "Test Smoke Detectors", sample_date(2023, 10, 20), TaskCategory::Electrical, 0.0, Impact::High)
            .completed(),
        MaintenanceTask::new("4", "Inspect Roof", sample_date(2023, 11, 15), TaskCategory::Exterior, 0.0, Impact::Medium),
        MaintenanceTask::new("5", "Flush Water Heater", sample_date(2023, 12, 1), TaskCategory::Plumbing, 0.0, Impact::Medium),
    ]
}

// ============================================================================
// FILTER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl TaskFilter {
    pub fn matches(&self, task: &MaintenanceTask) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Pending => !task.is_completed,
            TaskFilter::Completed => task.is_completed,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            TaskFilter::All => TaskFilter::Pending,
            TaskFilter::Pending => TaskFilter::Completed,
            TaskFilter::Completed => TaskFilter::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskFilter::All => "all",
            TaskFilter::Pending => "pending",
            TaskFilter::Completed => "completed",
        }
    }

    /// Lenient parse for query strings; unknown values mean "all"
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "pending" => TaskFilter::Pending,
            "completed" => TaskFilter::Completed,
            _ => TaskFilter::All,
        }
    }
}

// ============================================================================
// CHECKLIST
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checklist {
    tasks: Vec<MaintenanceTask>,
}

impl Checklist {
    pub fn new(tasks: Vec<MaintenanceTask>) -> Self {
        Checklist { tasks }
    }

    pub fn sample() -> Self {
        Checklist::new(sample_tasks())
    }

    pub fn tasks(&self) -> &[MaintenanceTask] {
        &self.tasks
    }

    /// Flip completion for one task. Returns false if the id is unknown.
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.is_completed = !task.is_completed;
                tracing::debug!(task = %task.title, completed = task.is_completed, "toggled maintenance task");
                true
            }
            None => false,
        }
    }

    /// Tasks passing the filter, in checklist order
    pub fn filtered(&self, filter: TaskFilter) -> Vec<&MaintenanceTask> {
        self.tasks.iter().filter(|t| filter.matches(t)).collect()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_completed).count()
    }

    /// Share of completed tasks as 0-100. An empty checklist scores 0.
    pub fn health_score(&self) -> f64 {
        if self.tasks.is_empty() {
            return 0.0;
        }
        self.completed_count() as f64 / self.tasks.len() as f64 * 100.0
    }

    pub fn pending_cost(&self) -> f64 {
        self.tasks
            .iter()
            .filter(|t| !t.is_completed)
            .map(|t| t.estimated_cost)
            .sum()
    }
}

impl Default for Checklist {
    fn default() -> Self {
        Self::sample()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_health_score() {
        let checklist = Checklist::sample();
        assert_eq!(checklist.tasks().len(), 5);
        assert_eq!(checklist.completed_count(), 1);
        assert!((checklist.health_score() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_toggle_flips_completion() {
        let mut checklist = Checklist::sample();

        assert!(checklist.toggle("1"));
        assert_eq!(checklist.completed_count(), 2);
        assert!((checklist.health_score() - 40.0).abs() < 1e-9);

        assert!(checklist.toggle("1"));
        assert_eq!(checklist.completed_count(), 1);
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let mut checklist = Checklist::sample();
        assert!(!checklist.toggle("99"));
        assert_eq!(checklist.completed_count(), 1);
    }

    #[test]
    fn test_filters_preserve_order() {
        let checklist = Checklist::sample();

        let pending: Vec<&str> = checklist.filtered(TaskFilter::Pending).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(pending, vec!["1", "2", "4", "5"]);

        let done = checklist.filtered(TaskFilter::Completed);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].title, "Test Smoke Detectors");

        assert_eq!(checklist.filtered(TaskFilter::All).len(), 5);
    }

    #[test]
    fn test_empty_checklist_scores_zero() {
        let checklist = Checklist::new(Vec::new());
        assert_eq!(checklist.health_score(), 0.0);
        assert!(checklist.filtered(TaskFilter::Pending).is_empty());
    }

    #[test]
    fn test_pending_cost() {
        let mut checklist = Checklist::sample();
        assert_eq!(checklist.pending_cost(), 170.0);
        checklist.toggle("2");
        assert_eq!(checklist.pending_cost(), 20.0);
    }

    #[test]
    fn test_filter_cycle_and_parse() {
        assert_eq!(TaskFilter::All.next(), TaskFilter::Pending);
        assert_eq!(TaskFilter::Completed.next(), TaskFilter::All);
        assert_eq!(TaskFilter::parse("Pending"), TaskFilter::Pending);
        assert_eq!(TaskFilter::parse("bogus"), TaskFilter::All);
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&TaskCategory::Hvac).unwrap();
        assert_eq!(json, "\"HVAC\"");
        assert_eq!(TaskCategory::Plumbing.as_str(), "Plumbing");
    }
}
