// HomeHub - Core Library
// Panel data, formulas, and the advisor client shared by the TUI, the API server, and tests

pub mod format;
pub mod home;
pub mod maintenance;
pub mod mortgage;
pub mod renovation;
pub mod rental;
pub mod selling;
pub mod advisor;
pub mod view;
pub mod app;
pub mod report;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use home::{HomeProfile, CompHome, ValuePoint, ValueDriver};
pub use maintenance::{Checklist, MaintenanceTask, TaskCategory, TaskFilter, Impact};
pub use mortgage::{MortgageDetails, EquityBreakdown, RefinanceOutlook, equity};
pub use renovation::{RenovationProject, RenovationEstimate, value_added};
pub use rental::{RentalInputs, RentalField, CashFlow, parse_numeric_input};
pub use selling::{AgentMatch, AgentStatus, Agent, ChecklistStep, MarketTiming};
pub use advisor::{
    Advisor, AdvisorError, CompletionClient, GeminiClient,
    ChatMessage, Sender, Transcript,
};
pub use view::View;
pub use app::HomeHub;
pub use config::{AppConfig, AdvisorConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
