// 🏷️ Selling Guide - pre-sale checklist, agent match, market timing
//
// Agent matching is a fixed three-step sequence driven by elapsed time:
//   Unassigned --start--> Matching --2.5s--> Assigned --reset--> Unassigned
// The "agent matched" notice stays up for 5s after assignment.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

pub const MATCHING_DELAY: Duration = Duration::from_millis(2500);
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(5000);

// ============================================================================
// PRE-SALE CHECKLIST
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistStep {
    pub text: String,
    pub done: bool,
}

pub fn presale_checklist() -> Vec<ChecklistStep> {
    [
        ("Declutter and Deep Clean", true),
        ("Fix Minor Repairs", false),
        ("Professional Photography", false),
        ("Staging Consultation", false),
        ("Set List Price", false),
        ("List on MLS", false),
    ]
    .iter()
    .map(|(text, done)| ChecklistStep {
        text: text.to_string(),
        done: *done,
    })
    .collect()
}

// ============================================================================
// AGENT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentPerformance {
    pub avg_sale_price: String,
    pub avg_days_on_market: u32,
    pub above_list_price: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub name: String,
    pub title: String,
    pub company: String,
    pub rating: f64,
    pub reviews: u32,
    pub experience: String,
    pub specialty: String,
    pub performance: AgentPerformance,
}

impl Agent {
    pub fn sample() -> Self {
        Agent {
            name: "Sarah Miller".to_string(),
            title: "Senior Listing Specialist".to_string(),
            company: "Luxury Realty Group".to_string(),
            rating: 4.9,
            reviews: 124,
            experience: "12+ Years".to_string(),
            specialty: "Austin Central & Waterfront".to_string(),
            performance: AgentPerformance {
                avg_sale_price: "$520k".to_string(),
                avg_days_on_market: 14,
                above_list_price: "102%".to_string(),
            },
        }
    }
}

// ============================================================================
// AGENT MATCH STATE MACHINE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Unassigned,
    Matching,
    Assigned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchState {
    Unassigned,
    Matching { since: Instant },
    Assigned { at: Instant },
}

#[derive(Debug, Clone)]
pub struct AgentMatch {
    state: MatchState,
}

impl AgentMatch {
    pub fn new() -> Self {
        AgentMatch {
            state: MatchState::Unassigned,
        }
    }

    pub fn status(&self) -> AgentStatus {
        match self.state {
            MatchState::Unassigned => AgentStatus::Unassigned,
            MatchState::Matching { .. } => AgentStatus::Matching,
            MatchState::Assigned { .. } => AgentStatus::Assigned,
        }
    }

    /// Begin matching. Ignored unless currently unassigned.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.state != MatchState::Unassigned {
            return false;
        }
        self.state = MatchState::Matching { since: now };
        tracing::info!("agent matching started");
        true
    }

    /// Advance time. Returns true when this call completed the match.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let MatchState::Matching { since } = self.state {
            if now.saturating_duration_since(since) >= MATCHING_DELAY {
                let at = since + MATCHING_DELAY;
                self.state = MatchState::Assigned { at };
                tracing::info!("agent assigned");
                return true;
            }
        }
        false
    }

    /// Whether the "agent matched" notice should be showing at `now`
    pub fn notification_visible(&self, now: Instant) -> bool {
        match self.state {
            MatchState::Assigned { at } => now.saturating_duration_since(at) < NOTIFICATION_TTL,
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        self.state = MatchState::Unassigned;
    }

    /// The assigned agent, once matching has finished
    pub fn agent(&self) -> Option<Agent> {
        match self.state {
            MatchState::Assigned { .. } => Some(Agent::sample()),
            _ => None,
        }
    }
}

impl Default for AgentMatch {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// MARKET TIMING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketTiming {
    /// Needle position on the wait..sell gauge, 0.0-1.0
    pub position: f64,
    pub label: String,
    pub summary: String,
}

pub fn market_timing() -> MarketTiming {
    MarketTiming {
        position: 0.65,
        label: "Neutral Market".to_string(),
        summary: "Inventory is stable. Prices are flat year-over-year. \
                  It's a fair time to sell if your home is in good condition."
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checklist() {
        let steps = presale_checklist();
        assert_eq!(steps.len(), 6);
        assert!(steps[0].done);
        assert_eq!(steps.iter().filter(|s| s.done).count(), 1);
    }

    #[test]
    fn test_match_sequence() {
        let t0 = Instant::now();
        let mut matcher = AgentMatch::new();
        assert_eq!(matcher.status(), AgentStatus::Unassigned);
        assert!(matcher.agent().is_none());

        assert!(matcher.start(t0));
        assert_eq!(matcher.status(), AgentStatus::Matching);

        assert!(!matcher.tick(t0 + Duration::from_millis(2499)));
        assert_eq!(matcher.status(), AgentStatus::Matching);

        assert!(matcher.tick(t0 + Duration::from_millis(2500)));
        assert_eq!(matcher.status(), AgentStatus::Assigned);
        assert_eq!(matcher.agent().unwrap().name, "Sarah Miller");
    }

    #[test]
    fn test_notification_window() {
        let t0 = Instant::now();
        let mut matcher = AgentMatch::new();
        matcher.start(t0);

        // A late tick still anchors the notice to the scheduled assignment time
        matcher.tick(t0 + Duration::from_millis(3000));
        assert!(matcher.notification_visible(t0 + Duration::from_millis(3000)));
        assert!(matcher.notification_visible(t0 + Duration::from_millis(7499)));
        assert!(!matcher.notification_visible(t0 + Duration::from_millis(7500)));
    }

    #[test]
    fn test_start_is_ignored_while_busy() {
        let t0 = Instant::now();
        let mut matcher = AgentMatch::new();
        assert!(matcher.start(t0));
        assert!(!matcher.start(t0 + Duration::from_millis(100)));

        matcher.tick(t0 + MATCHING_DELAY);
        assert!(!matcher.start(t0 + Duration::from_secs(10)));
        assert_eq!(matcher.status(), AgentStatus::Assigned);
    }

    #[test]
    fn test_reset() {
        let t0 = Instant::now();
        let mut matcher = AgentMatch::new();
        matcher.start(t0);
        matcher.tick(t0 + MATCHING_DELAY);
        matcher.reset();
        assert_eq!(matcher.status(), AgentStatus::Unassigned);
        assert!(!matcher.notification_visible(t0 + MATCHING_DELAY));
    }

    #[test]
    fn test_market_timing() {
        let timing = market_timing();
        assert_eq!(timing.label, "Neutral Market");
        assert!(timing.position > 0.0 && timing.position < 1.0);
    }
}
