// 🏠 HomeHub application state
// One value owns every panel's state for the lifetime of the process.
// Front ends (TUI, server) call into this; it never touches the terminal or network.

use std::time::Instant;

use crate::advisor::{Sender, Transcript};
use crate::home::HomeProfile;
use crate::maintenance::{Checklist, MaintenanceTask, TaskFilter};
use crate::mortgage::{EquityBreakdown, MortgageDetails};
use crate::renovation::{self, RenovationEstimate, RenovationProject};
use crate::rental::{self, CashFlow, RentalField, RentalInputs};
use crate::selling::AgentMatch;
use crate::view::View;

pub struct HomeHub {
    pub view: View,
    pub home: HomeProfile,

    // Maintenance
    pub checklist: Checklist,
    pub task_filter: TaskFilter,
    pub task_cursor: usize,

    pub mortgage: MortgageDetails,

    // Renovation
    pub projects: Vec<RenovationProject>,
    pub project_cursor: usize,
    pub estimate: Option<RenovationEstimate>,

    // Rental
    pub rental: RentalInputs,
    pub rental_field: usize,
    rental_buffers: [String; 4],

    // Selling
    pub agent_match: AgentMatch,

    // Advisor
    pub transcript: Transcript,
    pub chat_input: String,
    pub awaiting_reply: bool,
    pub advisor_online: bool,
}

impl HomeHub {
    pub fn new(home: HomeProfile) -> Self {
        let rental = RentalInputs::default();
        let rental_buffers = RentalField::ALL.map(|field| format_input(field.get(&rental)));
        let transcript = Transcript::new(&home);

        HomeHub {
            view: View::default(),
            home,
            checklist: Checklist::sample(),
            task_filter: TaskFilter::All,
            task_cursor: 0,
            mortgage: MortgageDetails::sample(),
            projects: renovation::catalog(),
            project_cursor: 0,
            estimate: None,
            rental,
            rental_field: 0,
            rental_buffers,
            agent_match: AgentMatch::new(),
            transcript,
            chat_input: String::new(),
            awaiting_reply: false,
            advisor_online: true,
        }
    }

    // ========================================================================
    // NAVIGATION
    // ========================================================================

    pub fn next_view(&mut self) {
        self.view = self.view.next();
    }

    pub fn previous_view(&mut self) {
        self.view = self.view.previous();
    }

    pub fn goto(&mut self, view: View) {
        self.view = view;
    }

    /// Move the cursor of whatever list the current view shows
    pub fn cursor_down(&mut self) {
        match self.view {
            View::Maintenance => {
                let len = self.visible_tasks().len();
                self.task_cursor = wrap_next(self.task_cursor, len);
            }
            View::Renovation if self.estimate.is_none() => {
                self.project_cursor = wrap_next(self.project_cursor, self.projects.len());
            }
            View::Rental => {
                self.rental_field = wrap_next(self.rental_field, RentalField::ALL.len());
            }
            _ => {}
        }
    }

    pub fn cursor_up(&mut self) {
        match self.view {
            View::Maintenance => {
                let len = self.visible_tasks().len();
                self.task_cursor = wrap_previous(self.task_cursor, len);
            }
            View::Renovation if self.estimate.is_none() => {
                self.project_cursor = wrap_previous(self.project_cursor, self.projects.len());
            }
            View::Rental => {
                self.rental_field = wrap_previous(self.rental_field, RentalField::ALL.len());
            }
            _ => {}
        }
    }

    // ========================================================================
    // MAINTENANCE
    // ========================================================================

    pub fn visible_tasks(&self) -> Vec<&MaintenanceTask> {
        self.checklist.filtered(self.task_filter)
    }

    pub fn toggle_selected_task(&mut self) -> bool {
        let id = match self.visible_tasks().get(self.task_cursor) {
            Some(task) => task.id.clone(),
            None => return false,
        };
        let toggled = self.checklist.toggle(&id);

        // Toggling under a pending/completed filter can remove the row
        let len = self.visible_tasks().len();
        if self.task_cursor >= len {
            self.task_cursor = len.saturating_sub(1);
        }
        toggled
    }

    pub fn cycle_filter(&mut self) {
        self.task_filter = self.task_filter.next();
        self.task_cursor = 0;
    }

    // ========================================================================
    // MORTGAGE
    // ========================================================================

    pub fn equity_breakdown(&self) -> EquityBreakdown {
        self.mortgage.breakdown(self.home.current_value)
    }

    // ========================================================================
    // RENOVATION
    // ========================================================================

    pub fn select_project(&mut self) {
        if let Some(project) = self.projects.get(self.project_cursor) {
            tracing::debug!(project = %project.name, "renovation project selected");
            self.estimate = Some(RenovationEstimate::select(project.clone()));
        }
    }

    pub fn back_to_projects(&mut self) {
        self.estimate = None;
    }

    pub fn raise_budget(&mut self) {
        if let Some(estimate) = self.estimate.as_mut() {
            estimate.increase();
        }
    }

    pub fn lower_budget(&mut self) {
        if let Some(estimate) = self.estimate.as_mut() {
            estimate.decrease();
        }
    }

    // ========================================================================
    // RENTAL
    // ========================================================================

    pub fn cash_flow(&self) -> CashFlow {
        rental::calculate(&self.rental, self.mortgage.monthly_payment)
    }

    pub fn selected_rental_field(&self) -> RentalField {
        RentalField::ALL[self.rental_field % RentalField::ALL.len()]
    }

    /// Raw text of a rental field as typed
    pub fn rental_buffer(&self, field: RentalField) -> &str {
        &self.rental_buffers[field_index(field)]
    }

    pub fn rental_input_char(&mut self, c: char) {
        if c.is_ascii_digit() || c == '.' || c == '-' {
            let field = self.selected_rental_field();
            self.rental_buffers[field_index(field)].push(c);
            self.sync_rental_field(field);
        }
    }

    pub fn rental_backspace(&mut self) {
        let field = self.selected_rental_field();
        self.rental_buffers[field_index(field)].pop();
        self.sync_rental_field(field);
    }

    fn sync_rental_field(&mut self, field: RentalField) {
        let value = rental::parse_numeric_input(&self.rental_buffers[field_index(field)]);
        field.set(&mut self.rental, value);
    }

    // ========================================================================
    // SELLING
    // ========================================================================

    pub fn start_agent_match(&mut self, now: Instant) {
        self.agent_match.start(now);
    }

    pub fn reset_agent(&mut self) {
        self.agent_match.reset();
    }

    /// Advance time-driven state
    pub fn tick(&mut self, now: Instant) {
        self.agent_match.tick(now);
    }

    // ========================================================================
    // ADVISOR
    // ========================================================================

    pub fn chat_input_char(&mut self, c: char) {
        self.chat_input.push(c);
    }

    pub fn chat_backspace(&mut self) {
        self.chat_input.pop();
    }

    /// Move the typed question into the transcript.
    /// Returns the question to send, or None when blank or a reply is pending.
    pub fn submit_question(&mut self) -> Option<String> {
        if self.awaiting_reply || self.chat_input.trim().is_empty() {
            return None;
        }
        let question = std::mem::take(&mut self.chat_input);
        self.transcript.push(Sender::User, question.clone());
        self.awaiting_reply = true;
        Some(question)
    }

    /// Banner for the advisor panel when no credential is configured
    pub fn advisor_notice(&self) -> Option<&'static str> {
        if self.advisor_online {
            None
        } else {
            Some("API_KEY not set - replies will be a setup message")
        }
    }

    pub fn receive_reply(&mut self, reply: String) {
        self.transcript.push(Sender::Advisor, reply);
        self.awaiting_reply = false;
    }
}

impl Default for HomeHub {
    fn default() -> Self {
        Self::new(HomeProfile::sample())
    }
}

fn field_index(field: RentalField) -> usize {
    RentalField::ALL.iter().position(|f| *f == field).unwrap_or(0)
}

fn format_input(value: f64) -> String {
    format!("{}", value)
}

fn wrap_next(i: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    if i >= len - 1 {
        0
    } else {
        i + 1
    }
}

fn wrap_previous(i: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    if i == 0 || i >= len {
        len - 1
    } else {
        i - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_starts_on_dashboard() {
        let app = HomeHub::default();
        assert_eq!(app.view, View::Dashboard);
        assert_eq!(app.transcript.len(), 1);
        assert!(!app.awaiting_reply);
    }

    #[test]
    fn test_navigation() {
        let mut app = HomeHub::default();
        app.next_view();
        assert_eq!(app.view, View::Maintenance);
        app.previous_view();
        app.previous_view();
        assert_eq!(app.view, View::Advisor);
        app.goto(View::Rental);
        assert_eq!(app.view, View::Rental);
    }

    #[test]
    fn test_toggle_selected_task() {
        let mut app = HomeHub::default();
        app.goto(View::Maintenance);
        app.cursor_down();
        assert!(app.toggle_selected_task());
        assert!(app.checklist.tasks()[1].is_completed);
        assert_eq!(app.checklist.completed_count(), 2);
    }

    #[test]
    fn test_toggle_under_filter_keeps_cursor_in_range() {
        let mut app = HomeHub::default();
        app.goto(View::Maintenance);
        app.cycle_filter();
        assert_eq!(app.task_filter, TaskFilter::Pending);
        assert_eq!(app.visible_tasks().len(), 4);

        // Last pending row completes and drops out of the list
        app.cursor_up();
        assert_eq!(app.task_cursor, 3);
        app.toggle_selected_task();
        assert_eq!(app.visible_tasks().len(), 3);
        assert_eq!(app.task_cursor, 2);
    }

    #[test]
    fn test_cursor_wraps() {
        let mut app = HomeHub::default();
        app.goto(View::Renovation);
        app.cursor_up();
        assert_eq!(app.project_cursor, 3);
        app.cursor_down();
        assert_eq!(app.project_cursor, 0);
    }

    #[test]
    fn test_renovation_flow() {
        let mut app = HomeHub::default();
        app.goto(View::Renovation);
        app.select_project();

        let estimate = app.estimate.as_ref().unwrap();
        assert_eq!(estimate.budget(), 25_000.0);
        assert_eq!(estimate.new_home_value(app.home.current_value), 465_750.0);

        app.raise_budget();
        assert_eq!(app.estimate.as_ref().unwrap().budget(), 25_500.0);

        // List cursor is frozen while a project is open
        app.cursor_down();
        assert_eq!(app.project_cursor, 0);

        app.back_to_projects();
        assert!(app.estimate.is_none());
    }

    #[test]
    fn test_rental_defaults() {
        let app = HomeHub::default();
        assert_eq!(app.rental_buffer(RentalField::MonthlyRent), "2800");
        assert!((app.cash_flow().monthly_cash_flow - 147.2).abs() < 1e-6);
    }

    #[test]
    fn test_rental_editing_treats_garbage_as_zero() {
        let mut app = HomeHub::default();
        app.goto(View::Rental);

        for _ in 0..4 {
            app.rental_backspace();
        }
        assert_eq!(app.rental.monthly_rent, 0.0);

        app.rental_input_char('3');
        app.rental_input_char('0');
        app.rental_input_char('0');
        app.rental_input_char('0');
        assert_eq!(app.rental.monthly_rent, 3000.0);

        // "3000-" doesn't parse, so the field reads as zero
        app.rental_input_char('-');
        assert_eq!(app.rental.monthly_rent, 0.0);
        app.rental_backspace();
        assert_eq!(app.rental.monthly_rent, 3000.0);

        // Letters are ignored outright
        app.rental_input_char('x');
        assert_eq!(app.rental_buffer(RentalField::MonthlyRent), "3000");
    }

    #[test]
    fn test_rental_field_selection() {
        let mut app = HomeHub::default();
        app.goto(View::Rental);
        app.cursor_down();
        assert_eq!(app.selected_rental_field(), RentalField::VacancyPct);
        app.rental_backspace();
        assert_eq!(app.rental.vacancy_pct, 0.0);
    }

    #[test]
    fn test_agent_match_through_tick() {
        let t0 = Instant::now();
        let mut app = HomeHub::default();
        app.start_agent_match(t0);
        app.tick(t0 + Duration::from_secs(3));
        assert!(app.agent_match.agent().is_some());
        app.reset_agent();
        assert!(app.agent_match.agent().is_none());
    }

    #[test]
    fn test_submit_question() {
        let mut app = HomeHub::default();
        for c in "Is now a good time to sell?".chars() {
            app.chat_input_char(c);
        }

        let question = app.submit_question().unwrap();
        assert_eq!(question, "Is now a good time to sell?");
        assert!(app.chat_input.is_empty());
        assert!(app.awaiting_reply);
        assert_eq!(app.transcript.len(), 2);

        // No second question while waiting
        app.chat_input_char('?');
        assert!(app.submit_question().is_none());

        app.receive_reply("Yes.".to_string());
        assert!(!app.awaiting_reply);
        assert_eq!(app.transcript.messages()[2].sender, Sender::Advisor);
    }

    #[test]
    fn test_advisor_notice_when_offline() {
        let mut app = HomeHub::default();
        assert!(app.advisor_notice().is_none());

        app.advisor_online = false;
        assert!(app.advisor_notice().unwrap().contains("API_KEY"));
    }

    #[test]
    fn test_blank_question_is_ignored() {
        let mut app = HomeHub::default();
        app.chat_input = "   ".to_string();
        assert!(app.submit_question().is_none());
        assert_eq!(app.transcript.len(), 1);
    }
}
