// 📋 Plain-text summary of every panel (for `homehub summary`)

use std::fmt::Write;

use crate::app::HomeHub;
use crate::format::{format_currency, format_percent};
use crate::home;
use crate::mortgage::MARKET_RATE_PCT;
use crate::rental;
use crate::selling;

pub fn render_summary(app: &HomeHub) -> String {
    let mut out = String::new();
    // Writing into a String can't fail
    let _ = write_summary(&mut out, app);
    out
}

fn write_summary(out: &mut String, app: &HomeHub) -> std::fmt::Result {
    let home = &app.home;
    let (low, high) = home.value_range();

    writeln!(out, "🏡 {}", home.address)?;
    writeln!(out, "   {}", home.summary_line())?;
    writeln!(
        out,
        "   Estimated value: {} (+{} 1Y)  range {} - {}",
        format_currency(home.current_value),
        format_percent(home.one_year_change_pct()),
        format_currency(low),
        format_currency(high)
    )?;
    writeln!(out, "   Neighborhood comps:")?;
    for comp in home::sample_comps() {
        writeln!(out, "     {:<16} {:>10}  sold {}", comp.address, format_currency(comp.sold_price), comp.sold_ago)?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "🔧 Maintenance: {}/{} done, health score {}%",
        app.checklist.completed_count(),
        app.checklist.tasks().len(),
        app.checklist.health_score().round() as i64
    )?;
    for task in app.checklist.tasks() {
        let mark = if task.is_completed { "x" } else { " " };
        writeln!(out, "   [{}] {} ({}, due {})", mark, task.title, task.category.as_str(), task.due_date)?;
    }

    let breakdown = app.equity_breakdown();
    writeln!(out)?;
    writeln!(
        out,
        "🏦 Mortgage: {} at {} with {}, {}/mo",
        format_currency(app.mortgage.balance),
        format_percent(app.mortgage.interest_rate),
        app.mortgage.lender,
        format_currency(app.mortgage.monthly_payment)
    )?;
    writeln!(out, "   Equity: {}", format_currency(breakdown.equity))?;
    writeln!(out, "   {}", app.mortgage.refinance_outlook(MARKET_RATE_PCT).message())?;

    writeln!(out)?;
    writeln!(out, "🔨 Renovation ROI:")?;
    for project in &app.projects {
        writeln!(
            out,
            "   {:<28} {} - {}  {} ROI",
            project.name,
            format_currency(project.cost_min),
            format_currency(project.cost_max),
            format_percent(project.roi_pct)
        )?;
    }

    let flow = app.cash_flow();
    let comps = rental::nearby_rentals();
    writeln!(out)?;
    writeln!(
        out,
        "🏘️ Rental: {} monthly cash flow at {}/mo rent (mortgage {}/mo)",
        flow.monthly_display(),
        format_currency(app.rental.monthly_rent),
        format_currency(app.mortgage.monthly_payment)
    )?;
    writeln!(out, "   {}: {}/mo, occupancy {}", comps.label, format_currency(comps.average_rent), format_percent(comps.occupancy_pct))?;

    let timing = selling::market_timing();
    writeln!(out)?;
    writeln!(out, "🏷️ Selling: {}", timing.label)?;
    for step in selling::presale_checklist() {
        let mark = if step.done { "x" } else { " " };
        writeln!(out, "   [{}] {}", mark, step.text)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_mentions_each_panel() {
        let summary = render_summary(&HomeHub::default());

        assert!(summary.contains("123 Arbor Lane, Austin TX"));
        assert!(summary.contains("$452,000"));
        assert!(summary.contains("health score 20%"));
        assert!(summary.contains("Equity: $132,000"));
        assert!(summary.contains("Kitchen Remodel (Mid-Range)"));
        assert!(summary.contains("+$147 monthly cash flow"));
        assert!(summary.contains("Neutral Market"));
    }
}
