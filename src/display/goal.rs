//! Goal display formatting
//!
//! Tables with progress bars, goal details and completion projections.

use tabled::{settings::Style, Table, Tabled};

use crate::config::CurrencyFormat;
use crate::models::{Goal, GoalProjection};

const BAR_WIDTH: usize = 20;

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Saved")]
    saved: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Deadline")]
    deadline: String,
}

/// Text progress bar, full once the percentage reaches 100
pub fn progress_bar(percentage: f64) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:>5.1}%",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        percentage
    )
}

pub fn format_goal_list(goals: &[Goal], currency: &CurrencyFormat) -> String {
    if goals.is_empty() {
        return "No goals found.\n".to_string();
    }

    let rows = goals.iter().map(|g| GoalRow {
        id: g.id.short(),
        name: g.name.clone(),
        saved: currency.format(g.current),
        target: currency.format(g.target),
        progress: progress_bar(g.progress_percentage()),
        deadline: g
            .target_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string()),
    });

    let mut output = Table::new(rows).with(Style::sharp()).to_string();
    output.push('\n');
    output
}

pub fn format_goal_details(goal: &Goal, currency: &CurrencyFormat) -> String {
    let mut output = String::new();

    output.push_str(&format!("Goal:         {}\n", goal.id));
    output.push_str(&format!("Name:         {}\n", goal.name));
    output.push_str(&format!("Saved:        {}\n", currency.format(goal.current)));
    output.push_str(&format!("Target:       {}\n", currency.format(goal.target)));
    output.push_str(&format!(
        "Monthly:      {}\n",
        currency.format(goal.monthly_contribution)
    ));
    if let Some(deadline) = goal.target_date {
        output.push_str(&format!("Deadline:     {}\n", deadline.format("%Y-%m-%d")));
    }
    output.push_str(&format!(
        "Progress:     {}\n",
        progress_bar(goal.progress_percentage())
    ));
    if goal.is_reached() {
        output.push_str("Status:       reached\n");
    }

    output
}

pub fn format_projection(goal: &Goal, projection: &GoalProjection, currency: &CurrencyFormat) -> String {
    let mut output = String::new();

    output.push_str(&format!("Projection for '{}'\n", goal.name));
    output.push_str(&format!(
        "Progress:     {}\n",
        progress_bar(projection.progress_percentage)
    ));
    output.push_str(&format!(
        "Remaining:    {}\n",
        currency.format(projection.remaining_amount)
    ));

    if projection.months_to_completion == 0 {
        output.push_str("Completion:   target already reached\n");
        return output;
    }

    output.push_str(&format!(
        "Months left:  {} at {} per month\n",
        projection.months_to_completion,
        currency.format(goal.monthly_contribution)
    ));
    if let Some(estimate) = projection.estimated_completion {
        output.push_str(&format!("Completion:   {}\n", estimate.format("%Y-%m-%d")));
    }
    match projection.on_track {
        Some(true) => output.push_str("On track:     yes\n"),
        Some(false) => output.push_str("On track:     no, the deadline will be missed\n"),
        None => {}
    }

    output
}
