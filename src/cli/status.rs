use super::ui;
use crate::core::{
    Entry, GoalRecord, Progress, Timeline, WeekComparison, aggregate, compare_last_two, project,
    streak_days,
};
use chrono::NaiveDate;

/// Everything the dashboard shows for one goal.
pub struct Dashboard<'a> {
    pub record: &'a GoalRecord,
    pub timeline: Timeline,
    pub progress: Progress,
    pub comparison: Option<WeekComparison>,
    pub streak: u32,
    pub finished: bool,
}

impl<'a> Dashboard<'a> {
    pub fn build(record: &'a GoalRecord, entries: &[Entry], today: NaiveDate) -> Self {
        let timeline = Timeline::new(&record.goal, today);
        let periods = aggregate(entries, &timeline);
        let progress = project(&periods, &record.goal, &timeline);

        Dashboard {
            record,
            timeline,
            progress,
            comparison: compare_last_two(&periods),
            streak: streak_days(entries, today),
            finished: timeline.is_finished(today),
        }
    }

    pub fn display(&self) -> String {
        let goal = &self.record.goal;
        let currency = &goal.currency;
        let progress = &self.progress;
        let money = |amount: f64| ui::format_money(amount, currency);

        let mut output = format!(
            "Goal: {}\n\n",
            ui::style_text(&goal.title, ui::StyleType::Title)
        );

        output.push_str(&format!(
            "{} {:.1}%\n",
            ui::progress_bar(progress.progress_percentage),
            progress.progress_percentage
        ));
        output.push_str(&format!(
            "Week {} of {}\n",
            self.timeline.current_week, self.timeline.total_weeks
        ));
        output.push_str(&format!(
            "{} {} of {} (remaining {})\n",
            ui::style_text("Saved:", ui::StyleType::TotalLabel),
            ui::style_text(&money(progress.total_earned), ui::StyleType::TotalValue),
            money(goal.target_amount),
            money(progress.remaining_amount)
        ));
        output.push_str(&format!(
            "Status: {} (expected {} by now)\n",
            ui::style_status(progress.status),
            money(progress.expected_at_this_point)
        ));

        if self.finished {
            output.push_str(&ui::style_text(
                &format!("Goal period ended on {}.\n", goal.end_date),
                ui::StyleType::Subtle,
            ));
        } else {
            output.push_str(&format!(
                "Weekly target: {}\n",
                money(progress.adjusted_weekly_target)
            ));
        }
        output.push_str(&format!(
            "At this pace you'll reach: {}\n",
            money(progress.projected_total)
        ));

        if let Some(cmp) = &self.comparison {
            output.push_str(&format!(
                "This week: {} vs last week: {} ({})\n",
                money(cmp.this_week),
                money(cmp.last_week),
                ui::format_change(cmp.percentage, cmp.change)
            ));
        }

        let days = if self.streak == 1 { "day" } else { "days" };
        output.push_str(&format!("Streak: {} {days}", self.streak));
        output
    }
}
