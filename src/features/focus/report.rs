//! Focus session reports.
//!
//! Generates productivity reports from session history.

use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

use super::session::FocusSession;
use crate::features::planner::Category;

/// Report time period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    /// Today only
    Today,
    /// Last 7 days
    Week,
    /// Last 30 days
    Month,
    /// Everything in history
    AllTime,
}

impl ReportPeriod {
    /// First day included in the period, or `None` for all time.
    #[must_use]
    pub fn first_day(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Today => Some(today),
            Self::Week => today.checked_sub_days(Days::new(6)),
            Self::Month => today.checked_sub_days(Days::new(29)),
            Self::AllTime => None,
        }
    }

    /// Whether `date` falls inside the period ending `today`.
    #[must_use]
    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        date <= today && self.first_day(today).map_or(true, |first| date >= first)
    }

    /// Parse period from string. Unknown input means a week.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "today" | "t" | "d" => Self::Today,
            "month" | "m" | "30d" => Self::Month,
            "all" | "alltime" | "all-time" => Self::AllTime,
            _ => Self::Week,
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Week => "Last 7 Days",
            Self::Month => "Last 30 Days",
            Self::AllTime => "All Time",
        }
    }
}

/// Focus report data.
#[derive(Debug, Clone, Serialize)]
pub struct FocusReport {
    /// Report period name
    pub period: String,
    pub total_minutes: u64,
    pub completed_sessions: u64,
    pub abandoned_sessions: u64,
    /// Mean `percent_complete` over the period's sessions
    pub average_percent: u32,
    pub longest_session_minutes: u64,
    pub by_category: Vec<CategoryFocusTime>,
    pub by_task: Vec<TaskFocusTime>,
    /// Newest day first
    pub daily: Vec<DailyFocusTime>,
}

/// Focus time per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryFocusTime {
    pub category: Category,
    pub minutes: u64,
    pub sessions: u64,
}

/// Focus time per task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskFocusTime {
    pub task_id: String,
    pub task_title: String,
    pub minutes: u64,
    pub sessions: u64,
}

/// Focus time per day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyFocusTime {
    pub date: NaiveDate,
    pub minutes: u64,
    pub sessions: u64,
}

impl FocusReport {
    /// Build a report over the sessions of `history` that fall in `period`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_history(history: &[FocusSession], period: ReportPeriod, today: NaiveDate) -> Self {
        let sessions: Vec<&FocusSession> = history
            .iter()
            .filter(|s| period.contains(s.date, today))
            .collect();

        let total_minutes = sessions.iter().map(|s| s.focus_minutes()).sum();
        let completed_sessions = sessions.iter().filter(|s| s.was_completed).count() as u64;
        let abandoned_sessions = sessions.iter().filter(|s| s.was_abandoned).count() as u64;
        let longest_session_minutes = sessions
            .iter()
            .map(|s| s.focus_minutes())
            .max()
            .unwrap_or(0);

        let count = sessions.len() as u64;
        let average_percent = if count == 0 {
            0
        } else {
            let sum: u64 = sessions.iter().map(|s| u64::from(s.percent_complete)).sum();
            ((sum * 2 + count) / (count * 2)) as u32
        };

        // By category, in the fixed category order
        let mut by_category: Vec<CategoryFocusTime> = Category::ALL
            .iter()
            .map(|&category| {
                let matching = sessions.iter().filter(|s| s.category == category);
                CategoryFocusTime {
                    category,
                    minutes: matching.clone().map(|s| s.focus_minutes()).sum(),
                    sessions: matching.count() as u64,
                }
            })
            .collect();
        by_category.retain(|c| c.sessions > 0);

        // By task
        let mut task_map: HashMap<&str, TaskFocusTime> = HashMap::new();
        for session in &sessions {
            let entry = task_map
                .entry(session.task_id.as_str())
                .or_insert_with(|| TaskFocusTime {
                    task_id: session.task_id.clone(),
                    task_title: session.task_title.clone(),
                    minutes: 0,
                    sessions: 0,
                });
            entry.minutes += session.focus_minutes();
            entry.sessions += 1;
        }
        let mut by_task: Vec<TaskFocusTime> = task_map.into_values().collect();
        by_task.sort_by(|a, b| {
            b.minutes
                .cmp(&a.minutes)
                .then_with(|| a.task_title.cmp(&b.task_title))
        });

        // Daily breakdown
        let mut daily_map: HashMap<NaiveDate, (u64, u64)> = HashMap::new();
        for session in &sessions {
            let entry = daily_map.entry(session.date).or_insert((0, 0));
            entry.0 += session.focus_minutes();
            entry.1 += 1;
        }
        let mut daily: Vec<DailyFocusTime> = daily_map
            .into_iter()
            .map(|(date, (minutes, sessions))| DailyFocusTime {
                date,
                minutes,
                sessions,
            })
            .collect();
        daily.sort_by(|a, b| b.date.cmp(&a.date));

        Self {
            period: period.display_name().to_string(),
            total_minutes,
            completed_sessions,
            abandoned_sessions,
            average_percent,
            longest_session_minutes,
            by_category,
            by_task,
            daily,
        }
    }

    /// Total focus time in hours.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn total_hours(&self) -> f64 {
        self.total_minutes as f64 / 60.0
    }

    /// Whether the period had no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.completed_sessions + self.abandoned_sessions == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::focus::session::{Outcome, SessionDraft};
    use chrono::Utc;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn session(
        task: &str,
        category: Category,
        minutes: u64,
        outcome: Outcome,
        date: NaiveDate,
    ) -> FocusSession {
        SessionDraft {
            task_id: task.to_lowercase(),
            task_title: task.to_string(),
            category,
            start_time: Utc::now(),
            elapsed_seconds: minutes * 60,
            target_seconds: 1800,
        }
        .finish(outcome, date)
    }

    fn history() -> Vec<FocusSession> {
        vec![
            session("Write", Category::Work, 30, Outcome::Completed, day(20)),
            session("Run", Category::Health, 15, Outcome::Abandoned, day(20)),
            session("Write", Category::Work, 25, Outcome::Completed, day(18)),
            session("Study", Category::Learning, 30, Outcome::Completed, day(1)),
        ]
    }

    #[test]
    fn test_report_period_parse() {
        assert_eq!(ReportPeriod::parse("today"), ReportPeriod::Today);
        assert_eq!(ReportPeriod::parse("week"), ReportPeriod::Week);
        assert_eq!(ReportPeriod::parse("month"), ReportPeriod::Month);
        assert_eq!(ReportPeriod::parse("all"), ReportPeriod::AllTime);
        assert_eq!(ReportPeriod::parse("whatever"), ReportPeriod::Week);
    }

    #[test]
    fn test_report_period_contains() {
        assert!(ReportPeriod::Today.contains(day(20), day(20)));
        assert!(!ReportPeriod::Today.contains(day(19), day(20)));
        assert!(ReportPeriod::Week.contains(day(14), day(20)));
        assert!(!ReportPeriod::Week.contains(day(13), day(20)));
        assert!(!ReportPeriod::AllTime.contains(day(21), day(20)));
    }

    #[test]
    fn test_today_report() {
        let report = FocusReport::from_history(&history(), ReportPeriod::Today, day(20));

        assert_eq!(report.total_minutes, 45);
        assert_eq!(report.completed_sessions, 1);
        assert_eq!(report.abandoned_sessions, 1);
        // (100 + 50) / 2
        assert_eq!(report.average_percent, 75);
        assert_eq!(report.by_category.len(), 2);
        assert_eq!(report.daily.len(), 1);
    }

    #[test]
    fn test_week_report_groups_by_task() {
        let report = FocusReport::from_history(&history(), ReportPeriod::Week, day(20));

        assert_eq!(report.total_minutes, 70);
        assert_eq!(report.by_task[0].task_title, "Write");
        assert_eq!(report.by_task[0].minutes, 55);
        assert_eq!(report.by_task[0].sessions, 2);
        assert_eq!(report.longest_session_minutes, 30);

        let dates: Vec<NaiveDate> = report.daily.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![day(20), day(18)]);
    }

    #[test]
    fn test_all_time_report_by_category() {
        let report = FocusReport::from_history(&history(), ReportPeriod::AllTime, day(20));

        let work = report
            .by_category
            .iter()
            .find(|c| c.category == Category::Work)
            .unwrap();
        assert_eq!(work.minutes, 55);
        assert_eq!(work.sessions, 2);
        assert!((report.total_hours() - 5.0 / 3.0).abs() < 0.01);
    }

    #[test]
    fn test_empty_report() {
        let report = FocusReport::from_history(&[], ReportPeriod::Month, day(20));
        assert!(report.is_empty());
        assert_eq!(report.average_percent, 0);
        assert!(report.by_task.is_empty());
    }
}
