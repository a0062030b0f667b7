//! Auto Plan: priority-ordered re-planning of a single day.
//!
//! The day's flexible tasks are reordered High, Normal, Low (stable within a
//! priority) and zipped onto the distinct start times those same tasks
//! already occupy. Tasks left without a time move to the next day. Fixed
//! tasks and tasks on other days are never touched.
//!
//! Durations are ignored and no new times are invented.

use std::collections::{BTreeSet, HashMap};

use chrono::{Days, NaiveDate, NaiveTime};
use serde::Serialize;

use super::task::{Priority, Task};

/// Counts reported back to the user after a replan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReplanSummary {
    /// High priority tasks that kept a same-day slot.
    pub high_priority_kept: usize,
    /// Tasks pushed to the next day.
    pub moved_to_tomorrow: usize,
}

impl ReplanSummary {
    /// User-facing explanation of the replan.
    #[must_use]
    pub fn message(&self) -> String {
        let noun = if self.moved_to_tomorrow == 1 { "task" } else { "tasks" };
        format!(
            "High priority tasks were kept, {} {noun} moved to tomorrow",
            self.moved_to_tomorrow
        )
    }
}

/// A proposed arrangement plus the original list for undo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replan {
    /// Full task list in input order with flexible tasks reassigned.
    pub tasks: Vec<Task>,
    /// Untouched copy of the input.
    pub snapshot: Vec<Task>,
    pub summary: ReplanSummary,
}

/// Outcome of [`replan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReplanResult {
    /// There was nothing flexible on the day.
    NothingToReplan {
        reason: String,
    },
    Replanned(Replan),
}

impl ReplanResult {
    /// The replan, if one was produced.
    #[must_use]
    pub const fn as_replan(&self) -> Option<&Replan> {
        match self {
            Self::Replanned(replan) => Some(replan),
            Self::NothingToReplan { .. } => None,
        }
    }
}

/// Redistribute the flexible tasks of `today` by priority.
///
/// Pure: `tasks` is never modified and the result depends only on the
/// arguments.
#[must_use]
pub fn replan(tasks: &[Task], today: NaiveDate) -> ReplanResult {
    let flexible: Vec<usize> = tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| t.date == today && !t.is_fixed)
        .map(|(i, _)| i)
        .collect();

    if flexible.is_empty() {
        log::debug!("auto plan for {today}: no flexible tasks");
        return ReplanResult::NothingToReplan {
            reason: format!("No flexible tasks scheduled on {today}"),
        };
    }

    let slots: Vec<NaiveTime> = flexible
        .iter()
        .map(|&i| tasks[i].time)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    // sort_by_key is stable, so input order breaks priority ties
    let mut ordered = flexible;
    ordered.sort_by_key(|&i| tasks[i].priority.rank());

    let tomorrow = today.checked_add_days(Days::new(1));
    if tomorrow.is_none() && ordered.len() > slots.len() {
        return ReplanResult::NothingToReplan {
            reason: format!("No day after {today} to move overflow tasks to"),
        };
    }

    let mut placement: HashMap<usize, (NaiveDate, NaiveTime)> = HashMap::new();
    let mut high_priority_kept = 0;
    let mut moved_to_tomorrow = 0;

    for (rank, &index) in ordered.iter().enumerate() {
        if let Some(&slot) = slots.get(rank) {
            if tasks[index].priority == Priority::High {
                high_priority_kept += 1;
            }
            placement.insert(index, (today, slot));
        } else if let Some(next_day) = tomorrow {
            moved_to_tomorrow += 1;
            placement.insert(index, (next_day, tasks[index].time));
        }
    }

    let rewritten = tasks
        .iter()
        .enumerate()
        .map(|(i, task)| match placement.get(&i) {
            Some(&(date, time)) => Task {
                date,
                time,
                ..task.clone()
            },
            None => task.clone(),
        })
        .collect();

    let summary = ReplanSummary {
        high_priority_kept,
        moved_to_tomorrow,
    };
    log::info!(
        "auto plan for {today}: {} flexible over {} slots, {} moved to tomorrow",
        ordered.len(),
        slots.len(),
        moved_to_tomorrow
    );

    ReplanResult::Replanned(Replan {
        tasks: rewritten,
        snapshot: tasks.to_vec(),
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::planner::Category;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    fn tomorrow() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 11).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn task(id: &str, time: NaiveTime, priority: Priority) -> Task {
        Task {
            id: id.to_string(),
            date: today(),
            time,
            duration_minutes: 30,
            title: format!("Task {id}"),
            category: Category::Work,
            priority,
            is_fixed: false,
            completed: false,
        }
    }

    fn replanned(result: ReplanResult) -> Replan {
        match result {
            ReplanResult::Replanned(replan) => replan,
            ReplanResult::NothingToReplan { reason } => panic!("nothing to replan: {reason}"),
        }
    }

    fn find<'a>(tasks: &'a [Task], id: &str) -> &'a Task {
        tasks.iter().find(|t| t.id == id).unwrap()
    }

    #[test]
    fn test_reorders_by_priority_into_existing_slots() {
        let tasks = vec![
            task("a", at(9, 0), Priority::Low),
            task("b", at(11, 0), Priority::High),
            task("c", at(14, 0), Priority::Normal),
        ];

        let result = replanned(replan(&tasks, today()));

        assert_eq!(find(&result.tasks, "b").time, at(9, 0));
        assert_eq!(find(&result.tasks, "c").time, at(11, 0));
        assert_eq!(find(&result.tasks, "a").time, at(14, 0));
        assert!(result.tasks.iter().all(|t| t.date == today()));
        assert_eq!(result.summary.moved_to_tomorrow, 0);
        assert_eq!(result.summary.high_priority_kept, 1);
    }

    #[test]
    fn test_overflow_moves_lowest_priority_to_tomorrow() {
        // Five tasks sharing three distinct times
        let tasks = vec![
            task("n1", at(9, 0), Priority::Normal),
            task("l1", at(9, 0), Priority::Low),
            task("h1", at(10, 0), Priority::High),
            task("l2", at(10, 0), Priority::Low),
            task("n2", at(13, 0), Priority::Normal),
        ];

        let result = replanned(replan(&tasks, today()));

        assert_eq!(find(&result.tasks, "h1").time, at(9, 0));
        assert_eq!(find(&result.tasks, "n1").time, at(10, 0));
        assert_eq!(find(&result.tasks, "n2").time, at(13, 0));

        let l1 = find(&result.tasks, "l1");
        let l2 = find(&result.tasks, "l2");
        assert_eq!(l1.date, tomorrow());
        assert_eq!(l1.time, at(9, 0));
        assert_eq!(l2.date, tomorrow());
        assert_eq!(l2.time, at(10, 0));

        assert_eq!(result.summary.moved_to_tomorrow, 2);
        assert_eq!(
            result.summary.message(),
            "High priority tasks were kept, 2 tasks moved to tomorrow"
        );
    }

    #[test]
    fn test_fixed_tasks_are_never_moved() {
        let mut meeting = task("fixed", at(10, 0), Priority::Low);
        meeting.is_fixed = true;

        let tasks = vec![
            task("a", at(9, 0), Priority::Low),
            meeting.clone(),
            task("b", at(9, 0), Priority::High),
        ];

        let result = replanned(replan(&tasks, today()));
        let after = find(&result.tasks, "fixed");

        assert_eq!(after, &meeting);
        // One slot (09:00) for two flexible tasks
        assert_eq!(find(&result.tasks, "b").time, at(9, 0));
        assert_eq!(find(&result.tasks, "a").date, tomorrow());
    }

    #[test]
    fn test_other_days_untouched_and_order_preserved() {
        let mut yesterday_task = task("old", at(8, 0), Priority::High);
        yesterday_task.date = NaiveDate::from_ymd_opt(2024, 5, 9).unwrap();

        let tasks = vec![
            yesterday_task.clone(),
            task("a", at(9, 0), Priority::Low),
            task("b", at(12, 0), Priority::High),
        ];

        let result = replanned(replan(&tasks, today()));

        let ids: Vec<&str> = result.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["old", "a", "b"]);
        assert_eq!(result.tasks[0], yesterday_task);
    }

    #[test]
    fn test_completed_tasks_still_take_part() {
        let mut done = task("done", at(9, 0), Priority::Low);
        done.completed = true;
        let tasks = vec![done, task("h", at(15, 0), Priority::High)];

        let result = replanned(replan(&tasks, today()));

        assert_eq!(find(&result.tasks, "h").time, at(9, 0));
        let done = find(&result.tasks, "done");
        assert_eq!(done.time, at(15, 0));
        assert!(done.completed);
    }

    #[test]
    fn test_nothing_to_replan() {
        let mut fixed = task("f", at(9, 0), Priority::High);
        fixed.is_fixed = true;

        let result = replan(&[fixed], today());
        assert!(matches!(result, ReplanResult::NothingToReplan { .. }));
        assert!(result.as_replan().is_none());

        assert!(matches!(
            replan(&[], today()),
            ReplanResult::NothingToReplan { .. }
        ));
    }

    #[test]
    fn test_replan_is_pure_and_deterministic() {
        let tasks = vec![
            task("a", at(9, 0), Priority::Low),
            task("b", at(9, 0), Priority::High),
            task("c", at(11, 0), Priority::Normal),
        ];
        let before = tasks.clone();

        let first = replan(&tasks, today());
        let second = replan(&tasks, today());

        assert_eq!(tasks, before);
        assert_eq!(first, second);
        assert_eq!(first.as_replan().unwrap().snapshot, before);
    }

    #[test]
    fn test_overflow_count_matches_flexible_minus_slots() {
        let priorities = [Priority::Low, Priority::High, Priority::Normal];
        for n in 1..8u32 {
            let tasks: Vec<Task> = (0..n)
                .map(|i| {
                    task(
                        &format!("t{i}"),
                        at(8 + i % 3, 0),
                        priorities[(i % 3) as usize],
                    )
                })
                .collect();
            let distinct_times = n.min(3) as usize;
            let before_tomorrow = tasks.iter().filter(|t| t.date == tomorrow()).count();

            let result = replanned(replan(&tasks, today()));
            let after_tomorrow = result.tasks.iter().filter(|t| t.date == tomorrow()).count();

            assert_eq!(
                after_tomorrow - before_tomorrow,
                (n as usize).saturating_sub(distinct_times)
            );
            assert_eq!(result.summary.moved_to_tomorrow, after_tomorrow);
        }
    }

    #[test]
    fn test_overflow_on_last_representable_day() {
        let last = NaiveDate::MAX;
        let mut a = task("a", at(9, 0), Priority::High);
        let mut b = task("b", at(9, 0), Priority::Low);
        a.date = last;
        b.date = last;

        match replan(&[a.clone(), b.clone()], last) {
            ReplanResult::NothingToReplan { reason } => assert!(reason.contains("No day after")),
            ReplanResult::Replanned(_) => panic!("overflow has nowhere to go"),
        }

        // Without overflow the last day still replans
        b.time = at(10, 0);
        let result = replan(&[a, b], last);
        assert_eq!(result.as_replan().unwrap().summary.moved_to_tomorrow, 0);
    }
}
