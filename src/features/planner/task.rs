//! Plannable tasks.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::MypaError;

/// Task priority. Auto Plan orders High, then Normal, then Low.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Kept in the day first.
    High,
    /// Default priority.
    #[default]
    Normal,
    /// First to spill to tomorrow.
    Low,
}

impl Priority {
    /// Sort rank, lower first.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Normal => 1,
            Self::Low => 2,
        }
    }

    /// Parse priority from user input.
    ///
    /// # Errors
    ///
    /// Returns [`MypaError::Parse`] for unknown values.
    pub fn parse(s: &str) -> Result<Self, MypaError> {
        match s.trim().to_lowercase().as_str() {
            "high" | "h" | "!!!" => Ok(Self::High),
            "normal" | "n" | "medium" | "m" => Ok(Self::Normal),
            "low" | "l" => Ok(Self::Low),
            other => Err(MypaError::Parse(format!(
                "unknown priority '{other}' (expected high, normal or low)"
            ))),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Normal => write!(f, "Normal"),
            Self::Low => write!(f, "Low"),
        }
    }
}

/// Display grouping for tasks and focus sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Work,
    Health,
    Personal,
    Learning,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 4] = [Self::Work, Self::Health, Self::Personal, Self::Learning];

    /// Parse a category from user input.
    ///
    /// # Errors
    ///
    /// Returns [`MypaError::Parse`] for unknown values.
    pub fn parse(s: &str) -> Result<Self, MypaError> {
        match s.trim().to_lowercase().as_str() {
            "work" | "w" => Ok(Self::Work),
            "health" | "h" => Ok(Self::Health),
            "personal" | "p" => Ok(Self::Personal),
            "learning" | "learn" | "l" => Ok(Self::Learning),
            other => Err(MypaError::Parse(format!(
                "unknown category '{other}' (expected work, health, personal or learning)"
            ))),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Work => write!(f, "Work"),
            Self::Health => write!(f, "Health"),
            Self::Personal => write!(f, "Personal"),
            Self::Learning => write!(f, "Learning"),
        }
    }
}

/// A unit of plannable work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable identifier.
    pub id: String,
    /// Day the task is scheduled on.
    pub date: NaiveDate,
    /// Start time within the day.
    pub time: NaiveTime,
    /// Planned length, always positive.
    pub duration_minutes: u32,
    /// Display title, never empty.
    pub title: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub priority: Priority,
    /// Fixed tasks are never moved by Auto Plan.
    #[serde(default)]
    pub is_fixed: bool,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create a task with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`MypaError::Parse`] if the title is blank or the duration is zero.
    pub fn new(
        title: impl Into<String>,
        date: NaiveDate,
        time: NaiveTime,
        duration_minutes: u32,
    ) -> Result<Self, MypaError> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(MypaError::Parse("task title must not be empty".to_string()));
        }
        if duration_minutes == 0 {
            return Err(MypaError::Parse(
                "task duration must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            date,
            time,
            duration_minutes,
            title,
            category: Category::default(),
            priority: Priority::default(),
            is_fixed: false,
            completed: false,
        })
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Set the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Mark the task as fixed (immovable by Auto Plan).
    #[must_use]
    pub fn fixed(mut self) -> Self {
        self.is_fixed = true;
        self
    }

    /// Planned length in seconds; the focus timer's target.
    #[must_use]
    pub const fn target_seconds(&self) -> u64 {
        self.duration_minutes as u64 * 60
    }

    /// First eight characters of the id, enough to type on the command line.
    #[must_use]
    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }
}
