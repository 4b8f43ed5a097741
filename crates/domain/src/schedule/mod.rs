//! Schedule — timed state changes for lights and groups.
//!
//! A schedule names a wall-clock minute ([`TimeOfDay`]), a set of weekdays,
//! and an ordered list of [`ScheduleAction`]s. The scheduler evaluates all
//! enabled schedules once per minute; a schedule fires at most once per
//! matching minute.

mod action;
mod timing;

pub use action::{ActionTarget, ScheduleAction};
pub use timing::{TimeOfDay, Weekday};

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{LumenError, ValidationError};
use crate::id::{LightId, ScheduleId};
use crate::time::Timestamp;

/// A timed rule that applies state changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    pub name: String,
    /// The minute of day this schedule fires at.
    pub at: TimeOfDay,
    /// Weekdays the schedule is active on.
    pub days: Vec<Weekday>,
    pub enabled: bool,
    /// Actions executed in order when the schedule fires.
    pub actions: Vec<ScheduleAction>,
    /// Last firing time; guards against double-firing within one minute.
    pub last_run: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl Schedule {
    /// Create a builder for constructing a [`Schedule`].
    #[must_use]
    pub fn builder() -> ScheduleBuilder {
        ScheduleBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Validation`] when:
    /// - `name` is empty ([`ValidationError::EmptyName`])
    /// - `actions` is empty ([`ValidationError::NoActions`])
    /// - `days` is empty ([`ValidationError::NoDays`])
    /// - any action carries an out-of-range state change
    pub fn validate(&self) -> Result<(), LumenError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.actions.is_empty() {
            return Err(ValidationError::NoActions.into());
        }
        if self.days.is_empty() {
            return Err(ValidationError::NoDays.into());
        }
        for action in &self.actions {
            action.change.validate()?;
        }
        Ok(())
    }

    /// Whether this schedule's day and minute match the given local instant.
    ///
    /// Purely positional: the enabled flag and the once-per-minute guard are
    /// checked by the scheduler, which owns the clock and `last_run`.
    #[must_use]
    pub fn matches_instant(&self, now: NaiveDateTime) -> bool {
        self.days.contains(&Weekday::from(now.weekday())) && self.at.matches(now.time())
    }

    /// Drop all actions that directly target the light.
    ///
    /// Returns whether anything was removed. Group and all-lights actions
    /// are untouched; groups prune their own membership.
    pub fn strip_light(&mut self, light_id: LightId) -> bool {
        let before = self.actions.len();
        self.actions.retain(|action| !action.targets_light(light_id));
        self.actions.len() != before
    }
}

/// Step-by-step builder for [`Schedule`].
#[derive(Debug, Default)]
pub struct ScheduleBuilder {
    id: Option<ScheduleId>,
    name: Option<String>,
    at: Option<TimeOfDay>,
    days: Vec<Weekday>,
    enabled: Option<bool>,
    actions: Vec<ScheduleAction>,
    last_run: Option<Timestamp>,
}

impl ScheduleBuilder {
    #[must_use]
    pub fn id(mut self, id: ScheduleId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn at(mut self, at: TimeOfDay) -> Self {
        self.at = Some(at);
        self
    }

    #[must_use]
    pub fn day(mut self, day: Weekday) -> Self {
        self.days.push(day);
        self
    }

    #[must_use]
    pub fn days(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.days.extend(days);
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    #[must_use]
    pub fn action(mut self, action: ScheduleAction) -> Self {
        self.actions.push(action);
        self
    }

    #[must_use]
    pub fn last_run(mut self, ts: Timestamp) -> Self {
        self.last_run = Some(ts);
        self
    }

    /// Consume the builder, validate, and return a [`Schedule`].
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Validation`] if required fields are missing or
    /// empty. The time of day defaults to midnight when not set.
    pub fn build(self) -> Result<Schedule, LumenError> {
        let schedule = Schedule {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            at: self.at.unwrap_or(TimeOfDay::new(0, 0)?),
            days: self.days,
            enabled: self.enabled.unwrap_or(true),
            actions: self.actions,
            last_run: self.last_run,
            created_at: crate::time::now(),
        };
        schedule.validate()?;
        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::StateChange;

    fn turn_on(light_id: LightId) -> ScheduleAction {
        ScheduleAction {
            target: ActionTarget::Light { id: light_id },
            change: StateChange::power(true),
        }
    }

    fn monday_at(hour: u8, minute: u8) -> Schedule {
        Schedule::builder()
            .name("Wake up")
            .at(TimeOfDay::new(hour, minute).unwrap())
            .day(Weekday::Monday)
            .action(turn_on(LightId::new()))
            .build()
            .unwrap()
    }

    fn instant(date: &str, time: &str) -> NaiveDateTime {
        format!("{date}T{time}").parse().unwrap()
    }

    #[test]
    fn should_build_valid_schedule_when_required_fields_provided() {
        let schedule = monday_at(7, 30);
        assert_eq!(schedule.name, "Wake up");
        assert!(schedule.enabled);
        assert_eq!(schedule.days, vec![Weekday::Monday]);
        assert!(schedule.last_run.is_none());
    }

    #[test]
    fn should_return_validation_error_when_name_is_empty() {
        let result = Schedule::builder()
            .day(Weekday::Monday)
            .action(turn_on(LightId::new()))
            .build();
        assert!(matches!(
            result,
            Err(LumenError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_return_validation_error_when_actions_is_empty() {
        let result = Schedule::builder()
            .name("No actions")
            .day(Weekday::Monday)
            .build();
        assert!(matches!(
            result,
            Err(LumenError::Validation(ValidationError::NoActions))
        ));
    }

    #[test]
    fn should_return_validation_error_when_days_is_empty() {
        let result = Schedule::builder()
            .name("No days")
            .action(turn_on(LightId::new()))
            .build();
        assert!(matches!(
            result,
            Err(LumenError::Validation(ValidationError::NoDays))
        ));
    }

    #[test]
    fn should_reject_schedule_with_out_of_range_action() {
        let result = Schedule::builder()
            .name("Too bright")
            .day(Weekday::Monday)
            .action(ScheduleAction {
                target: ActionTarget::All,
                change: StateChange {
                    brightness: Some(150),
                    ..StateChange::default()
                },
            })
            .build();
        assert!(matches!(
            result,
            Err(LumenError::Validation(ValidationError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn should_match_on_configured_day_and_minute() {
        let schedule = monday_at(7, 30);
        // 2024-01-01 is a Monday.
        assert!(schedule.matches_instant(instant("2024-01-01", "07:30:00")));
        assert!(schedule.matches_instant(instant("2024-01-01", "07:30:59")));
    }

    #[test]
    fn should_not_match_on_other_days() {
        let schedule = monday_at(7, 30);
        // 2024-01-02 is a Tuesday.
        assert!(!schedule.matches_instant(instant("2024-01-02", "07:30:00")));
    }

    #[test]
    fn should_not_match_on_other_minutes() {
        let schedule = monday_at(7, 30);
        assert!(!schedule.matches_instant(instant("2024-01-01", "07:29:59")));
        assert!(!schedule.matches_instant(instant("2024-01-01", "07:31:00")));
    }

    #[test]
    fn should_strip_actions_targeting_deleted_light() {
        let doomed = LightId::new();
        let kept = LightId::new();
        let mut schedule = Schedule::builder()
            .name("Mixed targets")
            .day(Weekday::Friday)
            .action(turn_on(doomed))
            .action(turn_on(kept))
            .action(ScheduleAction {
                target: ActionTarget::All,
                change: StateChange::power(false),
            })
            .build()
            .unwrap();

        assert!(schedule.strip_light(doomed));
        assert_eq!(schedule.actions.len(), 2);
        assert!(schedule.actions[0].targets_light(kept));
        assert!(!schedule.strip_light(doomed));
    }

    #[test]
    fn should_default_to_enabled_and_midnight() {
        let schedule = Schedule::builder()
            .name("Defaults")
            .day(Weekday::Sunday)
            .action(turn_on(LightId::new()))
            .build()
            .unwrap();
        assert!(schedule.enabled);
        assert_eq!(schedule.at, TimeOfDay::new(0, 0).unwrap());
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let schedule = monday_at(22, 15);
        let json = serde_json::to_string(&schedule).unwrap();
        let parsed: Schedule = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, schedule.id);
        assert_eq!(parsed.at, schedule.at);
        assert_eq!(parsed.days, schedule.days);
        assert_eq!(parsed.actions.len(), schedule.actions.len());
    }
}
