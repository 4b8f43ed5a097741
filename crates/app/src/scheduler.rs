//! Scheduler — fires schedules whose day and minute match the wall clock.
//!
//! The binary drives [`Scheduler::tick`] once per minute. Each tick loads
//! the enabled schedules, fires those whose [`Schedule::matches_instant`]
//! matches the given local instant, and executes their actions in order
//! through the light service. `last_run` guards against firing twice in
//! the same minute; there is no catch-up for missed ticks, and overlapping
//! actions resolve as last-applied-wins.

use std::sync::Arc;

use chrono::NaiveDateTime;

use lumen_domain::error::LumenError;
use lumen_domain::event::{Event, EventType};
use lumen_domain::id::ScheduleId;
use lumen_domain::schedule::{ActionTarget, Schedule, ScheduleAction};
use lumen_domain::time::now;

use crate::ports::protocol::LightGateway;
use crate::ports::{EventPublisher, GroupRepository, LightRepository, ScheduleRepository};
use crate::services::light_service::LightService;

/// Minute-tick schedule evaluator.
pub struct Scheduler<LR, GR, SR, G, P> {
    schedule_repo: SR,
    group_repo: GR,
    lights: Arc<LightService<LR, GR, SR, G, P>>,
    publisher: P,
}

impl<LR, GR, SR, G, P> Scheduler<LR, GR, SR, G, P>
where
    LR: LightRepository,
    GR: GroupRepository,
    SR: ScheduleRepository,
    G: LightGateway,
    P: EventPublisher,
{
    /// Create a new scheduler over the given ports.
    pub fn new(
        schedule_repo: SR,
        group_repo: GR,
        lights: Arc<LightService<LR, GR, SR, G, P>>,
        publisher: P,
    ) -> Self {
        Self {
            schedule_repo,
            group_repo,
            lights,
            publisher,
        }
    }

    /// Evaluate all enabled schedules against the given local instant.
    ///
    /// Returns the ids of the schedules that fired. Action failures are
    /// logged and skipped; a missing target never aborts the tick.
    ///
    /// # Errors
    ///
    /// Returns a storage error when loading or updating schedules fails.
    #[tracing::instrument(skip(self))]
    pub async fn tick(&self, local_now: NaiveDateTime) -> Result<Vec<ScheduleId>, LumenError> {
        let mut fired = Vec::new();

        for mut schedule in self.schedule_repo.get_enabled().await? {
            if !schedule.matches_instant(local_now) {
                continue;
            }
            if ran_this_minute(&schedule) {
                continue;
            }

            tracing::info!(schedule_id = %schedule.id, name = %schedule.name, "schedule firing");
            schedule.last_run = Some(now());
            let schedule = self.schedule_repo.update(schedule).await?;

            for action in &schedule.actions {
                self.execute_action(&schedule, action).await;
            }

            let _ = self
                .publisher
                .publish(Event::new(
                    EventType::ScheduleTriggered,
                    None,
                    serde_json::json!({
                        "schedule_id": schedule.id,
                        "schedule_name": schedule.name,
                    }),
                ))
                .await;
            fired.push(schedule.id);
        }

        Ok(fired)
    }

    /// Execute a single action, swallowing per-target failures.
    async fn execute_action(&self, schedule: &Schedule, action: &ScheduleAction) {
        match action.target {
            ActionTarget::Light { id } => {
                if let Err(error) = self.lights.set_state(id, action.change.clone()).await {
                    tracing::warn!(
                        schedule_id = %schedule.id,
                        light_id = %id,
                        %error,
                        "schedule action failed"
                    );
                }
            }
            ActionTarget::Group { id } => match self.group_repo.get_by_id(id).await {
                Ok(Some(group)) => {
                    for light_id in group.lights {
                        if let Err(error) =
                            self.lights.set_state(light_id, action.change.clone()).await
                        {
                            tracing::warn!(
                                schedule_id = %schedule.id,
                                %light_id,
                                %error,
                                "schedule group action failed for member"
                            );
                        }
                    }
                }
                Ok(None) => {
                    tracing::warn!(schedule_id = %schedule.id, group_id = %id, "schedule targets missing group");
                }
                Err(error) => {
                    tracing::warn!(schedule_id = %schedule.id, group_id = %id, %error, "group lookup failed");
                }
            },
            ActionTarget::All => match self.lights.list_lights().await {
                Ok(lights) => {
                    for light in lights {
                        if let Err(error) =
                            self.lights.set_state(light.id, action.change.clone()).await
                        {
                            tracing::warn!(
                                schedule_id = %schedule.id,
                                light_id = %light.id,
                                %error,
                                "schedule all-lights action failed for light"
                            );
                        }
                    }
                }
                Err(error) => {
                    tracing::warn!(schedule_id = %schedule.id, %error, "light listing failed");
                }
            },
        }
    }
}

/// Whether the schedule already fired within the last minute.
fn ran_this_minute(schedule: &Schedule) -> bool {
    schedule
        .last_run
        .is_some_and(|last| now() - last < chrono::Duration::minutes(1))
}
