//! Schedule service — CRUD use-cases for schedules.

use lumen_domain::error::{LumenError, NotFoundError};
use lumen_domain::id::ScheduleId;
use lumen_domain::schedule::Schedule;

use crate::ports::ScheduleRepository;

/// Application service for schedule CRUD operations.
pub struct ScheduleService<R> {
    repo: R,
}

impl<R: ScheduleRepository> ScheduleService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new schedule after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, schedule), fields(schedule_name = %schedule.name))]
    pub async fn create_schedule(&self, schedule: Schedule) -> Result<Schedule, LumenError> {
        schedule.validate()?;
        self.repo.create(schedule).await
    }

    /// Look up a schedule by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::NotFound`] when no schedule with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_schedule(&self, id: ScheduleId) -> Result<Schedule, LumenError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                kind: "Schedule",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all schedules.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_schedules(&self) -> Result<Vec<Schedule>, LumenError> {
        self.repo.get_all().await
    }

    /// Replace an existing schedule, keeping its id and firing history.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Validation`] if invariants fail,
    /// [`LumenError::NotFound`] for an unknown id, or a storage error.
    #[tracing::instrument(skip(self, schedule))]
    pub async fn update_schedule(
        &self,
        id: ScheduleId,
        mut schedule: Schedule,
    ) -> Result<Schedule, LumenError> {
        let existing = self.get_schedule(id).await?;
        schedule.id = existing.id;
        schedule.last_run = existing.last_run;
        schedule.created_at = existing.created_at;
        schedule.validate()?;
        self.repo.update(schedule).await
    }

    /// Enable or disable a schedule.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::NotFound`] for an unknown id or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn set_enabled(&self, id: ScheduleId, enabled: bool) -> Result<Schedule, LumenError> {
        let mut schedule = self.get_schedule(id).await?;
        schedule.enabled = enabled;
        self.repo.update(schedule).await
    }

    /// Delete a schedule by id.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::NotFound`] for an unknown id or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_schedule(&self, id: ScheduleId) -> Result<(), LumenError> {
        self.get_schedule(id).await?;
        self.repo.delete(id).await
    }
}
