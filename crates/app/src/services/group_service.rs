//! Group service — use-cases for managing groups and fanning out commands.

use std::sync::Arc;

use serde::Serialize;

use lumen_domain::error::{LumenError, NotFoundError};
use lumen_domain::group::Group;
use lumen_domain::id::{GroupId, LightId};
use lumen_domain::light::StateChange;

use crate::ports::protocol::LightGateway;
use crate::ports::{EventPublisher, GroupRepository, LightRepository, ScheduleRepository};
use crate::services::light_service::LightService;

/// Result of a group command: which members took the change and which did
/// not answer.
#[derive(Debug, Clone, Serialize)]
pub struct GroupCommandOutcome {
    pub applied: Vec<LightId>,
    pub failed: Vec<LightId>,
}

/// Application service for group CRUD and fan-out commands.
pub struct GroupService<LR, GR, SR, G, P> {
    repo: GR,
    lights: Arc<LightService<LR, GR, SR, G, P>>,
}

impl<LR, GR, SR, G, P> GroupService<LR, GR, SR, G, P>
where
    LR: LightRepository,
    GR: GroupRepository,
    SR: ScheduleRepository,
    G: LightGateway,
    P: EventPublisher,
{
    /// Create a new service backed by the given repository and light service.
    pub fn new(repo: GR, lights: Arc<LightService<LR, GR, SR, G, P>>) -> Self {
        Self { repo, lights }
    }

    /// Create a group after validating invariants and member existence.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Validation`] for an empty name or duplicate
    /// members, [`LumenError::NotFound`] when a member light does not
    /// exist, or a storage error.
    #[tracing::instrument(skip(self, group), fields(group_name = %group.name))]
    pub async fn create_group(&self, group: Group) -> Result<Group, LumenError> {
        group.validate()?;
        self.check_members(&group).await?;
        self.repo.create(group).await
    }

    /// Look up a group by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::NotFound`] when no group with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_group(&self, id: GroupId) -> Result<Group, LumenError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                kind: "Group",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all groups.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_groups(&self) -> Result<Vec<Group>, LumenError> {
        self.repo.get_all().await
    }

    /// Replace a group's name and membership.
    ///
    /// # Errors
    ///
    /// Same as [`create_group`](Self::create_group), plus
    /// [`LumenError::NotFound`] for an unknown group id.
    #[tracing::instrument(skip(self, name, lights))]
    pub async fn update_group(
        &self,
        id: GroupId,
        name: Option<String>,
        lights: Option<Vec<LightId>>,
    ) -> Result<Group, LumenError> {
        let mut group = self.get_group(id).await?;
        if let Some(name) = name {
            group.name = name;
        }
        if let Some(lights) = lights {
            group.lights = lights;
        }
        group.validate()?;
        self.check_members(&group).await?;
        self.repo.update(group).await
    }

    /// Delete a group. Member lights are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::NotFound`] for an unknown id or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_group(&self, id: GroupId) -> Result<(), LumenError> {
        self.get_group(id).await?;
        self.repo.delete(id).await
    }

    /// Fan a state change out to every member, in member order.
    ///
    /// Best effort per member: device failures and dangling references are
    /// reported in the outcome instead of aborting the fan-out.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Validation`] for an out-of-range change,
    /// [`LumenError::NotFound`] for an unknown group, or a storage error.
    #[tracing::instrument(skip(self, change))]
    pub async fn set_state(
        &self,
        id: GroupId,
        change: StateChange,
    ) -> Result<GroupCommandOutcome, LumenError> {
        change.validate()?;
        let group = self.get_group(id).await?;

        let mut outcome = GroupCommandOutcome {
            applied: Vec::new(),
            failed: Vec::new(),
        };
        for light_id in group.lights {
            match self.lights.set_state(light_id, change.clone()).await {
                Ok(_) => outcome.applied.push(light_id),
                Err(LumenError::Device(error)) => {
                    tracing::warn!(%light_id, %error, "group member did not answer");
                    outcome.failed.push(light_id);
                }
                Err(LumenError::NotFound(_)) => {
                    tracing::warn!(%light_id, "group member no longer exists");
                    outcome.failed.push(light_id);
                }
                Err(other) => return Err(other),
            }
        }
        Ok(outcome)
    }

    async fn check_members(&self, group: &Group) -> Result<(), LumenError> {
        for light_id in &group.lights {
            self.lights.get_light(*light_id).await?;
        }
        Ok(())
    }
}
