//! Light service — use-cases for managing and commanding lights.

use lumen_domain::error::{LumenError, NotFoundError};
use lumen_domain::event::{Event, EventType};
use lumen_domain::id::LightId;
use lumen_domain::light::{Light, StateChange};
use lumen_domain::time::now;

use crate::ports::protocol::LightGateway;
use crate::ports::{EventPublisher, GroupRepository, LightRepository, ScheduleRepository};

/// Application service for light CRUD and device commands.
///
/// Holds the group and schedule repositories as well, because deleting a
/// light cascades into both: the light is pruned from every group and every
/// schedule action referencing it.
pub struct LightService<LR, GR, SR, G, P> {
    repo: LR,
    group_repo: GR,
    schedule_repo: SR,
    gateway: G,
    publisher: P,
}

impl<LR, GR, SR, G, P> LightService<LR, GR, SR, G, P>
where
    LR: LightRepository,
    GR: GroupRepository,
    SR: ScheduleRepository,
    G: LightGateway,
    P: EventPublisher,
{
    /// Create a new service backed by the given ports.
    pub fn new(repo: LR, group_repo: GR, schedule_repo: SR, gateway: G, publisher: P) -> Self {
        Self {
            repo,
            group_repo,
            schedule_repo,
            gateway,
            publisher,
        }
    }

    /// Register a light by hand (virtual bulbs, manual entries).
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Validation`] if invariants fail, or a storage
    /// error propagated from the repository.
    #[tracing::instrument(skip(self, light), fields(light_name = %light.name))]
    pub async fn create_light(&self, light: Light) -> Result<Light, LumenError> {
        light.validate()?;
        self.repo.create(light).await
    }

    /// Look up a light by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::NotFound`] when no light with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_light(&self, id: LightId) -> Result<Light, LumenError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                kind: "Light",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all known lights.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_lights(&self) -> Result<Vec<Light>, LumenError> {
        self.repo.get_all().await
    }

    /// Rename a light.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::NotFound`] for an unknown id or
    /// [`LumenError::Validation`] for an empty name.
    #[tracing::instrument(skip(self, name))]
    pub async fn rename_light(&self, id: LightId, name: String) -> Result<Light, LumenError> {
        let mut light = self.get_light(id).await?;
        light.name = name;
        light.validate()?;
        self.repo.update(light).await
    }

    /// Apply a partial state change to one light.
    ///
    /// Validation happens first, then the change is pushed through the
    /// protocol adapter. The state the adapter reports back is what gets
    /// persisted. On a device failure the light is marked unreachable and
    /// the error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Validation`] for out-of-range values,
    /// [`LumenError::NotFound`] for an unknown id, or
    /// [`LumenError::Device`] when the device cannot be reached.
    #[tracing::instrument(skip(self, change))]
    pub async fn set_state(&self, id: LightId, change: StateChange) -> Result<Light, LumenError> {
        change.validate()?;
        let mut light = self.get_light(id).await?;
        let previous = light.state.clone();

        match self.gateway.apply(&light, &change).await {
            Ok(state) => {
                light.update_state(state, now());
                let light = self.repo.update(light).await?;
                let _ = self
                    .publisher
                    .publish(Event::new(
                        EventType::StateChanged,
                        Some(light.id),
                        serde_json::json!({
                            "from": previous,
                            "to": light.state,
                        }),
                    ))
                    .await;
                Ok(light)
            }
            Err(error) => {
                tracing::warn!(light_id = %id, %error, "device command failed");
                light.mark_unreachable(now());
                self.repo.update(light).await?;
                Err(error)
            }
        }
    }

    /// Switch every known light on or off, best effort.
    ///
    /// Per-light device failures mark that light unreachable and are
    /// skipped; the count of lights successfully switched is returned.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn set_all(&self, on: bool) -> Result<usize, LumenError> {
        let mut switched = 0;
        for light in self.repo.get_all().await? {
            match self.set_state(light.id, StateChange::power(on)).await {
                Ok(_) => switched += 1,
                Err(LumenError::Device(_)) => {}
                Err(other) => return Err(other),
            }
        }
        Ok(switched)
    }

    /// Poll the device behind one light and reconcile the stored state.
    ///
    /// An unreachable device is not an error here: the light is marked
    /// unreachable and returned, so callers see the badge state.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::NotFound`] for an unknown id or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn refresh_light(&self, id: LightId) -> Result<Light, LumenError> {
        let mut light = self.get_light(id).await?;
        match self.gateway.fetch_state(&light).await {
            Ok(state) => {
                light.update_state(state, now());
            }
            Err(error) => {
                tracing::debug!(light_id = %id, %error, "poll failed, marking unreachable");
                light.mark_unreachable(now());
            }
        }
        self.repo.update(light).await
    }

    /// Poll every light, returning how many answered.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn refresh_all(&self) -> Result<usize, LumenError> {
        let mut reachable = 0;
        for light in self.repo.get_all().await? {
            let refreshed = self.refresh_light(light.id).await?;
            if refreshed.state.reachable {
                reachable += 1;
            }
        }
        Ok(reachable)
    }

    /// Delete a light, cascading into groups and schedules.
    ///
    /// Every group loses the light from its member list and every schedule
    /// loses the actions that target it, so later schedule evaluation never
    /// observes a dangling reference.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::NotFound`] for an unknown id or a storage
    /// error from the repositories.
    #[tracing::instrument(skip(self))]
    pub async fn delete_light(&self, id: LightId) -> Result<(), LumenError> {
        let light = self.get_light(id).await?;

        for mut group in self.group_repo.get_all().await? {
            if group.remove_light(id) {
                self.group_repo.update(group).await?;
            }
        }
        for mut schedule in self.schedule_repo.get_all().await? {
            if schedule.strip_light(id) {
                self.schedule_repo.update(schedule).await?;
            }
        }

        self.repo.delete(id).await?;
        let _ = self
            .publisher
            .publish(Event::new(
                EventType::LightRemoved,
                Some(id),
                serde_json::json!({"name": light.name}),
            ))
            .await;
        Ok(())
    }
}
