//! Schedule repository over the shared JSON store.

use std::sync::Arc;

use lumen_app::ports::ScheduleRepository;
use lumen_domain::error::LumenError;
use lumen_domain::id::ScheduleId;
use lumen_domain::schedule::Schedule;

use crate::store::JsonStore;

/// [`ScheduleRepository`] backed by [`JsonStore`]. Cheap to clone.
#[derive(Clone)]
pub struct JsonScheduleRepository {
    store: Arc<JsonStore>,
}

impl JsonScheduleRepository {
    /// Create a repository handle over the shared store.
    #[must_use]
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }
}

impl ScheduleRepository for JsonScheduleRepository {
    async fn create(&self, schedule: Schedule) -> Result<Schedule, LumenError> {
        self.store
            .mutate("create schedule", |doc| {
                doc.schedules.insert(schedule.id, schedule.clone());
                schedule
            })
            .await
    }

    async fn get_by_id(&self, id: ScheduleId) -> Result<Option<Schedule>, LumenError> {
        Ok(self.store.read(|doc| doc.schedules.get(&id).cloned()).await)
    }

    async fn get_all(&self) -> Result<Vec<Schedule>, LumenError> {
        Ok(self
            .store
            .read(|doc| {
                let mut all: Vec<_> = doc.schedules.values().cloned().collect();
                all.sort_by_key(|schedule| schedule.created_at);
                all
            })
            .await)
    }

    async fn get_enabled(&self) -> Result<Vec<Schedule>, LumenError> {
        Ok(self
            .store
            .read(|doc| {
                doc.schedules
                    .values()
                    .filter(|schedule| schedule.enabled)
                    .cloned()
                    .collect()
            })
            .await)
    }

    async fn update(&self, schedule: Schedule) -> Result<Schedule, LumenError> {
        self.store
            .mutate("update schedule", |doc| {
                doc.schedules.insert(schedule.id, schedule.clone());
                schedule
            })
            .await
    }

    async fn delete(&self, id: ScheduleId) -> Result<(), LumenError> {
        self.store
            .mutate("delete schedule", |doc| {
                doc.schedules.remove(&id);
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::temp_store_path;
    use lumen_domain::id::LightId;
    use lumen_domain::light::StateChange;
    use lumen_domain::schedule::{ActionTarget, ScheduleAction, TimeOfDay, Weekday};

    async fn repo() -> JsonScheduleRepository {
        JsonScheduleRepository::new(JsonStore::open(temp_store_path()).await.unwrap())
    }

    fn valid_schedule(name: &str) -> Schedule {
        Schedule::builder()
            .name(name)
            .at(TimeOfDay::new(7, 30).unwrap())
            .day(Weekday::Monday)
            .action(ScheduleAction {
                target: ActionTarget::Light { id: LightId::new() },
                change: StateChange::power(true),
            })
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_create_and_fetch_schedule() {
        let repo = repo().await;
        let schedule = valid_schedule("Morning");
        let id = schedule.id;

        repo.create(schedule).await.unwrap();

        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Morning");
        assert_eq!(fetched.at, TimeOfDay::new(7, 30).unwrap());
    }

    #[tokio::test]
    async fn should_filter_enabled_schedules() {
        let repo = repo().await;
        repo.create(valid_schedule("On")).await.unwrap();
        let mut disabled = valid_schedule("Off");
        disabled.enabled = false;
        repo.create(disabled).await.unwrap();

        let enabled = repo.get_enabled().await.unwrap();
        assert_eq!(enabled.len(), 1);
        assert_eq!(enabled[0].name, "On");
    }

    #[tokio::test]
    async fn should_persist_last_run_through_update() {
        let repo = repo().await;
        let schedule = valid_schedule("Tracked");
        let id = schedule.id;
        repo.create(schedule).await.unwrap();

        let mut updated = repo.get_by_id(id).await.unwrap().unwrap();
        updated.last_run = Some(lumen_domain::time::now());
        repo.update(updated).await.unwrap();

        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert!(fetched.last_run.is_some());
    }

    #[tokio::test]
    async fn should_delete_schedule() {
        let repo = repo().await;
        let schedule = valid_schedule("Doomed");
        let id = schedule.id;
        repo.create(schedule).await.unwrap();

        repo.delete(id).await.unwrap();

        assert!(repo.get_by_id(id).await.unwrap().is_none());
    }
}
