//! Storage ports — repository traits for the state store.

use std::future::Future;

use lumen_domain::error::LumenError;
use lumen_domain::group::Group;
use lumen_domain::id::{GroupId, LightId, ScheduleId};
use lumen_domain::light::{Light, Protocol};
use lumen_domain::schedule::Schedule;
use lumen_domain::settings::Settings;

/// CRUD access to stored lights.
pub trait LightRepository {
    fn create(&self, light: Light) -> impl Future<Output = Result<Light, LumenError>> + Send;

    fn get_by_id(
        &self,
        id: LightId,
    ) -> impl Future<Output = Result<Option<Light>, LumenError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Light>, LumenError>> + Send;

    /// Look up a light by its vendor handle within one protocol.
    fn find_by_unique_id(
        &self,
        protocol: Protocol,
        unique_id: &str,
    ) -> impl Future<Output = Result<Option<Light>, LumenError>> + Send;

    fn update(&self, light: Light) -> impl Future<Output = Result<Light, LumenError>> + Send;

    fn delete(&self, id: LightId) -> impl Future<Output = Result<(), LumenError>> + Send;
}

/// CRUD access to stored groups.
pub trait GroupRepository {
    fn create(&self, group: Group) -> impl Future<Output = Result<Group, LumenError>> + Send;

    fn get_by_id(
        &self,
        id: GroupId,
    ) -> impl Future<Output = Result<Option<Group>, LumenError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Group>, LumenError>> + Send;

    fn update(&self, group: Group) -> impl Future<Output = Result<Group, LumenError>> + Send;

    fn delete(&self, id: GroupId) -> impl Future<Output = Result<(), LumenError>> + Send;
}

/// CRUD access to stored schedules.
pub trait ScheduleRepository {
    fn create(
        &self,
        schedule: Schedule,
    ) -> impl Future<Output = Result<Schedule, LumenError>> + Send;

    fn get_by_id(
        &self,
        id: ScheduleId,
    ) -> impl Future<Output = Result<Option<Schedule>, LumenError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Schedule>, LumenError>> + Send;

    fn get_enabled(&self) -> impl Future<Output = Result<Vec<Schedule>, LumenError>> + Send;

    fn update(
        &self,
        schedule: Schedule,
    ) -> impl Future<Output = Result<Schedule, LumenError>> + Send;

    fn delete(&self, id: ScheduleId) -> impl Future<Output = Result<(), LumenError>> + Send;
}

/// Access to the single process-wide [`Settings`] record.
pub trait SettingsStore {
    fn get(&self) -> impl Future<Output = Result<Settings, LumenError>> + Send;

    fn put(&self, settings: Settings)
    -> impl Future<Output = Result<Settings, LumenError>> + Send;
}
