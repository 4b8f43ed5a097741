//! Shared test doubles for service and scheduler tests: in-memory
//! repositories, a scriptable protocol adapter/gateway, and a spy publisher.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use lumen_domain::error::{DeviceError, LumenError};
use lumen_domain::event::Event;
use lumen_domain::group::Group;
use lumen_domain::id::{GroupId, LightId, ScheduleId};
use lumen_domain::light::{Light, LightState, Protocol, StateChange};
use lumen_domain::schedule::Schedule;
use lumen_domain::settings::Settings;

use crate::ports::protocol::{DiscoveredLight, LightGateway, ProtocolAdapter};
use crate::ports::{
    EventPublisher, GroupRepository, LightRepository, ScheduleRepository, SettingsStore,
};

// ── In-memory repositories ─────────────────────────────────────────

#[derive(Clone, Default)]
pub struct InMemoryLightRepo {
    store: Arc<Mutex<HashMap<LightId, Light>>>,
}

impl LightRepository for InMemoryLightRepo {
    async fn create(&self, light: Light) -> Result<Light, LumenError> {
        self.store.lock().unwrap().insert(light.id, light.clone());
        Ok(light)
    }

    async fn get_by_id(&self, id: LightId) -> Result<Option<Light>, LumenError> {
        Ok(self.store.lock().unwrap().get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Light>, LumenError> {
        let mut all: Vec<_> = self.store.lock().unwrap().values().cloned().collect();
        all.sort_by_key(|light| light.created_at);
        Ok(all)
    }

    async fn find_by_unique_id(
        &self,
        protocol: Protocol,
        unique_id: &str,
    ) -> Result<Option<Light>, LumenError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .values()
            .find(|light| light.protocol == protocol && light.unique_id == unique_id)
            .cloned())
    }

    async fn update(&self, light: Light) -> Result<Light, LumenError> {
        self.store.lock().unwrap().insert(light.id, light.clone());
        Ok(light)
    }

    async fn delete(&self, id: LightId) -> Result<(), LumenError> {
        self.store.lock().unwrap().remove(&id);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryGroupRepo {
    store: Arc<Mutex<HashMap<GroupId, Group>>>,
}

impl GroupRepository for InMemoryGroupRepo {
    async fn create(&self, group: Group) -> Result<Group, LumenError> {
        self.store.lock().unwrap().insert(group.id, group.clone());
        Ok(group)
    }

    async fn get_by_id(&self, id: GroupId) -> Result<Option<Group>, LumenError> {
        Ok(self.store.lock().unwrap().get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Group>, LumenError> {
        Ok(self.store.lock().unwrap().values().cloned().collect())
    }

    async fn update(&self, group: Group) -> Result<Group, LumenError> {
        self.store.lock().unwrap().insert(group.id, group.clone());
        Ok(group)
    }

    async fn delete(&self, id: GroupId) -> Result<(), LumenError> {
        self.store.lock().unwrap().remove(&id);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryScheduleRepo {
    store: Arc<Mutex<HashMap<ScheduleId, Schedule>>>,
}

impl ScheduleRepository for InMemoryScheduleRepo {
    async fn create(&self, schedule: Schedule) -> Result<Schedule, LumenError> {
        self.store
            .lock()
            .unwrap()
            .insert(schedule.id, schedule.clone());
        Ok(schedule)
    }

    async fn get_by_id(&self, id: ScheduleId) -> Result<Option<Schedule>, LumenError> {
        Ok(self.store.lock().unwrap().get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Schedule>, LumenError> {
        Ok(self.store.lock().unwrap().values().cloned().collect())
    }

    async fn get_enabled(&self) -> Result<Vec<Schedule>, LumenError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .values()
            .filter(|schedule| schedule.enabled)
            .cloned()
            .collect())
    }

    async fn update(&self, schedule: Schedule) -> Result<Schedule, LumenError> {
        self.store
            .lock()
            .unwrap()
            .insert(schedule.id, schedule.clone());
        Ok(schedule)
    }

    async fn delete(&self, id: ScheduleId) -> Result<(), LumenError> {
        self.store.lock().unwrap().remove(&id);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemorySettingsStore {
    store: Arc<Mutex<Settings>>,
}

impl SettingsStore for InMemorySettingsStore {
    async fn get(&self) -> Result<Settings, LumenError> {
        Ok(self.store.lock().unwrap().clone())
    }

    async fn put(&self, settings: Settings) -> Result<Settings, LumenError> {
        *self.store.lock().unwrap() = settings.clone();
        Ok(settings)
    }
}

// ── Scriptable adapter / gateway ───────────────────────────────────

/// Protocol adapter double: applies changes in memory, optionally fails.
#[derive(Clone)]
pub struct FakeAdapter {
    protocol: Protocol,
    discovered: Vec<DiscoveredLight>,
    fail: Arc<AtomicBool>,
}

impl FakeAdapter {
    pub fn new(protocol: Protocol) -> Self {
        Self {
            protocol,
            discovered: Vec::new(),
            fail: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn with_discovered(mut self, unique_id: &str, name: &str) -> Self {
        self.discovered.push(DiscoveredLight {
            unique_id: unique_id.to_string(),
            name: name.to_string(),
            protocol: self.protocol,
            model: None,
            manufacturer: None,
            address: None,
            bridge_id: None,
            state: LightState::default(),
        });
        self
    }

    #[must_use]
    pub fn failing(self) -> Self {
        self.fail.store(true, Ordering::SeqCst);
        self
    }

    fn check_reachable(&self) -> Result<(), LumenError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DeviceError::Unreachable("fake adapter down".to_string()).into());
        }
        Ok(())
    }
}

impl ProtocolAdapter for FakeAdapter {
    fn protocol(&self) -> Protocol {
        self.protocol
    }

    async fn discover(&self) -> Result<Vec<DiscoveredLight>, LumenError> {
        self.check_reachable()?;
        Ok(self.discovered.clone())
    }

    async fn fetch_state(&self, light: &Light) -> Result<LightState, LumenError> {
        self.check_reachable()?;
        let mut state = light.state.clone();
        state.reachable = true;
        Ok(state)
    }

    async fn apply(&self, light: &Light, change: &StateChange) -> Result<LightState, LumenError> {
        self.check_reachable()?;
        let mut state = light.state.clone();
        state.apply(change, lumen_domain::time::now());
        state.reachable = true;
        Ok(state)
    }
}

/// Gateway double: same behaviour as [`FakeAdapter`] without routing,
/// plus a log of applied changes and an overridable poll answer.
#[derive(Clone, Default)]
pub struct FakeGateway {
    fail: Arc<AtomicBool>,
    discovered: Arc<Mutex<Vec<DiscoveredLight>>>,
    applied: Arc<Mutex<Vec<(LightId, StateChange)>>>,
    poll_answer: Arc<Mutex<Option<LightState>>>,
}

impl FakeGateway {
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn add_discovered(&self, light: DiscoveredLight) {
        self.discovered.lock().unwrap().push(light);
    }

    /// Make `fetch_state` answer with this state instead of echoing.
    pub fn set_poll_answer(&self, state: LightState) {
        *self.poll_answer.lock().unwrap() = Some(state);
    }

    pub fn applied(&self) -> Vec<(LightId, StateChange)> {
        self.applied.lock().unwrap().clone()
    }

    fn check_reachable(&self) -> Result<(), LumenError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DeviceError::Unreachable("fake gateway down".to_string()).into());
        }
        Ok(())
    }
}

impl LightGateway for FakeGateway {
    async fn discover(&self) -> Result<Vec<DiscoveredLight>, LumenError> {
        self.check_reachable()?;
        Ok(self.discovered.lock().unwrap().clone())
    }

    async fn fetch_state(&self, light: &Light) -> Result<LightState, LumenError> {
        self.check_reachable()?;
        if let Some(answer) = self.poll_answer.lock().unwrap().clone() {
            return Ok(answer);
        }
        let mut state = light.state.clone();
        state.reachable = true;
        Ok(state)
    }

    async fn apply(&self, light: &Light, change: &StateChange) -> Result<LightState, LumenError> {
        self.check_reachable()?;
        self.applied
            .lock()
            .unwrap()
            .push((light.id, change.clone()));
        let mut state = light.state.clone();
        state.apply(change, lumen_domain::time::now());
        state.reachable = true;
        Ok(state)
    }
}

// ── Spy publisher ──────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct SpyPublisher {
    events: Arc<Mutex<Vec<Event>>>,
}

impl SpyPublisher {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

impl EventPublisher for SpyPublisher {
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), LumenError>> + Send {
        self.events.lock().unwrap().push(event);
        async { Ok(()) }
    }
}
