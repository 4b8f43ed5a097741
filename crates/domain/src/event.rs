//! Event — an immutable record of something that happened.
//!
//! Events are produced when lights are discovered or removed, state
//! changes, or a schedule fires, and are broadcast on the in-process bus.

use serde::{Deserialize, Serialize};

use crate::id::{EventId, LightId};
use crate::time::Timestamp;

/// What kind of occurrence an [`Event`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    LightDiscovered,
    StateChanged,
    LightRemoved,
    ScheduleTriggered,
    SettingsUpdated,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::LightDiscovered => "light_discovered",
            Self::StateChanged => "state_changed",
            Self::LightRemoved => "light_removed",
            Self::ScheduleTriggered => "schedule_triggered",
            Self::SettingsUpdated => "settings_updated",
        };
        f.write_str(name)
    }
}

/// An immutable occurrence record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub event_type: EventType,
    /// The light concerned, when the event is about one.
    pub light_id: Option<LightId>,
    /// Free-form payload, e.g. the old and new state.
    pub data: serde_json::Value,
    pub timestamp: Timestamp,
}

impl Event {
    /// Create a new event stamped with the current time.
    #[must_use]
    pub fn new(event_type: EventType, light_id: Option<LightId>, data: serde_json::Value) -> Self {
        Self {
            id: EventId::new(),
            event_type,
            light_id,
            data,
            timestamp: crate::time::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_stamp_new_event_with_fresh_id_and_time() {
        let a = Event::new(EventType::StateChanged, None, serde_json::json!({}));
        let b = Event::new(EventType::StateChanged, None, serde_json::json!({}));
        assert_ne!(a.id, b.id);
        assert!(a.timestamp <= b.timestamp);
    }

    #[test]
    fn should_carry_light_id_and_payload() {
        let light_id = LightId::new();
        let event = Event::new(
            EventType::StateChanged,
            Some(light_id),
            serde_json::json!({"on": true}),
        );
        assert_eq!(event.light_id, Some(light_id));
        assert_eq!(event.data["on"], true);
    }

    #[test]
    fn should_serialize_event_type_as_snake_case() {
        let json = serde_json::to_string(&EventType::ScheduleTriggered).unwrap();
        assert_eq!(json, "\"schedule_triggered\"");
    }

    #[test]
    fn should_display_event_type() {
        assert_eq!(EventType::LightDiscovered.to_string(), "light_discovered");
        assert_eq!(EventType::StateChanged.to_string(), "state_changed");
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let event = Event::new(
            EventType::LightRemoved,
            Some(LightId::new()),
            serde_json::json!({"name": "Hallway"}),
        );
        let json = serde_json::to_string(&event).unwrap();
        let parsed: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, event.id);
        assert_eq!(parsed.event_type, event.event_type);
        assert_eq!(parsed.light_id, event.light_id);
    }
}
