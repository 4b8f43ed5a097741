//! Schedule actions — the state changes a firing schedule applies.

use serde::{Deserialize, Serialize};

use crate::id::{GroupId, LightId};
use crate::light::StateChange;

/// What a schedule action is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionTarget {
    /// A single light.
    Light { id: LightId },
    /// Every member of a group, in order.
    Group { id: GroupId },
    /// Every known light.
    All,
}

impl std::fmt::Display for ActionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light { id } => write!(f, "light({id})"),
            Self::Group { id } => write!(f, "group({id})"),
            Self::All => f.write_str("all"),
        }
    }
}

/// One step of a schedule: apply `change` to `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleAction {
    pub target: ActionTarget,
    pub change: StateChange,
}

impl ScheduleAction {
    /// Whether this action addresses the given light directly.
    #[must_use]
    pub fn targets_light(&self, light_id: LightId) -> bool {
        matches!(self.target, ActionTarget::Light { id } if id == light_id)
    }
}
