//! Group — an ordered collection of lights commands fan out to.

use serde::{Deserialize, Serialize};

use crate::error::{LumenError, ValidationError};
use crate::id::{GroupId, LightId};
use crate::time::Timestamp;

/// A named, ordered set of lights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    /// Member lights, in fan-out order.
    pub lights: Vec<LightId>,
    pub created_at: Timestamp,
}

impl Group {
    /// Create a builder for constructing a [`Group`].
    #[must_use]
    pub fn builder() -> GroupBuilder {
        GroupBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Validation`] when:
    /// - `name` is empty ([`ValidationError::EmptyName`])
    /// - the member list contains a light twice ([`ValidationError::DuplicateMember`])
    pub fn validate(&self) -> Result<(), LumenError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        let mut seen = std::collections::HashSet::new();
        for light in &self.lights {
            if !seen.insert(*light) {
                return Err(ValidationError::DuplicateMember.into());
            }
        }
        Ok(())
    }

    /// Whether the group contains the given light.
    #[must_use]
    pub fn contains(&self, light_id: LightId) -> bool {
        self.lights.contains(&light_id)
    }

    /// Drop the light from the member list. Returns whether anything changed.
    pub fn remove_light(&mut self, light_id: LightId) -> bool {
        let before = self.lights.len();
        self.lights.retain(|id| *id != light_id);
        self.lights.len() != before
    }
}

/// Step-by-step builder for [`Group`].
#[derive(Debug, Default)]
pub struct GroupBuilder {
    id: Option<GroupId>,
    name: Option<String>,
    lights: Vec<LightId>,
}

impl GroupBuilder {
    #[must_use]
    pub fn id(mut self, id: GroupId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn light(mut self, light_id: LightId) -> Self {
        self.lights.push(light_id);
        self
    }

    #[must_use]
    pub fn lights(mut self, lights: impl IntoIterator<Item = LightId>) -> Self {
        self.lights.extend(lights);
        self
    }

    /// Consume the builder, validate, and return a [`Group`].
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Validation`] if `name` is missing or empty, or
    /// members are not distinct.
    pub fn build(self) -> Result<Group, LumenError> {
        let group = Group {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            lights: self.lights,
            created_at: crate::time::now(),
        };
        group.validate()?;
        Ok(group)
    }
}
