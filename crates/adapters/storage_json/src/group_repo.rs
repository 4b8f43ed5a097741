//! Group repository over the shared JSON store.

use std::sync::Arc;

use lumen_app::ports::GroupRepository;
use lumen_domain::error::LumenError;
use lumen_domain::group::Group;
use lumen_domain::id::GroupId;

use crate::store::JsonStore;

/// [`GroupRepository`] backed by [`JsonStore`]. Cheap to clone.
#[derive(Clone)]
pub struct JsonGroupRepository {
    store: Arc<JsonStore>,
}

impl JsonGroupRepository {
    /// Create a repository handle over the shared store.
    #[must_use]
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }
}

impl GroupRepository for JsonGroupRepository {
    async fn create(&self, group: Group) -> Result<Group, LumenError> {
        self.store
            .mutate("create group", |doc| {
                doc.groups.insert(group.id, group.clone());
                group
            })
            .await
    }

    async fn get_by_id(&self, id: GroupId) -> Result<Option<Group>, LumenError> {
        Ok(self.store.read(|doc| doc.groups.get(&id).cloned()).await)
    }

    async fn get_all(&self) -> Result<Vec<Group>, LumenError> {
        Ok(self
            .store
            .read(|doc| {
                let mut all: Vec<_> = doc.groups.values().cloned().collect();
                all.sort_by_key(|group| group.created_at);
                all
            })
            .await)
    }

    async fn update(&self, group: Group) -> Result<Group, LumenError> {
        self.store
            .mutate("update group", |doc| {
                doc.groups.insert(group.id, group.clone());
                group
            })
            .await
    }

    async fn delete(&self, id: GroupId) -> Result<(), LumenError> {
        self.store
            .mutate("delete group", |doc| {
                doc.groups.remove(&id);
            })
            .await
    }
}
