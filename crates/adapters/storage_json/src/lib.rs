//! # lumen-adapter-storage-json
//!
//! State store backed by a single JSON document on disk.
//!
//! The whole model (lights, groups, schedules, settings) lives in memory
//! behind one `RwLock`; every mutation rewrites the document via a
//! temp-file + rename so a crash mid-write never leaves a torn file. A
//! missing file simply means an empty store with default settings.
//!
//! ## Dependency rule
//!
//! Depends on `lumen-app` (port traits) and `lumen-domain` only.

mod group_repo;
mod light_repo;
mod schedule_repo;
mod settings_store;
mod store;

pub use group_repo::JsonGroupRepository;
pub use light_repo::JsonLightRepository;
pub use schedule_repo::JsonScheduleRepository;
pub use settings_store::JsonSettingsStore;
pub use store::JsonStore;
