//! # lumen-domain
//!
//! Pure domain model for the lumen smart-light controller.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Lights** (one record per bulb, whichever vendor protocol backs it)
//! - Define **Groups** (ordered collections of lights; commands fan out)
//! - Define **Schedules** (time-of-day + weekday rules with state-change actions)
//! - Define **Settings** (process-wide preferences)
//! - Define **Events** (state-change records broadcast on the event bus)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod event;
pub mod group;
pub mod light;
pub mod schedule;
pub mod settings;
