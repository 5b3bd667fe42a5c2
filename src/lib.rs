// SPDX-License-Identifier: MIT OR Apache-2.0
//! testwire
//!
//! Translation layer between test-runner lifecycle events and CI
//! service messages.
//!
//! Facade over the workspace crates:
//! - [`events`] — the runner/reporter contract and the [`Reporter`]
//!   hook trait
//! - [`protocol`] — service-message escaping and line encoding
//! - [`teamcity`] — the TeamCity reporter
//! - [`registry`] — name-to-factory reporter lookup

#![deny(unsafe_code)]

pub use testwire_events as events;
pub use testwire_protocol as protocol;
pub use testwire_registry as registry;
pub use testwire_teamcity as teamcity;

pub use testwire_events::{LifecycleEvent, Reporter, ReporterPreferences, dispatch};
