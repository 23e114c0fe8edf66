// SPDX-License-Identifier: MPL-2.0
//! The notification engine.
//!
//! [`Manager`] coordinates everything; the submodules carry one concern each:
//! entities, per-position containers, geometry, the pin registry, and the
//! named-timer scheduler.

pub mod container;
pub mod layout;
pub mod manager;
pub mod notification;
pub mod pins;
pub mod scheduler;

pub use container::Container;
pub use manager::Manager;
pub use notification::{AdvancedContent, Kind, Lifecycle, Notification, NotificationId};
pub use pins::PinRegistry;
pub use scheduler::{Scheduler, TimerKey};
