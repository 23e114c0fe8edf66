// SPDX-License-Identifier: MPL-2.0
//! User-facing rendering: the notification engine and toast templating.

pub mod notifications;
pub mod toast;
