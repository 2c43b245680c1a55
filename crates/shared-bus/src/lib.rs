//! # Shared Bus - Event Bus for Lifecycle Notifications
//!
//! Subsystems announce module lifecycle outcomes (installed, uninstalled,
//! failed, compatibility evaluated) on this bus instead of calling their
//! consumers directly. Interested parties — notification surfaces, the
//! installed-module list cache, audit logs — subscribe with a filter.
//!
//! ## Choreography Pattern
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │ Install      │                    │ Installed-   │
//! │ Planner (4)  │    publish()       │ list cache   │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```
//!
//! All publishers live in a single process and a single trust domain, so
//! events carry no sender authentication — only a correlation id tying a
//! failure notification back to the action that produced it.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]
#![warn(missing_docs)]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, ModuleEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, EventSubscriber, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before backpressure.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
