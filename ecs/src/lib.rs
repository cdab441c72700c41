//! Cooperative single-threaded scheduler for entity/system simulations.
//!
//! This crate provides the runtime core of an entity/system simulation: it
//! owns the registries of live entities and active/inactive systems, drives
//! a per-frame update pass, and guarantees that structural mutations
//! requested while a frame is in progress are deferred until the frame
//! completes. Systems iterate over stable snapshots; nothing is added to or
//! removed from a registry underneath them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Scheduler::update                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Bus mailbox ──deliver──► system activation registry        │
//! │                                                             │
//! │  System A ──tick──┐                                         │
//! │  System B ──tick──┼──► command Queue ──flush──► registries  │
//! │  System C ──tick──┘                                │        │
//! │                                                    ▼        │
//! │  sweep: expired entities ──queue──►           Bus notify    │
//! │         (applied at the NEXT flush)                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - [`scheduler::Scheduler`] orchestrates the frame: deliver, tick, flush,
//!   sweep.
//! - [`entity::Registry`] and [`system::Registry`] are the ordered stores;
//!   systems move between an active and an inactive set.
//! - [`command::Queue`] buffers structural changes made mid-frame.
//! - [`frame::Frame`] is the capability handle each system ticks with.
//! - [`bus::Bus`] is the explicit publish/subscribe boundary for lifecycle
//!   notifications and activation requests.
//! - [`ident::Generator`] mints the string identifiers entities and systems
//!   are keyed by.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::time::Duration;
//!
//! use coop_ecs::{Entity, Frame, Scheduler, System};
//!
//! struct Spawner;
//!
//! impl System for Spawner {
//!     fn tick(&mut self, frame: Frame<'_>) {
//!         if frame.entities().is_empty() {
//!             frame.add_entity(Particle::default());
//!         }
//!     }
//! }
//!
//! let mut scheduler = Scheduler::new();
//! scheduler.add_system(Spawner);
//!
//! loop {
//!     scheduler.update(Duration::from_millis(16));
//! }
//! ```

pub mod bus;
pub mod command;
pub mod entity;
pub mod frame;
pub mod ident;
pub mod scheduler;
pub mod system;

pub use bus::Bus;
pub use entity::Entity;
pub use frame::Frame;
pub use scheduler::Scheduler;
pub use system::System;
