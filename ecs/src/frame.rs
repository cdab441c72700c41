//! Per-tick capability handle passed to every system.
//!
//! A [`Frame`] is what a system gets to see and do during its tick: the
//! update's delta, a read-only snapshot of the live entities, and the full
//! set of deferred structural changes. Ids for additions are minted
//! synchronously, so a system can wire new entities and systems together
//! before any of them exist in the registries.

use std::time::Duration;

use crate::{
    command::{Command, Queue},
    entity::{self, Entity},
    ident,
    system::{self, System},
};

/// A system's window into one update.
///
/// Cheap to copy; all mutation runs through the deferred queue so the handle
/// works entirely through shared references.
#[derive(Clone, Copy)]
pub struct Frame<'a> {
    delta: Duration,
    entities: &'a [entity::Entry],
    queue: &'a Queue,
    idents: &'a ident::Generator,
}

impl<'a> Frame<'a> {
    /// Construct a frame over one update's state.
    #[inline]
    pub(crate) fn new(
        delta: Duration,
        entities: &'a [entity::Entry],
        queue: &'a Queue,
        idents: &'a ident::Generator,
    ) -> Self {
        Self {
            delta,
            entities,
            queue,
            idents,
        }
    }

    /// Time elapsed since the previous update.
    #[inline]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// The live entities as of the start of this update.
    ///
    /// Additions and removals queued during the update are not reflected
    /// here; they land when the update flushes.
    #[inline]
    pub fn entities(&self) -> &'a [entity::Entry] {
        self.entities
    }

    /// Queue an entity for insertion.
    ///
    /// # Returns
    ///
    /// The entity's id, valid immediately. The entry itself appears in the
    /// registry once this update flushes.
    pub fn add_entity(&self, value: impl Entity + 'static) -> entity::Id {
        let id = entity::Id::from(self.idents.next_ident());
        self.queue.push(Command::AddEntity {
            entry: entity::Entry::new(id.clone(), Box::new(value)),
        });
        id
    }

    /// Queue an entity for removal. Unknown ids are ignored at flush time.
    pub fn remove_entity(&self, id: entity::Id) {
        self.queue.push(Command::RemoveEntity { id });
    }

    /// Queue a system for registration.
    ///
    /// The system first ticks in the update after the one that queued it.
    ///
    /// # Returns
    ///
    /// The system's id, valid immediately.
    pub fn add_system(&self, value: impl System + 'static) -> system::Id {
        let id = system::Id::from(self.idents.next_ident());
        self.queue.push(Command::AddSystem {
            entry: system::Entry::new(id.clone(), Box::new(value)),
        });
        id
    }

    /// Queue a system for unregistration. Unknown ids are ignored at flush
    /// time.
    pub fn remove_system(&self, id: system::Id) {
        self.queue.push(Command::RemoveSystem { id });
    }

    /// Queue a system activation. No-op at flush time unless the system is
    /// currently inactive.
    pub fn enable_system(&self, id: system::Id) {
        self.queue.push(Command::EnableSystem { id });
    }

    /// Queue a system deactivation. No-op at flush time unless the system is
    /// currently active.
    pub fn disable_system(&self, id: system::Id) {
        self.queue.push(Command::DisableSystem { id });
    }
}
