//! Deferred mutation commands for registry changes.
//!
//! While an update runs, the registries are off limits: every structural
//! change is captured as a [`Command`] and pushed onto the [`Queue`]. The
//! scheduler drains the queue after the tick pass and applies the commands in
//! the order they arrived.
//!
//! Commands pushed while a flush is already applying (the removal sweep does
//! this) stay buffered and run in the next update's flush.

use crossbeam::queue::SegQueue;

use crate::{entity, system};

/// A single deferred change to the entity or system registries.
///
/// Add commands carry the fully built entry, id included, so the id can be
/// handed back to the caller before the insertion lands.
pub enum Command {
    /// Insert an entity into the registry.
    AddEntity {
        /// The entry to insert, with its pre-assigned id.
        entry: entity::Entry,
    },
    /// Remove an entity from the registry.
    RemoveEntity {
        /// The id of the entity to remove. Unknown ids are ignored.
        id: entity::Id,
    },
    /// Register a system, starting active.
    AddSystem {
        /// The entry to register, with its pre-assigned id.
        entry: system::Entry,
    },
    /// Unregister a system from whichever set holds it.
    RemoveSystem {
        /// The id of the system to remove. Unknown ids are ignored.
        id: system::Id,
    },
    /// Move an inactive system back to the active set.
    EnableSystem {
        /// The id of the system to enable. Unknown or already active ids are
        /// ignored.
        id: system::Id,
    },
    /// Move an active system to the inactive set.
    DisableSystem {
        /// The id of the system to disable. Unknown or already inactive ids
        /// are ignored.
        id: system::Id,
    },
}

/// FIFO buffer for deferred commands.
///
/// Pushing works through a shared reference, so the per-tick [`Frame`]
/// handle can queue changes without exclusive access to the scheduler.
///
/// [`Frame`]: crate::frame::Frame
#[derive(Default)]
pub struct Queue {
    commands: SegQueue<Command>,
}

impl Queue {
    /// Create a new, empty command queue.
    pub fn new() -> Self {
        Self {
            commands: SegQueue::new(),
        }
    }

    /// Append a command at the back of the queue.
    #[inline]
    pub fn push(&self, command: Command) {
        self.commands.push(command);
    }

    /// Take every queued command, oldest first.
    ///
    /// The queue is empty after this call.
    pub fn drain(&self) -> Vec<Command> {
        let mut drained = Vec::with_capacity(self.commands.len());
        while let Some(command) = self.commands.pop() {
            drained.push(command);
        }
        drained
    }

    /// Number of commands waiting to be applied.
    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the queue holds no commands.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
