//! System storage and activation states.
//!
//! A system is a unit of behavior the scheduler ticks once per update. Each
//! registered system is either active or inactive, never both:
//!
//! ```text
//!              disable(id)
//!    ┌────────┐ ───────► ┌──────────┐
//!    │ active │           │ inactive │
//!    └────────┘ ◄─────── └──────────┘
//!              enable(id)
//! ```
//!
//! Newly registered systems start active. Only active systems tick; inactive
//! systems keep their state and rejoin the tick order at the back when
//! re-enabled.

use std::fmt;

use crate::frame::Frame;
use crate::ident::Ident;

/// Behavior the scheduler drives.
///
/// [`tick`](Self::tick) is called once per update for every active system.
/// Structural changes (spawning, removal, activation) go through the
/// [`Frame`] handle; the registries themselves are not reachable from here.
pub trait System {
    /// Advance this system by one update.
    fn tick(&mut self, frame: Frame<'_>);
}

/// A system identifier, unique among registered systems.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(Ident);

impl Id {
    /// Get the identifier as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Ident> for Id {
    /// Get a system id from a raw ident.
    fn from(ident: Ident) -> Self {
        Self(ident)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A registered system paired with its assigned id.
pub struct Entry {
    id: Id,
    system: Box<dyn System>,
}

impl Entry {
    /// Construct an entry binding an id to a boxed system.
    #[inline]
    pub(crate) fn new(id: Id, system: Box<dyn System>) -> Self {
        Self { id, system }
    }

    /// Get the id of this system.
    #[inline]
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Tick the stored system.
    #[inline]
    pub(crate) fn tick(&mut self, frame: Frame<'_>) {
        self.system.tick(frame);
    }
}

/// Storage for registered systems, split by activation state.
///
/// Every system lives in exactly one of the two ordered sets. Moving between
/// them appends at the back, so a re-enabled system ticks after systems that
/// stayed active the whole time.
#[derive(Default)]
pub struct Registry {
    active: Vec<Entry>,
    inactive: Vec<Entry>,
}

impl Registry {
    /// Create a new, empty system registry.
    #[inline]
    pub const fn new() -> Self {
        Self {
            active: Vec::new(),
            inactive: Vec::new(),
        }
    }

    /// Register an entry at the back of the active set.
    ///
    /// # Returns
    ///
    /// A reference to the entry as stored.
    pub fn push_active(&mut self, entry: Entry) -> &Entry {
        debug_assert!(!self.contains(&entry.id), "duplicate system id: {}", entry.id);
        let index = self.active.len();
        self.active.push(entry);
        &self.active[index]
    }

    /// Remove the system with the given id from whichever set holds it.
    ///
    /// # Returns
    ///
    /// The removed entry, or `None` if the id is unknown.
    pub fn remove(&mut self, id: &Id) -> Option<Entry> {
        if let Some(index) = position(&self.active, id) {
            return Some(self.active.remove(index));
        }
        let index = position(&self.inactive, id)?;
        Some(self.inactive.remove(index))
    }

    /// Move an inactive system to the back of the active set.
    ///
    /// # Returns
    ///
    /// `true` if the system was inactive and is now active. `false` leaves
    /// the registry untouched: the id is unknown or already active.
    pub fn enable(&mut self, id: &Id) -> bool {
        match position(&self.inactive, id) {
            Some(index) => {
                let entry = self.inactive.remove(index);
                self.active.push(entry);
                true
            }
            None => false,
        }
    }

    /// Move an active system to the back of the inactive set.
    ///
    /// # Returns
    ///
    /// `true` if the system was active and is now inactive. `false` leaves
    /// the registry untouched: the id is unknown or already inactive.
    pub fn disable(&mut self, id: &Id) -> bool {
        match position(&self.active, id) {
            Some(index) => {
                let entry = self.active.remove(index);
                self.inactive.push(entry);
                true
            }
            None => false,
        }
    }

    /// Active entries in tick order.
    #[inline]
    pub fn active(&self) -> &[Entry] {
        &self.active
    }

    /// Inactive entries in the order they were disabled.
    #[inline]
    pub fn inactive(&self) -> &[Entry] {
        &self.inactive
    }

    /// Mutable access to the active entries, for ticking.
    #[inline]
    pub(crate) fn active_mut(&mut self) -> &mut [Entry] {
        &mut self.active
    }

    /// Whether a system with the given id is registered, in either set.
    pub fn contains(&self, id: &Id) -> bool {
        position(&self.active, id).is_some() || position(&self.inactive, id).is_some()
    }

    /// Number of registered systems across both sets.
    #[inline]
    pub fn len(&self) -> usize {
        self.active.len() + self.inactive.len()
    }

    /// Whether the registry holds no systems.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.inactive.is_empty()
    }
}

/// Index of the entry with the given id.
fn position(entries: &[Entry], id: &Id) -> Option<usize> {
    entries.iter().position(|entry| entry.id() == id)
}
