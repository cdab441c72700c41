//! Entity storage for the scheduler.
//!
//! An entity is any value implementing the [`Entity`] trait. The scheduler
//! never looks at entity behavior beyond the removal predicate; everything
//! else is the simulation's business. Live entities sit in a [`Registry`] as
//! [`Entry`] values pairing the boxed entity with its assigned [`Id`].
//!
//! # Removal Sweep
//!
//! [`Entity::should_be_removed`] is evaluated fresh at the end of every
//! update. Entities reporting `true` are queued for removal through the
//! regular deferred path, so they disappear one update later. See
//! [`Scheduler`](crate::scheduler::Scheduler) for the exact timing.

use std::any::Any;
use std::fmt;

use crate::ident::Ident;

/// Behavior stored in the entity registry.
///
/// Implementors decide their own lifecycle through
/// [`should_be_removed`](Self::should_be_removed); the default never
/// expires. [`as_any`](Self::as_any) lets systems recover the concrete type
/// from a registry snapshot.
///
/// # Example
///
/// ```rust,ignore
/// use std::any::Any;
/// use std::cell::Cell;
///
/// struct Particle {
///     ttl: Cell<f32>,
/// }
///
/// impl Entity for Particle {
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
///
///     fn should_be_removed(&self) -> bool {
///         self.ttl.get() <= 0.0
///     }
/// }
/// ```
pub trait Entity {
    /// The concrete entity as [`Any`], for downcasting from snapshots.
    fn as_any(&self) -> &dyn Any;

    /// Whether the removal sweep should queue this entity for removal.
    fn should_be_removed(&self) -> bool {
        false
    }
}

/// An entity identifier, unique among live entities.
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
    /// Get an entity id from a raw ident.
    fn from(ident: Ident) -> Self {
        Self(ident)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A live entity paired with its assigned id.
pub struct Entry {
    id: Id,
    value: Box<dyn Entity>,
}

impl Entry {
    /// Construct an entry binding an id to a boxed entity.
    #[inline]
    pub(crate) fn new(id: Id, value: Box<dyn Entity>) -> Self {
        Self { id, value }
    }

    /// Get the id of this entity.
    #[inline]
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Get the stored entity.
    #[inline]
    pub fn value(&self) -> &dyn Entity {
        &*self.value
    }

    /// Downcast the stored entity to a concrete type.
    ///
    /// # Returns
    ///
    /// `Some(&E)` if the entry holds an `E`, `None` otherwise.
    pub fn get<E: Entity + 'static>(&self) -> Option<&E> {
        self.value.as_any().downcast_ref::<E>()
    }
}

/// Ordered storage for live entities.
///
/// Entries keep their insertion order. Removal scans for the first matching
/// id and preserves the order of the rest; an unknown id is reported through
/// the `Option`, never treated as an error.
#[derive(Default)]
pub struct Registry {
    entries: Vec<Entry>,
}

impl Registry {
    /// Create a new, empty entity registry.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry, keeping insertion order.
    ///
    /// # Returns
    ///
    /// A reference to the entry as stored.
    pub fn push(&mut self, entry: Entry) -> &Entry {
        debug_assert!(
            self.get(&entry.id).is_none(),
            "duplicate entity id: {}",
            entry.id
        );
        let index = self.entries.len();
        self.entries.push(entry);
        &self.entries[index]
    }

    /// Remove the entity with the given id.
    ///
    /// # Returns
    ///
    /// The removed entry, or `None` if no live entity has the id.
    pub fn remove(&mut self, id: &Id) -> Option<Entry> {
        let index = self.entries.iter().position(|entry| entry.id() == id)?;
        Some(self.entries.remove(index))
    }

    /// Look up an entry by id.
    pub fn get(&self, id: &Id) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    /// All live entries in insertion order.
    #[inline]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Whether an entity with the given id is live.
    #[inline]
    pub fn contains(&self, id: &Id) -> bool {
        self.get(id).is_some()
    }

    /// Number of live entities.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no entities.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids of all entities whose removal predicate currently reports `true`.
    pub fn marked_for_removal(&self) -> Vec<Id> {
        self.entries
            .iter()
            .filter(|entry| entry.value.should_be_removed())
            .map(|entry| entry.id.clone())
            .collect()
    }
}
