//! Publish/subscribe boundary between the scheduler and the outside world.
//!
//! The bus carries four topics. Two flow outward from the scheduler:
//!
//! - **entity created** fires after an entity lands in the registry.
//! - **entity removed** fires after an entity leaves the registry.
//!
//! Two flow inward, toward the scheduler:
//!
//! - **enable system** asks a scheduler to re-activate a system it holds.
//! - **disable system** asks a scheduler to deactivate a system it holds.
//!
//! Nothing here is global. A [`Bus`] is a plain value handed to
//! [`Scheduler::with_bus`](crate::scheduler::Scheduler::with_bus); several
//! schedulers may share one, in which case every inbound request reaches
//! each of them and the ones that do not hold the id ignore it.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::rc::Rc;
//!
//! let bus = Rc::new(Bus::new());
//! let mut scheduler = Scheduler::with_bus(Rc::clone(&bus));
//!
//! bus.subscribe_entity_created(|entry| {
//!     println!("created: {}", entry.id());
//! });
//!
//! // Takes effect at the top of the scheduler's next update.
//! bus.request_disable_system(physics_id);
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crossbeam::queue::SegQueue;

use crate::{entity, system};

/// An inbound request to flip a system's activation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ActivationRequest {
    /// Move the system back to the active set.
    Enable(system::Id),
    /// Move the system to the inactive set.
    Disable(system::Id),
}

type CreatedHandler = Box<dyn FnMut(&entity::Entry)>;
type RemovedHandler = Box<dyn FnMut(&entity::Id)>;

/// Topic hub connecting schedulers to outside observers and controllers.
///
/// Outbound notifications run their handlers synchronously, in subscription
/// order, on the thread doing the update. Inbound activation requests are
/// buffered per scheduler and picked up at the top of that scheduler's next
/// update. A mailbox lives exactly as long as its scheduler; the bus holds
/// it weakly and prunes it once the scheduler is gone.
///
/// # Reentrancy
///
/// Handlers must not subscribe further handlers from inside a callback;
/// doing so panics. Publishing activation requests from inside a handler is
/// fine.
#[derive(Default)]
pub struct Bus {
    created: RefCell<Vec<CreatedHandler>>,
    removed: RefCell<Vec<RemovedHandler>>,
    mailboxes: RefCell<Vec<Weak<SegQueue<ActivationRequest>>>>,
}

impl Bus {
    /// Create a bus with no subscribers and no attached schedulers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to entity creation notifications.
    ///
    /// The handler sees the entry exactly as stored, after insertion.
    pub fn subscribe_entity_created(&self, handler: impl FnMut(&entity::Entry) + 'static) {
        self.created.borrow_mut().push(Box::new(handler));
    }

    /// Subscribe to entity removal notifications.
    pub fn subscribe_entity_removed(&self, handler: impl FnMut(&entity::Id) + 'static) {
        self.removed.borrow_mut().push(Box::new(handler));
    }

    /// Ask every attached scheduler to enable the system with this id.
    ///
    /// Delivered at the top of each scheduler's next update. Schedulers that
    /// do not know the id, or hold it active already, ignore the request.
    pub fn request_enable_system(&self, id: system::Id) {
        self.fan_out(ActivationRequest::Enable(id));
    }

    /// Ask every attached scheduler to disable the system with this id.
    ///
    /// Delivered at the top of each scheduler's next update. Schedulers that
    /// do not know the id, or hold it inactive already, ignore the request.
    pub fn request_disable_system(&self, id: system::Id) {
        self.fan_out(ActivationRequest::Disable(id));
    }

    /// Attach a scheduler: give it a mailbox fed by future requests.
    ///
    /// Requests published before this call are not replayed. The caller
    /// keeps the only strong handle; once it drops, the next publish
    /// prunes the mailbox.
    pub(crate) fn register_mailbox(&self) -> Rc<SegQueue<ActivationRequest>> {
        let mailbox = Rc::new(SegQueue::new());
        self.mailboxes.borrow_mut().push(Rc::downgrade(&mailbox));
        mailbox
    }

    /// Notify subscribers that an entity landed in a registry.
    pub(crate) fn emit_created(&self, entry: &entity::Entry) {
        for handler in self.created.borrow_mut().iter_mut() {
            handler(entry);
        }
    }

    /// Notify subscribers that an entity left a registry.
    pub(crate) fn emit_removed(&self, id: &entity::Id) {
        for handler in self.removed.borrow_mut().iter_mut() {
            handler(id);
        }
    }

    /// Push a request into every live mailbox, dropping the dead ones.
    fn fan_out(&self, request: ActivationRequest) {
        self.mailboxes
            .borrow_mut()
            .retain(|mailbox| match mailbox.upgrade() {
                Some(mailbox) => {
                    mailbox.push(request.clone());
                    true
                }
                None => false,
            });
    }
}
