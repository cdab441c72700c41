//! The update scheduler: one call drives a whole frame.
//!
//! [`Scheduler::update`] runs four steps, in order:
//!
//! ```text
//! update(delta)
//!   1. deliver   pick up activation requests published on the bus
//!   2. tick      run every active system against the current snapshot
//!   3. flush     drain the command queue, apply changes, notify the bus
//!   4. sweep     queue removal of entities reporting should_be_removed
//! ```
//!
//! Steps run back to back on the calling thread. While steps 2 through 4
//! are in flight the scheduler treats itself as running: structural changes
//! arriving in that span go to the queue instead of the registries. The
//! sweep relies on this; its removals land in the next update's flush, so a
//! marked entity stays visible for exactly one more update.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut scheduler = Scheduler::new();
//! scheduler.add_system(Physics::default());
//!
//! loop {
//!     let delta = frame_timer.tick();
//!     scheduler.update(delta);
//! }
//! ```

use std::rc::Rc;
use std::time::Duration;

use crossbeam::queue::SegQueue;
use log::{debug, trace};

use crate::{
    bus::{ActivationRequest, Bus},
    command::{Command, Queue},
    entity::{self, Entity},
    frame::Frame,
    ident,
    system::{self, System},
};

/// Drives a set of systems over a set of entities, one update at a time.
///
/// Structural changes requested while an update is in flight are deferred
/// and applied in arrival order once the tick pass finishes. Between
/// updates the same requests apply immediately. Applied changes are
/// reported on the scheduler's [`Bus`].
///
/// A scheduler is a single-threaded value and is not `Send`; systems run on
/// the thread calling [`update`](Self::update).
pub struct Scheduler {
    /// Gate for the deferral of structural changes. Set for the span of
    /// every update call and cleared before it returns.
    running: bool,
    /// Source of ids for entities and systems.
    idents: ident::Generator,
    /// Live entities, in insertion order.
    entities: entity::Registry,
    /// Registered systems, split into active and inactive sets.
    systems: system::Registry,
    /// Structural changes waiting for the next flush.
    queue: Queue,
    /// Shared boundary for notifications and activation requests.
    bus: Rc<Bus>,
    /// This scheduler's mailbox on the bus, drained at the top of every
    /// update. The scheduler keeps the only strong handle; the bus holds
    /// it weakly, so dropping the scheduler detaches the mailbox.
    requests: Rc<SegQueue<ActivationRequest>>,
}

impl Scheduler {
    /// Create a scheduler with a private bus.
    pub fn new() -> Self {
        Self::with_bus(Rc::new(Bus::new()))
    }

    /// Create a scheduler attached to an existing bus.
    ///
    /// Several schedulers may share one bus; each receives every activation
    /// request and ignores the ids it does not hold.
    pub fn with_bus(bus: Rc<Bus>) -> Self {
        let requests = bus.register_mailbox();
        Self {
            running: false,
            idents: ident::Generator::new(),
            entities: entity::Registry::new(),
            systems: system::Registry::new(),
            queue: Queue::new(),
            bus,
            requests,
        }
    }

    /// The bus this scheduler notifies and listens on.
    #[inline]
    pub fn bus(&self) -> &Rc<Bus> {
        &self.bus
    }

    /// Run one update: deliver requests, tick, flush, sweep.
    ///
    /// `delta` is handed unchanged to every active system. The sweep routes
    /// its removals through the deferred queue, so an entity marked during
    /// this update stays live until the next update's flush.
    pub fn update(&mut self, delta: Duration) {
        self.deliver_requests();
        self.running = true;
        trace!(
            "update: delta={:?} entities={} systems={}",
            delta,
            self.entities.len(),
            self.systems.active().len()
        );
        let Self {
            idents,
            entities,
            systems,
            queue,
            ..
        } = self;
        for entry in systems.active_mut() {
            entry.tick(Frame::new(delta, entities.entries(), queue, idents));
        }
        self.flush();
        self.sweep();
        self.running = false;
    }

    /// Add an entity, assigning it a fresh id.
    ///
    /// Between updates the entity is inserted immediately; during one the
    /// insertion is deferred to the flush. The returned id is valid right
    /// away in both cases.
    pub fn add_entity(&mut self, value: impl Entity + 'static) -> entity::Id {
        let id = entity::Id::from(self.idents.next_ident());
        self.enqueue_or_apply(Command::AddEntity {
            entry: entity::Entry::new(id.clone(), Box::new(value)),
        });
        id
    }

    /// Remove the entity with the given id. Unknown ids are a silent no-op.
    pub fn remove_entity(&mut self, id: entity::Id) {
        self.enqueue_or_apply(Command::RemoveEntity { id });
    }

    /// Register a system, assigning it a fresh id. New systems start
    /// active.
    pub fn add_system(&mut self, value: impl System + 'static) -> system::Id {
        let id = system::Id::from(self.idents.next_ident());
        self.enqueue_or_apply(Command::AddSystem {
            entry: system::Entry::new(id.clone(), Box::new(value)),
        });
        id
    }

    /// Unregister the system with the given id. Unknown ids are a silent
    /// no-op.
    pub fn remove_system(&mut self, id: system::Id) {
        self.enqueue_or_apply(Command::RemoveSystem { id });
    }

    /// The live entities, in insertion order.
    #[inline]
    pub fn entities(&self) -> &[entity::Entry] {
        self.entities.entries()
    }

    /// The active systems, in tick order.
    #[inline]
    pub fn active_systems(&self) -> &[system::Entry] {
        self.systems.active()
    }

    /// The inactive systems, in the order they were disabled.
    #[inline]
    pub fn inactive_systems(&self) -> &[system::Entry] {
        self.systems.inactive()
    }

    /// Apply immediately between updates, defer to the queue during one.
    fn enqueue_or_apply(&mut self, command: Command) {
        if self.running {
            self.queue.push(command);
        } else {
            self.apply(command);
        }
    }

    /// Drain this scheduler's mailbox into activation commands.
    ///
    /// Runs before the gate closes, so requests published since the last
    /// update are in force for this one.
    fn deliver_requests(&mut self) {
        let requests = Rc::clone(&self.requests);
        while let Some(request) = requests.pop() {
            let command = match request {
                ActivationRequest::Enable(id) => Command::EnableSystem { id },
                ActivationRequest::Disable(id) => Command::DisableSystem { id },
            };
            self.enqueue_or_apply(command);
        }
    }

    /// Apply every queued command in arrival order.
    ///
    /// Commands queued while this runs (the sweep's removals) wait for the
    /// next flush.
    fn flush(&mut self) {
        for command in self.queue.drain() {
            self.apply(command);
        }
    }

    /// Queue removal of every entity whose predicate reports `true`.
    fn sweep(&mut self) {
        for id in self.entities.marked_for_removal() {
            trace!("sweep: entity {} expired", id);
            self.enqueue_or_apply(Command::RemoveEntity { id });
        }
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::AddEntity { entry } => {
                debug!("entity {} added", entry.id());
                let entry = self.entities.push(entry);
                self.bus.emit_created(entry);
            }
            Command::RemoveEntity { id } => {
                if let Some(entry) = self.entities.remove(&id) {
                    debug!("entity {} removed", id);
                    self.bus.emit_removed(entry.id());
                }
            }
            Command::AddSystem { entry } => {
                debug!("system {} added", entry.id());
                self.systems.push_active(entry);
            }
            Command::RemoveSystem { id } => {
                if self.systems.remove(&id).is_some() {
                    debug!("system {} removed", id);
                }
            }
            Command::EnableSystem { id } => {
                if self.systems.enable(&id) {
                    debug!("system {} enabled", id);
                }
            }
            Command::DisableSystem { id } => {
                if self.systems.disable(&id) {
                    debug!("system {} disabled", id);
                }
            }
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ident::Ident;
    use std::any::Any;
    use std::cell::{Cell, RefCell};

    const STEP: Duration = Duration::from_millis(16);

    // ==================== Test fixtures ====================

    struct Prop;

    impl Entity for Prop {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    struct Fuse {
        lit: Rc<Cell<bool>>,
    }

    impl Entity for Fuse {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn should_be_removed(&self) -> bool {
            self.lit.get()
        }
    }

    struct Idle;

    impl System for Idle {
        fn tick(&mut self, _frame: Frame<'_>) {}
    }

    struct Tracer {
        name: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl System for Tracer {
        fn tick(&mut self, _frame: Frame<'_>) {
            self.log.borrow_mut().push(self.name);
        }
    }

    struct Census {
        counts: Rc<RefCell<Vec<usize>>>,
    }

    impl System for Census {
        fn tick(&mut self, frame: Frame<'_>) {
            self.counts.borrow_mut().push(frame.entities().len());
        }
    }

    struct Once {
        action: Option<Box<dyn FnOnce(Frame<'_>)>>,
    }

    impl Once {
        fn new(action: impl FnOnce(Frame<'_>) + 'static) -> Self {
            Self {
                action: Some(Box::new(action)),
            }
        }
    }

    impl System for Once {
        fn tick(&mut self, frame: Frame<'_>) {
            if let Some(action) = self.action.take() {
                action(frame);
            }
        }
    }

    struct Quitter {
        id: Rc<RefCell<Option<system::Id>>>,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl System for Quitter {
        fn tick(&mut self, frame: Frame<'_>) {
            self.log.borrow_mut().push("quitter");
            if let Some(id) = self.id.borrow_mut().take() {
                frame.remove_system(id);
            }
        }
    }

    // ==================== Immediate mode ====================

    #[test]
    fn new_scheduler_is_empty() {
        let scheduler = Scheduler::new();

        assert!(scheduler.entities().is_empty());
        assert!(scheduler.active_systems().is_empty());
        assert!(scheduler.inactive_systems().is_empty());
    }

    #[test]
    fn entities_added_before_update_are_visible_in_order() {
        let mut scheduler = Scheduler::new();

        let first = scheduler.add_entity(Prop);
        let second = scheduler.add_entity(Prop);

        let ids: Vec<&entity::Id> = scheduler.entities().iter().map(|entry| entry.id()).collect();
        assert_eq!(ids, vec![&first, &second]);
    }

    #[test]
    fn added_ids_are_unique_and_well_formed() {
        let mut scheduler = Scheduler::new();

        let mut ids: Vec<String> = (0..64)
            .map(|_| scheduler.add_entity(Prop).as_str().to_owned())
            .collect();

        for id in &ids {
            assert_eq!(id.len(), Ident::LEN);
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 64);
    }

    #[test]
    fn add_then_remove_system_before_update_leaves_nothing() {
        let mut scheduler = Scheduler::new();

        let id = scheduler.add_system(Idle);
        scheduler.remove_system(id);

        assert!(scheduler.active_systems().is_empty());
        assert!(scheduler.inactive_systems().is_empty());
    }

    #[test]
    fn remove_unknown_entity_is_a_noop() {
        let mut scheduler = Scheduler::new();
        scheduler.add_entity(Prop);

        scheduler.remove_entity(entity::Id::from(Ident::new("ghost")));

        assert_eq!(scheduler.entities().len(), 1);
    }

    #[test]
    fn add_after_first_update_applies_immediately() {
        let mut scheduler = Scheduler::new();
        scheduler.add_system(Idle);
        scheduler.update(STEP);

        scheduler.add_entity(Prop);

        assert_eq!(scheduler.entities().len(), 1);
    }

    // ==================== Tick pass ====================

    #[test]
    fn active_systems_tick_in_registration_order() {
        let mut scheduler = Scheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for name in ["a", "b", "c"] {
            scheduler.add_system(Tracer {
                name,
                log: Rc::clone(&log),
            });
        }

        scheduler.update(STEP);
        scheduler.update(STEP);

        assert_eq!(*log.borrow(), vec!["a", "b", "c", "a", "b", "c"]);
    }

    #[test]
    fn systems_receive_the_update_delta() {
        let mut scheduler = Scheduler::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let deltas = Rc::clone(&seen);
        scheduler.add_system(Once::new(move |frame| {
            deltas.borrow_mut().push(frame.delta());
        }));

        scheduler.update(Duration::from_millis(25));

        assert_eq!(*seen.borrow(), vec![Duration::from_millis(25)]);
    }

    #[test]
    fn systems_see_the_entity_snapshot_of_this_update() {
        let mut scheduler = Scheduler::new();
        scheduler.add_entity(Prop);
        scheduler.add_entity(Prop);
        let counts = Rc::new(RefCell::new(Vec::new()));
        scheduler.add_system(Census {
            counts: Rc::clone(&counts),
        });

        scheduler.update(STEP);

        assert_eq!(*counts.borrow(), vec![2]);
    }

    // ==================== Deferred mutation ====================

    #[test]
    fn entity_added_during_tick_lands_after_the_update() {
        let mut scheduler = Scheduler::new();
        let counts = Rc::new(RefCell::new(Vec::new()));
        scheduler.add_system(Once::new(|frame| {
            frame.add_entity(Prop);
        }));
        scheduler.add_system(Census {
            counts: Rc::clone(&counts),
        });

        // A zero-length update defers all the same.
        scheduler.update(Duration::ZERO);

        // The later system still saw the pre-update snapshot.
        assert_eq!(*counts.borrow(), vec![0]);
        assert_eq!(scheduler.entities().len(), 1);
    }

    #[test]
    fn entity_removed_during_tick_stays_visible_to_later_systems() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.add_entity(Prop);
        let counts = Rc::new(RefCell::new(Vec::new()));
        scheduler.add_system(Once::new(move |frame| {
            frame.remove_entity(id);
        }));
        scheduler.add_system(Census {
            counts: Rc::clone(&counts),
        });

        scheduler.update(STEP);

        assert_eq!(*counts.borrow(), vec![1]);
        assert!(scheduler.entities().is_empty());
    }

    #[test]
    fn system_added_during_tick_first_runs_the_next_update() {
        let mut scheduler = Scheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let late = Rc::clone(&log);
        scheduler.add_system(Once::new(move |frame| {
            frame.add_system(Tracer { name: "late", log: late });
        }));

        scheduler.update(STEP);
        assert!(log.borrow().is_empty());
        assert_eq!(scheduler.active_systems().len(), 2);

        scheduler.update(STEP);
        assert_eq!(*log.borrow(), vec!["late"]);
    }

    #[test]
    fn system_removed_during_tick_still_ticks_that_update() {
        let mut scheduler = Scheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let victim_id = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&victim_id);
        scheduler.add_system(Once::new(move |frame| {
            if let Some(id) = slot.borrow_mut().take() {
                frame.remove_system(id);
            }
        }));
        let victim = scheduler.add_system(Tracer {
            name: "victim",
            log: Rc::clone(&log),
        });
        *victim_id.borrow_mut() = Some(victim);

        scheduler.update(STEP);

        // The removal was queued before the victim's turn in the pass.
        assert_eq!(*log.borrow(), vec!["victim"]);
        assert_eq!(scheduler.active_systems().len(), 1);

        scheduler.update(STEP);
        assert_eq!(*log.borrow(), vec!["victim"]);
    }

    #[test]
    fn system_that_removes_itself_is_gone_the_next_update() {
        let mut scheduler = Scheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let slot = Rc::new(RefCell::new(None));
        let id = scheduler.add_system(Quitter {
            id: Rc::clone(&slot),
            log: Rc::clone(&log),
        });
        *slot.borrow_mut() = Some(id);

        scheduler.update(STEP);

        assert_eq!(*log.borrow(), vec!["quitter"]);
        assert!(scheduler.active_systems().is_empty());
        assert!(scheduler.inactive_systems().is_empty());

        scheduler.update(STEP);
        assert_eq!(*log.borrow(), vec!["quitter"]);
    }

    #[test]
    fn in_tick_disable_then_enable_keeps_the_system_ticking() {
        let mut scheduler = Scheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let target_id = Rc::new(RefCell::new(None::<system::Id>));
        let slot = Rc::clone(&target_id);
        scheduler.add_system(Once::new(move |frame| {
            if let Some(id) = slot.borrow_mut().take() {
                frame.disable_system(id.clone());
                frame.enable_system(id);
            }
        }));
        let target = scheduler.add_system(Tracer {
            name: "target",
            log: Rc::clone(&log),
        });
        *target_id.borrow_mut() = Some(target);

        scheduler.update(STEP);

        // Both toggles were queued before the target's turn; neither touches
        // the pass, and the flush applies them in order.
        assert_eq!(*log.borrow(), vec!["target"]);
        assert_eq!(scheduler.active_systems().len(), 2);
        assert!(scheduler.inactive_systems().is_empty());

        scheduler.update(STEP);
        assert_eq!(*log.borrow(), vec!["target", "target"]);
    }

    #[test]
    fn add_and_remove_in_one_tick_apply_in_fifo_order() {
        let mut scheduler = Scheduler::new();
        let created = Rc::new(Cell::new(0));
        let removed = Rc::new(Cell::new(0));
        let count = Rc::clone(&created);
        scheduler
            .bus()
            .subscribe_entity_created(move |_| count.set(count.get() + 1));
        let count = Rc::clone(&removed);
        scheduler
            .bus()
            .subscribe_entity_removed(move |_| count.set(count.get() + 1));

        scheduler.add_system(Once::new(|frame| {
            let id = frame.add_entity(Prop);
            frame.remove_entity(id);
        }));
        scheduler.update(STEP);

        assert!(scheduler.entities().is_empty());
        assert_eq!(created.get(), 1);
        assert_eq!(removed.get(), 1);
    }

    // ==================== Removal sweep ====================

    #[test]
    fn expired_entity_leaves_one_update_after_marking() {
        let mut scheduler = Scheduler::new();
        let removed = Rc::new(Cell::new(0));
        let count = Rc::clone(&removed);
        scheduler
            .bus()
            .subscribe_entity_removed(move |_| count.set(count.get() + 1));
        let counts = Rc::new(RefCell::new(Vec::new()));
        scheduler.add_system(Census {
            counts: Rc::clone(&counts),
        });
        let lit = Rc::new(Cell::new(false));
        scheduler.add_entity(Fuse {
            lit: Rc::clone(&lit),
        });

        scheduler.update(STEP);
        assert_eq!(*counts.borrow(), vec![1]);

        lit.set(true);

        // The sweep only queues the removal; the entity survives this update.
        scheduler.update(STEP);
        assert_eq!(*counts.borrow(), vec![1, 1]);
        assert_eq!(scheduler.entities().len(), 1);
        assert_eq!(removed.get(), 0);

        // The queued removal lands in the next flush.
        scheduler.update(STEP);
        assert_eq!(*counts.borrow(), vec![1, 1, 1]);
        assert!(scheduler.entities().is_empty());
        assert_eq!(removed.get(), 1);
    }

    // ==================== Bus notifications ====================

    #[test]
    fn created_notifications_carry_the_inserted_entry() {
        let mut scheduler = Scheduler::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let ids = Rc::clone(&seen);
        scheduler.bus().subscribe_entity_created(move |entry| {
            ids.borrow_mut().push(entry.id().as_str().to_owned());
        });

        let direct = scheduler.add_entity(Prop);
        assert_eq!(*seen.borrow(), vec![direct.as_str().to_owned()]);

        scheduler.add_system(Once::new(|frame| {
            frame.add_entity(Prop);
        }));
        scheduler.update(STEP);

        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn removed_notifications_carry_the_id() {
        let mut scheduler = Scheduler::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let ids = Rc::clone(&seen);
        scheduler.bus().subscribe_entity_removed(move |id| {
            ids.borrow_mut().push(id.as_str().to_owned());
        });

        let id = scheduler.add_entity(Prop);
        scheduler.remove_entity(id.clone());

        assert_eq!(*seen.borrow(), vec![id.as_str().to_owned()]);
    }

    #[test]
    fn no_notification_for_removing_unknown_id() {
        let mut scheduler = Scheduler::new();
        let removed = Rc::new(Cell::new(0));
        let count = Rc::clone(&removed);
        scheduler
            .bus()
            .subscribe_entity_removed(move |_| count.set(count.get() + 1));

        scheduler.remove_entity(entity::Id::from(Ident::new("ghost")));

        assert_eq!(removed.get(), 0);
    }

    // ==================== Bus activation ====================

    #[test]
    fn disable_request_takes_effect_at_the_next_update() {
        let mut scheduler = Scheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let id = scheduler.add_system(Tracer {
            name: "t",
            log: Rc::clone(&log),
        });
        scheduler.update(STEP);
        assert_eq!(*log.borrow(), vec!["t"]);

        scheduler.bus().request_disable_system(id);

        // Nothing moves until the scheduler picks the request up.
        assert_eq!(scheduler.active_systems().len(), 1);

        scheduler.update(STEP);

        assert_eq!(*log.borrow(), vec!["t"]);
        assert!(scheduler.active_systems().is_empty());
        assert_eq!(scheduler.inactive_systems().len(), 1);
    }

    #[test]
    fn enable_request_restores_ticking_without_duplication() {
        let mut scheduler = Scheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let id = scheduler.add_system(Tracer {
            name: "t",
            log: Rc::clone(&log),
        });

        scheduler.bus().request_disable_system(id.clone());
        scheduler.update(STEP);
        assert!(log.borrow().is_empty());

        // Requests apply before the tick pass, so the system runs this update.
        scheduler.bus().request_enable_system(id);
        scheduler.update(STEP);

        assert_eq!(*log.borrow(), vec!["t"]);
        assert_eq!(scheduler.active_systems().len(), 1);
        assert!(scheduler.inactive_systems().is_empty());
    }

    #[test]
    fn activation_request_for_unknown_id_is_ignored() {
        let mut scheduler = Scheduler::new();
        scheduler.add_system(Idle);
        let ghost = system::Id::from(Ident::new("ghost"));

        scheduler.bus().request_enable_system(ghost.clone());
        scheduler.bus().request_disable_system(ghost);
        scheduler.update(STEP);

        assert_eq!(scheduler.active_systems().len(), 1);
        assert!(scheduler.inactive_systems().is_empty());
    }

    #[test]
    fn schedulers_sharing_a_bus_all_receive_requests() {
        let bus = Rc::new(Bus::new());
        let mut first = Scheduler::with_bus(Rc::clone(&bus));
        let mut second = Scheduler::with_bus(Rc::clone(&bus));
        let log = Rc::new(RefCell::new(Vec::new()));
        let first_system = first.add_system(Tracer {
            name: "first",
            log: Rc::clone(&log),
        });
        second.add_system(Tracer {
            name: "second",
            log: Rc::clone(&log),
        });

        bus.request_disable_system(first_system);
        first.update(STEP);
        second.update(STEP);

        assert!(first.active_systems().is_empty());
        assert_eq!(first.inactive_systems().len(), 1);
        assert_eq!(second.active_systems().len(), 1);
        assert_eq!(*log.borrow(), vec!["second"]);
    }

    #[test]
    fn requests_still_reach_survivors_after_a_scheduler_drops() {
        let bus = Rc::new(Bus::new());
        let mut survivor = Scheduler::with_bus(Rc::clone(&bus));
        let doomed = Scheduler::with_bus(Rc::clone(&bus));
        let id = survivor.add_system(Idle);
        drop(doomed);

        bus.request_disable_system(id);
        survivor.update(STEP);

        assert!(survivor.active_systems().is_empty());
        assert_eq!(survivor.inactive_systems().len(), 1);
    }

    #[test]
    fn separate_buses_do_not_cross_talk() {
        let mut first = Scheduler::new();
        let mut second = Scheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let first_system = first.add_system(Tracer {
            name: "first",
            log: Rc::clone(&log),
        });
        let second_system = second.add_system(Tracer {
            name: "second",
            log: Rc::clone(&log),
        });

        first.bus().request_disable_system(first_system);
        first.bus().request_disable_system(second_system);
        first.update(STEP);
        second.update(STEP);

        assert_eq!(first.inactive_systems().len(), 1);
        assert_eq!(second.active_systems().len(), 1);
        assert_eq!(*log.borrow(), vec!["second"]);
    }
}
