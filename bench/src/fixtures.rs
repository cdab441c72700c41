//! Entities and systems shared by the scheduler benches.
//!
//! The workloads are deliberately small and predictable so the benches
//! measure scheduler overhead rather than simulation logic.

use std::any::Any;
use std::cell::Cell;

use coop_ecs::{Entity, Frame, Scheduler, System};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

// =============================================================================
// Entities
// =============================================================================

/// A point mass with interior-mutable position.
pub struct Body {
    pub x: Cell<f32>,
    pub y: Cell<f32>,
    pub vx: f32,
    pub vy: f32,
}

impl Body {
    /// A body at the origin with a random velocity.
    pub fn random(rng: &mut SmallRng) -> Self {
        Self {
            x: Cell::new(0.0),
            y: Cell::new(0.0),
            vx: rng.gen_range(-1.0..1.0),
            vy: rng.gen_range(-1.0..1.0),
        }
    }
}

impl Entity for Body {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// An entity that expires after a fixed number of updates.
pub struct ShortLived {
    remaining: Cell<u32>,
}

impl ShortLived {
    /// An entity that lives for the given number of updates.
    pub fn new(updates: u32) -> Self {
        Self {
            remaining: Cell::new(updates),
        }
    }
}

impl Entity for ShortLived {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn should_be_removed(&self) -> bool {
        self.remaining.get() == 0
    }
}

// =============================================================================
// Systems
// =============================================================================

/// Integrates every [`Body`] by the update delta.
pub struct Motion;

impl System for Motion {
    fn tick(&mut self, frame: Frame<'_>) {
        let dt = frame.delta().as_secs_f32();
        for entry in frame.entities() {
            if let Some(body) = entry.get::<Body>() {
                body.x.set(body.x.get() + body.vx * dt);
                body.y.set(body.y.get() + body.vy * dt);
            }
        }
    }
}

/// Burns one update off every [`ShortLived`] entity.
pub struct Decay;

impl System for Decay {
    fn tick(&mut self, frame: Frame<'_>) {
        for entry in frame.entities() {
            if let Some(entity) = entry.get::<ShortLived>() {
                let remaining = entity.remaining.get();
                if remaining > 0 {
                    entity.remaining.set(remaining - 1);
                }
            }
        }
    }
}

/// Keeps the pool of [`ShortLived`] entities topped up to a target size.
pub struct Refill {
    pub target: usize,
    pub lifetime: u32,
}

impl System for Refill {
    fn tick(&mut self, frame: Frame<'_>) {
        for _ in frame.entities().len()..self.target {
            frame.add_entity(ShortLived::new(self.lifetime));
        }
    }
}

/// A system doing the minimum observable work per tick, for measuring
/// dispatch overhead.
pub struct Pulse {
    pub ticks: u64,
}

impl System for Pulse {
    fn tick(&mut self, _frame: Frame<'_>) {
        self.ticks = self.ticks.wrapping_add(1);
    }
}

// =============================================================================
// Scheduler builders
// =============================================================================

/// A scheduler running [`Motion`] over `bodies` point masses.
pub fn motion_scheduler(bodies: usize) -> Scheduler {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut scheduler = Scheduler::new();
    scheduler.add_system(Motion);
    for _ in 0..bodies {
        scheduler.add_entity(Body::random(&mut rng));
    }
    scheduler
}

/// A scheduler churning a pool of `target` entities that each live for
/// `lifetime` updates.
pub fn churn_scheduler(target: usize, lifetime: u32) -> Scheduler {
    let mut scheduler = Scheduler::new();
    scheduler.add_system(Refill { target, lifetime });
    scheduler.add_system(Decay);
    scheduler
}

/// A scheduler ticking `systems` near-empty systems, isolating per-system
/// dispatch cost.
pub fn fanout_scheduler(systems: usize) -> Scheduler {
    let mut scheduler = Scheduler::new();
    for _ in 0..systems {
        scheduler.add_system(Pulse { ticks: 0 });
    }
    scheduler
}
