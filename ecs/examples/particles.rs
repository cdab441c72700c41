use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use coop_ecs::{Entity, Frame, Scheduler, System};
use log::info;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const MAX_PARTICLES: usize = 24;
const FRAMES: u32 = 120;

struct Particle {
    x: Cell<f32>,
    y: Cell<f32>,
    vx: f32,
    vy: f32,
    ttl: Cell<f32>,
}

impl Particle {
    fn new(rng: &mut SmallRng) -> Self {
        Self {
            x: Cell::new(0.0),
            y: Cell::new(0.0),
            vx: rng.gen_range(-1.0..1.0),
            vy: rng.gen_range(0.5..2.0),
            ttl: Cell::new(rng.gen_range(0.5..2.5)),
        }
    }
}

impl Entity for Particle {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn should_be_removed(&self) -> bool {
        self.ttl.get() <= 0.0
    }
}

struct Emitter {
    rng: SmallRng,
}

impl System for Emitter {
    fn tick(&mut self, frame: Frame<'_>) {
        // Top the pool back up; the new particles land after this update.
        for _ in frame.entities().len()..MAX_PARTICLES {
            frame.add_entity(Particle::new(&mut self.rng));
        }
    }
}

struct Motion;

impl System for Motion {
    fn tick(&mut self, frame: Frame<'_>) {
        let dt = frame.delta().as_secs_f32();
        for entry in frame.entities() {
            if let Some(particle) = entry.get::<Particle>() {
                particle.x.set(particle.x.get() + particle.vx * dt);
                particle.y.set(particle.y.get() + particle.vy * dt);
                particle.ttl.set(particle.ttl.get() - dt);
            }
        }
    }
}

fn main() {
    env_logger::init();

    println!("=============================================================");
    println!("Particle pool!");
    println!("=============================================================");

    let mut scheduler = Scheduler::new();

    let spawned = Rc::new(Cell::new(0u32));
    let expired = Rc::new(Cell::new(0u32));
    let count = Rc::clone(&spawned);
    scheduler
        .bus()
        .subscribe_entity_created(move |_| count.set(count.get() + 1));
    let count = Rc::clone(&expired);
    scheduler
        .bus()
        .subscribe_entity_removed(move |_| count.set(count.get() + 1));

    scheduler.add_system(Emitter {
        rng: SmallRng::seed_from_u64(0xC0FFEE),
    });
    scheduler.add_system(Motion);

    let mut last = Instant::now();
    for frame in 0..FRAMES {
        let now = Instant::now();
        scheduler.update(now - last);
        last = now;

        if frame % 30 == 0 {
            info!(
                "frame {}: {} live, {} spawned, {} expired",
                frame,
                scheduler.entities().len(),
                spawned.get(),
                expired.get()
            );
        }

        std::thread::sleep(Duration::from_millis(16));
    }

    println!(
        "Done: {} spawned, {} expired, {} still live",
        spawned.get(),
        expired.get(),
        scheduler.entities().len()
    );
}
