//! # World: The Central Container
//!
//! The [`World`] owns every entity, every system, and the observer list. It is
//! the single source of truth for the simulation.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │ World                                               │
//! │                                                     │
//! │  entities: Entities                                 │
//! │    Vec<Box<dyn Composer>>, index == EntityId        │
//! │    next_id counter                                  │
//! │                                                     │
//! │  systems: Systems                                   │
//! │    logic:     Vec<Box<dyn Logic>>   (update order)  │
//! │    drawers:   Vec<Box<dyn Drawer>>  (draw order)    │
//! │    observers: Vec<Observer>         (notify order)  │
//! │                                                     │
//! │  backlog: Rc<RefCell<Backlog>>                      │
//! │    shared with every bound WorldInjector            │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Frame Cycle
//!
//! `update` is a full sweep: every logic system visits every entity. Spawns
//! made by a system during its sweep sit in the backlog and are registered as
//! soon as that sweep ends, so later systems in the same tick already see
//! them. `draw` does the same with draw systems and a surface.
//!
//! ## Comparison
//!
//! - **bevy_ecs**: Deferred `Commands` are applied at sync points between
//!   systems; this is the same idea with one sync point per system.
//! - **hecs**: No scheduling at all; spawning during iteration is the caller's
//!   problem.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::EcsError;
use crate::render::Surface;

use super::entity::{Composer, EntityId};
use super::system::{Backlog, Drawer, Logic};

/// Insertion-ordered entity registry. An entity's ID is its index.
#[derive(Default)]
pub struct Entities {
    pub(super) list: Vec<Box<dyn Composer>>,
    next_id: u32,
}

impl Entities {
    /// Number of registered entities.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Look up an entity by ID. `None` for any ID that was never assigned.
    pub fn get(&self, id: EntityId) -> Option<&dyn Composer> {
        if id.0 >= self.next_id {
            return None;
        }
        self.list
            .get(id.0 as usize)
            .map(|entity| entity.as_ref() as &dyn Composer)
    }

    /// Mutable lookup by ID. `None` for any ID that was never assigned.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut dyn Composer> {
        if id.0 >= self.next_id {
            return None;
        }
        let entity = self.list.get_mut(id.0 as usize)?;
        Some(entity.as_mut() as &mut dyn Composer)
    }

    /// Iterate entities in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Composer> {
        self.list.iter().map(|entity| entity.as_ref() as &dyn Composer)
    }

    /// Iterate entities mutably in registration order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut dyn Composer> {
        self.list.iter_mut().map(|entity| entity.as_mut() as &mut dyn Composer)
    }

    /// Stamp the next ID into `entity` and append it.
    ///
    /// Returns `None` without changing anything if the entity already carries
    /// an ID.
    ///
    /// # Panics
    ///
    /// Panics on any other assignment failure; that means the registry and the
    /// entity disagree in a way no caller can repair.
    fn insert(&mut self, mut entity: Box<dyn Composer>) -> Option<EntityId> {
        let id = EntityId(self.next_id);
        match entity.identity_mut().assign(id) {
            Ok(()) => {}
            Err(EcsError::AlreadyInitialized) => return None,
            Err(err) => panic!("unknown error when assigning ID {id} to entity: {err}"),
        }
        self.next_id += 1;
        self.list.push(entity);
        Some(id)
    }
}

/// A registered new-entity observer.
enum Observer {
    Callback(Box<dyn FnMut(&mut dyn Composer)>),
    /// Logic system at this index.
    Logic(usize),
    /// Draw system at this index.
    Drawer(usize),
}

#[derive(Default)]
struct Systems {
    logic: Vec<Box<dyn Logic>>,
    drawers: Vec<Box<dyn Drawer>>,
    observers: Vec<Observer>,
}

impl Systems {
    /// Run every observer, in registration order, on a freshly registered entity.
    fn notify(&mut self, entity: &mut dyn Composer) {
        for registered in &mut self.observers {
            match registered {
                Observer::Callback(callback) => callback(&mut *entity),
                Observer::Logic(index) => {
                    if let Some(observer) = self.logic[*index].observer() {
                        observer.on_new_entity(&mut *entity);
                    }
                }
                Observer::Drawer(index) => {
                    if let Some(observer) = self.drawers[*index].observer() {
                        observer.on_new_entity(&mut *entity);
                    }
                }
            }
        }
    }
}

/// Wall time spent in one system's sweep during the most recent frame.
#[cfg(feature = "diagnostics")]
#[derive(Debug, Clone)]
pub struct SystemTiming {
    pub name: &'static str,
    pub duration_us: f64,
}

/// The owning registry and scheduler for all entities and systems.
pub struct World {
    width: u32,
    height: u32,
    entities: Entities,
    systems: Systems,
    backlog: Rc<RefCell<Backlog>>,
    /// Per-system sweep timings from the most recent `update`.
    #[cfg(feature = "diagnostics")]
    timings: Vec<SystemTiming>,
}

impl World {
    /// Create an empty world with fixed logical dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            entities: Entities::default(),
            systems: Systems::default(),
            backlog: Rc::new(RefCell::new(Backlog {
                spawned: Vec::new(),
                size: (width, height),
                entity_count: 0,
            })),
            #[cfg(feature = "diagnostics")]
            timings: Vec::new(),
        }
    }

    // ── Entities ─────────────────────────────────────────────────────

    /// Register an entity, assigning it the next sequential ID and notifying
    /// every observer.
    ///
    /// Returns `None` (and does nothing) if the entity was already registered.
    pub fn add_entity<E: Composer + 'static>(&mut self, entity: E) -> Option<EntityId> {
        self.add_boxed(Box::new(entity))
    }

    /// [`add_entity`](Self::add_entity) for an already boxed entity.
    pub fn add_boxed(&mut self, entity: Box<dyn Composer>) -> Option<EntityId> {
        let Some(id) = self.entities.insert(entity) else {
            log::warn!("ignoring re-registration of an initialized entity");
            return None;
        };
        log::debug!("registered entity {id}");
        self.backlog.borrow_mut().entity_count = self.entities.len();
        if let Some(entity) = self.entities.get_mut(id) {
            self.systems.notify(entity);
        }
        Some(id)
    }

    /// Bounds-checked lookup by ID.
    pub fn get(&self, id: EntityId) -> Option<&dyn Composer> {
        self.entities.get(id)
    }

    /// Mutable bounds-checked lookup by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut dyn Composer> {
        self.entities.get_mut(id)
    }

    /// Number of registered entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entities(&self) -> &Entities {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut Entities {
        &mut self.entities
    }

    // ── Systems ──────────────────────────────────────────────────────

    /// Append a logic system, binding its injector and observer if it has them.
    pub fn add_logic<L: Logic + 'static>(&mut self, mut logic: L) -> &mut Self {
        let index = self.systems.logic.len();
        if let Some(injector) = logic.injector() {
            injector.bind(self.backlog.clone());
        }
        if logic.observer().is_some() {
            self.systems.observers.push(Observer::Logic(index));
        }
        log::debug!("added logic system {} at position {index}", logic.name());
        self.systems.logic.push(Box::new(logic));
        self
    }

    /// Append a draw system, binding its injector and observer if it has them.
    pub fn add_drawer<D: Drawer + 'static>(&mut self, mut drawer: D) -> &mut Self {
        let index = self.systems.drawers.len();
        if let Some(injector) = drawer.injector() {
            injector.bind(self.backlog.clone());
        }
        if drawer.observer().is_some() {
            self.systems.observers.push(Observer::Drawer(index));
        }
        log::debug!("added draw system {} at position {index}", drawer.name());
        self.systems.drawers.push(Box::new(drawer));
        self
    }

    /// Register a callback fired for every entity added from now on.
    pub fn add_observer(&mut self, observer: impl FnMut(&mut dyn Composer) + 'static) -> &mut Self {
        self.systems.observers.push(Observer::Callback(Box::new(observer)));
        self
    }

    // ── Frame cycle ──────────────────────────────────────────────────

    /// One logic tick: every logic system, in order, visits every entity.
    pub fn update(&mut self) {
        #[cfg(feature = "diagnostics")]
        self.timings.clear();

        for index in 0..self.systems.logic.len() {
            #[cfg(feature = "diagnostics")]
            let start = std::time::Instant::now();

            let system = &mut self.systems.logic[index];
            system.prepare(&mut self.entities);
            for entity in self.entities.list.iter_mut() {
                system.handle(entity.as_mut());
            }

            #[cfg(feature = "diagnostics")]
            {
                let name = self.systems.logic[index].name();
                self.timings.push(SystemTiming {
                    name,
                    duration_us: start.elapsed().as_secs_f64() * 1_000_000.0,
                });
            }

            self.register_spawned();
        }
    }

    /// One frame: every draw system, in order, visits every entity.
    pub fn draw(&mut self, surface: &mut dyn Surface) {
        for index in 0..self.systems.drawers.len() {
            let drawer = &mut self.systems.drawers[index];
            for entity in self.entities.list.iter_mut() {
                drawer.draw(entity.as_mut(), surface);
            }
            self.register_spawned();
        }
    }

    /// The fixed logical dimensions. The outside size is ignored.
    pub fn layout(&self, _outside_width: u32, _outside_height: u32) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Sweep timings recorded by the most recent [`update`](Self::update).
    #[cfg(feature = "diagnostics")]
    pub fn timings(&self) -> &[SystemTiming] {
        &self.timings
    }

    /// Register everything spawned through injectors since the last call.
    fn register_spawned(&mut self) {
        let spawned = std::mem::take(&mut self.backlog.borrow_mut().spawned);
        for entity in spawned {
            self.add_boxed(entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::component::Components;
    use crate::ecs::entity::Identity;
    use crate::ecs::system::{EntityObserver, WorldInjector};
    use crate::render::Canvas;
    use std::cell::Cell;

    #[derive(Debug, Default, PartialEq)]
    struct Counter(u32);

    #[derive(Default)]
    struct Ticker {
        identity: Identity,
        counter: Counter,
    }

    impl Ticker {
        fn preassigned(id: u32) -> Self {
            let mut ticker = Self::default();
            ticker.identity.assign(EntityId(id)).unwrap();
            ticker
        }
    }

    impl Composer for Ticker {
        fn identity(&self) -> &Identity {
            &self.identity
        }
        fn identity_mut(&mut self) -> &mut Identity {
            &mut self.identity
        }
        fn components(&mut self) -> Components<'_> {
            Components::new().with(&mut self.counter)
        }
    }

    fn counter_of(world: &mut World, id: u32) -> u32 {
        world
            .get_mut(EntityId(id))
            .and_then(|entity| entity.components().take::<Counter>().map(|c| c.0))
            .unwrap()
    }

    struct Increment;

    impl Logic for Increment {
        fn handle(&mut self, entity: &mut dyn Composer) {
            if let Some(counter) = entity.components().take::<Counter>() {
                counter.0 += 1;
            }
        }
    }

    /// Spawns one ticker the first time it runs.
    #[derive(Default)]
    struct SpawnOnce {
        world: WorldInjector,
        done: bool,
        visited: Rc<Cell<usize>>,
    }

    impl Logic for SpawnOnce {
        fn handle(&mut self, _entity: &mut dyn Composer) {
            self.visited.set(self.visited.get() + 1);
            if !self.done {
                self.done = true;
                self.world.spawn(Ticker::default()).unwrap();
            }
        }

        fn injector(&mut self) -> Option<&mut WorldInjector> {
            Some(&mut self.world)
        }
    }

    /// Records the IDs of entities it is told about.
    struct Recorder {
        tag: &'static str,
        log: Rc<RefCell<Vec<(&'static str, EntityId)>>>,
    }

    impl EntityObserver for Recorder {
        fn on_new_entity(&mut self, entity: &mut dyn Composer) {
            self.log.borrow_mut().push((self.tag, entity.id().unwrap()));
        }
    }

    impl Logic for Recorder {
        fn handle(&mut self, _entity: &mut dyn Composer) {}

        fn observer(&mut self) -> Option<&mut dyn EntityObserver> {
            Some(self)
        }
    }

    /// Records how many entities its injector reports while handling each one.
    #[derive(Default)]
    struct Headcount {
        world: WorldInjector,
        counts: Rc<RefCell<Vec<usize>>>,
    }

    impl Logic for Headcount {
        fn handle(&mut self, _entity: &mut dyn Composer) {
            let count = self.world.entity_count().unwrap();
            self.counts.borrow_mut().push(count);
        }

        fn injector(&mut self) -> Option<&mut WorldInjector> {
            Some(&mut self.world)
        }
    }

    /// Draw system that observes new entities and spawns one ticker on its
    /// first draw.
    #[derive(Default)]
    struct SpawningPainter {
        world: WorldInjector,
        seen: Rc<RefCell<Vec<EntityId>>>,
        drawn: Rc<Cell<usize>>,
        done: bool,
    }

    impl EntityObserver for SpawningPainter {
        fn on_new_entity(&mut self, entity: &mut dyn Composer) {
            self.seen.borrow_mut().push(entity.id().unwrap());
        }
    }

    impl Drawer for SpawningPainter {
        fn draw(&mut self, _entity: &mut dyn Composer, _surface: &mut dyn Surface) {
            self.drawn.set(self.drawn.get() + 1);
            if !self.done {
                self.done = true;
                self.world.spawn(Ticker::default()).unwrap();
            }
        }

        fn injector(&mut self) -> Option<&mut WorldInjector> {
            Some(&mut self.world)
        }

        fn observer(&mut self) -> Option<&mut dyn EntityObserver> {
            Some(self)
        }
    }

    #[test]
    fn ids_are_sequential() {
        let mut world = World::new(10, 10);
        assert_eq!(world.add_entity(Ticker::default()), Some(EntityId(0)));
        assert_eq!(world.add_entity(Ticker::default()), Some(EntityId(1)));
        assert_eq!(world.add_entity(Ticker::default()), Some(EntityId(2)));
        assert_eq!(world.len(), 3);
        assert_eq!(world.get(EntityId(1)).unwrap().id(), Ok(EntityId(1)));
    }

    #[test]
    fn re_registration_is_a_no_op() {
        let mut world = World::new(10, 10);
        world.add_entity(Ticker::default());
        assert_eq!(world.add_entity(Ticker::preassigned(0)), None);
        assert_eq!(world.len(), 1);
        assert_eq!(world.add_entity(Ticker::default()), Some(EntityId(1)));
    }

    #[test]
    fn re_registration_does_not_notify() {
        let mut world = World::new(10, 10);
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        world.add_observer(move |_| seen.set(seen.get() + 1));

        world.add_entity(Ticker::preassigned(5));
        assert_eq!(calls.get(), 0);
        world.add_entity(Ticker::default());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn get_out_of_range_is_none() {
        let mut world = World::new(10, 10);
        world.add_entity(Ticker::default());
        assert!(world.get(EntityId(0)).is_some());
        assert!(world.get(EntityId(1)).is_none());
        assert!(world.get_mut(EntityId(u32::MAX)).is_none());
    }

    #[test]
    fn layout_ignores_outside_size() {
        let world = World::new(600, 400);
        assert_eq!(world.layout(1920, 1080), (600, 400));
        assert_eq!(world.layout(0, 0), (600, 400));
    }

    #[test]
    fn update_runs_every_system_on_every_entity() {
        let mut world = World::new(10, 10);
        world.add_entity(Ticker::default());
        world.add_entity(Ticker::default());
        world.add_logic(Increment).add_logic(Increment);

        world.update();
        assert_eq!(counter_of(&mut world, 0), 2);
        assert_eq!(counter_of(&mut world, 1), 2);

        world.update();
        assert_eq!(counter_of(&mut world, 0), 4);
    }

    #[test]
    fn observers_fire_in_registration_order() {
        let mut world = World::new(10, 10);
        let log = Rc::new(RefCell::new(Vec::new()));
        world.add_logic(Recorder {
            tag: "first",
            log: log.clone(),
        });
        let callback_log = log.clone();
        world.add_observer(move |entity| {
            callback_log
                .borrow_mut()
                .push(("callback", entity.id().unwrap()));
        });
        world.add_logic(Recorder {
            tag: "second",
            log: log.clone(),
        });

        world.add_entity(Ticker::default());
        assert_eq!(
            *log.borrow(),
            vec![
                ("first", EntityId(0)),
                ("callback", EntityId(0)),
                ("second", EntityId(0)),
            ]
        );
    }

    #[test]
    fn late_observer_misses_earlier_entities() {
        let mut world = World::new(10, 10);
        world.add_entity(Ticker::default());

        let log = Rc::new(RefCell::new(Vec::new()));
        world.add_logic(Recorder {
            tag: "late",
            log: log.clone(),
        });
        assert!(log.borrow().is_empty());

        world.add_entity(Ticker::default());
        assert_eq!(*log.borrow(), vec![("late", EntityId(1))]);
    }

    #[test]
    fn spawned_entity_visible_to_later_systems_only() {
        let mut world = World::new(10, 10);
        let visited = Rc::new(Cell::new(0));
        world.add_entity(Ticker::default());
        world
            .add_logic(SpawnOnce {
                visited: visited.clone(),
                ..Default::default()
            })
            .add_logic(Increment);

        world.update();

        // The spawner only saw the entity that existed when its sweep began.
        assert_eq!(visited.get(), 1);
        assert_eq!(world.len(), 2);
        // Increment ran after the spawn was registered.
        assert_eq!(counter_of(&mut world, 1), 1);
    }

    #[test]
    fn spawned_entity_notifies_observers() {
        let mut world = World::new(10, 10);
        let log = Rc::new(RefCell::new(Vec::new()));
        world.add_entity(Ticker::default());
        world
            .add_logic(SpawnOnce::default())
            .add_logic(Recorder {
                tag: "recorder",
                log: log.clone(),
            });

        world.update();
        assert_eq!(*log.borrow(), vec![("recorder", EntityId(1))]);
    }

    #[test]
    fn injector_reports_world_size() {
        let mut world = World::new(320, 240);
        let mut spawner = SpawnOnce::default();
        assert!(!spawner.world.is_bound());
        spawner.world.bind(world.backlog.clone());
        assert_eq!(spawner.world.size(), Ok((320, 240)));
        world.add_logic(spawner);
    }

    #[test]
    fn injected_system_reads_entity_count_during_sweep() {
        let mut world = World::new(10, 10);
        let counts = Rc::new(RefCell::new(Vec::new()));
        world.add_entity(Ticker::default());
        world.add_entity(Ticker::default());
        world.add_logic(SpawnOnce::default()).add_logic(Headcount {
            counts: counts.clone(),
            ..Default::default()
        });

        world.update();
        // SpawnOnce's ticker was registered before Headcount's sweep began.
        assert_eq!(*counts.borrow(), vec![3, 3, 3]);
    }

    #[test]
    fn entity_count_excludes_pending_spawns() {
        let mut world = World::new(10, 10);
        let counts = Rc::new(RefCell::new(Vec::new()));
        world.add_entity(Ticker::default());
        world
            .add_logic(Headcount {
                counts: counts.clone(),
                ..Default::default()
            })
            .add_logic(SpawnOnce::default());

        world.update();
        assert_eq!(*counts.borrow(), vec![1]);
        world.update();
        assert_eq!(*counts.borrow(), vec![1, 2, 2]);
    }

    #[test]
    fn draw_system_observes_and_spawns() {
        let mut world = World::new(4, 4);
        world.add_entity(Ticker::default());

        let seen = Rc::new(RefCell::new(Vec::new()));
        let drawn = Rc::new(Cell::new(0));
        world.add_drawer(SpawningPainter {
            seen: seen.clone(),
            drawn: drawn.clone(),
            ..Default::default()
        });
        world.add_entity(Ticker::default());
        assert_eq!(*seen.borrow(), vec![EntityId(1)]);

        let mut canvas = Canvas::new(4, 4);
        world.draw(&mut canvas);

        // The spawn landed once the draw sweep ended, not during it.
        assert_eq!(drawn.get(), 2);
        assert_eq!(world.len(), 3);
        assert_eq!(*seen.borrow(), vec![EntityId(1), EntityId(2)]);

        world.draw(&mut canvas);
        assert_eq!(drawn.get(), 5);
        assert_eq!(world.len(), 3);
    }

    #[cfg(feature = "diagnostics")]
    #[test]
    fn update_records_timings() {
        let mut world = World::new(10, 10);
        world.add_entity(Ticker::default());
        world.add_logic(Increment).add_logic(SpawnOnce::default());
        world.update();

        let names: Vec<_> = world.timings().iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Increment", "SpawnOnce"]);
    }
}
