//! Level World
//!
//! The World holds every entity of one running level:
//! - Entity allocation and lifetime tracking
//! - Component storage for all component types
//! - Immediate despawn that clears every component slot
//!
//! Components are stored in typed fields; the set of things a level can
//! contain is fixed. Host-side pieces (bodies, animators, flashes) come
//! from the [`Backend`] and are stored like any other component.

use glam::Vec2;
use rand::Rng;

use super::animation::{fox, mouse};
use super::bounds::Aabb;
use super::capability::{AnimationPlayer, Backend, BodyConfig};
use super::component::ComponentStorage;
use super::components::{Coin, Door};
use super::enemy::EnemyController;
use super::entity::{Entity, EntityAllocator};
use super::player::PlayerController;
use crate::settings::{EnemySettings, PlayerSettings};

/// The entities of one level and their components.
pub struct World<Bk: Backend> {
    /// Entity allocator for creating/destroying entities
    entities: EntityAllocator,

    // =========================================================================
    // Host Components
    // =========================================================================

    /// Physics bodies for the fox and mice
    pub bodies: ComponentStorage<Bk::Body>,

    /// Sprite animation players
    pub animators: ComponentStorage<Bk::Animator>,

    /// Hit flash (fox only)
    pub flashes: ComponentStorage<Bk::Flash>,

    // =========================================================================
    // Behavior Components
    // =========================================================================

    pub players: ComponentStorage<PlayerController>,

    pub enemies: ComponentStorage<EnemyController>,

    // =========================================================================
    // Static Pickups and Exits
    // =========================================================================

    pub coins: ComponentStorage<Coin>,

    pub doors: ComponentStorage<Door>,

    /// Overlap boxes for entities without a body
    pub sensors: ComponentStorage<Aabb>,
}

impl<Bk: Backend> World<Bk> {
    /// Create a new empty world.
    pub fn new() -> Self {
        Self {
            entities: EntityAllocator::new(),

            bodies: ComponentStorage::new(),
            animators: ComponentStorage::new(),
            flashes: ComponentStorage::new(),

            players: ComponentStorage::new(),
            enemies: ComponentStorage::new(),

            coins: ComponentStorage::new(),
            doors: ComponentStorage::new(),
            sensors: ComponentStorage::new(),
        }
    }

    // =========================================================================
    // Entity Management
    // =========================================================================

    /// Spawn a new bare entity.
    pub fn spawn(&mut self) -> Entity {
        self.entities.allocate()
    }

    /// Immediately despawn an entity and all its components.
    /// Returns false if it was already gone.
    pub fn despawn_immediate(&mut self, entity: Entity) -> bool {
        if !self.entities.free(entity) {
            return false;
        }

        let idx = entity.index();
        self.bodies.clear_slot(idx);
        self.animators.clear_slot(idx);
        self.flashes.clear_slot(idx);
        self.players.clear_slot(idx);
        self.enemies.clear_slot(idx);
        self.coins.clear_slot(idx);
        self.doors.clear_slot(idx);
        self.sensors.clear_slot(idx);
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    pub fn entity_count(&self) -> u32 {
        self.entities.alive_count()
    }

    /// Live entities that have a component in `storage`
    pub fn entities_with<T>(&self, storage: &ComponentStorage<T>) -> Vec<Entity> {
        storage
            .indices()
            .into_iter()
            .filter_map(|idx| self.entities.entity_at(idx))
            .collect()
    }

    pub fn enemy_entities(&self) -> Vec<Entity> {
        self.entities_with(&self.enemies)
    }

    pub fn coin_entities(&self) -> Vec<Entity> {
        self.entities_with(&self.coins)
    }

    pub fn door_entities(&self) -> Vec<Entity> {
        self.entities_with(&self.doors)
    }

    // =========================================================================
    // Convenience Spawners
    // =========================================================================

    /// Spawn the fox: body, animator, hit flash and controller.
    pub fn spawn_player(
        &mut self,
        backend: &mut Bk,
        position: Vec2,
        settings: &PlayerSettings,
    ) -> Entity {
        let entity = self.spawn();
        let config = BodyConfig {
            size: settings.body_size,
            drag: settings.drag,
            gravity: true,
            clamp_to_level: true,
        };
        self.bodies.insert(entity, backend.spawn_body(position, &config));

        let mut animator = backend.spawn_animator(&fox::SHEET);
        animator.play(&fox::IDLE);
        self.animators.insert(entity, animator);

        self.flashes.insert(entity, backend.spawn_flash());
        self.players.insert(entity, PlayerController::new(*settings));
        entity
    }

    /// Spawn a mouse at a random point of its patrol.
    pub fn spawn_enemy(
        &mut self,
        backend: &mut Bk,
        position: Vec2,
        settings: &EnemySettings,
        rng: &mut impl Rng,
    ) -> Entity {
        let entity = self.spawn();
        let config = BodyConfig {
            size: settings.body_size,
            drag: settings.drag,
            gravity: true,
            clamp_to_level: true,
        };
        self.bodies.insert(entity, backend.spawn_body(position, &config));

        let mut animator = backend.spawn_animator(&mouse::SHEET);
        animator.play(&mouse::RUN);
        self.animators.insert(entity, animator);

        self.enemies.insert(entity, EnemyController::new(settings, rng));
        entity
    }

    /// Spawn a coin standing on `position`.
    pub fn spawn_coin(&mut self, position: Vec2, size: Vec2) -> Entity {
        let entity = self.spawn();
        self.coins.insert(entity, Coin);
        self.sensors.insert(entity, Aabb::anchored(position, size));
        entity
    }

    /// Spawn a door standing on `position`.
    pub fn spawn_door(&mut self, position: Vec2, size: Vec2, target: Option<String>) -> Entity {
        let entity = self.spawn();
        self.doors.insert(entity, Door { target });
        self.sensors.insert(entity, Aabb::anchored(position, size));
        entity
    }
}

impl<Bk: Backend> Default for World<Bk> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::FakeBackend;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_spawn_and_despawn() {
        let mut world: World<FakeBackend> = World::new();

        let e1 = world.spawn_coin(Vec2::new(10.0, 10.0), Vec2::splat(32.0));
        let e2 = world.spawn_coin(Vec2::new(90.0, 10.0), Vec2::splat(32.0));
        assert_eq!(world.entity_count(), 2);

        assert!(world.despawn_immediate(e1));
        assert!(!world.despawn_immediate(e1));
        assert_eq!(world.entity_count(), 1);
        assert!(!world.is_alive(e1));
        assert!(!world.coins.contains(e1));
        assert!(!world.sensors.contains(e1));
        assert_eq!(world.coin_entities(), vec![e2]);
    }

    #[test]
    fn test_spawn_player() {
        let mut world: World<FakeBackend> = World::new();
        let mut backend = FakeBackend::default();
        let settings = PlayerSettings::default();
        let player = world.spawn_player(&mut backend, Vec2::new(128.0, 704.0), &settings);

        assert!(world.players.contains(player));
        assert!(world.flashes.contains(player));
        assert_eq!(world.bodies.get(player).map(|b| b.size), Some(settings.body_size));
        assert_eq!(world.animators.get(player).and_then(|a| a.current()), Some("idle"));
        assert_eq!(backend.sheets, vec!["player"]);
    }

    #[test]
    fn test_spawn_enemy() {
        let mut world: World<FakeBackend> = World::new();
        let mut backend = FakeBackend::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mouse = world.spawn_enemy(
            &mut backend,
            Vec2::new(500.0, 704.0),
            &EnemySettings::default(),
            &mut rng,
        );

        assert_eq!(world.enemy_entities(), vec![mouse]);
        assert!(!world.flashes.contains(mouse));
        assert_eq!(world.animators.get(mouse).and_then(|a| a.current()), Some("run"));
        assert_eq!(backend.bodies_spawned, 1);
    }
}
