//! Level session
//!
//! One running level: spawns its entities from a [`LevelLayout`], runs the
//! per-frame update in a fixed order and resolves overlaps.
//!
//! Frame order:
//! 1. Physics step for every body (backend)
//! 2. Hit flash advances
//! 3. Fox update, then the jump if pressed this frame
//! 4. Each mouse update, against a snapshot of the fox
//! 5. Overlaps: coins, then doors (ends the frame), then mice

use glam::Vec2;
use log::{debug, info, warn};
use rand::Rng;

use super::bounds::Aabb;
use super::capability::{AudioCues, Backend, FlashEffect, KinematicBody, SoundCue};
use super::entity::Entity;
use super::event::{CoinCollected, DoorEntered, Events, Jumped, Landed, PlayerHit};
use super::player::{PlayerController, PlayerSnapshot};
use super::score::{Score, ScoreDisplay};
use super::world::World;
use crate::input::FrameInput;
use crate::settings::GameSettings;
use crate::world::{validate_level, LevelError, LevelLayout, SpawnKind};

/// What the enclosing game should do after a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    /// The fox reached a door. `next` is the level to load, if any.
    LevelComplete { next: Option<String> },
}

/// Collaborators that outlive a single level
pub struct FrameContext<'a, Bk: Backend> {
    pub backend: &'a mut Bk,
    pub score: &'a mut Score,
    pub audio: &'a mut dyn AudioCues,
    pub display: &'a mut dyn ScoreDisplay,
}

/// A level in play
pub struct LevelSession<Bk: Backend> {
    name: String,
    next: Option<String>,
    world: World<Bk>,
    events: Events,
    player: Entity,
    frames: u64,
}

impl<Bk: Backend> LevelSession<Bk> {
    /// Validate `layout`, install its tiles and spawn everything on it.
    ///
    /// Nothing reaches the backend if the layout is rejected.
    pub fn start(
        layout: &LevelLayout,
        settings: &GameSettings,
        backend: &mut Bk,
        rng: &mut impl Rng,
    ) -> Result<Self, LevelError> {
        validate_level(layout)?;
        let player_spawn = layout
            .player_spawn()
            .ok_or_else(|| LevelError::MissingPlayerSpawn(layout.name.clone()))?;

        backend.load_level(&layout.tiles, settings.world.gravity);

        let mut world = World::new();
        let player = world.spawn_player(backend, player_spawn.position, &settings.player);
        for spawn in layout.spawns_of(SpawnKind::Enemy) {
            world.spawn_enemy(backend, spawn.position, &settings.enemy, rng);
        }
        for spawn in layout.spawns_of(SpawnKind::Coin) {
            world.spawn_coin(spawn.position, settings.world.coin_size);
        }
        for spawn in layout.spawns_of(SpawnKind::Door) {
            world.spawn_door(spawn.position, settings.world.door_size, spawn.target.clone());
        }

        info!(
            "level '{}' started: {} mice, {} coins, {} doors",
            layout.name,
            world.enemies.count(),
            world.coins.count(),
            world.doors.count()
        );

        Ok(Self {
            name: layout.name.clone(),
            next: layout.next.clone(),
            world,
            events: Events::new(),
            player,
            frames: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Level a door without its own target leads to
    pub fn next(&self) -> Option<&str> {
        self.next.as_deref()
    }

    pub fn world(&self) -> &World<Bk> {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World<Bk> {
        &mut self.world
    }

    /// Events from the most recent tick
    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn player_controller(&self) -> Option<&PlayerController> {
        self.world.players.get(self.player)
    }

    pub fn player_position(&self) -> Option<Vec2> {
        self.world.bodies.get(self.player).map(|body| body.position())
    }

    pub fn coins_remaining(&self) -> usize {
        self.world.coins.count()
    }

    /// Ticks run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame.
    pub fn tick(
        &mut self,
        dt: f32,
        input: &FrameInput,
        ctx: &mut FrameContext<'_, Bk>,
    ) -> FrameOutcome {
        self.events.clear_all();
        self.frames += 1;
        let dt = dt.max(0.0);

        for (_, body) in self.world.bodies.iter_mut() {
            ctx.backend.resolve_collisions(body, dt);
        }
        for (_, flash) in self.world.flashes.iter_mut() {
            flash.advance(dt);
        }

        let Some(snapshot) = self.update_player(dt, input) else {
            warn!("level '{}' has no player, skipping frame", self.name);
            return FrameOutcome::Continue;
        };
        self.update_enemies(dt, &snapshot);

        self.collect_coins(ctx);
        if let Some(outcome) = self.enter_door() {
            return outcome;
        }
        self.resolve_enemy_hits(ctx);
        FrameOutcome::Continue
    }

    /// Release the level's host resources. The session is gone afterwards.
    pub fn teardown(self, backend: &mut Bk) {
        backend.unload_level();
        info!("level '{}' torn down after {} frames", self.name, self.frames);
    }

    fn update_player(&mut self, dt: f32, input: &FrameInput) -> Option<PlayerSnapshot> {
        let world = &mut self.world;
        let controller = world.players.get_mut(self.player)?;
        let body = world.bodies.get_mut(self.player)?;
        let animator = world.animators.get_mut(self.player)?;

        controller.update(dt, input, body, animator);
        if controller.just_landed() {
            self.events.landed.send(Landed { position: body.position() });
        }

        // After the update, so the jump animation is not replaced this frame
        if input.jump_pressed {
            if let Some(kind) = controller.jump(body, animator) {
                self.events.jumped.send(Jumped { kind, position: body.position() });
            }
        }

        Some(controller.snapshot(&*body))
    }

    fn update_enemies(&mut self, dt: f32, player: &PlayerSnapshot) {
        for entity in self.world.enemy_entities() {
            let world = &mut self.world;
            if let (Some(controller), Some(body), Some(animator)) = (
                world.enemies.get_mut(entity),
                world.bodies.get_mut(entity),
                world.animators.get_mut(entity),
            ) {
                controller.update(dt, player, body, animator);
            }
        }
    }

    /// Static sensors (coins or doors) the fox currently overlaps
    fn touched_sensors(&self, candidates: Vec<Entity>) -> Vec<(Entity, Aabb)> {
        let Some(player_body) = self.world.bodies.get(self.player) else {
            return Vec::new();
        };
        candidates
            .into_iter()
            .filter_map(|entity| {
                let sensor = self.world.sensors.get(entity)?;
                player_body.overlaps(sensor).then_some((entity, *sensor))
            })
            .collect()
    }

    fn collect_coins(&mut self, ctx: &mut FrameContext<'_, Bk>) {
        let touched = self.touched_sensors(self.world.coin_entities());
        for (coin, sensor) in touched {
            // The coin is gone the moment it is removed; a second overlap finds nothing
            if self.world.coins.remove(coin).is_none() {
                continue;
            }
            self.world.despawn_immediate(coin);

            let score = ctx.score.collect_coin();
            ctx.display.set_value(score);
            ctx.audio.play_cue(SoundCue::Coin);
            self.events
                .coin_collected
                .send(CoinCollected { coin, position: sensor.center(), score });
            debug!("coin collected, score {}", score);
        }
    }

    fn enter_door(&mut self) -> Option<FrameOutcome> {
        let (door, _) = self.touched_sensors(self.world.door_entities()).into_iter().next()?;
        let target = self
            .world
            .doors
            .get(door)
            .and_then(|d| d.target.clone())
            .or_else(|| self.next.clone());

        info!("level '{}' complete, next: {:?}", self.name, target);
        self.events.door_entered.send(DoorEntered { door, target: target.clone() });
        Some(FrameOutcome::LevelComplete { next: target })
    }

    fn resolve_enemy_hits(&mut self, ctx: &mut FrameContext<'_, Bk>) {
        let Some(player_box) = self.world.bodies.get(self.player).map(|body| body.bounds()) else {
            return;
        };
        let attackers: Vec<Entity> = self
            .world
            .enemy_entities()
            .into_iter()
            .filter(|enemy| {
                self.world.bodies.get(*enemy).is_some_and(|body| body.overlaps(&player_box))
            })
            .collect();

        for enemy in attackers {
            let world = &mut self.world;
            let (Some(controller), Some(flash)) =
                (world.players.get(self.player), world.flashes.get_mut(self.player))
            else {
                return;
            };
            // One hit per flash; the flash is the invulnerability window
            if !controller.flash(flash) {
                continue;
            }

            ctx.audio.play_cue(SoundCue::Hit);
            let score = ctx.score.take_hit();
            ctx.display.set_value(score);
            self.events.player_hit.send(PlayerHit { enemy, score });
            debug!("fox hit by mouse {:?}, score {}", enemy, score);
        }
    }
}
