use std::collections::BTreeMap;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, GameConfig};
use crate::constants::*;
use crate::fighter::{Fighter, FighterConfig};
use crate::hitbox::Hitbox;
use crate::hud::HudLabel;
use crate::input::{Controls, Keyboard};
use crate::physics::PhysicsWorld;
use crate::stage::Stage;
use crate::timer::Timer;
use crate::types::*;

/// Deferred work queued on the scene timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Deferred {
    HitboxFinished(HitboxId),
}

/// What happened during a frame, in the order it happened.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SceneEvent {
    AttackStarted {
        fighter: FighterId,
        hitbox: HitboxId,
        kind: AttackKind,
    },
    Hit {
        attacker: FighterId,
        victim: FighterId,
        kind: AttackKind,
        knockback: f64,
        percent: f64,
    },
    KnockedOut {
        fighter: FighterId,
        stocks: i32,
    },
    HitboxFinished {
        hitbox: HitboxId,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FighterSnapshot {
    pub id: FighterId,
    pub name: String,
    pub position: Vec2,
    pub velocity: Vec2,
    pub percent: f64,
    pub stocks: i32,
    pub facing: Facing,
    pub jumps_used: u32,
    pub grounded: bool,
    pub hud: Option<HudLabel>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub frame: u64,
    pub now_ms: f64,
    pub fighters: Vec<FighterSnapshot>,
    pub live_hitboxes: usize,
}

/// The match controller: stage, two fighters, and the attacks in flight.
pub struct Scene {
    config: GameConfig,
    stage: Stage,
    world: PhysicsWorld,
    fighters: [Fighter; 2],
    /// Hitboxes eligible for overlap tests.
    hitboxes: BTreeMap<HitboxId, Hitbox>,
    /// Hitboxes spawned this frame; tracked from the next frame on.
    pending: Vec<(HitboxId, Hitbox)>,
    timer: Timer<Deferred>,
    next_hitbox_id: HitboxId,
    now_ms: f64,
    frame: u64,
}

impl Scene {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let stage = Stage::new(config.width, config.height);
        let world = PhysicsWorld::new(config.gravity_y, stage.colliders());

        let mut comet = Fighter::new(
            0,
            FighterConfig {
                display_name: "Comet".to_string(),
                color: 0x5dade2,
                spawn: stage.spawn_points[0],
                controls: Controls::PLAYER_ONE,
            },
        );
        let mut blaze = Fighter::new(
            1,
            FighterConfig {
                display_name: "Blaze".to_string(),
                color: 0xec7063,
                spawn: stage.spawn_points[1],
                controls: Controls::PLAYER_TWO,
            },
        );
        comet.set_hud(HudLabel::at(HUD_MARGIN_X, HUD_Y));
        blaze.set_hud(HudLabel::at(config.width - HUD_RIGHT_INSET, HUD_Y));

        info!(
            "stage {}x{} with {} platforms, gravity {}",
            config.width,
            config.height,
            stage.platforms.len(),
            config.gravity_y
        );

        Ok(Scene {
            config,
            stage,
            world,
            fighters: [comet, blaze],
            hitboxes: BTreeMap::new(),
            pending: Vec::new(),
            timer: Timer::new(),
            next_hitbox_id: 0,
            now_ms: 0.0,
            frame: 0,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn fighters(&self) -> &[Fighter; 2] {
        &self.fighters
    }

    pub fn fighter(&self, id: FighterId) -> &Fighter {
        &self.fighters[id]
    }

    pub fn fighter_mut(&mut self, id: FighterId) -> &mut Fighter {
        &mut self.fighters[id]
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Hitboxes currently eligible for overlap tests.
    pub fn active_hitboxes(&self) -> impl Iterator<Item = (&HitboxId, &Hitbox)> {
        self.hitboxes.iter()
    }

    /// Spawned or tracked hitboxes that have not finished yet.
    pub fn live_hitbox_count(&self) -> usize {
        self.hitboxes.len() + self.pending.len()
    }

    /// Register a freshly spawned hitbox and schedule its removal.
    pub fn spawn_hitbox(&mut self, hitbox: Hitbox) -> HitboxId {
        let id = self.next_hitbox_id;
        self.next_hitbox_id += 1;
        self.timer
            .delayed_call(self.now_ms, HITBOX_LIFESPAN_MS, Deferred::HitboxFinished(id));
        self.pending.push((id, hitbox));
        id
    }

    /// Advance the clock by `delta_ms` and run one frame.
    ///
    /// Frame order:
    ///  1. Fire due timers (expired hitboxes are dropped)
    ///  2. Physics step (gravity, drag, platforms, fighter pair collider)
    ///  3. Start tracking hitboxes spawned last frame
    ///  4. Fighter updates (may spawn hitboxes)
    ///  5. Hitbox × fighter overlap and hit application
    ///  6. Blast-zone check and respawn
    pub fn update(&mut self, delta_ms: f64, keyboard: &mut Keyboard) -> Vec<SceneEvent> {
        self.now_ms += delta_ms;
        self.frame += 1;
        let now = self.now_ms;
        let mut events = Vec::new();

        // 1. Timers
        for deferred in self.timer.drain_due(now) {
            match deferred {
                Deferred::HitboxFinished(id) => {
                    self.hitboxes.remove(&id);
                    self.pending.retain(|(pending_id, _)| *pending_id != id);
                    events.push(SceneEvent::HitboxFinished { hitbox: id });
                }
            }
        }

        // 2. Physics
        let [p1, p2] = &mut self.fighters;
        self.world.step(delta_ms / 1000.0, &mut [&mut p1.body, &mut p2.body]);
        self.world.collide_bodies(&mut p1.body, &mut p2.body);

        // 3. Hitboxes from last frame become hittable
        for (id, hitbox) in self.pending.drain(..) {
            self.hitboxes.insert(id, hitbox);
        }

        // 4. Fighters
        for i in 0..self.fighters.len() {
            if let Some(hitbox) = self.fighters[i].update(now, delta_ms, keyboard) {
                let kind = hitbox.meta.kind;
                let id = self.spawn_hitbox(hitbox);
                events.push(SceneEvent::AttackStarted {
                    fighter: i,
                    hitbox: id,
                    kind,
                });
            }
        }

        // 5. Overlaps
        for hitbox in self.hitboxes.values_mut() {
            for fighter in self.fighters.iter_mut() {
                if !PhysicsWorld::overlap(&hitbox.region, &fighter.body.bounds()) {
                    continue;
                }
                if let Some(knockback) = fighter.try_apply_hit_from(hitbox, now) {
                    events.push(SceneEvent::Hit {
                        attacker: hitbox.owner,
                        victim: fighter.id,
                        kind: hitbox.meta.kind,
                        knockback,
                        percent: fighter.percent,
                    });
                }
            }
        }

        // 6. Blast zone
        for fighter in self.fighters.iter_mut() {
            if self.stage.in_bounds(fighter.body.position) {
                continue;
            }
            let spawn = self.stage.spawn_points[fighter.id];
            debug!(
                "{} left the blast zone at ({:.1}, {:.1})",
                fighter.display_name, fighter.body.position.x, fighter.body.position.y
            );
            fighter.out_of_bounds_reset(spawn.x, spawn.y);
            info!("{} KO'd, {} stocks left", fighter.display_name, fighter.stocks);
            events.push(SceneEvent::KnockedOut {
                fighter: fighter.id,
                stocks: fighter.stocks,
            });
        }

        events
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            frame: self.frame,
            now_ms: self.now_ms,
            fighters: self
                .fighters
                .iter()
                .map(|f| FighterSnapshot {
                    id: f.id,
                    name: f.display_name.clone(),
                    position: f.body.position,
                    velocity: f.body.velocity,
                    percent: f.percent,
                    stocks: f.stocks,
                    facing: f.facing(),
                    jumps_used: f.jumps_used(),
                    grounded: f.body.blocked.down,
                    hud: f.hud().cloned(),
                })
                .collect(),
            live_hitboxes: self.live_hitbox_count(),
        }
    }
}
