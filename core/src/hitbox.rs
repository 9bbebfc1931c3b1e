use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::*;

/// Damage parameters carried by every attack region.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttackMeta {
    pub base_knockback: f64,
    pub percent_scale: f64,
    pub kind: AttackKind,
    pub facing: Facing,
}

impl AttackMeta {
    pub fn new(kind: AttackKind, facing: Facing) -> Self {
        let (base_knockback, percent_scale) = match kind {
            AttackKind::Neutral => (300.0, 8.5),
            AttackKind::Side => (420.0, 8.5),
            AttackKind::Up => (380.0, 8.5),
            AttackKind::Down => (350.0, 7.0),
        };
        Self {
            base_knockback,
            percent_scale,
            kind,
            facing,
        }
    }

    pub fn knockback(&self, victim_percent: f64) -> f64 {
        self.base_knockback + victim_percent * self.percent_scale
    }

    /// Launch velocity for a victim at `victim_percent`.
    pub fn launch_velocity(&self, victim_percent: f64) -> Vec2 {
        let kb = self.knockback(victim_percent);
        let dir = self.facing.sign();
        match self.kind {
            AttackKind::Up => Vec2::new(100.0 * dir, -kb),
            // Spike
            AttackKind::Down => Vec2::new(80.0 * dir, kb * 0.6),
            AttackKind::Neutral => Vec2::new(kb * 0.6 * dir, -kb * 0.2),
            AttackKind::Side => Vec2::new(kb * dir, -kb * 0.1),
        }
    }
}

/// Hitbox size (w, h) for an attack kind.
pub fn attack_size(kind: AttackKind) -> (f64, f64) {
    match kind {
        AttackKind::Neutral => (60.0, 40.0),
        AttackKind::Side => (70.0, 40.0),
        AttackKind::Up => (60.0, 60.0),
        AttackKind::Down => (50.0, 50.0),
    }
}

/// Region an attack covers, placed relative to the attacker's body center.
pub fn attack_region(kind: AttackKind, facing: Facing, center: Vec2, body_w: f64, body_h: f64) -> Rect {
    let (w, h) = attack_size(kind);
    let (ox, oy) = match kind {
        AttackKind::Neutral => (0.0, 0.0),
        AttackKind::Side => (facing.sign() * (body_w / 2.0 + w / 2.0), 0.0),
        AttackKind::Up => (0.0, -(body_h / 2.0 + h / 2.0)),
        AttackKind::Down => (0.0, body_h / 2.0 + h / 2.0),
    };
    Rect::centered(center.x + ox, center.y + oy, w, h)
}

/// A live attack: where it is, what it does, and whom it has already hit.
#[derive(Clone, Debug, PartialEq)]
pub struct Hitbox {
    pub owner: FighterId,
    pub region: Rect,
    pub meta: AttackMeta,
    pub spawned_at_ms: f64,
    already_hit: BTreeSet<FighterId>,
}

impl Hitbox {
    pub fn new(owner: FighterId, region: Rect, meta: AttackMeta, spawned_at_ms: f64) -> Self {
        Self {
            owner,
            region,
            meta,
            spawned_at_ms,
            already_hit: BTreeSet::new(),
        }
    }

    /// Record `fighter` as hit. Returns false if it was already credited.
    pub fn mark_hit(&mut self, fighter: FighterId) -> bool {
        self.already_hit.insert(fighter)
    }

    pub fn has_hit(&self, fighter: FighterId) -> bool {
        self.already_hit.contains(&fighter)
    }

    pub fn hit_count(&self) -> usize {
        self.already_hit.len()
    }
}
