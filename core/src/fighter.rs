use log::debug;

use crate::constants::*;
use crate::hitbox::{attack_region, AttackMeta, Hitbox};
use crate::hud::HudLabel;
use crate::input::{Controls, Keyboard};
use crate::physics::Body;
use crate::types::*;

/// Everything needed to put a fighter on stage.
#[derive(Clone, Debug, PartialEq)]
pub struct FighterConfig {
    pub display_name: String,
    pub color: Color,
    pub spawn: Vec2,
    pub controls: Controls,
}

#[derive(Clone, Debug)]
pub struct Fighter {
    pub id: FighterId,
    pub display_name: String,
    pub color: Color,
    pub controls: Controls,
    pub body: Body,

    pub percent: f64,
    pub stocks: i32,

    facing: Facing,
    jumps_used: u32,
    last_attack_at_ms: f64,
    hitstun_until_ms: f64,

    hud: Option<HudLabel>,
}

impl Fighter {
    pub fn new(id: FighterId, config: FighterConfig) -> Self {
        let body = Body::new(config.spawn, FIGHTER_WIDTH, FIGHTER_HEIGHT)
            .with_drag_x(FIGHTER_DRAG_X)
            .with_max_velocity(FIGHTER_MAX_VX, FIGHTER_MAX_VY);
        Self {
            id,
            display_name: config.display_name,
            color: config.color,
            controls: config.controls,
            body,
            percent: 0.0,
            stocks: STOCKS_START,
            facing: Facing::Right,
            jumps_used: 0,
            last_attack_at_ms: f64::NEG_INFINITY,
            hitstun_until_ms: 0.0,
            hud: None,
        }
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn jumps_used(&self) -> u32 {
        self.jumps_used
    }

    pub fn hitstun_until_ms(&self) -> f64 {
        self.hitstun_until_ms
    }

    pub fn last_attack_at_ms(&self) -> f64 {
        self.last_attack_at_ms
    }

    pub fn in_hitstun(&self, now_ms: f64) -> bool {
        now_ms < self.hitstun_until_ms
    }

    pub fn hud(&self) -> Option<&HudLabel> {
        self.hud.as_ref()
    }

    pub fn set_hud(&mut self, label: HudLabel) {
        self.hud = Some(label);
        self.refresh_hud();
    }

    /// No-op until a label is attached.
    pub fn refresh_hud(&mut self) {
        if let Some(hud) = self.hud.as_mut() {
            hud.set(&self.display_name, self.stocks, self.percent);
        }
    }

    /// Per-frame input handling. Returns the hitbox of an attack started this
    /// frame; the caller owns its registration and expiry.
    pub fn update(&mut self, now_ms: f64, _delta_ms: f64, keyboard: &mut Keyboard) -> Option<Hitbox> {
        let in_hitstun = self.in_hitstun(now_ms);

        let on_ground = self.body.blocked.down;
        if on_ground {
            self.jumps_used = 0;
        }

        let mut attack = None;
        if !in_hitstun {
            self.handle_movement(keyboard);
            self.handle_jump(keyboard, on_ground);
            attack = self.handle_attack(now_ms, keyboard);
        }

        // Facing persists through zero-velocity frames.
        if let Some(facing) = Facing::from_velocity(self.body.velocity.x) {
            self.facing = facing;
        }

        attack
    }

    fn handle_movement(&mut self, keyboard: &Keyboard) {
        let left_held = keyboard.is_down(self.controls.left);
        let right_held = keyboard.is_down(self.controls.right);

        // Neither or both held: drag handles slow-down.
        if left_held && !right_held {
            self.body.set_velocity_x(-MOVE_SPEED);
        } else if right_held && !left_held {
            self.body.set_velocity_x(MOVE_SPEED);
        }

        if !self.body.blocked.down
            && keyboard.is_down(self.controls.down)
            && self.body.velocity.y > 0.0
        {
            let vy = (self.body.velocity.y + FAST_FALL_STEP).min(FAST_FALL_MAX);
            self.body.set_velocity_y(vy);
        }
    }

    fn handle_jump(&mut self, keyboard: &mut Keyboard, on_ground: bool) {
        if !keyboard.just_down(self.controls.up) {
            return;
        }
        if on_ground || self.jumps_used < MAX_JUMPS - 1 {
            self.body.set_velocity_y(JUMP_VELOCITY);
            if !on_ground {
                self.jumps_used += 1;
            }
        }
    }

    fn handle_attack(&mut self, now_ms: f64, keyboard: &mut Keyboard) -> Option<Hitbox> {
        if !keyboard.just_down(self.controls.attack) {
            return None;
        }
        if now_ms - self.last_attack_at_ms < ATTACK_COOLDOWN_MS {
            return None;
        }

        let kind = self.resolve_attack_kind(keyboard);
        self.last_attack_at_ms = now_ms;

        let region = attack_region(
            kind,
            self.facing,
            self.body.position,
            self.body.width,
            self.body.height,
        );
        debug!(
            "{} starts {:?} attack facing {:?} at ({:.1}, {:.1})",
            self.display_name, kind, self.facing, region.x, region.y
        );
        Some(Hitbox::new(
            self.id,
            region,
            AttackMeta::new(kind, self.facing),
            now_ms,
        ))
    }

    fn resolve_attack_kind(&self, keyboard: &Keyboard) -> AttackKind {
        if keyboard.is_down(self.controls.up) {
            AttackKind::Up
        } else if keyboard.is_down(self.controls.down) {
            AttackKind::Down
        } else if keyboard.is_down(self.controls.left) || keyboard.is_down(self.controls.right) {
            AttackKind::Side
        } else {
            AttackKind::Neutral
        }
    }

    /// Apply `hitbox` to this fighter at most once. Returns the knockback
    /// applied, or None if this hitbox already credited this fighter.
    pub fn try_apply_hit_from(&mut self, hitbox: &mut Hitbox, now_ms: f64) -> Option<f64> {
        if !hitbox.mark_hit(self.id) {
            return None;
        }

        let knockback = hitbox.meta.knockback(self.percent);
        let launch = hitbox.meta.launch_velocity(self.percent);

        self.percent += HIT_DAMAGE;
        self.body.set_velocity(launch.x, launch.y);
        self.hitstun_until_ms = now_ms + ATTACK_HITSTUN_MS;
        self.refresh_hud();

        debug!(
            "{} hit by {:?} from fighter {}: knockback {:.1}, now {}%",
            self.display_name, hitbox.meta.kind, hitbox.owner, knockback, self.percent
        );
        Some(knockback)
    }

    pub fn out_of_bounds_reset(&mut self, spawn_x: f64, spawn_y: f64) {
        self.stocks -= 1;
        self.percent = 0.0;
        self.body.set_position(spawn_x, spawn_y);
        self.body.set_velocity(0.0, 0.0);
        self.jumps_used = 0;
        self.hitstun_until_ms = 0.0;
        self.refresh_hud();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;

    fn fighter(id: FighterId, x: f64, controls: Controls) -> Fighter {
        Fighter::new(
            id,
            FighterConfig {
                display_name: format!("F{id}"),
                color: 0xffffff,
                spawn: Vec2::new(x, 300.0),
                controls,
            },
        )
    }

    fn grounded(mut f: Fighter) -> Fighter {
        f.body.blocked.down = true;
        f
    }

    fn side_hitbox(owner: FighterId, facing: Facing, at: Vec2) -> Hitbox {
        let region = attack_region(AttackKind::Side, facing, at, FIGHTER_WIDTH, FIGHTER_HEIGHT);
        Hitbox::new(owner, region, AttackMeta::new(AttackKind::Side, facing), 0.0)
    }

    #[test]
    fn new_fighter_starts_fresh() {
        let f = fighter(0, 448.0, Controls::PLAYER_ONE);
        assert_eq!(f.percent, 0.0);
        assert_eq!(f.stocks, STOCKS_START);
        assert_eq!(f.facing(), Facing::Right);
        assert_eq!(f.jumps_used(), 0);
        assert_eq!(f.body.position, Vec2::new(448.0, 300.0));
        assert_eq!(f.body.drag_x, 1000.0);
        assert_eq!(f.body.max_velocity, Vec2::new(800.0, 1800.0));
        assert!(f.hud().is_none());
    }

    #[test]
    fn holding_one_direction_sets_run_speed() {
        let mut kb = Keyboard::new();
        let mut f = grounded(fighter(0, 100.0, Controls::PLAYER_ONE));
        kb.press(KeyCode::A);
        f.update(0.0, 16.0, &mut kb);
        assert_eq!(f.body.velocity.x, -MOVE_SPEED);
        assert_eq!(f.facing(), Facing::Left);

        kb.release(KeyCode::A);
        kb.press(KeyCode::D);
        f.update(16.0, 16.0, &mut kb);
        assert_eq!(f.body.velocity.x, MOVE_SPEED);
        assert_eq!(f.facing(), Facing::Right);
    }

    #[test]
    fn both_directions_leave_velocity_alone() {
        let mut kb = Keyboard::new();
        let mut f = grounded(fighter(0, 100.0, Controls::PLAYER_ONE));
        f.body.set_velocity_x(-120.0);
        kb.press(KeyCode::A);
        kb.press(KeyCode::D);
        f.update(0.0, 16.0, &mut kb);
        assert_eq!(f.body.velocity.x, -120.0);
        assert_eq!(f.facing(), Facing::Left);
    }

    #[test]
    fn facing_persists_at_rest() {
        let mut kb = Keyboard::new();
        let mut f = grounded(fighter(0, 100.0, Controls::PLAYER_ONE));
        f.body.set_velocity_x(-10.0);
        f.update(0.0, 16.0, &mut kb);
        assert_eq!(f.facing(), Facing::Left);
        f.body.set_velocity_x(0.0);
        f.update(16.0, 16.0, &mut kb);
        assert_eq!(f.facing(), Facing::Left);
    }

    #[test]
    fn fast_fall_only_while_falling_in_air() {
        let mut kb = Keyboard::new();
        kb.press(KeyCode::S);

        let mut f = fighter(0, 100.0, Controls::PLAYER_ONE);
        f.body.set_velocity_y(100.0);
        f.update(0.0, 16.0, &mut kb);
        assert_eq!(f.body.velocity.y, 120.0);

        f.body.set_velocity_y(1495.0);
        f.update(16.0, 16.0, &mut kb);
        assert_eq!(f.body.velocity.y, FAST_FALL_MAX);

        // Rising: untouched.
        f.body.set_velocity_y(-300.0);
        f.update(32.0, 16.0, &mut kb);
        assert_eq!(f.body.velocity.y, -300.0);

        // Grounded: untouched.
        let mut g = grounded(fighter(1, 100.0, Controls::PLAYER_ONE));
        g.body.set_velocity_y(50.0);
        g.update(0.0, 16.0, &mut kb);
        assert_eq!(g.body.velocity.y, 50.0);
    }

    #[test]
    fn ground_jump_does_not_spend_aerial_budget() {
        let mut kb = Keyboard::new();
        let mut f = grounded(fighter(0, 100.0, Controls::PLAYER_ONE));
        kb.press(KeyCode::W);
        f.update(0.0, 16.0, &mut kb);
        assert_eq!(f.body.velocity.y, JUMP_VELOCITY);
        assert_eq!(f.jumps_used(), 0);
    }

    #[test]
    fn aerial_jump_budget_is_max_jumps_minus_one() {
        let mut kb = Keyboard::new();
        let mut f = fighter(0, 100.0, Controls::PLAYER_ONE);
        let mut now = 0.0;
        let mut jumps = 0;
        for _ in 0..5 {
            f.body.set_velocity_y(200.0);
            kb.press(KeyCode::W);
            f.update(now, 16.0, &mut kb);
            if f.body.velocity.y == JUMP_VELOCITY {
                jumps += 1;
            }
            kb.release(KeyCode::W);
            now += 16.0;
        }
        assert_eq!(jumps, MAX_JUMPS - 1);
        assert_eq!(f.jumps_used(), MAX_JUMPS - 1);

        // Landing restores the budget.
        f.body.blocked.down = true;
        f.update(now, 16.0, &mut kb);
        assert_eq!(f.jumps_used(), 0);
    }

    #[test]
    fn held_jump_key_is_not_a_new_edge() {
        let mut kb = Keyboard::new();
        let mut f = fighter(0, 100.0, Controls::PLAYER_ONE);
        kb.press(KeyCode::W);
        f.update(0.0, 16.0, &mut kb);
        assert_eq!(f.jumps_used(), 1);
        f.body.set_velocity_y(100.0);
        f.jumps_used = 0;
        f.update(16.0, 16.0, &mut kb);
        assert_eq!(f.body.velocity.y, 100.0);
    }

    #[test]
    fn attack_kind_follows_held_direction() {
        let cases = [
            (vec![KeyCode::W, KeyCode::S, KeyCode::D], AttackKind::Up),
            (vec![KeyCode::S, KeyCode::A], AttackKind::Down),
            (vec![KeyCode::A], AttackKind::Side),
            (vec![KeyCode::D], AttackKind::Side),
            (vec![], AttackKind::Neutral),
        ];
        for (held, expected) in cases {
            let mut kb = Keyboard::new();
            let mut f = grounded(fighter(0, 100.0, Controls::PLAYER_ONE));
            for key in &held {
                kb.press(*key);
            }
            kb.press(KeyCode::J);
            let hb = f.update(1000.0, 16.0, &mut kb).expect("attack spawned");
            assert_eq!(hb.meta.kind, expected, "held {held:?}");
            assert_eq!(hb.owner, 0);
            assert_eq!(hb.spawned_at_ms, 1000.0);
            assert_eq!(f.last_attack_at_ms(), 1000.0);
        }
    }

    #[test]
    fn attack_uses_facing_from_before_this_frame() {
        let mut kb = Keyboard::new();
        let mut f = grounded(fighter(0, 100.0, Controls::PLAYER_ONE));
        kb.press(KeyCode::A);
        kb.press(KeyCode::J);
        let hb = f.update(0.0, 16.0, &mut kb).expect("attack spawned");
        assert_eq!(hb.meta.facing, Facing::Right);
        assert_eq!(f.facing(), Facing::Left);
    }

    #[test]
    fn attacks_inside_cooldown_are_suppressed() {
        let mut kb = Keyboard::new();
        let mut f = grounded(fighter(0, 100.0, Controls::PLAYER_ONE));
        kb.press(KeyCode::J);
        assert!(f.update(0.0, 16.0, &mut kb).is_some());
        kb.release(KeyCode::J);
        kb.press(KeyCode::J);
        assert!(f.update(299.0, 16.0, &mut kb).is_none());
        kb.release(KeyCode::J);
        kb.press(KeyCode::J);
        assert!(f.update(300.0, 16.0, &mut kb).is_some());
    }

    #[test]
    fn side_hit_scenario() {
        let mut victim = fighter(1, 200.0, Controls::PLAYER_TWO);
        victim.set_hud(HudLabel::at(1060.0, 16.0));
        let mut hb = side_hitbox(0, Facing::Right, Vec2::new(150.0, 300.0));

        let kb = victim.try_apply_hit_from(&mut hb, 1000.0);
        assert_eq!(kb, Some(420.0));
        assert_eq!(victim.body.velocity, Vec2::new(420.0, -42.0));
        assert_eq!(victim.percent, 8.0);
        assert!(victim.in_hitstun(1000.0));
        assert!(victim.in_hitstun(1399.0));
        assert!(!victim.in_hitstun(1400.0));
        assert_eq!(victim.hud().unwrap().text, "F1  3★   8%");
    }

    #[test]
    fn same_hitbox_never_hits_twice() {
        let mut victim = fighter(1, 200.0, Controls::PLAYER_TWO);
        let mut hb = side_hitbox(0, Facing::Right, Vec2::new(150.0, 300.0));
        assert!(victim.try_apply_hit_from(&mut hb, 0.0).is_some());
        victim.body.set_velocity(0.0, 0.0);
        for frame in 1..10 {
            assert!(victim.try_apply_hit_from(&mut hb, frame as f64 * 16.0).is_none());
        }
        assert_eq!(victim.percent, 8.0);
        assert_eq!(victim.body.velocity, Vec2::ZERO);

        let mut fresh = side_hitbox(0, Facing::Left, Vec2::new(150.0, 300.0));
        assert_eq!(victim.try_apply_hit_from(&mut fresh, 200.0), Some(420.0 + 8.0 * 8.5));
        assert_eq!(victim.percent, 16.0);
        assert!(victim.body.velocity.x < 0.0);
    }

    #[test]
    fn hitstun_blocks_actions_but_not_ground_reset() {
        let mut kb = Keyboard::new();
        let mut f = fighter(0, 100.0, Controls::PLAYER_ONE);
        let mut hb = side_hitbox(1, Facing::Left, Vec2::new(150.0, 300.0));
        f.try_apply_hit_from(&mut hb, 0.0);
        f.jumps_used = 1;
        f.body.blocked.down = true;

        kb.press(KeyCode::D);
        kb.press(KeyCode::J);
        kb.press(KeyCode::W);
        assert!(f.update(100.0, 16.0, &mut kb).is_none());
        assert_eq!(f.body.velocity.x, -420.0);
        assert_eq!(f.jumps_used(), 0);
        assert_eq!(f.facing(), Facing::Left);

        // Edges pressed during hitstun are still pending afterwards.
        assert!(f.update(400.0, 16.0, &mut kb).is_some());
        assert_eq!(f.body.velocity.y, JUMP_VELOCITY);
    }

    #[test]
    fn out_of_bounds_reset_restores_spawn_state() {
        let mut f = fighter(0, 100.0, Controls::PLAYER_ONE);
        f.set_hud(HudLabel::at(20.0, 16.0));
        f.percent = 87.5;
        f.jumps_used = 1;
        f.hitstun_until_ms = 5000.0;
        f.body.set_position(1581.0, 100.0);
        f.body.set_velocity(600.0, -300.0);

        f.out_of_bounds_reset(448.0, 144.0);
        assert_eq!(f.stocks, STOCKS_START - 1);
        assert_eq!(f.percent, 0.0);
        assert_eq!(f.body.position, Vec2::new(448.0, 144.0));
        assert_eq!(f.body.velocity, Vec2::ZERO);
        assert_eq!(f.jumps_used(), 0);
        assert!(!f.in_hitstun(0.0));
        assert_eq!(f.hud().unwrap().text, "F0  2★   0%");
    }

    #[test]
    fn each_reset_costs_exactly_one_stock() {
        let mut f = fighter(0, 100.0, Controls::PLAYER_ONE);
        for expected in (-3..STOCKS_START).rev() {
            f.out_of_bounds_reset(0.0, 0.0);
            assert_eq!(f.stocks, expected);
        }
    }

    #[test]
    fn hud_refresh_without_label_is_silent() {
        let mut f = fighter(0, 100.0, Controls::PLAYER_ONE);
        f.percent = 42.0;
        f.refresh_hud();
        assert!(f.hud().is_none());
        f.set_hud(HudLabel::at(20.0, 16.0));
        assert_eq!(f.hud().unwrap().text, "F0  3★   42%");
    }
}
