use serde::{Deserialize, Serialize};

use crate::types::*;

/// Per-side contact flags, recomputed on every physics step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Arcade physics body. `position` is the body center.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub width: f64,
    pub height: f64,
    pub drag_x: f64,
    pub max_velocity: Vec2,
    pub allow_gravity: bool,
    /// Contact with static geometry.
    pub blocked: Contact,
    /// Contact with another dynamic body.
    pub touching: Contact,
}

impl Body {
    pub fn new(position: Vec2, width: f64, height: f64) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            width,
            height,
            drag_x: 0.0,
            max_velocity: Vec2::new(10_000.0, 10_000.0),
            allow_gravity: true,
            blocked: Contact::default(),
            touching: Contact::default(),
        }
    }

    pub fn with_drag_x(mut self, drag_x: f64) -> Self {
        self.drag_x = drag_x;
        self
    }

    pub fn with_max_velocity(mut self, max_x: f64, max_y: f64) -> Self {
        self.max_velocity = Vec2::new(max_x, max_y);
        self
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered(self.position.x, self.position.y, self.width, self.height)
    }

    pub fn set_velocity(&mut self, vx: f64, vy: f64) {
        self.velocity = Vec2::new(vx, vy);
    }

    pub fn set_velocity_x(&mut self, vx: f64) {
        self.velocity.x = vx;
    }

    pub fn set_velocity_y(&mut self, vy: f64) {
        self.velocity.y = vy;
    }

    /// Teleport without sweeping; contact flags are left for the next step.
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.position = Vec2::new(x, y);
    }
}

/// Gravity plus the static colliders every dynamic body is resolved against.
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsWorld {
    pub gravity_y: f64,
    pub statics: Vec<Rect>,
}

impl PhysicsWorld {
    pub fn new(gravity_y: f64, statics: Vec<Rect>) -> Self {
        Self { gravity_y, statics }
    }

    /// Advance every body by `dt` seconds and resolve it against the statics.
    pub fn step(&self, dt: f64, bodies: &mut [&mut Body]) {
        for body in bodies.iter_mut() {
            self.step_body(dt, body);
        }
    }

    fn step_body(&self, dt: f64, body: &mut Body) {
        body.blocked = Contact::default();
        body.touching = Contact::default();

        if body.allow_gravity {
            body.velocity.y += self.gravity_y * dt;
        }

        // Drag only ever slows the body down; it never flips direction.
        if body.drag_x > 0.0 {
            let drag = body.drag_x * dt;
            if body.velocity.x.abs() <= drag {
                body.velocity.x = 0.0;
            } else {
                body.velocity.x -= body.velocity.x.signum() * drag;
            }
        }

        body.velocity.x = body.velocity.x.clamp(-body.max_velocity.x, body.max_velocity.x);
        body.velocity.y = body.velocity.y.clamp(-body.max_velocity.y, body.max_velocity.y);

        self.move_and_collide(body, body.velocity.x * dt, body.velocity.y * dt);
    }

    /// Axis-separated resolution: X first, then Y.
    fn move_and_collide(&self, body: &mut Body, dx: f64, dy: f64) {
        body.position.x += dx;
        for s in &self.statics {
            if !body.bounds().intersects(s) {
                continue;
            }
            if dx > 0.0 {
                body.position.x = s.x - body.width / 2.0;
                body.velocity.x = 0.0;
                body.blocked.right = true;
            } else if dx < 0.0 {
                body.position.x = s.right() + body.width / 2.0;
                body.velocity.x = 0.0;
                body.blocked.left = true;
            }
        }

        body.position.y += dy;
        for s in &self.statics {
            if !body.bounds().intersects(s) {
                continue;
            }
            if dy > 0.0 {
                body.position.y = s.y - body.height / 2.0;
                body.velocity.y = 0.0;
                body.blocked.down = true;
            } else if dy < 0.0 {
                body.position.y = s.bottom() + body.height / 2.0;
                body.velocity.y = 0.0;
                body.blocked.up = true;
            }
        }
    }

    /// Separate two overlapping dynamic bodies along the axis of least
    /// penetration. Returns whether they were in contact.
    pub fn collide_bodies(&self, a: &mut Body, b: &mut Body) -> bool {
        let (ra, rb) = (a.bounds(), b.bounds());
        if !ra.intersects(&rb) {
            return false;
        }

        let overlap_x = ra.right().min(rb.right()) - ra.x.max(rb.x);
        let overlap_y = ra.bottom().min(rb.bottom()) - ra.y.max(rb.y);

        if overlap_x < overlap_y {
            let (left, right) = if a.position.x <= b.position.x { (a, b) } else { (b, a) };
            left.position.x -= overlap_x / 2.0;
            right.position.x += overlap_x / 2.0;
            if left.velocity.x > right.velocity.x {
                let shared = (left.velocity.x + right.velocity.x) / 2.0;
                left.velocity.x = shared;
                right.velocity.x = shared;
            }
            left.touching.right = true;
            right.touching.left = true;
        } else {
            let (top, bottom) = if a.position.y <= b.position.y { (a, b) } else { (b, a) };
            top.position.y -= overlap_y / 2.0;
            bottom.position.y += overlap_y / 2.0;
            if top.velocity.y > bottom.velocity.y {
                let shared = (top.velocity.y + bottom.velocity.y) / 2.0;
                top.velocity.y = shared;
                bottom.velocity.y = shared;
            }
            top.touching.down = true;
            bottom.touching.up = true;
        }
        true
    }

    /// Region overlap query.
    pub fn overlap(a: &Rect, b: &Rect) -> bool {
        a.intersects(b)
    }
}
