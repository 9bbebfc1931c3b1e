// All velocities are in units/s, accelerations in units/s², times in ms.

// Canvas
pub const GAME_WIDTH: f64 = 1280.0;
pub const GAME_HEIGHT: f64 = 720.0;
pub const BACKGROUND_COLOR: &str = "#0b1020";

// Physics
pub const GRAVITY_Y: f64 = 2200.0;

// Fighter body
pub const FIGHTER_WIDTH: f64 = 44.0;
pub const FIGHTER_HEIGHT: f64 = 60.0;
pub const FIGHTER_DRAG_X: f64 = 1000.0;
pub const FIGHTER_MAX_VX: f64 = 800.0;
pub const FIGHTER_MAX_VY: f64 = 1800.0;

// Movement
pub const MOVE_SPEED: f64 = 500.0;
pub const JUMP_VELOCITY: f64 = -800.0;
pub const MAX_JUMPS: u32 = 2;
pub const FAST_FALL_STEP: f64 = 20.0;
pub const FAST_FALL_MAX: f64 = 1500.0;

// Combat
pub const ATTACK_COOLDOWN_MS: f64 = 300.0;
pub const ATTACK_HITSTUN_MS: f64 = 400.0;
pub const HITBOX_LIFESPAN_MS: f64 = 90.0;
pub const HIT_DAMAGE: f64 = 8.0;

// Match rules
pub const STOCKS_START: i32 = 3;
pub const BLAST_PADDING: f64 = 300.0;

// HUD
pub const HUD_MAX_PERCENT: f64 = 999.0;
pub const HUD_RED_FULL_PERCENT: f64 = 300.0;
pub const HUD_GREEN_ZERO_PERCENT: f64 = 600.0;
pub const HUD_BLUE: u8 = 64;
pub const HUD_MARGIN_X: f64 = 20.0;
pub const HUD_RIGHT_INSET: f64 = 220.0;
pub const HUD_Y: f64 = 16.0;

// Fixed timestep used by replays and the idle runner
pub const FRAME_MS: f64 = 1000.0 / 60.0;
