// Simulation timing
pub const TICK_RATE_HZ: f64 = 60.0; // one physics step per rendered frame

// Race rules
pub const LEVELS: u32 = 10;
pub const LEVEL_SPEEDUP: f32 = 0.2; // added to the computer car's speed per level

// Car physics constants (pixels per tick, degrees per tick)
pub const ACCELERATION: f32 = 0.1;
pub const DECAY_DIVISOR: f32 = 0.2; // friction is acceleration / 0.2 = 5x faster
pub const BOUNCE_BIAS: f32 = 2.0;

pub const PLAYER_MAX_VELOCITY: f32 = 4.0;
pub const PLAYER_ROTATION_STEP: f32 = 4.0;
pub const PLAYER_START: (f32, f32) = (150.0, 200.0);

pub const COMPUTER_MAX_VELOCITY: f32 = 3.0;
pub const COMPUTER_ROTATION_STEP: f32 = 4.0;
pub const COMPUTER_START: (f32, f32) = (180.0, 200.0);

// Track geometry
pub const TRACK_SIZE: u32 = 810;
pub const BORDER_THICKNESS: u32 = 10;
pub const FINISH_POSITION: (f32, f32) = (130.0, 250.0);
pub const FINISH_SIZE: (u32, u32) = (90, 20);
pub const CAR_SIZE: (u32, u32) = (20, 38);

// Silhouette threshold, a pixel is solid when alpha > 127
pub const ALPHA_THRESHOLD: u8 = 127;

pub const WAYPOINTS: [(i32, i32); 28] = [
    (179, 126),
    (122, 75),
    (56, 130),
    (66, 462),
    (308, 720),
    (357, 724),
    (400, 679),
    (432, 507),
    (502, 487),
    (587, 521),
    (592, 590),
    (598, 675),
    (636, 723),
    (708, 716),
    (739, 635),
    (739, 412),
    (694, 370),
    (451, 365),
    (398, 322),
    (432, 264),
    (691, 262),
    (742, 210),
    (714, 92),
    (324, 77),
    (282, 185),
    (280, 343),
    (180, 351),
    (184, 239),
];
