use glam::Vec3;

// Shared tuning constants for the fish school and the pointer target resolver.
// Times are milliseconds, distances are world units.

// Agent defaults: each missing tunable is drawn as `base + r * span`, r in [0, 1)
pub const SPEED_BASE: f32 = 0.1;
pub const SPEED_SPAN: f32 = 0.5;
pub const INTERVAL_BASE_MS: f32 = 2000.0;
pub const INTERVAL_SPAN_MS: f32 = 1000.0;
pub const FOLLOW_DISTANCE_BASE: f32 = 3.0;
pub const FOLLOW_DISTANCE_SPAN: f32 = 5.0;
pub const ROTATION_SPEED_BASE: f32 = 0.1;
pub const ROTATION_SPEED_SPAN: f32 = 0.05;
pub const DEFAULT_MAX_DISTANCE: f32 = 20.0; // half-width of the wrapping world cube

// Idle cruise profile: |v| = speed * IDLE_GAIN * (1 - sqrt(phase))^2 + IDLE_FLOOR
pub const IDLE_GAIN: f32 = 0.01;
pub const IDLE_FLOOR: f32 = 0.0001;
pub const BURST_RETRIGGER_PHASE: f32 = 0.8; // fraction of the interval

// Follow regime
pub const FOLLOW_DISTANCE_EXPONENT: f32 = 1.2;
pub const FOLLOW_GAIN: f32 = 0.0005;
pub const LOOP_RATE_BASE: f32 = 0.0002;
pub const LOOP_RATE_JITTER: f32 = 0.0001;
pub const LOOP_RATE_OFFSET: f32 = 0.00001;
pub const LOOP_RATE_OFFSET_JITTER: f32 = 0.0002;
pub const LOOP_INITIAL_RATE_BASE: f32 = 0.0001;
pub const LOOP_INITIAL_RATE_SPAN: f32 = 0.001;

// Agent frame: forward is local +X
pub const AGENT_FORWARD: Vec3 = Vec3::X;
pub const WORLD_UP: Vec3 = Vec3::Y;
pub const FALLBACK_SIDE: Vec3 = Vec3::Z; // used when forward is parallel to WORLD_UP

// Resolver defaults
pub const CAMERA_BLEND: f32 = 0.05; // slerp factor per tick
pub const CAMERA_MAX_ROTATION: f32 = std::f32::consts::PI / 8.0;
pub const COOL_DOWN_MS: f32 = 5000.0;

// Camera
pub const CAMERA_EYE: Vec3 = Vec3::new(0.0, 0.0, 5.0);
pub const CAMERA_FOVY_DEGREES: f32 = 60.0;
pub const CAMERA_ZNEAR: f32 = 0.001;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Intersection plane: camera-facing side of a PLANE_EXTENT x PLANE_EXTENT x PLANE_THICKNESS slab
pub const PLANE_DEPTH_SCALE: f32 = 10.0;
pub const PLANE_EXTENT: f32 = 100.0;
pub const PLANE_THICKNESS: f32 = 1.0;

// Spawn scatter, relative to max distance
pub const SPAWN_Z_MIN_FRACTION: f32 = -2.0 / 3.0;
pub const SPAWN_Z_SPAN_FRACTION: f32 = 1.0;

// Per-agent RNG derivation from the school seed
pub const SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;
