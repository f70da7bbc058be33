// Shared tuning constants for picking, drawing, replay and notifications.

// Sky layout
pub const SKY_RADIUS: f32 = 100.0; // radius of the celestial sphere in world units

// Picking
pub const HIT_RADIUS_PX: f32 = 12.0; // max cursor distance to count as a star hit

// Drawing
pub const MARKER_PIXEL_SIZE: f32 = 14.0; // on-screen marker size, constant while the camera moves
pub const LINE_WIDTH: f32 = 3.0;
pub const POP_IN_DURATION_MS: f64 = 200.0;
pub const POP_IN_START_SCALE: f32 = 1.5; // marker starts 1.5x larger and shrinks to 1x

// Glow replay
pub const GLOW_DURATION_MS: f64 = 1500.0;
pub const GLOW_SPEED: f32 = 1.5; // head position = progress * GLOW_SPEED (path ratio)
pub const GLOW_LENGTH: f32 = 0.2; // tail trails the head by this path ratio
pub const GLOW_FADE: f32 = 0.8; // opacity = 1 - progress * GLOW_FADE
pub const GLOW_WIDTH_MULTIPLIER: f32 = 2.0;

// Transient notifications
pub const NOTIFY_FADE_IN_DELAY_MS: f64 = 50.0;
pub const NOTIFY_FADE_OUT_START_MS: f64 = 2000.0;
pub const NOTIFY_TRANSITION_MS: f64 = 400.0;
pub const NOTIFY_SHOWN_SCALE: f32 = 1.05;
pub const NOTIFY_HIDDEN_SCALE: f32 = 0.95;

// Persistence
pub const STORAGE_KEY: &str = "myConstellations";
pub const MIN_CONSTELLATION_STARS: usize = 2;
pub const ID_SUFFIX_LEN: usize = 7;

// Catalog layers, split by visual magnitude (brightest first)
pub const MAGNITUDE_BANDS: [f32; 3] = [2.0, 3.5, f32::INFINITY];
