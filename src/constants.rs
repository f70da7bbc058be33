/// Front-end constants: DOM ids, camera defaults and render colors.
///
/// Picking, drawing and replay tuning lives in `asterism_core::constants`.

// Page elements
pub const CANVAS_ID: &str = "app-canvas";
pub const EXPLORE_MODE_BTN: &str = "explore-mode-btn";
pub const CREATE_MODE_BTN: &str = "create-mode-btn";
pub const EXPLORE_PANEL: &str = "explore-mode-panel";
pub const CREATE_PANEL: &str = "create-mode-panel";
pub const NAME_INPUT: &str = "constellation-name-input";
pub const STAR_COUNT: &str = "star-count";
pub const SAVE_BTN: &str = "save-constellation-btn";
pub const CLEAR_ALL_BTN: &str = "clear-all-btn";
pub const LIST_ID: &str = "my-constellations-list";
pub const MESSAGE_ID: &str = "temp-message";

// Prompts
pub const DELETE_CONFIRM_TEXT: &str = "Are you sure you want to delete this constellation?";
pub const CLEAR_CONFIRM_TEXT: &str = "Are you sure you want to clear all selected stars?";
pub const EMPTY_LIST_TEXT: &str = "No constellations saved yet.";

// Catalog
pub const STARS_URL: &str = "stars.json";
pub const PROCEDURAL_STAR_COUNT: usize = 1600; // roughly the V <= 5 sky

// Camera
pub const FOV_DEFAULT_DEG: f32 = 60.0;
pub const FOV_MIN_DEG: f32 = 15.0;
pub const FOV_MAX_DEG: f32 = 90.0;
pub const WHEEL_ZOOM_DEG_PER_PX: f32 = 0.02;
pub const DRAG_RADIANS_PER_PX: f32 = 0.0035; // scaled by fov / default fov
pub const DRAG_CLICK_SLOP_PX: f32 = 4.0; // pointer travel that turns a click into a drag

// Star sprites (pixel sizes, brightest to faintest)
pub const STAR_SIZE_MAX_PX: f32 = 6.0;
pub const STAR_SIZE_MIN_PX: f32 = 1.5;

pub const CLEAR_COLOR: [f64; 3] = [0.01, 0.015, 0.04];
