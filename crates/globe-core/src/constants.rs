// Shared visual and interaction tuning constants for the globe.

// Sphere and badge sizing (world units)
pub const SPHERE_RADIUS: f32 = 2.15;
pub const WIDTH_FRONT: f32 = 0.54; // badge width when nearest the camera
pub const WIDTH_BACK: f32 = 0.28; // badge width when farthest away
pub const OPACITY_FRONT: f32 = 1.0;
pub const OPACITY_BACK: f32 = 0.06;
pub const DEPTH_OPACITY_EXPONENT: f32 = 2.0; // accentuates near/far contrast
pub const DENSITY: f32 = 1.0; // badges per catalog entry

// Layout relaxation
pub const RELAX_ITERATIONS: usize = 32;
pub const RELAX_STEP: f32 = 0.5; // fraction of the overlap corrected per pass

// Badge texture planning (CSS pixels, scaled by the capped device pixel ratio)
pub const MIN_FONT_PX: u32 = 80;
pub const MAX_FONT_PX: u32 = 220;
pub const TARGET_FONT_PX: f32 = 240.0;
pub const BASE_CANVAS_W: f32 = 520.0;
pub const ICON_PAD: f32 = 10.0;
pub const LABEL_MARGIN: f32 = 8.0;
pub const LABEL_WIDTH_BUDGET: f32 = 0.8; // share of canvas width available to the label
pub const MAX_PIXEL_RATIO: f64 = 2.0;
pub const LABEL_FONT_WEIGHT: u32 = 600;
pub const LABEL_FONT_FAMILY: &str = "system-ui, -apple-system, Segoe UI, Roboto, Arial";

// Placeholder glyph box inside the icon square
pub const PLACEHOLDER_INSET: f32 = 0.15; // per side, as a share of the icon box
pub const PLACEHOLDER_CORNER: f32 = 0.18; // corner radius, as a share of the placeholder side
pub const PLACEHOLDER_GLYPH_SCALE: f32 = 0.55; // glyph font px per placeholder side

// Icon CDN
pub const ICON_CDN_BASE: &str = "https://cdn.simpleicons.org";

// Camera
pub const FOV_Y_DEG: f32 = 55.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;
pub const CAMERA_Z: f32 = 6.0; // minimum framing distance

// Rotation scheduler
pub const RELEASE_GRACE_SEC: f32 = 0.2; // delay before autorotation may resume
pub const DRAG_VELOCITY_CARRY: f32 = 0.95; // share of the last drag step kept as momentum
pub const MOMENTUM_STOP_THRESHOLD: f32 = 1e-4; // rad per 60 Hz frame
pub const MOMENTUM_REFERENCE_HZ: f32 = 60.0;
