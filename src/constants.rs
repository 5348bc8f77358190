// Browser-side tuning. Visual and motion constants live in `globe_core::constants`.

// Host page
pub const CONTAINER_ID: &str = "globe";
pub const CANVAS_STYLE: &str = "display:block;width:100%;height:100%;touch-action:none;";

// Frame timing
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // clamp after tab switches or long stalls

// Device pixel ratio changes smaller than this do not trigger a rebuild
pub const PIXEL_RATIO_EPSILON: f64 = 1e-3;

// Theme observation
pub const ROOT_OBSERVED_ATTRIBUTES: [&str; 3] = ["data-theme", "class", "style"];
pub const BODY_OBSERVED_ATTRIBUTES: [&str; 2] = ["class", "style"];
pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

// Icon requests still pending after this long use the placeholder
pub const ICON_TIMEOUT_MS: u32 = 8000;

// Renderer
pub const INITIAL_INSTANCE_CAPACITY: usize = 128;
