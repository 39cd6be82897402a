//! GLSL ES 1.00 sources and the names the Rust side binds against.

pub const FACETED_VERT: &str = include_str!("shaders/faceted.vert");
pub const SMOOTH_VERT: &str = include_str!("shaders/smooth.vert");
pub const LIT_FRAG: &str = include_str!("shaders/lit.frag");
pub const BUMPED_FRAG: &str = include_str!("shaders/bumped.frag");

pub const QUAD_VERT: &str = include_str!("shaders/quad.vert");
pub const BACKGROUND_FRAG: &str = include_str!("shaders/background.frag");
pub const BLOB_FRAG: &str = include_str!("shaders/blob.frag");

pub const U_RATIO: &str = "u_ratio";
pub const U_SCALE: &str = "u_scale";
pub const U_LIGHT: &str = "u_light";
pub const U_PIXEL_SIZE: &str = "u_pixelSize";
pub const U_TIME: &str = "u_time";
pub const U_SEED: &str = "u_seed";
