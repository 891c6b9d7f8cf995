pub mod animation;
pub mod model;
pub mod tilt;
pub mod view;

pub use animation::{Animation, AnimationKind};
pub use model::{
    ButtonStyle, CircleButton, FontMetrics, Phase, PointerEvent, PointerResponse, TickAction,
};
pub use tilt::{Projection, TiltAngles};
pub use view::draw;

pub const DEFAULT_LABEL: &str = "请选择 Choose";
pub const DEFAULT_TEXT_SIZE: f64 = 90.0;
pub const DEFAULT_COLLAPSE_RADIUS: u32 = 120;
pub const DEFAULT_EXPAND_RADIUS: u32 = 360;
pub const ANIMATION_MS: u32 = 300;
pub const MAX_TILT_DEGREES: f64 = 45.0; // tilt reached at the content edge
pub const CAMERA_DISTANCE: f64 = 576.0; // 8 inches at 72 dpi
pub const LABEL_FONT: &str = "Sans";
