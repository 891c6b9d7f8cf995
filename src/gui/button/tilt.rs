use crate::geometry::{Point, Size};
use crate::gui::button::{CAMERA_DISTANCE, MAX_TILT_DEGREES};

/// Rotation angles in degrees derived from how far the pointer sits from the
/// button anchor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TiltAngles {
    pub rotate_x: f64,
    pub rotate_y: f64,
}

impl TiltAngles {
    /// Scales linearly so the pointer at the far edge of the content box
    /// tilts by `MAX_TILT_DEGREES`.
    pub fn from_pointer(centre: Point, pointer: Point, content: Size) -> Self {
        let size = content.max_side();
        if size <= 0.0 {
            return Self::default();
        }

        let offset_y = centre.y - pointer.y;
        let offset_x = centre.x - pointer.x;

        Self {
            rotate_x: offset_y / size * MAX_TILT_DEGREES,
            rotate_y: -offset_x / size * MAX_TILT_DEGREES,
        }
    }

    /// Perspective projection of the rotation, pivoting on `centre`.
    pub fn projection(&self, centre: Point) -> Projection {
        Projection::translation(-centre.x, -centre.y)
            .then(&Projection::camera(self.rotate_x, self.rotate_y))
            .then(&Projection::translation(centre.x, centre.y))
    }
}

/// Smallest homogeneous depth a mapped point may have.
const MIN_DEPTH: f64 = 1e-3;

/// Row-major 3x3 homogeneous matrix. Unlike cairo's affine matrices this
/// keeps the perspective row, so it is applied to path points directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection([[f64; 3]; 3]);

impl Default for Projection {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Projection {
    pub const IDENTITY: Self = Self([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

    pub fn translation(dx: f64, dy: f64) -> Self {
        Self([[1.0, 0.0, dx], [0.0, 1.0, dy], [0.0, 0.0, 1.0]])
    }

    /// Rotates the z = 0 plane about the x axis, then the y axis, and
    /// projects it through a pinhole camera `CAMERA_DISTANCE` in front of it.
    /// Positive `rotate_x` pushes the upper half away from the viewer,
    /// positive `rotate_y` pushes the right half away.
    pub fn camera(rotate_x_deg: f64, rotate_y_deg: f64) -> Self {
        let (sx, cx) = rotate_x_deg.to_radians().sin_cos();
        let (sy, cy) = rotate_y_deg.to_radians().sin_cos();

        // only the x and y columns matter for points with z = 0
        Self([
            [cy, sx * sy, 0.0],
            [0.0, cx, 0.0],
            [sy / CAMERA_DISTANCE, -sx * cy / CAMERA_DISTANCE, 1.0],
        ])
    }

    /// Returns the transform that applies `self` first and `next` second.
    pub fn then(&self, next: &Projection) -> Projection {
        let (a, b) = (&next.0, &self.0);
        let mut out = [[0.0; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| a[i][k] * b[k][j]).sum();
            }
        }
        Projection(out)
    }

    pub fn map(&self, point: Point) -> Point {
        let m = &self.0;
        let x = m[0][0] * point.x + m[0][1] * point.y + m[0][2];
        let y = m[1][0] * point.x + m[1][1] * point.y + m[1][2];
        // points at or behind the camera plane are pushed far out on their
        // own side instead of mirroring through infinity
        let w = (m[2][0] * point.x + m[2][1] * point.y + m[2][2]).max(MIN_DEPTH);
        Point::new(x / w, y / w)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}
