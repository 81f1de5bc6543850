//! Orientation frames along a sampled path.
//!
//! A frame is a rotation taking the canonical forward axis (+Z) onto the
//! path tangent. Cross-section rings are laid out in the frame's local XY
//! plane, so the frame decides both where a ring faces and how it is rolled
//! about the tangent.

use nalgebra::{Matrix3, Point3, Rotation3, Unit, Vector3};
use tracing::{debug, warn};

use crate::assemble::Closure;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Below this cross-product length two unit vectors count as aligned.
pub const ALIGNMENT_EPSILON: f64 = 1e-5;

/// Above this `|tangent · Z|` the +Y axis is used as the rotation reference.
pub const REFERENCE_SWITCH_DOT: f64 = 0.9;

/// Tangents shorter than this are degenerate.
const TANGENT_EPSILON: f64 = 1e-12;

/// Rotation taking +Z onto +Y: a quarter turn about -X.
fn z_to_y() -> Matrix3<f64> {
    Matrix3::new(
        1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, //
        0.0, -1.0, 0.0,
    )
}

/// How frames are chosen along a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FrameMode {
    /// Each frame is built from its own tangent alone.
    ///
    /// Deterministic per sample; the roll about the tangent follows the
    /// fixed reference axes, so it can jump where the reference switches.
    #[default]
    Absolute,
    /// Each frame is the previous one carried along by the smallest rotation
    /// between consecutive tangents (a rotation-minimizing frame).
    ///
    /// On seamless paths the roll left over after one lap is spread evenly
    /// over all samples so the last ring meets the first.
    ParallelTransport,
}

/// An orthonormal orientation at one path sample.
///
/// # Example
///
/// ```
/// use mesh_tube::Frame;
/// use nalgebra::Vector3;
///
/// let tangent = Vector3::new(1.0, 1.0, 0.0).normalize();
/// let frame = Frame::from_tangent(&tangent);
/// assert!((frame.forward() - tangent).norm() < 1e-12);
/// assert!(frame.is_orthonormal(1e-12));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    rotation: Rotation3<f64>,
}

impl Default for Frame {
    fn default() -> Self {
        Self::identity()
    }
}

impl Frame {
    /// The canonical frame: forward is +Z, the ring plane is XY.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            rotation: Rotation3::identity(),
        }
    }

    /// Wrap a matrix that is already orthonormal with determinant +1.
    #[must_use]
    pub fn from_matrix_unchecked(matrix: Matrix3<f64>) -> Self {
        Self {
            rotation: Rotation3::from_matrix_unchecked(matrix),
        }
    }

    /// Build the frame whose forward axis is `tangent`.
    ///
    /// The rotation is taken about `reference × tangent` using Rodrigues'
    /// formula, with +Z as the reference. When the tangent is within
    /// `acos(0.9)` of the Z axis the reference becomes +Y instead (composed
    /// with the fixed quarter turn taking Z onto Y), which keeps the
    /// rotation axis well away from zero length.
    ///
    /// A tangent already aligned with +Z, or one too short to normalize,
    /// yields the identity.
    #[must_use]
    pub fn from_tangent(tangent: &Vector3<f64>) -> Self {
        let Some(tangent) = tangent.try_normalize(TANGENT_EPSILON) else {
            return Self::identity();
        };

        let forward = Vector3::z();
        let dot = forward.dot(&tangent);
        if dot > 0.0 && forward.cross(&tangent).norm() < ALIGNMENT_EPSILON {
            return Self::identity();
        }

        if dot.abs() <= REFERENCE_SWITCH_DOT {
            align(&forward, &tangent).map_or_else(Self::identity, Self::from_matrix_unchecked)
        } else {
            align(&Vector3::y(), &tangent)
                .map_or_else(Self::identity, |m| Self::from_matrix_unchecked(m * z_to_y()))
        }
    }

    /// The rotation.
    #[must_use]
    pub fn rotation(&self) -> &Rotation3<f64> {
        &self.rotation
    }

    /// The rotation as a 3×3 matrix.
    #[must_use]
    pub fn matrix(&self) -> &Matrix3<f64> {
        self.rotation.matrix()
    }

    /// Image of +Z: the tangent direction.
    #[must_use]
    pub fn forward(&self) -> Vector3<f64> {
        self.rotation * Vector3::z()
    }

    /// Image of +X: where ring angle zero points.
    #[must_use]
    pub fn right(&self) -> Vector3<f64> {
        self.rotation * Vector3::x()
    }

    /// Image of +Y.
    #[must_use]
    pub fn up(&self) -> Vector3<f64> {
        self.rotation * Vector3::y()
    }

    /// Map a frame-local vector to world orientation.
    #[must_use]
    pub fn to_world(&self, local: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * local
    }

    /// This frame rolled by `angle` radians about its own forward axis.
    #[must_use]
    pub fn rolled(&self, angle: f64) -> Self {
        Self {
            rotation: self.rotation * Rotation3::from_axis_angle(&Vector3::z_axis(), angle),
        }
    }

    /// This frame carried onto `tangent` by the smallest rotation.
    ///
    /// The product is re-orthonormalized, so chains of transports do not
    /// accumulate scale or shear.
    #[must_use]
    pub fn transported(&self, tangent: &Vector3<f64>) -> Self {
        let mut rotation =
            Rotation3::from_matrix_unchecked(transport(self, tangent) * self.matrix());
        rotation.renormalize();
        Self { rotation }
    }

    /// Check if the axes are unit length and mutually perpendicular.
    #[must_use]
    pub fn is_orthonormal(&self, tolerance: f64) -> bool {
        let m = self.matrix();
        (m.transpose() * m - Matrix3::identity()).amax() <= tolerance
            && (m.determinant() - 1.0).abs() <= tolerance
    }
}

/// Rodrigues' rotation matrix for a unit axis and an angle given by its
/// cosine and sine: `I·cosθ + sinθ·[k]× + (1 − cosθ)·k kᵀ`.
#[must_use]
pub fn rodrigues(axis: &Unit<Vector3<f64>>, cos: f64, sin: f64) -> Matrix3<f64> {
    let k = axis.into_inner();
    Matrix3::identity() * cos + k.cross_matrix() * sin + (k * k.transpose()) * (1.0 - cos)
}

/// The rotation taking unit `from` onto unit `to` about their common
/// perpendicular, or `None` when they are (anti)parallel.
///
/// Cosine and sine come straight from the dot and cross products, so no
/// inverse trigonometry is needed.
fn align(from: &Vector3<f64>, to: &Vector3<f64>) -> Option<Matrix3<f64>> {
    let axis = from.cross(to);
    let sin = axis.norm();
    if sin < ALIGNMENT_EPSILON {
        return None;
    }
    let cos = from.dot(to);
    Some(rodrigues(&Unit::new_unchecked(axis / sin), cos, sin))
}

/// Smallest rotation carrying `frame`'s forward axis onto `tangent`.
fn transport(frame: &Frame, tangent: &Vector3<f64>) -> Matrix3<f64> {
    let forward = frame.forward().try_normalize(TANGENT_EPSILON).unwrap_or_else(Vector3::z);
    align(&forward, tangent).unwrap_or_else(|| {
        if forward.dot(tangent) >= 0.0 {
            Matrix3::identity()
        } else {
            // Reversal: half turn about an axis perpendicular to forward
            rodrigues(&Unit::new_normalize(frame.right()), -1.0, 0.0)
        }
    })
}

/// Frames for a sampled path, with the number of degenerate tangents met.
#[derive(Debug, Clone, Default)]
pub struct FrameSet {
    /// One frame per position.
    pub frames: Vec<Frame>,
    /// Samples whose look-ahead tangent had zero length.
    pub degenerate_tangents: usize,
}

/// Unit tangents by look-ahead differences.
///
/// Seamless paths wrap the last sample onto the first; capped paths reuse
/// the final segment's direction for the last sample. A zero-length
/// difference reuses the previous tangent, or +Z at the very first sample.
///
/// Returns an empty list for fewer than 2 positions.
#[must_use]
pub fn tangents(positions: &[Point3<f64>], closure: Closure) -> (Vec<Vector3<f64>>, usize) {
    let n = positions.len();
    if n < 2 {
        return (Vec::new(), 0);
    }

    let mut tangents = Vec::with_capacity(n);
    let mut degenerate = 0;
    let mut last_valid: Option<Vector3<f64>> = None;

    for i in 0..n {
        let direction = match closure {
            Closure::Seamless => positions[(i + 1) % n] - positions[i],
            Closure::Capped if i + 1 < n => positions[i + 1] - positions[i],
            Closure::Capped => positions[i] - positions[i - 1],
        };

        let tangent = if let Some(t) = direction.try_normalize(TANGENT_EPSILON) {
            last_valid = Some(t);
            t
        } else {
            degenerate += 1;
            warn!(
                index = i,
                degenerate,
                "zero-length tangent; reusing the previous direction"
            );
            last_valid.unwrap_or_else(Vector3::z)
        };
        tangents.push(tangent);
    }

    (tangents, degenerate)
}

/// Build a frame at every position of a sampled path.
///
/// # Example
///
/// ```
/// use mesh_tube::{build_frames, Closure, FrameMode};
/// use nalgebra::Point3;
///
/// let points = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(2.0, 0.0, 0.0),
/// ];
///
/// let set = build_frames(&points, Closure::Capped, FrameMode::Absolute);
/// assert_eq!(set.frames.len(), 3);
/// assert_eq!(set.degenerate_tangents, 0);
/// ```
#[must_use]
pub fn build_frames(positions: &[Point3<f64>], closure: Closure, mode: FrameMode) -> FrameSet {
    let (tangents, degenerate_tangents) = tangents(positions, closure);
    let Some(first) = tangents.first() else {
        return FrameSet::default();
    };

    let frames = match mode {
        FrameMode::Absolute => tangents.iter().map(Frame::from_tangent).collect(),
        FrameMode::ParallelTransport => {
            let mut frames: Vec<Frame> = Vec::with_capacity(tangents.len());
            let mut current = Frame::from_tangent(first);
            frames.push(current);
            for tangent in &tangents[1..] {
                current = current.transported(tangent);
                frames.push(current);
            }
            if closure == Closure::Seamless {
                close_roll(&mut frames, first);
            }
            frames
        }
    };

    debug!(
        samples = positions.len(),
        ?mode,
        degenerate_tangents,
        "built path frames"
    );

    FrameSet {
        frames,
        degenerate_tangents,
    }
}

/// Spread the roll mismatch between the transported last frame and the
/// first frame evenly over the lap.
fn close_roll(frames: &mut [Frame], first_tangent: &Vector3<f64>) {
    let (Some(first), Some(last)) = (frames.first().copied(), frames.last().copied()) else {
        return;
    };
    let closing = last.transported(first_tangent);
    let local = first.matrix().transpose() * closing.right();
    let mismatch = local.y.atan2(local.x);

    let n = frames.len() as f64;
    for (i, frame) in frames.iter_mut().enumerate() {
        *frame = frame.rolled(-mismatch * i as f64 / n);
    }
    debug!(mismatch, "distributed seam roll");
}
