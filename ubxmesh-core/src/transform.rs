//! Mesh transforms applied to cluster vertices

use nalgebra::{Matrix3, Matrix4, Point3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// World and rotation matrices of one mesh.
///
/// Positions go through the full world matrix, normals through the
/// rotation-only matrix, so translation and non-uniform scale never reach
/// a normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshTransform {
    pub world: Matrix4<f32>,
    pub rotation: Matrix3<f32>,
}

impl MeshTransform {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            world: Matrix4::identity(),
            rotation: Matrix3::identity(),
        }
    }

    pub fn new(world: Matrix4<f32>, rotation: Matrix3<f32>) -> Self {
        Self { world, rotation }
    }

    /// Use the upper-left 3x3 block of `world` as the rotation matrix.
    /// Only correct when `world` carries no scale.
    pub fn from_world(world: Matrix4<f32>) -> Self {
        Self {
            world,
            rotation: world.fixed_view::<3, 3>(0, 0).into_owned(),
        }
    }

    /// Create a translation transformation
    pub fn translation(translation: Vector3<f32>) -> Self {
        Self::from_world(Matrix4::new_translation(&translation))
    }

    /// Compose an object's placement with a global (axis conversion) matrix.
    ///
    /// world = global * object_world,
    /// rotation = global₃ₓ₃ * object_rotation.
    pub fn from_object(
        global: &Matrix4<f32>,
        object_world: &Matrix4<f32>,
        object_rotation: &UnitQuaternion<f32>,
    ) -> Self {
        let global_rotation = global.fixed_view::<3, 3>(0, 0).into_owned();
        Self {
            world: global * object_world,
            rotation: global_rotation * object_rotation.to_rotation_matrix().into_inner(),
        }
    }

    /// Apply the world matrix to a point
    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        let homogeneous = self.world * point.to_homogeneous();
        Point3::from_homogeneous(homogeneous).unwrap_or(*point)
    }

    /// Apply the rotation matrix to a normal
    pub fn transform_normal(&self, normal: &Vector3<f32>) -> Vector3<f32> {
        self.rotation * normal
    }
}

impl Default for MeshTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Matrix4<f32>> for MeshTransform {
    fn from(world: Matrix4<f32>) -> Self {
        Self::from_world(world)
    }
}

/// A signed coordinate axis, used to describe forward and up directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
    NegX,
    NegY,
    NegZ,
}

impl Axis {
    pub fn to_vector(self) -> Vector3<f32> {
        match self {
            Axis::X => Vector3::x(),
            Axis::Y => Vector3::y(),
            Axis::Z => Vector3::z(),
            Axis::NegX => -Vector3::x(),
            Axis::NegY => -Vector3::y(),
            Axis::NegZ => -Vector3::z(),
        }
    }

    /// True if both axes lie on the same line, regardless of sign
    pub fn is_parallel_to(self, other: Axis) -> bool {
        self.to_vector().cross(&other.to_vector()) == Vector3::zeros()
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
            Axis::NegX => "-X",
            Axis::NegY => "-Y",
            Axis::NegZ => "-Z",
        };
        f.write_str(name)
    }
}

impl FromStr for Axis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "X" => Ok(Axis::X),
            "Y" => Ok(Axis::Y),
            "Z" => Ok(Axis::Z),
            "-X" => Ok(Axis::NegX),
            "-Y" => Ok(Axis::NegY),
            "-Z" => Ok(Axis::NegZ),
            _ => Err(Error::InvalidOption(format!("Unknown axis: {}", s))),
        }
    }
}

/// Source space convention: forward is +Y, up is +Z.
pub const SOURCE_FORWARD: Axis = Axis::Y;
pub const SOURCE_UP: Axis = Axis::Z;

/// Build the matrix that maps the source space (forward +Y, up +Z) onto a
/// space with the given forward and up axes.
pub fn axis_conversion(forward: Axis, up: Axis) -> Result<Matrix4<f32>> {
    if forward == up {
        return Err(Error::InvalidOption(
            "Forward axis and up axis are the same".to_string(),
        ));
    }
    if forward.is_parallel_to(up) {
        return Err(Error::InvalidOption(format!(
            "Forward axis {} and up axis {} are parallel",
            forward, up
        )));
    }

    let basis = |f: Axis, u: Axis| {
        let f = f.to_vector();
        let u = u.to_vector();
        Matrix3::from_columns(&[f, u, f.cross(&u)])
    };

    let from = basis(SOURCE_FORWARD, SOURCE_UP);
    let to = basis(forward, up);

    Ok((to * from.transpose()).to_homogeneous())
}
