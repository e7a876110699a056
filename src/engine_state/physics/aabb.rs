//! Axis-aligned bounding boxes in world units.

use cgmath::{Point3, Vector3};

/// An axis-aligned box given by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Corner with the smallest coordinates.
    pub min: Point3<f64>,
    /// Corner with the largest coordinates.
    pub max: Point3<f64>,
}

impl Aabb {
    /// Creates a box from its corners.
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Aabb { min, max }
    }

    /// Creates a box of `size` centered on `center`.
    pub fn from_center_and_size(center: Point3<f64>, size: Vector3<f64>) -> Self {
        let half = size * 0.5;
        Aabb {
            min: center - half,
            max: center + half,
        }
    }

    /// The unit cube occupied by the block at `cell`.
    pub fn block(cell: Point3<i32>) -> Self {
        let min = Point3::new(cell.x as f64, cell.y as f64, cell.z as f64);
        Aabb {
            min,
            max: min + Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Whether the interiors of the two boxes overlap.
    ///
    /// Boxes that only touch along a face do not intersect, so a body resting
    /// exactly on a block is not colliding with it.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Every integer cell whose unit cube could overlap this box.
    ///
    /// The range is `floor(min)..=ceil(max)` on each axis, which may include one
    /// cell too many where a face lies exactly on the grid.
    pub fn candidate_cells(&self) -> impl Iterator<Item = Point3<i32>> {
        let (x0, x1) = (self.min.x.floor() as i32, self.max.x.ceil() as i32);
        let (y0, y1) = (self.min.y.floor() as i32, self.max.y.ceil() as i32);
        let (z0, z1) = (self.min.z.floor() as i32, self.max.z.ceil() as i32);
        (x0..=x1).flat_map(move |x| {
            (y0..=y1).flat_map(move |y| (z0..=z1).map(move |z| Point3::new(x, y, z)))
        })
    }
}
