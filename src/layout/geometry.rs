//! Geometry primitives and rack-unit sizing

use std::ops::Add;

use super::config::LayoutConfig;

/// A 2D point in the coordinate system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A bounding box representing the spatial extent of an element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Check if this bounding box intersects another
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Smallest box containing both
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        BoundingBox::new(x, y, right - x, bottom - y)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::zero()
    }
}

/// Top-edge offset of a device in the gap-free stacking, in pixels
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct CompactOffset(pub f64);

impl Add<f64> for CompactOffset {
    type Output = CompactOffset;

    fn add(self, rhs: f64) -> CompactOffset {
        CompactOffset(self.0 + rhs)
    }
}

/// Pixel extents derived from rack-unit counts
#[derive(Debug, Clone, Copy)]
pub struct UnitGeometry<'a> {
    config: &'a LayoutConfig,
}

impl<'a> UnitGeometry<'a> {
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self { config }
    }

    pub fn unit_height(&self) -> f64 {
        self.config.unit_height
    }

    /// Pixel height of a device spanning `unit_size` units
    pub fn height_of(&self, unit_size: u32) -> f64 {
        f64::from(unit_size) * self.config.unit_height
    }

    /// Horizontal distance between port origins in the same cluster
    pub fn port_pitch(&self) -> f64 {
        self.config.port_size.0 + self.config.port_gap
    }

    pub fn group_gap(&self) -> f64 {
        self.config.group_gap
    }

    pub fn group_size(&self) -> usize {
        self.config.group_size.max(1)
    }

    /// Vertical distance between port rows
    pub fn row_pitch(&self, double_row: bool) -> f64 {
        if double_row {
            self.config.double_row_pitch
        } else {
            self.config.row_pitch
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_of() {
        let config = LayoutConfig::default();
        let geom = UnitGeometry::new(&config);
        assert_eq!(geom.height_of(1), 44.0);
        assert_eq!(geom.height_of(3), 132.0);
    }

    #[test]
    fn test_pitches() {
        let config = LayoutConfig::default();
        let geom = UnitGeometry::new(&config);
        assert_eq!(geom.port_pitch(), 16.0);
        assert_eq!(geom.row_pitch(true), 18.0);
        assert_eq!(geom.row_pitch(false), 17.0);
    }

    #[test]
    fn test_bounding_box_union() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(5.0, 20.0, 10.0, 5.0);
        assert_eq!(a.union(&b), BoundingBox::new(0.0, 0.0, 15.0, 25.0));
        assert!(!a.intersects(&b));
    }
}
