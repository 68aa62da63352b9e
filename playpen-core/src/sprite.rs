//! Sprites and the minimal geometry the plugins consume.
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Shape of a sprite, in normalized arena coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Disc of the given radius.
    Circle {
        /// Radius of the disc.
        radius: f32,
    },

    /// Axis-aligned box with the given half extents.
    Rect {
        /// Half width and half height of the box.
        half_extents: Vec2,
    },
}

impl Shape {
    /// Whether `point` lies inside the shape centered at `center`.
    pub fn contains(&self, center: Vec2, point: Vec2) -> bool {
        match *self {
            Shape::Circle { radius } => center.distance_squared(point) <= radius * radius,
            Shape::Rect { half_extents } => {
                let d = (point - center).abs();
                d.x <= half_extents.x && d.y <= half_extents.y
            }
        }
    }

    // Conservative radius for overlap tests involving mixed shape kinds.
    fn bounding_radius(&self) -> f32 {
        match *self {
            Shape::Circle { radius } => radius,
            Shape::Rect { half_extents } => half_extents.length(),
        }
    }
}

/// A movable entity in the arena.
///
/// The environment owns sprite lifecycles; plugins only read position and
/// mass and mutate velocity.
#[derive(Clone, Debug)]
pub struct Sprite {
    /// Center of mass, in normalized arena coordinates.
    pub position: Vec2,

    /// Current velocity.
    pub velocity: Vec2,

    /// Mass. Heavier sprites accelerate less for the same motion.
    pub mass: f32,

    /// Shape used for containment and overlap tests.
    pub shape: Shape,
}

impl Sprite {
    /// Creates a sprite at rest.
    pub fn new(position: Vec2, mass: f32, shape: Shape) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            mass,
            shape,
        }
    }

    /// Whether `point` lies inside this sprite's shape.
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.shape.contains(self.position, point)
    }

    /// Whether the shapes of `self` and `other` intersect.
    ///
    /// Circle and box pairs are exact; a mixed pair uses the box's bounding
    /// circle.
    pub fn overlaps_sprite(&self, other: &Sprite) -> bool {
        match (self.shape, other.shape) {
            (Shape::Rect { half_extents: a }, Shape::Rect { half_extents: b }) => {
                let d = (other.position - self.position).abs();
                d.x <= a.x + b.x && d.y <= a.y + b.y
            }
            _ => {
                let r = self.shape.bounding_radius() + other.shape.bounding_radius();
                self.position.distance_squared(other.position) <= r * r
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Shape, Sprite};
    use glam::Vec2;

    #[test]
    fn circle_containment() {
        let s = Sprite::new(Vec2::new(0.5, 0.5), 1.0, Shape::Circle { radius: 0.1 });
        assert!(s.contains_point(Vec2::new(0.5, 0.5)));
        assert!(s.contains_point(Vec2::new(0.59, 0.5)));
        assert!(!s.contains_point(Vec2::new(0.61, 0.5)));
    }

    #[test]
    fn rect_containment() {
        let s = Sprite::new(
            Vec2::new(0.5, 0.5),
            1.0,
            Shape::Rect {
                half_extents: Vec2::new(0.2, 0.1),
            },
        );
        assert!(s.contains_point(Vec2::new(0.69, 0.59)));
        assert!(!s.contains_point(Vec2::new(0.5, 0.61)));
        assert!(!s.contains_point(Vec2::new(0.71, 0.5)));
    }

    #[test]
    fn circle_overlap() {
        let a = Sprite::new(Vec2::new(0.3, 0.5), 1.0, Shape::Circle { radius: 0.1 });
        let b = Sprite::new(Vec2::new(0.45, 0.5), 1.0, Shape::Circle { radius: 0.1 });
        let c = Sprite::new(Vec2::new(0.8, 0.5), 1.0, Shape::Circle { radius: 0.1 });
        assert!(a.overlaps_sprite(&b));
        assert!(b.overlaps_sprite(&a));
        assert!(!a.overlaps_sprite(&c));
    }

    #[test]
    fn rect_overlap() {
        let he = Vec2::new(0.1, 0.1);
        let a = Sprite::new(Vec2::new(0.3, 0.3), 1.0, Shape::Rect { half_extents: he });
        let b = Sprite::new(Vec2::new(0.45, 0.3), 1.0, Shape::Rect { half_extents: he });
        let c = Sprite::new(Vec2::new(0.6, 0.3), 1.0, Shape::Rect { half_extents: he });
        assert!(a.overlaps_sprite(&b));
        assert!(!a.overlaps_sprite(&c));
    }
}
