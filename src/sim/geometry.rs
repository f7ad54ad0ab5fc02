//! Axis-aligned box geometry and the swept-box test
//!
//! The ball is treated as a square box of half extent `radius * ball_scale`
//! swept along its direction. Targets are static axis-aligned boxes.

use glam::Vec2;

/// Axis-aligned bounding box stored as center + half extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    /// Grow by `by` on every side (Minkowski sum with a box of half extents `by`)
    pub fn expanded(&self, by: Vec2) -> Self {
        Self::from_center(self.center, self.half_extents + by)
    }
}

/// Result of a swept-box test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    /// Fraction of the motion travelled before contact, in [0, 1]
    pub toi: f32,
    /// Axis unit normal of the struck face, pointing towards the moving box
    pub normal: Vec2,
}

/// Unit vector from raw components
#[inline]
pub fn direction(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y).normalize()
}

/// Sweep a box (`center`, `half_extents`) along `motion` against `target`
///
/// Slab test of the ray `center + t * motion` against the target grown by the
/// moving box. A box already overlapping the target reports `toi = 0` with the
/// least-penetration axis, but only while moving towards the target.
pub fn sweep_box(center: Vec2, half_extents: Vec2, motion: Vec2, target: &Aabb) -> Option<SweepHit> {
    let grown = target.expanded(half_extents);
    let min = grown.min();
    let max = grown.max();

    let (near_x, far_x) = slab(center.x, motion.x, min.x, max.x)?;
    let (near_y, far_y) = slab(center.y, motion.y, min.y, max.y)?;

    let t_near = near_x.max(near_y);
    let t_far = far_x.min(far_y);

    if t_near > t_far || t_far <= 0.0 || t_near > 1.0 {
        return None;
    }

    if t_near < 0.0 {
        // Started inside: push out along the shallowest axis
        let offset = center - grown.center;
        let depth = grown.half_extents - offset.abs();
        let normal = if depth.x < depth.y {
            Vec2::new(sign(offset.x), 0.0)
        } else {
            Vec2::new(0.0, sign(offset.y))
        };
        if motion.dot(normal) >= 0.0 {
            return None;
        }
        return Some(SweepHit { toi: 0.0, normal });
    }

    let normal = if near_x > near_y {
        Vec2::new(-sign(motion.x), 0.0)
    } else {
        Vec2::new(0.0, -sign(motion.y))
    };
    Some(SweepHit { toi: t_near, normal })
}

/// Entry/exit times along one axis; `None` when the ray misses the slab entirely
fn slab(origin: f32, motion: f32, min: f32, max: f32) -> Option<(f32, f32)> {
    if motion == 0.0 {
        if origin > min && origin < max {
            Some((f32::NEG_INFINITY, f32::INFINITY))
        } else {
            None
        }
    } else {
        let t1 = (min - origin) / motion;
        let t2 = (max - origin) / motion;
        Some((t1.min(t2), t1.max(t2)))
    }
}

#[inline]
fn sign(v: f32) -> f32 {
    if v < 0.0 { -1.0 } else { 1.0 }
}
