//! Target point shared between an input handler and the frame loop.

use nalgebra::Point2;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::pipeline::TargetProvider;

/// Packed `(x, y)` bits. No finite pair of f32 can produce this value
/// (both halves are a NaN pattern).
const ABSENT: u64 = u64::MAX;

fn pack(p: Point2<f32>) -> u64 {
    ((p.x.to_bits() as u64) << 32) | p.y.to_bits() as u64
}

fn unpack(bits: u64) -> Point2<f32> {
    Point2::new(
        f32::from_bits((bits >> 32) as u32),
        f32::from_bits(bits as u32),
    )
}

/// Latest target, written from anywhere and read once per tick.
///
/// Both coordinates are stored in one atomic word so a reader never sees
/// `x` from one update and `y` from another.
#[derive(Debug)]
pub struct TargetCell {
    bits: AtomicU64,
}

impl Default for TargetCell {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetCell {
    pub const fn new() -> Self {
        Self {
            bits: AtomicU64::new(ABSENT),
        }
    }

    pub fn with_target(target: Point2<f32>) -> Self {
        let cell = Self::new();
        cell.set(target);
        cell
    }

    /// Replace the target. Non-finite coordinates clear it.
    pub fn set(&self, target: Point2<f32>) {
        if !(target.x.is_finite() && target.y.is_finite()) {
            self.clear();
            return;
        }
        self.bits.store(pack(target), Ordering::Release);
    }

    pub fn clear(&self) {
        self.bits.store(ABSENT, Ordering::Release);
    }

    pub fn get(&self) -> Option<Point2<f32>> {
        match self.bits.load(Ordering::Acquire) {
            ABSENT => None,
            bits => Some(unpack(bits)),
        }
    }
}

impl TargetProvider for TargetCell {
    fn current_target(&self) -> Option<Point2<f32>> {
        self.get()
    }
}
