//! Reflective world boundaries
//!
//! The world is the box `[0, max.x] x [0, max.y]`. Each axis is checked on its
//! own; a position outside the closed interval flips that axis' velocity.

use crate::physics::math::{Scalar, Vector};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Flip velocity only. The position may sit past the wall for a frame.
    #[default]
    Reflect,
    /// Flip velocity and pull the position back onto the wall
    ClampAndReflect,
}

impl BoundaryMode {
    pub const ALL: [BoundaryMode; 2] = [BoundaryMode::Reflect, BoundaryMode::ClampAndReflect];

    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryMode::Reflect => "reflect",
            BoundaryMode::ClampAndReflect => "clamp_and_reflect",
        }
    }
}

impl fmt::Display for BoundaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoundaryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reflect" => Ok(BoundaryMode::Reflect),
            "clamp_and_reflect" | "clamp" => Ok(BoundaryMode::ClampAndReflect),
            other => Err(format!(
                "Unknown boundary mode: '{other}'. Available modes: reflect, clamp_and_reflect"
            )),
        }
    }
}

/// Which axes were reflected by a call to [`BoundaryPolicy::apply`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reflection {
    pub x: bool,
    pub y: bool,
}

impl Reflection {
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryPolicy {
    /// Upper bound per axis; the lower bound is always zero
    pub max: Vector,
    pub mode: BoundaryMode,
}

impl BoundaryPolicy {
    pub fn new(max: Vector, mode: BoundaryMode) -> Self {
        Self { max, mode }
    }

    #[inline]
    pub fn contains(&self, position: Vector) -> bool {
        !out_of_range(position.x, self.max.x) && !out_of_range(position.y, self.max.y)
    }

    /// Reflect the velocity on every axis whose position is out of bounds
    pub fn apply(&self, position: &mut Vector, velocity: &mut Vector) -> Reflection {
        let clamp = self.mode == BoundaryMode::ClampAndReflect;

        let x = reflect_axis(&mut position.x, &mut velocity.x, self.max.x, clamp);
        let y = reflect_axis(&mut position.y, &mut velocity.y, self.max.y, clamp);

        Reflection { x, y }
    }
}

#[inline]
fn out_of_range(value: Scalar, max: Scalar) -> bool {
    value < 0.0 || value > max
}

#[inline]
fn reflect_axis(position: &mut Scalar, velocity: &mut Scalar, max: Scalar, clamp: bool) -> bool {
    if !out_of_range(*position, max) {
        return false;
    }

    *velocity = -*velocity;
    if clamp {
        *position = position.clamp(0.0, max);
    }
    true
}
