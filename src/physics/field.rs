//! Time-varying synthetic electric field
//!
//! The field driving the particle oscillates in time with a single shared
//! envelope `sin(t / T)` and varies in space per axis:
//!
//! ```text
//! E_x(x, t) = cos(x / L) * sin(t / T)
//! E_y(y, t) = cos(y / L) * sin(t / T)
//! V(x, y, t) = sin(y / L) * sin(t / T) + sin(x / L) * sin(t / T)
//! ```
//!
//! The displayed potential `V` is evaluated as its own expression and is not
//! derived from `E`. It only feeds the energy history, never the force.
//!
//! Trigonometry goes through `libm` so trajectories are reproducible across
//! platforms.

use crate::physics::math::{Scalar, Vector};

/// Field vector and potential evaluated at the same position and time
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldSample {
    pub field: Vector,
    pub potential: Scalar,
}

/// Separable standing-wave field with a sinusoidal time envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscillatingField {
    /// Spatial scale `L`
    pub spatial_scale: Scalar,
    /// Temporal scale `T`, in simulation steps
    pub temporal_scale: Scalar,
}

impl Default for OscillatingField {
    fn default() -> Self {
        Self {
            spatial_scale: 50.0,
            temporal_scale: 50.0,
        }
    }
}

impl OscillatingField {
    pub fn new(spatial_scale: Scalar, temporal_scale: Scalar) -> Self {
        Self {
            spatial_scale,
            temporal_scale,
        }
    }

    #[inline]
    fn envelope(&self, time: Scalar) -> Scalar {
        libm::sin(time / self.temporal_scale)
    }

    /// Field vector at `position` and `time`
    #[inline]
    pub fn field_at(&self, position: Vector, time: Scalar) -> Vector {
        let envelope = self.envelope(time);
        Vector::new(
            libm::cos(position.x / self.spatial_scale) * envelope,
            libm::cos(position.y / self.spatial_scale) * envelope,
        )
    }

    /// Displayed potential at `position` and `time`
    #[inline]
    pub fn potential_at(&self, position: Vector, time: Scalar) -> Scalar {
        let envelope = self.envelope(time);
        libm::sin(position.y / self.spatial_scale) * envelope
            + libm::sin(position.x / self.spatial_scale) * envelope
    }

    /// Evaluate field and potential together
    pub fn evaluate(&self, position: Vector, time: Scalar) -> FieldSample {
        FieldSample {
            field: self.field_at(position, time),
            potential: self.potential_at(position, time),
        }
    }
}

/// Potential sampled on a regular grid covering the world
///
/// Values are stored row-major, one per cell, evaluated at the cell's
/// top-left corner. This is the data a renderer shades the background with.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PotentialGrid {
    pub columns: usize,
    pub rows: usize,
    pub cell_size: Scalar,
    pub values: Vec<Scalar>,
}

impl PotentialGrid {
    /// Sample `field` over `[0, extent.x) x [0, extent.y)` at time `time`
    ///
    /// A non-positive or non-finite `cell_size` yields an empty grid.
    pub fn sample(
        field: &OscillatingField,
        extent: Vector,
        cell_size: Scalar,
        time: Scalar,
    ) -> Self {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Self::default();
        }

        let columns = (extent.x.max(0.0) / cell_size).ceil() as usize;
        let rows = (extent.y.max(0.0) / cell_size).ceil() as usize;

        let mut values = Vec::with_capacity(columns * rows);
        for row in 0..rows {
            for column in 0..columns {
                let corner = Vector::new(column as Scalar, row as Scalar) * cell_size;
                values.push(field.potential_at(corner, time));
            }
        }

        Self {
            columns,
            rows,
            cell_size,
            values,
        }
    }

    pub fn get(&self, column: usize, row: usize) -> Option<Scalar> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.values.get(row * self.columns + column).copied()
    }

    /// Gray level in `[0, 1]` for a potential, mapping `[-2, 2]` linearly
    pub fn intensity(potential: Scalar) -> Scalar {
        ((potential + 2.0) / 4.0).clamp(0.0, 1.0)
    }
}
