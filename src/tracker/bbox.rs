//! Bounding box representation with format conversion utilities.
//!
//! Boxes are stored as top-left corner plus size (XYWH). Two external
//! conventions are accepted at the boundary:
//! - XYXY: x_min, y_min, x_max, y_max
//! - XYWH: x, y, width, height

use std::cmp::Ordering;

use ndarray::{Array2, Axis};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

/// Coordinate convention of raw `[f32; 4]` boxes handed to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxFormat {
    /// Two corners: (x_min, y_min, x_max, y_max).
    #[default]
    Xyxy,
    /// Corner and size: (x, y, width, height).
    Xywh,
}

/// Axis-aligned box in XYWH storage.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    /// Top-left x coordinate
    pub x: f32,
    /// Top-left y coordinate
    pub y: f32,
    /// Width of the bounding box
    pub width: f32,
    /// Height of the bounding box
    pub height: f32,
}

impl BoundingBox {
    /// Create a new box from top-left coordinates and dimensions (XYWH format).
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, width, height)
    }

    /// Create a box from XYXY format (x_min, y_min, x_max, y_max).
    #[inline]
    pub fn from_xyxy(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Self {
        Self {
            x: x_min,
            y: y_min,
            width: x_max - x_min,
            height: y_max - y_min,
        }
    }

    /// Interpret a raw quadruple according to `format`.
    #[inline]
    pub fn from_raw(raw: [f32; 4], format: BoxFormat) -> Self {
        let [a, b, c, d] = raw;
        match format {
            BoxFormat::Xyxy => Self::from_xyxy(a, b, c, d),
            BoxFormat::Xywh => Self::from_xywh(a, b, c, d),
        }
    }

    /// Convert to XYXY format: (x_min, y_min, x_max, y_max).
    #[inline]
    pub fn to_xyxy(&self) -> [f32; 4] {
        [self.x, self.y, self.x + self.width, self.y + self.height]
    }

    /// Convert to XYWH format: (x, y, width, height).
    #[inline]
    pub fn to_xywh(&self) -> [f32; 4] {
        [self.x, self.y, self.width, self.height]
    }

    #[inline]
    pub fn to_raw(&self, format: BoxFormat) -> [f32; 4] {
        match format {
            BoxFormat::Xyxy => self.to_xyxy(),
            BoxFormat::Xywh => self.to_xywh(),
        }
    }

    /// Get the center point of the bounding box.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Get the area of the bounding box.
    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Reject boxes the tracker cannot reason about: non-finite coordinates or
    /// a negative extent. Zero-sized boxes pass and simply never overlap.
    pub fn validate(&self) -> Result<(), TrackerError> {
        let finite = self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite();
        if finite && self.width >= 0.0 && self.height >= 0.0 {
            Ok(())
        } else {
            Err(TrackerError::MalformedBox {
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Calculate Intersection over Union (IoU) with another bounding box.
    ///
    /// Evaluated in f64 so that boxes far from the origin, or with very small
    /// or very large extents, still compare correctly. Returns `0.0` when the
    /// boxes do not overlap on either axis, and when the union is empty.
    pub fn iou(&self, other: &BoundingBox) -> f32 {
        // Fixed operand order: iou(a, b) and iou(b, a) round identically.
        let (p, q) = if self.canonical_cmp(other).is_le() {
            (self, other)
        } else {
            (other, self)
        };

        let inter_width = axis_overlap(p.x, p.width, q.x, q.width);
        let inter_height = axis_overlap(p.y, p.height, q.y, q.height);
        if inter_width <= 0.0 || inter_height <= 0.0 {
            return 0.0;
        }

        let area_p = f64::from(p.width) * f64::from(p.height);
        let area_q = f64::from(q.width) * f64::from(q.height);
        let inter_area = inter_width * inter_height;
        let union_area = area_p + area_q - inter_area;

        if union_area > 0.0 {
            (inter_area / union_area).clamp(0.0, 1.0) as f32
        } else {
            0.0
        }
    }

    fn canonical_cmp(&self, other: &BoundingBox) -> Ordering {
        self.to_xywh()
            .iter()
            .zip(other.to_xywh().iter())
            .map(|(a, b)| a.total_cmp(b))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

/// Length of the overlap of `[p_start, p_start + p_len]` and
/// `[q_start, q_start + q_len]`, measured from `p_start`. Non-positive when
/// the intervals are disjoint. Identical intervals yield exactly `p_len`.
#[inline]
fn axis_overlap(p_start: f32, p_len: f32, q_start: f32, q_len: f32) -> f64 {
    let offset = f64::from(q_start) - f64::from(p_start);
    f64::from(p_len).min(offset + f64::from(q_len)) - offset.max(0.0)
}

/// Free-function form of [`BoundingBox::iou`].
#[inline]
pub fn iou(a: &BoundingBox, b: &BoundingBox) -> f32 {
    a.iou(b)
}

/// Calculate the IoU matrix between detections and tracks.
///
/// Returns a matrix of shape (N, M) where N is the length of `detections`
/// and M is the length of `tracks`. Rows are filled in parallel; every cell
/// depends only on its own pair, so the result does not depend on scheduling.
pub fn iou_matrix(detections: &[BoundingBox], tracks: &[BoundingBox]) -> Array2<f32> {
    let mut ious = Array2::zeros((detections.len(), tracks.len()));

    ious.axis_iter_mut(Axis(0))
        .into_par_iter()
        .zip(detections.par_iter())
        .for_each(|(mut row, det)| {
            for (cell, trk) in row.iter_mut().zip(tracks) {
                *cell = det.iou(trk);
            }
        });

    ious
}
