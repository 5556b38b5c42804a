//! Builder for creating Detection objects from either box convention.

use crate::integration::Detection;
use crate::tracker::{BoundingBox, BoxFormat};

#[derive(Debug, Clone, Default)]
pub struct DetectionBuilder {
    bbox: BoundingBox,
    confidence: f32,
    class_id: Option<usize>,
}

impl DetectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bounding box in XYXY format (x_min, y_min, x_max, y_max).
    pub fn xyxy(mut self, x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Self {
        self.bbox = BoundingBox::from_xyxy(x_min, y_min, x_max, y_max);
        self
    }

    /// Set bounding box in XYWH format (x, y, width, height).
    pub fn xywh(mut self, x: f32, y: f32, w: f32, h: f32) -> Self {
        self.bbox = BoundingBox::from_xywh(x, y, w, h);
        self
    }

    /// Set bounding box from a raw quadruple in the given convention.
    pub fn raw(mut self, raw: [f32; 4], format: BoxFormat) -> Self {
        self.bbox = BoundingBox::from_raw(raw, format);
        self
    }

    pub fn confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn class_id(mut self, class_id: usize) -> Self {
        self.class_id = Some(class_id);
        self
    }

    pub fn build(self) -> Detection {
        Detection {
            bbox: self.bbox,
            confidence: self.confidence,
            class_id: self.class_id,
        }
    }
}
