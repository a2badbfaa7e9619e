//! Drawing style state: fill, stroke, modes, text settings

use macroquad::prelude::{Color, Font, BLACK, WHITE};
use crate::Rect;

/// How the four numbers passed to `rect`, `ellipse` and `image` are read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeMode {
    /// x, y of the top-left corner, then width and height
    #[default]
    Corner,
    /// x1, y1, x2, y2 of two opposite corners
    Corners,
    /// center x, y, then width and height
    Center,
    /// center x, y, then half-width and half-height
    Radius,
}

impl ShapeMode {
    pub fn resolve(self, a: f32, b: f32, c: f32, d: f32) -> Rect {
        match self {
            ShapeMode::Corner => Rect::from_corners(a, b, a + c, b + d),
            ShapeMode::Corners => Rect::from_corners(a, b, c, d),
            ShapeMode::Center => Rect::from_center(a, b, c.abs(), d.abs()),
            ShapeMode::Radius => Rect::from_center(a, b, c.abs() * 2.0, d.abs() * 2.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    Top,
    Center,
    #[default]
    Baseline,
    Bottom,
}

/// How `arc` closes its outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArcMode {
    /// Outline follows the curve only; fill still uses a pie
    #[default]
    Open,
    /// Straight line joins the two ends
    Chord,
    /// Lines to the center
    Pie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
}

#[derive(Clone)]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_weight: f32,
    pub stroke_cap: StrokeCap,
    pub rect_mode: ShapeMode,
    pub ellipse_mode: ShapeMode,
    pub image_mode: ShapeMode,
    pub tint: Option<Color>,
    pub text_size: f32,
    pub text_leading: f32,
    pub h_align: HAlign,
    pub v_align: VAlign,
    pub font: Option<Font>,
    /// Catmull-Rom tightness for `curve`
    pub curve_tightness: f32,
    pub curve_detail: usize,
    pub bezier_detail: usize,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Some(WHITE),
            stroke: Some(BLACK),
            stroke_weight: 1.0,
            stroke_cap: StrokeCap::Butt,
            rect_mode: ShapeMode::Corner,
            ellipse_mode: ShapeMode::Center,
            image_mode: ShapeMode::Corner,
            tint: None,
            text_size: 14.0,
            text_leading: 1.25,
            h_align: HAlign::Left,
            v_align: VAlign::Baseline,
            font: None,
            curve_tightness: 0.0,
            curve_detail: 20,
            bezier_detail: 20,
        }
    }
}
