//! Immediate-mode drawing surface
//!
//! `Graphics` keeps a current style and transform matrix, the way sketching
//! engines do, and turns every primitive into transformed macroquad lines,
//! triangles, text and textures. Nothing is retained between calls.

use macroquad::math::{vec2, Affine2, Mat2, Vec2};
use macroquad::prelude::{
    clear_background, draw_circle, draw_line, draw_text_ex, draw_texture_ex, draw_triangle, measure_text,
    Color, DrawTextureParams, Font, TextParams, WHITE,
};
use super::camera::Camera;
use super::curves::{
    arc_points, bezier_points, curve_points, ellipse_points, ellipse_segments, polygon_triangles,
};
use super::image::Image;
use super::style::{ArcMode, HAlign, ShapeMode, StrokeCap, Style, VAlign};
use crate::Rect;

/// Guard against runaway push() calls in a frame
const MAX_STACK_DEPTH: usize = 64;

/// What `end_shape` does with the collected vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeKind {
    #[default]
    Polygon,
    Points,
    /// Every two vertices form a line
    Lines,
    /// Every three vertices form a triangle
    Triangles,
}

/// Vertices collected between `begin_shape` and `end_shape`
#[derive(Debug, Clone, Default)]
pub struct ShapeBuilder {
    pub kind: ShapeKind,
    pub vertices: Vec<Vec2>,
}

impl ShapeBuilder {
    pub fn vertex(&mut self, x: f32, y: f32) {
        self.vertices.push(vec2(x, y));
    }

    /// Cubic bezier from the previous vertex; needs a vertex first
    pub fn bezier_vertex(&mut self, c1: Vec2, c2: Vec2, end: Vec2, detail: usize) -> bool {
        let Some(&start) = self.vertices.last() else {
            return false;
        };
        self.vertices.extend(bezier_points(start, c1, c2, end, detail).into_iter().skip(1));
        true
    }
}

pub struct Graphics {
    style: Style,
    matrix: Affine2,
    style_stack: Vec<Style>,
    matrix_stack: Vec<Affine2>,
    shape: Option<ShapeBuilder>,
}

impl Default for Graphics {
    fn default() -> Self {
        Self::new()
    }
}

impl Graphics {
    pub fn new() -> Self {
        Self {
            style: Style::default(),
            matrix: Affine2::IDENTITY,
            style_stack: Vec::new(),
            matrix_stack: Vec::new(),
            shape: None,
        }
    }

    /// Reset style, matrix and stacks; called by the engine each frame
    pub fn begin_frame(&mut self) {
        if !self.matrix_stack.is_empty() || !self.style_stack.is_empty() {
            tracing::debug!(
                matrices = self.matrix_stack.len(),
                styles = self.style_stack.len(),
                "unbalanced push/pop in previous frame"
            );
        }
        self.matrix = Affine2::IDENTITY;
        self.matrix_stack.clear();
        self.style_stack.clear();
        self.shape = None;
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn matrix(&self) -> Affine2 {
        self.matrix
    }

    // =========================================================================
    // Style
    // =========================================================================

    pub fn fill(&mut self, color: Color) {
        self.style.fill = Some(color);
    }

    pub fn no_fill(&mut self) {
        self.style.fill = None;
    }

    pub fn stroke(&mut self, color: Color) {
        self.style.stroke = Some(color);
    }

    pub fn no_stroke(&mut self) {
        self.style.stroke = None;
    }

    pub fn stroke_weight(&mut self, weight: f32) {
        self.style.stroke_weight = weight.max(0.0);
    }

    pub fn stroke_cap(&mut self, cap: StrokeCap) {
        self.style.stroke_cap = cap;
    }

    pub fn rect_mode(&mut self, mode: ShapeMode) {
        self.style.rect_mode = mode;
    }

    pub fn ellipse_mode(&mut self, mode: ShapeMode) {
        self.style.ellipse_mode = mode;
    }

    pub fn image_mode(&mut self, mode: ShapeMode) {
        self.style.image_mode = mode;
    }

    pub fn tint(&mut self, color: Color) {
        self.style.tint = Some(color);
    }

    pub fn no_tint(&mut self) {
        self.style.tint = None;
    }

    pub fn text_size(&mut self, size: f32) {
        self.style.text_size = size.max(1.0);
    }

    pub fn text_align(&mut self, h: HAlign, v: VAlign) {
        self.style.h_align = h;
        self.style.v_align = v;
    }

    /// Line spacing as a multiple of text size
    pub fn text_leading(&mut self, leading: f32) {
        self.style.text_leading = leading.max(0.0);
    }

    pub fn text_font(&mut self, font: Option<Font>) {
        self.style.font = font;
    }

    pub fn curve_tightness(&mut self, tightness: f32) {
        self.style.curve_tightness = tightness;
    }

    pub fn curve_detail(&mut self, segments: usize) {
        self.style.curve_detail = segments.max(1);
    }

    pub fn bezier_detail(&mut self, segments: usize) {
        self.style.bezier_detail = segments.max(1);
    }

    // =========================================================================
    // Stacks
    // =========================================================================

    /// Save style and matrix
    pub fn push(&mut self) {
        self.push_style();
        self.push_matrix();
    }

    /// Restore style and matrix saved by `push`
    pub fn pop(&mut self) {
        self.pop_style();
        self.pop_matrix();
    }

    pub fn push_matrix(&mut self) {
        if self.matrix_stack.len() >= MAX_STACK_DEPTH {
            tracing::warn!("matrix stack overflow, push ignored");
            return;
        }
        self.matrix_stack.push(self.matrix);
    }

    pub fn pop_matrix(&mut self) {
        match self.matrix_stack.pop() {
            Some(m) => self.matrix = m,
            None => tracing::warn!("pop_matrix with empty stack"),
        }
    }

    pub fn push_style(&mut self) {
        if self.style_stack.len() >= MAX_STACK_DEPTH {
            tracing::warn!("style stack overflow, push ignored");
            return;
        }
        self.style_stack.push(self.style.clone());
    }

    pub fn pop_style(&mut self) {
        match self.style_stack.pop() {
            Some(s) => self.style = s,
            None => tracing::warn!("pop_style with empty stack"),
        }
    }

    // =========================================================================
    // Transform
    // =========================================================================

    pub fn translate(&mut self, x: f32, y: f32) {
        self.matrix = self.matrix * Affine2::from_translation(vec2(x, y));
    }

    /// Radians, clockwise on screen
    pub fn rotate(&mut self, angle: f32) {
        self.matrix = self.matrix * Affine2::from_angle(angle);
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.matrix = self.matrix * Affine2::from_scale(vec2(sx, sy));
    }

    pub fn shear_x(&mut self, angle: f32) {
        let m = Mat2::from_cols(vec2(1.0, 0.0), vec2(angle.tan(), 1.0));
        self.matrix = self.matrix * Affine2::from_mat2(m);
    }

    pub fn shear_y(&mut self, angle: f32) {
        let m = Mat2::from_cols(vec2(1.0, angle.tan()), vec2(0.0, 1.0));
        self.matrix = self.matrix * Affine2::from_mat2(m);
    }

    pub fn apply_matrix(&mut self, m: Affine2) {
        self.matrix = self.matrix * m;
    }

    pub fn reset_matrix(&mut self) {
        self.matrix = Affine2::IDENTITY;
    }

    pub fn local_to_screen(&self, x: f32, y: f32) -> Vec2 {
        self.matrix.transform_point2(vec2(x, y))
    }

    pub fn screen_to_local(&self, x: f32, y: f32) -> Vec2 {
        self.matrix.inverse().transform_point2(vec2(x, y))
    }

    /// Push the matrix and apply the camera's world transform
    pub fn begin_camera(&mut self, camera: &Camera, viewport: Rect) {
        self.push_matrix();
        self.apply_matrix(camera.transform(viewport));
    }

    pub fn end_camera(&mut self) {
        self.pop_matrix();
    }

    /// Uniform scale approximation used for line widths and text
    fn scale_factor(&self) -> f32 {
        self.matrix.matrix2.determinant().abs().sqrt()
    }

    fn rotation(&self) -> f32 {
        let x_axis = self.matrix.matrix2.x_axis;
        x_axis.y.atan2(x_axis.x)
    }

    fn to_screen(&self, points: &[Vec2]) -> Vec<Vec2> {
        points.iter().map(|p| self.matrix.transform_point2(*p)).collect()
    }

    // =========================================================================
    // Primitives
    // =========================================================================

    pub fn background(&mut self, color: Color) {
        clear_background(color);
    }

    pub fn point(&mut self, x: f32, y: f32) {
        let Some(color) = self.style.stroke else { return };
        let p = self.local_to_screen(x, y);
        let r = (self.style.stroke_weight * self.scale_factor() * 0.5).max(0.5);
        draw_circle(p.x, p.y, r, color);
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        let pts = self.to_screen(&[vec2(x1, y1), vec2(x2, y2)]);
        self.stroke_path(&pts, false);
    }

    pub fn rect(&mut self, a: f32, b: f32, c: f32, d: f32) {
        let r = self.style.rect_mode.resolve(a, b, c, d);
        let pts = [
            vec2(r.x, r.y),
            vec2(r.right(), r.y),
            vec2(r.right(), r.bottom()),
            vec2(r.x, r.bottom()),
        ];
        self.polygon(&pts);
    }

    pub fn square(&mut self, x: f32, y: f32, size: f32) {
        self.rect(x, y, size, size);
    }

    pub fn rounded_rect(&mut self, a: f32, b: f32, c: f32, d: f32, radius: f32) {
        let r = self.style.rect_mode.resolve(a, b, c, d);
        let radius = radius.clamp(0.0, r.w.min(r.h) * 0.5);
        if radius <= 0.0 {
            self.rect(r.x, r.y, r.w, r.h);
            return;
        }
        let segs = 6;
        let half_pi = std::f32::consts::FRAC_PI_2;
        let mut pts = Vec::with_capacity((segs + 1) * 4);
        let corners = [
            (r.right() - radius, r.y + radius, -half_pi),
            (r.right() - radius, r.bottom() - radius, 0.0),
            (r.x + radius, r.bottom() - radius, half_pi),
            (r.x + radius, r.y + radius, std::f32::consts::PI),
        ];
        for (cx, cy, start) in corners {
            pts.extend(arc_points(cx, cy, radius, radius, start, start + half_pi, segs));
        }
        self.polygon(&pts);
    }

    pub fn ellipse(&mut self, a: f32, b: f32, c: f32, d: f32) {
        let r = self.style.ellipse_mode.resolve(a, b, c, d);
        let (rx, ry) = (r.w * 0.5, r.h * 0.5);
        let segments = ellipse_segments(rx * self.scale_factor(), ry * self.scale_factor());
        let pts = ellipse_points(r.center_x(), r.center_y(), rx, ry, segments);
        self.polygon(&pts);
    }

    pub fn circle(&mut self, x: f32, y: f32, diameter: f32) {
        self.ellipse(x, y, diameter, diameter);
    }

    /// Arc from `start` to `stop` radians inside the ellipse described by
    /// the first four arguments
    #[allow(clippy::too_many_arguments)]
    pub fn arc(&mut self, a: f32, b: f32, c: f32, d: f32, start: f32, stop: f32, mode: ArcMode) {
        let r = self.style.ellipse_mode.resolve(a, b, c, d);
        let (cx, cy, rx, ry) = (r.center_x(), r.center_y(), r.w * 0.5, r.h * 0.5);
        let segments = ellipse_segments(rx * self.scale_factor(), ry * self.scale_factor());
        let outline = arc_points(cx, cy, rx, ry, start, stop, segments);

        if let Some(fill) = self.style.fill {
            let mut pie = Vec::with_capacity(outline.len() + 1);
            pie.push(vec2(cx, cy));
            pie.extend_from_slice(&outline);
            self.fill_screen_polygon(&self.to_screen(&pie), fill);
        }

        if self.style.stroke.is_some() {
            let screen = match mode {
                ArcMode::Open => self.to_screen(&outline),
                ArcMode::Chord => {
                    let mut pts = outline.clone();
                    if let Some(first) = outline.first() {
                        pts.push(*first);
                    }
                    self.to_screen(&pts)
                }
                ArcMode::Pie => {
                    let mut pts = vec![vec2(cx, cy)];
                    pts.extend_from_slice(&outline);
                    pts.push(vec2(cx, cy));
                    self.to_screen(&pts)
                }
            };
            self.stroke_path(&screen, false);
        }
    }

    pub fn triangle(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) {
        self.polygon(&[vec2(x1, y1), vec2(x2, y2), vec2(x3, y3)]);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn quad(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32, x4: f32, y4: f32) {
        self.polygon(&[vec2(x1, y1), vec2(x2, y2), vec2(x3, y3), vec2(x4, y4)]);
    }

    /// Closed polygon in local coordinates, filled and stroked per style
    pub fn polygon(&mut self, points: &[Vec2]) {
        let screen = self.to_screen(points);
        if let Some(fill) = self.style.fill {
            self.fill_screen_polygon(&screen, fill);
        }
        self.stroke_path(&screen, true);
    }

    // =========================================================================
    // Shapes and curves
    // =========================================================================

    pub fn begin_shape(&mut self, kind: ShapeKind) {
        if self.shape.is_some() {
            tracing::warn!("begin_shape called twice; previous vertices dropped");
        }
        self.shape = Some(ShapeBuilder { kind, vertices: Vec::new() });
    }

    pub fn vertex(&mut self, x: f32, y: f32) {
        match self.shape.as_mut() {
            Some(shape) => shape.vertex(x, y),
            None => tracing::warn!("vertex outside begin_shape/end_shape"),
        }
    }

    pub fn bezier_vertex(&mut self, cx1: f32, cy1: f32, cx2: f32, cy2: f32, x: f32, y: f32) {
        let detail = self.style.bezier_detail;
        let added = self
            .shape
            .as_mut()
            .map(|s| s.bezier_vertex(vec2(cx1, cy1), vec2(cx2, cy2), vec2(x, y), detail))
            .unwrap_or(false);
        if !added {
            tracing::warn!("bezier_vertex needs a preceding vertex inside begin_shape");
        }
    }

    pub fn end_shape(&mut self, close: bool) {
        let Some(shape) = self.shape.take() else {
            tracing::warn!("end_shape without begin_shape");
            return;
        };
        let screen = self.to_screen(&shape.vertices);
        match shape.kind {
            ShapeKind::Polygon => {
                // an open shape is still filled; only the closing edge is left out
                if let Some(fill) = self.style.fill {
                    self.fill_screen_polygon(&screen, fill);
                }
                self.stroke_path(&screen, close);
            }
            ShapeKind::Points => {
                for p in &shape.vertices {
                    self.point(p.x, p.y);
                }
            }
            ShapeKind::Lines => {
                for pair in screen.chunks_exact(2) {
                    self.stroke_path(pair, false);
                }
            }
            ShapeKind::Triangles => {
                for tri in screen.chunks_exact(3) {
                    if let Some(fill) = self.style.fill {
                        draw_triangle(tri[0], tri[1], tri[2], fill);
                    }
                    self.stroke_path(tri, true);
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn bezier(&mut self, x1: f32, y1: f32, cx1: f32, cy1: f32, cx2: f32, cy2: f32, x2: f32, y2: f32) {
        let pts = bezier_points(vec2(x1, y1), vec2(cx1, cy1), vec2(cx2, cy2), vec2(x2, y2), self.style.bezier_detail);
        let screen = self.to_screen(&pts);
        self.stroke_path(&screen, false);
    }

    /// Catmull-Rom segment drawn between the middle two points
    #[allow(clippy::too_many_arguments)]
    pub fn curve(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32, x4: f32, y4: f32) {
        let pts = curve_points(
            vec2(x1, y1),
            vec2(x2, y2),
            vec2(x3, y3),
            vec2(x4, y4),
            self.style.curve_detail,
            self.style.curve_tightness,
        );
        let screen = self.to_screen(&pts);
        self.stroke_path(&screen, false);
    }

    // =========================================================================
    // Text
    // =========================================================================

    pub fn text_width(&self, text: &str) -> f32 {
        measure_text(text, self.style.font.as_ref(), self.style.text_size.round() as u16, 1.0).width
    }

    /// Height above the baseline for the current size
    pub fn text_ascent(&self) -> f32 {
        measure_text("Ag", self.style.font.as_ref(), self.style.text_size.round() as u16, 1.0).offset_y
    }

    /// Draw text at (x, y) honoring alignment; `\n` starts a new line
    pub fn text(&mut self, text: &str, x: f32, y: f32) {
        let Some(color) = self.style.fill else { return };
        let line_height = self.style.text_size * self.style.text_leading;
        let lines: Vec<&str> = text.split('\n').collect();
        let block_height = line_height * (lines.len().saturating_sub(1)) as f32;
        let ascent = self.text_ascent();

        let first_baseline = match self.style.v_align {
            VAlign::Baseline => y,
            VAlign::Top => y + ascent,
            VAlign::Center => y + ascent * 0.5 - block_height * 0.5,
            VAlign::Bottom => y - block_height,
        };

        for (i, line) in lines.iter().enumerate() {
            let width = self.text_width(line);
            let lx = match self.style.h_align {
                HAlign::Left => x,
                HAlign::Center => x - width * 0.5,
                HAlign::Right => x - width,
            };
            self.draw_text_line(line, lx, first_baseline + line_height * i as f32, color);
        }
    }

    /// Word-wrapped text clipped to the box height. Returns lines drawn.
    pub fn text_in_rect(&mut self, text: &str, bounds: Rect) -> usize {
        let Some(color) = self.style.fill else { return 0 };
        let line_height = self.style.text_size * self.style.text_leading;
        let ascent = self.text_ascent();
        let lines = wrap_text(text, bounds.w, |s| self.text_width(s));

        let mut drawn = 0;
        for (i, line) in lines.iter().enumerate() {
            let top = bounds.y + line_height * i as f32;
            if top + line_height > bounds.bottom() + 0.5 {
                break;
            }
            let width = self.text_width(line);
            let lx = match self.style.h_align {
                HAlign::Left => bounds.x,
                HAlign::Center => bounds.center_x() - width * 0.5,
                HAlign::Right => bounds.right() - width,
            };
            self.draw_text_line(line, lx, top + ascent, color);
            drawn += 1;
        }
        drawn
    }

    fn draw_text_line(&self, line: &str, x: f32, baseline: f32, color: Color) {
        let p = self.local_to_screen(x, baseline);
        let params = TextParams {
            font: self.style.font.as_ref(),
            font_size: self.style.text_size.round() as u16,
            font_scale: self.scale_factor(),
            rotation: self.rotation(),
            color,
            ..Default::default()
        };
        // Round positions to integer pixels for crisp rendering when unrotated
        let (px, py) = if params.rotation == 0.0 { (p.x.round(), p.y.round()) } else { (p.x, p.y) };
        draw_text_ex(line, px, py, params);
    }

    // =========================================================================
    // Images
    // =========================================================================

    /// Draw at natural size
    pub fn image(&mut self, img: &Image, x: f32, y: f32) {
        self.image_sized(img, x, y, img.width(), img.height());
    }

    pub fn image_sized(&mut self, img: &Image, a: f32, b: f32, c: f32, d: f32) {
        let dst = self.style.image_mode.resolve(a, b, c, d);
        self.draw_image(img, None, dst);
    }

    /// Draw the `source` pixel rectangle of `img` into the destination
    pub fn image_region(&mut self, img: &Image, source: Rect, a: f32, b: f32, c: f32, d: f32) {
        let dst = self.style.image_mode.resolve(a, b, c, d);
        self.draw_image(img, Some(source), dst);
    }

    fn draw_image(&self, img: &Image, source: Option<Rect>, dst: Rect) {
        let top_left = self.local_to_screen(dst.x, dst.y);
        let scale = self.scale_factor();
        let params = DrawTextureParams {
            dest_size: Some(vec2(dst.w * scale, dst.h * scale)),
            source: source.map(|s| macroquad::math::Rect::new(s.x, s.y, s.w, s.h)),
            rotation: self.rotation(),
            pivot: Some(top_left),
            ..Default::default()
        };
        draw_texture_ex(img.texture(), top_left.x, top_left.y, self.style.tint.unwrap_or(WHITE), params);
    }

    // =========================================================================
    // Screen-space helpers
    // =========================================================================

    fn fill_screen_polygon(&self, screen: &[Vec2], color: Color) {
        for [a, b, c] in polygon_triangles(screen) {
            draw_triangle(a, b, c, color);
        }
    }

    fn stroke_path(&self, screen: &[Vec2], closed: bool) {
        let Some(color) = self.style.stroke else { return };
        if screen.len() < 2 || self.style.stroke_weight <= 0.0 {
            return;
        }
        let thickness = self.style.stroke_weight * self.scale_factor();
        for pair in screen.windows(2) {
            draw_line(pair[0].x, pair[0].y, pair[1].x, pair[1].y, thickness, color);
        }
        if closed && screen.len() > 2 {
            let (first, last) = (screen[0], screen[screen.len() - 1]);
            draw_line(last.x, last.y, first.x, first.y, thickness, color);
        }
        // Joints are always rounded on closed outlines to hide gaps at corners
        if (self.style.stroke_cap == StrokeCap::Round || closed) && thickness > 1.5 {
            for p in screen {
                draw_circle(p.x, p.y, thickness * 0.5, color);
            }
        }
    }
}

/// Greedy word wrap using a width measure
pub fn wrap_text(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if measure(&candidate) <= max_width || current.is_empty() {
                current = candidate;
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            }
        }
        lines.push(current);
    }
    lines
}
