//! Proportionally filled status bars.
//!
//! A bar is drawn as three layers, always in this order: background, fill,
//! border. Drawing the border last keeps the fill from spilling over it.

use bevy::math::Isometry2d;
use bevy::prelude::*;

/// Shared UI palette.
pub struct UiColors;

impl UiColors {
    pub const BACKGROUND: Color = Color::srgb(0.133, 0.133, 0.133);
    pub const BORDER: Color = Color::srgb(0.067, 0.067, 0.067);
    pub const BORDER_ACTIVE: Color = Color::srgb(1.0, 0.843, 0.0);
    pub const HEALTH: Color = Color::srgb(1.0, 0.0, 0.0);
    pub const ENERGY: Color = Color::srgb(0.0, 0.0, 1.0);
    pub const TEXT: Color = Color::srgb(0.933, 0.933, 0.933);
}

/// Drawing primitives a bar needs.
pub trait BarPainter {
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn outline_rect(&mut self, rect: Rect, color: Color, thickness: f32);
}

/// Fraction of the bar to fill, clamped to `[0, 1]`.
///
/// A non-positive `max` yields an empty bar rather than a NaN.
pub fn compute_fill_ratio(current: f32, max: f32) -> f32 {
    if !(max > 0.0) {
        return 0.0;
    }
    (current.clamp(0.0, max) / max).clamp(0.0, 1.0)
}

/// Fixed bar geometry. `origin` is the corner the fill grows from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusBar {
    pub origin: Vec2,
    pub size: Vec2,
    /// Border thickness
    pub border: f32,
}

impl StatusBar {
    pub const fn new(origin: Vec2, size: Vec2, border: f32) -> Self {
        Self {
            origin,
            size,
            border,
        }
    }

    pub fn from_rect(rect: Rect, border: f32) -> Self {
        Self::new(rect.min, rect.size(), border)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_corners(self.origin, self.origin + self.size)
    }

    /// Width of the fill for an already-computed ratio.
    pub fn fill_width(&self, ratio: f32) -> f32 {
        self.size.x * ratio.clamp(0.0, 1.0)
    }

    pub fn fill_rect(&self, ratio: f32) -> Rect {
        Rect::from_corners(
            self.origin,
            self.origin + Vec2::new(self.fill_width(ratio), self.size.y),
        )
    }

    /// Draw the bar for `current` out of `max`.
    pub fn render(&self, painter: &mut impl BarPainter, current: f32, max: f32, fill_color: Color) {
        let ratio = compute_fill_ratio(current, max);

        painter.fill_rect(self.rect(), UiColors::BACKGROUND);
        painter.fill_rect(self.fill_rect(ratio), fill_color);
        painter.outline_rect(self.rect(), UiColors::BORDER, self.border);
    }
}

/// World-space bars drawn with gizmos. Gizmos only draw lines, so fills are
/// hatched one unit apart.
impl BarPainter for Gizmos<'_, '_> {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if rect.width() <= 0.0 {
            return;
        }

        let mut y = rect.min.y;
        while y <= rect.max.y {
            self.line_2d(Vec2::new(rect.min.x, y), Vec2::new(rect.max.x, y), color);
            y += 1.0;
        }
    }

    fn outline_rect(&mut self, rect: Rect, color: Color, thickness: f32) {
        let rings = thickness.max(1.0).round() as u32;
        for ring in 0..rings {
            let inset = Vec2::splat(ring as f32 * 2.0);
            self.rect_2d(
                Isometry2d::from_translation(rect.center()),
                (rect.size() - inset).max(Vec2::ZERO),
                color,
            );
        }
    }
}
