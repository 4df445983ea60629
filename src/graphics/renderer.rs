/*
 * Barcode Creatures - Creature Renderer
 * 逻辑坐标系：280x280，原点在画布中心，y轴向下
 * 绘制顺序：肢体 -> 身体 -> 表面花纹 -> 眼睛 -> 头部特征
 * 斑点位置由同一条码重新播种的序列重放，不读取记录之外的任何状态
 */

use std::f64::consts::{FRAC_PI_2, TAU};

use glam::DVec2;
use log::trace;

use crate::core::config::RenderSettings;
use crate::core::Result;
use crate::creature_engine::{sequence_for, BodyType, CreatureRecord, LimbType, SurfacePattern};
use super::surface::{DrawCommand, Ink, PathSegment, Style, Surface};

/// Width and height of the logical drawing space.
pub const LOGICAL_SIZE: f64 = 280.0;

const LIMB_BASE_RADIUS: f64 = 55.0;
const TENTACLE_SEGMENTS: u32 = 4;
const SPOT_COUNT: usize = 5;
const SPOT_SPREAD: i64 = 30;
const STRIPE_XS: [f64; 6] = [-40.0, -25.0, -10.0, 5.0, 20.0, 35.0];

fn polar(angle: f64, radius: f64) -> DVec2 {
    DVec2::new(angle.cos(), angle.sin()) * radius
}

// 正多边形顶点，offset 为第一个顶点的起始角
fn regular_polygon(sides: u32, radius: f64, offset: f64) -> Vec<DVec2> {
    (0..sides)
        .map(|i| polar(f64::from(i) * TAU / f64::from(sides) + offset, radius))
        .collect()
}

/// Maps logical coordinates onto a surface and emits commands.
struct Canvas<'s, S: Surface + ?Sized> {
    surface: &'s mut S,
    origin: DVec2,
    scale: f64,
}

impl<'s, S: Surface + ?Sized> Canvas<'s, S> {
    fn new(surface: &'s mut S) -> Self {
        let (width, height) = surface.size();
        Self {
            origin: DVec2::new(width, height) / 2.0,
            scale: width.min(height) / LOGICAL_SIZE,
            surface,
        }
    }

    fn point(&self, p: DVec2) -> DVec2 {
        self.origin + p * self.scale
    }

    fn style(&self, mut style: Style) -> Style {
        if let Some(stroke) = style.stroke.as_mut() {
            stroke.width *= self.scale;
        }
        style
    }

    fn circle(&mut self, center: DVec2, radius: f64, style: Style) {
        let command = DrawCommand::Circle {
            center: self.point(center),
            radius: radius * self.scale,
            style: self.style(style),
        };
        self.surface.draw(command);
    }

    fn ellipse(&mut self, center: DVec2, radii: DVec2, style: Style) {
        let command = DrawCommand::Ellipse {
            center: self.point(center),
            radii: radii * self.scale,
            style: self.style(style),
        };
        self.surface.draw(command);
    }

    fn path(&mut self, segments: &[PathSegment], style: Style) {
        let segments = segments
            .iter()
            .map(|segment| match *segment {
                PathSegment::MoveTo(p) => PathSegment::MoveTo(self.point(p)),
                PathSegment::LineTo(p) => PathSegment::LineTo(self.point(p)),
                PathSegment::QuadTo { ctrl, to } => PathSegment::QuadTo {
                    ctrl: self.point(ctrl),
                    to: self.point(to),
                },
                PathSegment::Close => PathSegment::Close,
            })
            .collect();
        let command = DrawCommand::Path {
            segments,
            style: self.style(style),
        };
        self.surface.draw(command);
    }

    fn polygon(&mut self, points: &[DVec2], style: Style) {
        let mut segments = Vec::with_capacity(points.len() + 1);
        for (i, p) in points.iter().enumerate() {
            segments.push(if i == 0 {
                PathSegment::MoveTo(*p)
            } else {
                PathSegment::LineTo(*p)
            });
        }
        segments.push(PathSegment::Close);
        self.path(&segments, style);
    }

    fn line(&mut self, from: DVec2, to: DVec2, ink: Ink, width: f64) {
        self.path(
            &[PathSegment::MoveTo(from), PathSegment::LineTo(to)],
            Style::stroke(ink, width),
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreatureRenderer {
    outline: Ink,
}

impl Default for CreatureRenderer {
    fn default() -> Self {
        Self { outline: Ink::SLATE }
    }
}

impl CreatureRenderer {
    pub fn new(outline: Ink) -> Self {
        Self { outline }
    }

    pub fn from_settings(settings: &RenderSettings) -> Result<Self> {
        Ok(Self::new(settings.outline.parse()?))
    }

    pub fn outline(&self) -> Ink {
        self.outline
    }

    /// Draws `record` onto `surface`, scaled to fit and centred. The surface
    /// is not cleared first.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, record: &CreatureRecord) {
        let mut canvas = Canvas::new(surface);
        trace!("rendering {} at scale {:.3}", record.id, canvas.scale);

        if record.limb_count > 0 {
            self.draw_limbs(&mut canvas, record);
        }
        self.draw_body(&mut canvas, record);
        self.draw_pattern(&mut canvas, record);
        self.draw_eyes(&mut canvas, record);
        self.draw_cranial(&mut canvas, record);
    }

    fn draw_limbs<S: Surface + ?Sized>(&self, canvas: &mut Canvas<'_, S>, record: &CreatureRecord) {
        let secondary = Ink::from(record.colors.secondary);
        let accent = Ink::from(record.colors.accent);
        let count = f64::from(record.limb_count);

        for i in 0..record.limb_count {
            let angle = f64::from(i) * TAU / count;
            let base = polar(angle, LIMB_BASE_RADIUS);

            match record.limb_type {
                LimbType::Tentacle => {
                    let mut segments = vec![PathSegment::MoveTo(base)];
                    for s in 1..=TENTACLE_SEGMENTS {
                        let s = f64::from(s);
                        let along = polar(angle, LIMB_BASE_RADIUS + s * 15.0);
                        let wave = polar(angle + FRAC_PI_2, s.sin() * 8.0);
                        segments.push(PathSegment::LineTo(along + wave));
                    }
                    canvas.path(&segments, Style::stroke(secondary, 6.0));

                    let tip = LIMB_BASE_RADIUS + f64::from(TENTACLE_SEGMENTS) * 15.0;
                    canvas.circle(polar(angle, tip), 6.0, Style::fill(accent));
                }
                LimbType::Wing => {
                    let segments = [
                        PathSegment::MoveTo(base),
                        PathSegment::QuadTo {
                            ctrl: polar(angle, 90.0),
                            to: polar(angle - 0.5, 80.0),
                        },
                        PathSegment::LineTo(base),
                    ];
                    canvas.path(&segments, Style::fill_and_stroke(secondary, self.outline, 3.0));
                }
                LimbType::Standard | LimbType::Fin => {
                    canvas.circle(base, 18.0, Style::fill_and_stroke(secondary, self.outline, 3.0));
                    canvas.circle(
                        polar(angle, 80.0),
                        12.0,
                        Style::fill_and_stroke(accent, self.outline, 3.0),
                    );
                }
            }
        }
    }

    fn draw_body<S: Surface + ?Sized>(&self, canvas: &mut Canvas<'_, S>, record: &CreatureRecord) {
        let style = Style::fill_and_stroke(Ink::from(record.colors.primary), self.outline, 4.0);

        match record.body_type {
            BodyType::Circle => canvas.circle(DVec2::ZERO, 50.0, style),
            BodyType::Square => canvas.polygon(
                &[
                    DVec2::new(-45.0, -45.0),
                    DVec2::new(45.0, -45.0),
                    DVec2::new(45.0, 45.0),
                    DVec2::new(-45.0, 45.0),
                ],
                style,
            ),
            BodyType::Triangle => canvas.polygon(
                &[
                    DVec2::new(0.0, -55.0),
                    DVec2::new(-50.0, 45.0),
                    DVec2::new(50.0, 45.0),
                ],
                style,
            ),
            BodyType::Pentagon => canvas.polygon(&regular_polygon(5, 50.0, -FRAC_PI_2), style),
            BodyType::Hexagon => canvas.polygon(&regular_polygon(6, 50.0, 0.0), style),
            BodyType::Octagon => canvas.polygon(&regular_polygon(8, 50.0, 0.0), style),
            BodyType::Ellipse => canvas.ellipse(DVec2::ZERO, DVec2::new(50.0, 35.0), style),
        }
    }

    fn draw_pattern<S: Surface + ?Sized>(&self, canvas: &mut Canvas<'_, S>, record: &CreatureRecord) {
        let accent = Ink::from(record.colors.accent);

        match record.pattern {
            SurfacePattern::Spotted => {
                for spot in spot_positions(record) {
                    canvas.circle(spot, 6.0, Style::fill(accent));
                }
            }
            SurfacePattern::Striped => {
                for x in STRIPE_XS {
                    canvas.line(DVec2::new(x, -50.0), DVec2::new(x, 50.0), accent, 3.0);
                }
            }
            SurfacePattern::Smooth | SurfacePattern::Geometric => {}
        }
    }

    fn draw_eyes<S: Surface + ?Sized>(&self, canvas: &mut Canvas<'_, S>, record: &CreatureRecord) {
        let sclera = Style::fill_and_stroke(Ink::WHITE, self.outline, 2.0);
        let pupil = Style::fill(Ink::SLATE);

        let (positions, radius): (Vec<DVec2>, f64) = match record.eye_count {
            0 => return,
            1 => (vec![DVec2::new(0.0, -10.0)], 16.0),
            2 => (vec![DVec2::new(-18.0, -15.0), DVec2::new(18.0, -15.0)], 12.0),
            3 => (
                vec![
                    DVec2::new(-20.0, -15.0),
                    DVec2::new(0.0, -20.0),
                    DVec2::new(20.0, -15.0),
                ],
                10.0,
            ),
            n => (
                regular_polygon(u32::from(n), 25.0, 0.0)
                    .into_iter()
                    .map(|p| p + DVec2::new(0.0, -10.0))
                    .collect(),
                8.0,
            ),
        };

        for position in positions {
            canvas.circle(position, radius, sclera);
            canvas.circle(position, radius / 2.0, pupil);
        }
    }

    fn draw_cranial<S: Surface + ?Sized>(&self, canvas: &mut Canvas<'_, S>, record: &CreatureRecord) {
        let accent = Ink::from(record.colors.accent);
        let features = &record.features;

        if features.has_spikes {
            for i in 0..5 {
                let x = -30.0 + f64::from(i) * 15.0;
                canvas.polygon(
                    &[
                        DVec2::new(x - 5.0, -50.0),
                        DVec2::new(x, -70.0),
                        DVec2::new(x + 5.0, -50.0),
                    ],
                    Style::fill_and_stroke(accent, self.outline, 2.0),
                );
            }
        }

        if features.has_horns {
            for side in [-1.0, 1.0] {
                let root = DVec2::new(35.0 * side, -45.0);
                canvas.circle(root, 10.0, Style::fill_and_stroke(accent, self.outline, 3.0));
                canvas.line(root, DVec2::new(45.0 * side, -65.0), self.outline, 3.0);
            }
        }

        if features.has_antennae {
            for side in [-1.0, 1.0] {
                let tip = DVec2::new(20.0 * side, -75.0);
                canvas.line(DVec2::new(15.0 * side, -50.0), tip, accent, 3.0);
                canvas.circle(tip, 5.0, Style::fill(accent));
            }
        }

        if features.has_crest {
            let segments = [
                PathSegment::MoveTo(DVec2::new(-25.0, -50.0)),
                PathSegment::QuadTo {
                    ctrl: DVec2::new(0.0, -70.0),
                    to: DVec2::new(25.0, -50.0),
                },
                PathSegment::LineTo(DVec2::new(20.0, -45.0)),
                PathSegment::QuadTo {
                    ctrl: DVec2::new(0.0, -60.0),
                    to: DVec2::new(-20.0, -45.0),
                },
                PathSegment::Close,
            ];
            canvas.path(&segments, Style::fill_and_stroke(accent, self.outline, 2.0));
        }
    }
}

/// Spot centres in logical coordinates, replayed from the first draws of a
/// fresh sequence seeded from the record's identifier.
pub fn spot_positions(record: &CreatureRecord) -> Vec<DVec2> {
    let mut seq = sequence_for(&record.id);
    (0..SPOT_COUNT)
        .map(|_| {
            let x = seq.next_int(-SPOT_SPREAD, SPOT_SPREAD);
            let y = seq.next_int(-SPOT_SPREAD, SPOT_SPREAD);
            DVec2::new(x as f64, y as f64)
        })
        .collect()
}
