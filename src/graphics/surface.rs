// 绘图表面抽象 - 渲染器只通过这里的矢量命令输出
// 表面由调用方持有，渲染前清空也由调用方负责

use std::fmt;
use std::str::FromStr;

use glam::DVec2;

use crate::core::{CreatureError, Result};
use crate::creature_engine::HslColor;

/// Paint colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ink {
    Hsl(HslColor),
    Rgb([u8; 3]),
}

impl Ink {
    pub const WHITE: Ink = Ink::Rgb([0xff, 0xff, 0xff]);
    pub const SLATE: Ink = Ink::Rgb([0x2c, 0x3e, 0x50]);

    pub fn to_rgb(&self) -> [u8; 3] {
        match self {
            Ink::Hsl(color) => color.to_rgb(),
            Ink::Rgb(rgb) => *rgb,
        }
    }
}

impl From<HslColor> for Ink {
    fn from(color: HslColor) -> Self {
        Ink::Hsl(color)
    }
}

impl fmt::Display for Ink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ink::Hsl(color) => write!(f, "{}", color),
            Ink::Rgb([r, g, b]) => write!(f, "#{:02x}{:02x}{:02x}", r, g, b),
        }
    }
}

impl FromStr for Ink {
    type Err = CreatureError;

    /// Accepts `#rrggbb` or `hsl(h, s%, l%)`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
                return Ok(Ink::Rgb([channel(0), channel(2), channel(4)]));
            }
            return Err(CreatureError::Parse(format!("invalid hex colour {:?}", s)));
        }
        Ok(Ink::Hsl(s.parse()?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub ink: Ink,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Style {
    pub fill: Option<Ink>,
    pub stroke: Option<Stroke>,
}

impl Style {
    pub fn fill(ink: Ink) -> Self {
        Self { fill: Some(ink), stroke: None }
    }

    pub fn stroke(ink: Ink, width: f64) -> Self {
        Self { fill: None, stroke: Some(Stroke { ink, width }) }
    }

    pub fn fill_and_stroke(fill: Ink, stroke: Ink, width: f64) -> Self {
        Self {
            fill: Some(fill),
            stroke: Some(Stroke { ink: stroke, width }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(DVec2),
    LineTo(DVec2),
    QuadTo { ctrl: DVec2, to: DVec2 },
    Close,
}

/// One vector drawing operation, in surface pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Circle { center: DVec2, radius: f64, style: Style },
    Ellipse { center: DVec2, radii: DVec2, style: Style },
    Path { segments: Vec<PathSegment>, style: Style },
}

impl DrawCommand {
    pub fn style(&self) -> &Style {
        match self {
            DrawCommand::Circle { style, .. }
            | DrawCommand::Ellipse { style, .. }
            | DrawCommand::Path { style, .. } => style,
        }
    }
}

/// Externally owned 2D vector target.
pub trait Surface {
    /// Pixel width and height.
    fn size(&self) -> (f64, f64);
    fn draw(&mut self, command: DrawCommand);
}

/// Keeps every command in order; two renders compare equal iff they drew
/// the same thing.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn draw(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ink_display() {
        assert_eq!(Ink::SLATE.to_string(), "#2c3e50");
        assert_eq!(Ink::from(HslColor::new(12, 70, 55)).to_string(), "hsl(12, 70%, 55%)");
    }

    #[test]
    fn test_ink_parse() {
        assert_eq!("#2C3E50".parse::<Ink>().unwrap(), Ink::SLATE);
        assert_eq!(
            "hsl(1, 2%, 3%)".parse::<Ink>().unwrap(),
            Ink::Hsl(HslColor::new(1, 2, 3))
        );
        assert!("#12345".parse::<Ink>().is_err());
        assert!("slate".parse::<Ink>().is_err());
    }

    #[test]
    fn test_recording_surface_keeps_order() {
        let mut surface = RecordingSurface::new(280.0, 280.0);
        surface.draw(DrawCommand::Circle {
            center: DVec2::ZERO,
            radius: 1.0,
            style: Style::fill(Ink::WHITE),
        });
        surface.draw(DrawCommand::Path {
            segments: vec![PathSegment::MoveTo(DVec2::ZERO), PathSegment::LineTo(DVec2::ONE)],
            style: Style::stroke(Ink::SLATE, 2.0),
        });

        assert_eq!(surface.commands().len(), 2);
        assert_eq!(surface.commands()[1].style().stroke.map(|s| s.width), Some(2.0));
        surface.clear();
        assert!(surface.commands().is_empty());
    }
}
