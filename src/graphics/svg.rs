// SVG 表面：把绘图命令序列化成独立的 SVG 文档

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use log::debug;

use crate::core::Result;
use super::surface::{DrawCommand, Ink, PathSegment, Style, Surface};

#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    background: Option<Ink>,
    elements: Vec<String>,
}

// 保留两位小数并去掉多余的零，保证输出稳定
fn num(value: f64) -> String {
    let text = format!("{:.2}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

fn style_attrs(style: &Style) -> String {
    let mut attrs = String::new();
    match style.fill {
        Some(ink) => {
            let _ = write!(attrs, " fill=\"{}\"", ink);
        }
        None => attrs.push_str(" fill=\"none\""),
    }
    if let Some(stroke) = style.stroke {
        let _ = write!(
            attrs,
            " stroke=\"{}\" stroke-width=\"{}\" stroke-linejoin=\"round\"",
            stroke.ink,
            num(stroke.width)
        );
    }
    attrs
}

fn path_data(segments: &[PathSegment]) -> String {
    let parts: Vec<String> = segments
        .iter()
        .map(|segment| match segment {
            PathSegment::MoveTo(p) => format!("M{} {}", num(p.x), num(p.y)),
            PathSegment::LineTo(p) => format!("L{} {}", num(p.x), num(p.y)),
            PathSegment::QuadTo { ctrl, to } => {
                format!("Q{} {} {} {}", num(ctrl.x), num(ctrl.y), num(to.x), num(to.y))
            }
            PathSegment::Close => "Z".to_string(),
        })
        .collect();
    parts.join(" ")
}

impl SvgSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: f64::from(width),
            height: f64::from(height),
            background: None,
            elements: Vec::new(),
        }
    }

    pub fn with_background(mut self, ink: Ink) -> Self {
        self.background = Some(ink);
        self
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
            w = num(self.width),
            h = num(self.height)
        );
        if let Some(ink) = self.background {
            let _ = writeln!(out, "  <rect width=\"100%\" height=\"100%\" fill=\"{}\"/>", ink);
        }
        for element in &self.elements {
            let _ = writeln!(out, "  {}", element);
        }
        out.push_str("</svg>\n");
        out
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_svg())?;
        debug!("SVG已保存到: {:?} ({} elements)", path, self.elements.len());
        Ok(())
    }
}

impl Surface for SvgSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn draw(&mut self, command: DrawCommand) {
        let element = match &command {
            DrawCommand::Circle { center, radius, style } => format!(
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{}/>",
                num(center.x),
                num(center.y),
                num(*radius),
                style_attrs(style)
            ),
            DrawCommand::Ellipse { center, radii, style } => format!(
                "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\"{}/>",
                num(center.x),
                num(center.y),
                num(radii.x),
                num(radii.y),
                style_attrs(style)
            ),
            DrawCommand::Path { segments, style } => {
                format!("<path d=\"{}\"{}/>", path_data(segments), style_attrs(style))
            }
        };
        self.elements.push(element);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use tempfile::TempDir;

    #[test]
    fn test_number_formatting() {
        assert_eq!(num(1.0), "1");
        assert_eq!(num(1.5), "1.5");
        assert_eq!(num(2.345), "2.35");
        assert_eq!(num(-0.001), "0");
    }

    #[test]
    fn test_circle_element() {
        let mut surface = SvgSurface::new(100, 100);
        surface.draw(DrawCommand::Circle {
            center: DVec2::new(50.0, 50.0),
            radius: 10.0,
            style: Style::fill_and_stroke(Ink::WHITE, Ink::SLATE, 2.0),
        });

        let svg = surface.to_svg();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100\""));
        assert!(svg.contains(
            "<circle cx=\"50\" cy=\"50\" r=\"10\" fill=\"#ffffff\" stroke=\"#2c3e50\" stroke-width=\"2\" stroke-linejoin=\"round\"/>"
        ));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_path_element() {
        let mut surface = SvgSurface::new(10, 10).with_background(Ink::WHITE);
        surface.draw(DrawCommand::Path {
            segments: vec![
                PathSegment::MoveTo(DVec2::new(0.0, 0.0)),
                PathSegment::QuadTo { ctrl: DVec2::new(5.0, -2.5), to: DVec2::new(10.0, 0.0) },
                PathSegment::Close,
            ],
            style: Style::stroke(Ink::SLATE, 3.0),
        });

        let svg = surface.to_svg();
        assert!(svg.contains("<rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>"));
        assert!(svg.contains("d=\"M0 0 Q5 -2.5 10 0 Z\" fill=\"none\""));
    }

    #[test]
    fn test_save_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("creature.svg");
        let surface = SvgSurface::new(20, 20);
        surface.save(&path).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("viewBox=\"0 0 20 20\""));
    }
}
