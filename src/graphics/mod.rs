// 图形模块 - 把生物记录画成矢量图形
// 渲染器只依赖 Surface 抽象，SVG 和录制表面是两个内置实现

pub mod renderer;
pub mod surface;
pub mod svg;

// 重新导出主要类型
pub use renderer::{spot_positions, CreatureRenderer, LOGICAL_SIZE};
pub use surface::{DrawCommand, Ink, PathSegment, RecordingSurface, Stroke, Style, Surface};
pub use svg::SvgSurface;

use crate::core::config::RenderSettings;
use crate::core::Result;
use crate::creature_engine::CreatureRecord;

/// Renders a record into a square SVG document sized from `settings`.
pub fn render_svg(record: &CreatureRecord, settings: &RenderSettings) -> Result<String> {
    if settings.canvas_size == 0 {
        return Err(crate::creature_error!(RenderError, "canvas size must be positive"));
    }
    let renderer = CreatureRenderer::from_settings(settings)?;
    let mut surface = SvgSurface::new(settings.canvas_size, settings.canvas_size);
    renderer.render(&mut surface, record);
    Ok(surface.to_svg())
}
