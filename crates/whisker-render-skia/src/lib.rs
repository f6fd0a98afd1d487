// File: crates/whisker-render-skia/src/lib.rs
// Summary: Skia renderer; Surface impl over a canvas plus headless PNG output.

use anyhow::Result;
use skia_safe as skia;

use whisker_core::geometry::{Point, Rect, Segment};
use whisker_core::surface::{Color, LineStyle, Surface};

fn to_skia_color(c: Color) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

fn to_skia_rect(r: &Rect) -> skia::Rect {
    skia::Rect::new(
        r.min_x as f32,
        r.min_y as f32,
        r.max_x as f32,
        r.max_y as f32,
    )
}

fn oval_rect(center: Point, rx: f64, ry: f64) -> skia::Rect {
    skia::Rect::new(
        (center.x - rx) as f32,
        (center.y - ry) as f32,
        (center.x + rx) as f32,
        (center.y + ry) as f32,
    )
}

fn stroke_paint(style: &LineStyle) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_color(to_skia_color(style.color));
    paint.set_anti_alias(true);
    paint.set_stroke_width(style.width);
    paint.set_style(skia::paint::Style::Stroke);
    paint
}

fn fill_paint(color: Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_color(to_skia_color(color));
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint
}

/// Draws core primitives onto a borrowed Skia canvas. Each call builds its
/// paint from the explicit style argument; no paint state is carried
/// between calls.
pub struct CanvasSurface<'a> {
    canvas: &'a skia::Canvas,
}

impl<'a> CanvasSurface<'a> {
    pub fn new(canvas: &'a skia::Canvas) -> Self {
        Self { canvas }
    }
}

impl Surface for CanvasSurface<'_> {
    fn draw_line(&mut self, segment: &Segment, style: &LineStyle) {
        self.canvas.draw_line(
            (segment.x1 as f32, segment.y1 as f32),
            (segment.x2 as f32, segment.y2 as f32),
            &stroke_paint(style),
        );
    }

    fn draw_rect(&mut self, rect: &Rect, style: &LineStyle) {
        self.canvas.draw_rect(to_skia_rect(rect), &stroke_paint(style));
    }

    fn fill_rect(&mut self, rect: &Rect, color: Color) {
        self.canvas.draw_rect(to_skia_rect(rect), &fill_paint(color));
    }

    fn draw_ellipse(&mut self, center: Point, rx: f64, ry: f64, style: &LineStyle) {
        self.canvas
            .draw_oval(oval_rect(center, rx, ry), &stroke_paint(style));
    }

    fn fill_ellipse(&mut self, center: Point, rx: f64, ry: f64, color: Color) {
        self.canvas
            .draw_oval(oval_rect(center, rx, ry), &fill_paint(color));
    }

    fn draw_path(&mut self, points: &[Point], style: &LineStyle) {
        let Some(first) = points.first() else {
            return;
        };
        let mut path = skia::Path::new();
        path.move_to((first.x as f32, first.y as f32));
        for p in &points[1..] {
            path.line_to((p.x as f32, p.y as f32));
        }
        self.canvas.draw_path(&path, &stroke_paint(style));
    }
}

/// Render `draw` onto a fresh CPU raster surface and return PNG bytes.
pub fn render_png_bytes(
    width: i32,
    height: i32,
    background: Color,
    draw: impl FnOnce(&mut dyn Surface),
) -> Result<Vec<u8>> {
    let mut surface = skia::surfaces::raster_n32_premul((width, height))
        .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
    {
        let canvas = surface.canvas();
        canvas.clear(to_skia_color(background));
        let mut target = CanvasSurface::new(canvas);
        draw(&mut target);
    }
    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
    Ok(data.as_bytes().to_vec())
}

/// Render and write a PNG, creating parent directories as needed.
pub fn render_png_file(
    path: impl AsRef<std::path::Path>,
    width: i32,
    height: i32,
    background: Color,
    draw: impl FnOnce(&mut dyn Surface),
) -> Result<()> {
    let bytes = render_png_bytes(width, height, background, draw)?;
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}
