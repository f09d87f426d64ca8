//! # PDOS 比较图渲染 (PNG/SVG)
//!
//! 使用 `plotters` 库将 `ComparisonPlot` 绘制为图片，作为显示面。
//!
//! ## 图面元素
//! - 第一个算例: 蓝色虚线；第二个算例: 红色实线
//! - 零态密度水平参考线
//! - E - E_F = 0 处的虚线 Fermi 能级标记
//! - 网格与图例
//!
//! ## 依赖关系
//! - 被 `plot/mod.rs`, `commands/compare.rs` 调用
//! - 使用 `plot/comparison.rs` 的 ComparisonPlot
//! - 使用 `plotters` 渲染图表

use crate::error::{QepdosError, Result};
use crate::plot::comparison::{ComparisonPlot, LineStyle};

use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::path::{Path, PathBuf};

/// 接收渲染结果的显示面
pub trait DisplaySurface {
    /// 显示（或交付）一幅比较图
    fn show(&mut self, plot: &ComparisonPlot) -> Result<()>;
}

/// 图片格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    /// 根据扩展名推断格式，默认 PNG
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .as_deref()
        {
            Some("svg") => ImageFormat::Svg,
            _ => ImageFormat::Png,
        }
    }
}

/// 写入图片文件的显示面
#[derive(Debug, Clone)]
pub struct ImageSurface {
    path: PathBuf,
    format: ImageFormat,
    width: u32,
    height: u32,
}

impl ImageSurface {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        let path = path.into();
        let format = ImageFormat::from_path(&path);
        ImageSurface {
            path,
            format,
            width,
            height,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }
}

impl DisplaySurface for ImageSurface {
    fn show(&mut self, plot: &ComparisonPlot) -> Result<()> {
        let size = (self.width, self.height);
        match self.format {
            ImageFormat::Svg => {
                let root = SVGBackend::new(&self.path, size).into_drawing_area();
                draw_comparison_chart(&root, plot)?;
                root.present()
                    .map_err(|e| QepdosError::PlotError(e.to_string()))?;
            }
            ImageFormat::Png => {
                let root = BitMapBackend::new(&self.path, size).into_drawing_area();
                draw_comparison_chart(&root, plot)?;
                root.present()
                    .map_err(|e| QepdosError::PlotError(e.to_string()))?;
            }
        }
        Ok(())
    }
}

/// 绘制比较图的核心逻辑
fn draw_comparison_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    plot: &ComparisonPlot,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| QepdosError::PlotError(format!("{:?}", e)))?;

    let (x_min, x_max) = plot.x_range();
    let (y_min, y_max) = plot.y_range;

    let mut chart = ChartBuilder::on(root)
        .caption(&plot.title, ("sans-serif", 24).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| QepdosError::PlotError(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .x_desc(&plot.x_label)
        .y_desc(&plot.y_label)
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| QepdosError::PlotError(format!("{:?}", e)))?;

    // 零态密度参考线
    chart
        .draw_series(LineSeries::new(
            vec![(x_min, 0.0), (x_max, 0.0)],
            BLACK.stroke_width(1),
        ))
        .map_err(|e| QepdosError::PlotError(format!("{:?}", e)))?;

    for curve in &plot.curves {
        let (r, g, b) = curve.color;
        let style = RGBColor(r, g, b).stroke_width(2);

        let anno = match curve.style {
            LineStyle::Solid => chart
                .draw_series(LineSeries::new(curve.points.clone(), style))
                .map_err(|e| QepdosError::PlotError(format!("{:?}", e)))?,
            LineStyle::Dashed => chart
                .draw_series(DashedLineSeries::new(curve.points.clone(), 8, 5, style))
                .map_err(|e| QepdosError::PlotError(format!("{:?}", e)))?,
        };
        anno.label(curve.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    // Fermi 能级标记；不在窗口内时只保留图例项
    let fermi = if plot.shows_fermi_level() {
        chart.draw_series(DashedLineSeries::new(
            vec![(0.0, y_min), (0.0, y_max)],
            4,
            4,
            BLACK.stroke_width(1),
        ))
    } else {
        chart.draw_series(std::iter::empty::<PathElement<(f64, f64)>>())
    };
    fermi
        .map_err(|e| QepdosError::PlotError(format!("{:?}", e)))?
        .label(plot.fermi_label.as_str())
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.stroke_width(1)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| QepdosError::PlotError(format!("{:?}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DosSample, DosSeries, EnergyWindow};
    use crate::plot::comparison::{FERMI_LABEL, X_LABEL, Y_LABEL};
    use std::fs;
    use tempfile::TempDir;

    fn comparison(window: EnergyWindow) -> ComparisonPlot {
        let a = DosSeries::new(vec![
            DosSample::new(-2.0, 1.0, 0.4),
            DosSample::new(0.0, 2.0, 1.5),
            DosSample::new(1.0, 1.0, 0.9),
            DosSample::new(2.0, 0.5, 0.2),
        ])
        .shift(0.0);
        let b = DosSeries::new(a.samples().to_vec()).shift(1.0);
        ComparisonPlot::new(("C-STO-00", Some(&a)), ("C-STO-20", Some(&b)), window).unwrap()
    }

    #[test]
    fn test_render_svg_contains_labels() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("projected_dos.svg");
        let mut surface = ImageSurface::new(&path, 800, 600);

        surface.show(&comparison(EnergyWindow::default())).unwrap();

        let svg = fs::read_to_string(&path).unwrap();
        for text in ["C-STO-00", "C-STO-20", FERMI_LABEL, X_LABEL, Y_LABEL] {
            assert!(svg.contains(text), "missing '{}' in SVG", text);
        }
    }

    #[test]
    fn test_render_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("projected_dos.png");
        let mut surface = ImageSurface::new(&path, 800, 600);

        surface.show(&comparison(EnergyWindow::default())).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));
    }

    #[test]
    fn test_render_zero_width_window_keeps_fermi_legend() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("narrow.svg");
        let mut surface = ImageSurface::new(&path, 800, 600);

        let plot = comparison(EnergyWindow::new(1.0, 1.0).unwrap());
        assert!(!plot.shows_fermi_level());
        surface.show(&plot).unwrap();

        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.contains(FERMI_LABEL));
        assert!(svg.contains("C-STO-20"));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ImageFormat::from_path(Path::new("a/b.svg")), ImageFormat::Svg);
        assert_eq!(ImageFormat::from_path(Path::new("a/b.SVG")), ImageFormat::Svg);
        assert_eq!(ImageFormat::from_path(Path::new("a/b.png")), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path(Path::new("plot")), ImageFormat::Png);
    }

    #[test]
    fn test_surface_keeps_path_and_format() {
        let surface = ImageSurface::new("out/projected_dos.svg", 800, 600);
        assert_eq!(surface.path(), Path::new("out/projected_dos.svg"));
        assert_eq!(surface.format(), ImageFormat::Svg);
    }
}
