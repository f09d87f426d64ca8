//! # PDOS 比较图 PDF 导出
//!
//! 使用 `printpdf` 将 `ComparisonPlot` 写成单页矢量 PDF。
//! 页面尺寸等于绘图区加上刻度、轴标题和标题所需的边距，不留额外空白。
//!
//! ## 依赖关系
//! - 被 `plot/mod.rs` 调用
//! - 使用 `plot/comparison.rs` 的 ComparisonPlot
//! - 使用 `printpdf` 生成 PDF

use crate::error::{QepdosError, Result};
use crate::plot::comparison::{ComparisonPlot, LineStyle};

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, LineDashPattern, Mm, PdfDocument,
    PdfLayerReference, Point, Pt, Rgb, TextMatrix,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// 导出文件名（固定）
pub const PDF_FILE: &str = "projected_dos.pdf";

// 绘图区尺寸 (mm)
const PLOT_WIDTH: f32 = 160.0;
const PLOT_HEIGHT: f32 = 120.0;

// 字号 (pt)
const TITLE_SIZE: f32 = 13.0;
const LABEL_SIZE: f32 = 11.0;
const TICK_SIZE: f32 = 9.0;
const LEGEND_SIZE: f32 = 9.0;

const PT_TO_MM: f32 = 0.352_778;
const PAD: f32 = 2.0;
const GAP: f32 = 1.5;
const TICK_LEN: f32 = 1.5;

/// 导出到 `<directory>/projected_dos.pdf`，覆盖已有文件
pub fn export_pdf(plot: &ComparisonPlot, directory: &Path) -> Result<PathBuf> {
    let path = directory.join(PDF_FILE);
    let layout = PageLayout::new(plot);

    let (doc, page, layer) = PdfDocument::new(
        plot.title.as_str(),
        Mm(layout.page_width()),
        Mm(layout.page_height()),
        "Plot",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| QepdosError::PdfError(format!("{:?}", e)))?;
    let layer = doc.get_page(page).get_layer(layer);

    let canvas = Canvas {
        layer,
        font,
        layout,
    };
    canvas.draw(plot);

    let file = File::create(&path).map_err(|e| QepdosError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| QepdosError::PdfError(format!("{:?}", e)))?;

    log::debug!("exported comparison to {}", path.display());
    Ok(path)
}

/// 页面布局：边距与数据坐标到页面坐标的映射
#[derive(Debug, Clone)]
struct PageLayout {
    left: f32,
    bottom: f32,
    right: f32,
    top: f32,
    x_range: (f64, f64),
    y_range: (f64, f64),
    x_ticks: Vec<f64>,
    y_ticks: Vec<f64>,
}

impl PageLayout {
    fn new(plot: &ComparisonPlot) -> Self {
        let x_range = plot.x_range();
        let y_range = plot.y_range;
        let x_ticks = nice_ticks(x_range.0, x_range.1, 8);
        let y_ticks = nice_ticks(y_range.0, y_range.1, 6);

        let widest_y_tick = tick_labels(&y_ticks)
            .iter()
            .map(|s| text_width(s, TICK_SIZE))
            .fold(0.0_f32, f32::max);

        let left = PAD + text_height(LABEL_SIZE) + GAP + widest_y_tick + GAP + TICK_LEN;
        let bottom = PAD + text_height(LABEL_SIZE) + GAP + text_height(TICK_SIZE) + GAP + TICK_LEN;
        let top = PAD + text_height(TITLE_SIZE) + GAP * 2.0;
        // 最右侧刻度标签有一半伸出绘图区
        let widest_x_tick = tick_labels(&x_ticks)
            .iter()
            .map(|s| text_width(s, TICK_SIZE))
            .fold(0.0_f32, f32::max);
        let right = PAD + widest_x_tick / 2.0;

        PageLayout {
            left,
            bottom,
            right,
            top,
            x_range,
            y_range,
            x_ticks,
            y_ticks,
        }
    }

    fn page_width(&self) -> f32 {
        self.left + PLOT_WIDTH + self.right
    }

    fn page_height(&self) -> f32 {
        self.bottom + PLOT_HEIGHT + self.top
    }

    fn map_x(&self, x: f64) -> f32 {
        let (lo, hi) = self.x_range;
        self.left + ((x - lo) / (hi - lo)) as f32 * PLOT_WIDTH
    }

    fn map_y(&self, y: f64) -> f32 {
        let (lo, hi) = self.y_range;
        self.bottom + ((y - lo) / (hi - lo)) as f32 * PLOT_HEIGHT
    }
}

/// 单层绘图上下文
struct Canvas {
    layer: PdfLayerReference,
    font: IndirectFontRef,
    layout: PageLayout,
}

impl Canvas {
    fn draw(&self, plot: &ComparisonPlot) {
        let l = &self.layout;
        let (x0, x1) = (l.left, l.left + PLOT_WIDTH);
        let (y0, y1) = (l.bottom, l.bottom + PLOT_HEIGHT);

        // 网格
        self.stroke(0.85, 0.85, 0.85, 0.3, None);
        for &t in &l.x_ticks {
            self.polyline(&[(l.map_x(t), y0), (l.map_x(t), y1)]);
        }
        for &t in &l.y_ticks {
            self.polyline(&[(x0, l.map_y(t)), (x1, l.map_y(t))]);
        }

        // 坐标框与刻度
        self.stroke(0.0, 0.0, 0.0, 0.8, None);
        self.polygon(&[(x0, y0), (x1, y0), (x1, y1), (x0, y1)]);
        for (t, label) in l.x_ticks.iter().zip(tick_labels(&l.x_ticks)) {
            let x = l.map_x(*t);
            self.polyline(&[(x, y0), (x, y0 - TICK_LEN)]);
            let y = y0 - TICK_LEN - GAP - text_height(TICK_SIZE);
            self.text(&label, TICK_SIZE, x - text_width(&label, TICK_SIZE) / 2.0, y);
        }
        for (t, label) in l.y_ticks.iter().zip(tick_labels(&l.y_ticks)) {
            let y = l.map_y(*t);
            self.polyline(&[(x0, y), (x0 - TICK_LEN, y)]);
            let x = x0 - TICK_LEN - GAP - text_width(&label, TICK_SIZE);
            self.text(&label, TICK_SIZE, x, y - text_height(TICK_SIZE) / 3.0);
        }

        // 零态密度参考线
        if l.y_range.0 <= 0.0 && 0.0 <= l.y_range.1 {
            self.stroke(0.0, 0.0, 0.0, 0.5, Some((1, 2)));
            self.polyline(&[(x0, l.map_y(0.0)), (x1, l.map_y(0.0))]);
        }

        // Fermi 能级
        if plot.shows_fermi_level() {
            self.stroke(0.0, 0.0, 0.0, 1.0, Some((4, 3)));
            self.polyline(&[(l.map_x(0.0), y0), (l.map_x(0.0), y1)]);
        }

        for curve in &plot.curves {
            let (r, g, b) = rgb(curve.color);
            let dash = match curve.style {
                LineStyle::Solid => None,
                LineStyle::Dashed => Some((6, 4)),
            };
            self.stroke(r, g, b, 1.5, dash);
            let points: Vec<(f32, f32)> = curve
                .points
                .iter()
                .map(|(x, y)| (l.map_x(*x), l.map_y(*y)))
                .collect();
            self.polyline(&points);
        }

        self.draw_legend(plot);

        // 标题与轴标题
        let title_x = x0 + (PLOT_WIDTH - text_width(&plot.title, TITLE_SIZE)) / 2.0;
        self.text(&plot.title, TITLE_SIZE, title_x, y1 + GAP * 2.0);

        let xl_x = x0 + (PLOT_WIDTH - text_width(&plot.x_label, LABEL_SIZE)) / 2.0;
        self.text(&plot.x_label, LABEL_SIZE, xl_x, PAD);

        let yl_y = y0 + (PLOT_HEIGHT - text_width(&plot.y_label, LABEL_SIZE)) / 2.0;
        self.vertical_text(&plot.y_label, LABEL_SIZE, PAD + text_height(LABEL_SIZE), yl_y);
    }

    /// 右上角图例
    fn draw_legend(&self, plot: &ComparisonPlot) {
        let l = &self.layout;
        let row = text_height(LEGEND_SIZE) + GAP;
        let swatch = 8.0;

        let entries = legend_entries(plot);

        let text_w = entries
            .iter()
            .map(|(label, _, _)| text_width(label, LEGEND_SIZE))
            .fold(0.0_f32, f32::max);
        let box_w = GAP * 3.0 + swatch + text_w;
        let box_h = GAP + row * entries.len() as f32;
        let bx1 = l.left + PLOT_WIDTH - GAP * 2.0;
        let by1 = l.bottom + PLOT_HEIGHT - GAP * 2.0;
        let (bx0, by0) = (bx1 - box_w, by1 - box_h);

        self.stroke(0.0, 0.0, 0.0, 0.5, None);
        self.polygon(&[(bx0, by0), (bx1, by0), (bx1, by1), (bx0, by1)]);

        for (i, (label, (r, g, b), dash)) in entries.iter().enumerate() {
            let baseline = by1 - row * (i as f32 + 1.0);
            let mid = baseline + text_height(LEGEND_SIZE) / 3.0;
            self.stroke(*r, *g, *b, 1.5, *dash);
            self.polyline(&[(bx0 + GAP, mid), (bx0 + GAP + swatch, mid)]);
            self.text(label, LEGEND_SIZE, bx0 + GAP * 2.0 + swatch, baseline);
        }
    }

    fn stroke(&self, r: f32, g: f32, b: f32, width_pt: f32, dash: Option<(i64, i64)>) {
        self.layer
            .set_outline_color(Color::Rgb(Rgb::new(r, g, b, None)));
        self.layer.set_outline_thickness(width_pt);
        let pattern = match dash {
            Some((on, off)) => LineDashPattern {
                dash_1: Some(on),
                gap_1: Some(off),
                ..Default::default()
            },
            None => LineDashPattern::default(),
        };
        self.layer.set_line_dash_pattern(pattern);
    }

    fn polyline(&self, points: &[(f32, f32)]) {
        self.add_path(points, false);
    }

    fn polygon(&self, points: &[(f32, f32)]) {
        self.add_path(points, true);
    }

    fn add_path(&self, points: &[(f32, f32)], is_closed: bool) {
        if points.len() < 2 {
            return;
        }
        let points = points
            .iter()
            .map(|&(x, y)| (Point::new(Mm(x), Mm(y)), false))
            .collect();
        self.layer.add_line(Line { points, is_closed });
    }

    fn text(&self, text: &str, size: f32, x: f32, y: f32) {
        self.layer.use_text(text, size, Mm(x), Mm(y), &self.font);
    }

    /// 逆时针旋转 90° 的文字，(x, y) 为基线起点
    fn vertical_text(&self, text: &str, size: f32, x: f32, y: f32) {
        self.layer.begin_text_section();
        self.layer.set_font(&self.font, size);
        self.layer.set_text_matrix(TextMatrix::TranslateRotate(
            Pt::from(Mm(x)),
            Pt::from(Mm(y)),
            90.0,
        ));
        self.layer.write_text(text, &self.font);
        self.layer.end_text_section();
    }
}

/// 图例项：标签、颜色、虚线样式
type LegendEntry<'a> = (&'a str, (f32, f32, f32), Option<(i64, i64)>);

/// 两条曲线加 Fermi 标记；标记不在窗口内时图例项仍保留
fn legend_entries(plot: &ComparisonPlot) -> Vec<LegendEntry<'_>> {
    let mut entries: Vec<LegendEntry<'_>> = plot
        .curves
        .iter()
        .map(|c| {
            let dash = match c.style {
                LineStyle::Solid => None,
                LineStyle::Dashed => Some((6, 4)),
            };
            (c.label.as_str(), rgb(c.color), dash)
        })
        .collect();
    entries.push((plot.fermi_label.as_str(), (0.0, 0.0, 0.0), Some((4, 3))));
    entries
}

fn rgb((r, g, b): (u8, u8, u8)) -> (f32, f32, f32) {
    (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

/// Helvetica 的近似文字宽度 (mm)
fn text_width(text: &str, size_pt: f32) -> f32 {
    text.chars().count() as f32 * size_pt * 0.52 * PT_TO_MM
}

/// 文字高度 (mm)，取字号的大写字母高度
fn text_height(size_pt: f32) -> f32 {
    size_pt * 0.72 * PT_TO_MM
}

/// 把数值圆整到 1、2、5 × 10^k
fn nice_step(raw: f64) -> f64 {
    if raw <= 0.0 || !raw.is_finite() {
        return 1.0;
    }
    let exp = raw.log10().floor();
    let base = 10f64.powf(exp);
    let mant = raw / base;
    let nice = if mant <= 1.0 {
        1.0
    } else if mant <= 2.0 {
        2.0
    } else if mant <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}

/// 生成落在 [min, max] 内的刻度
fn nice_ticks(min: f64, max: f64, desired: usize) -> Vec<f64> {
    let span = max - min;
    if span <= 0.0 || desired == 0 {
        return vec![min];
    }
    let step = nice_step(span / desired as f64);
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

/// 刻度标签，小数位数由步长决定
fn tick_labels(ticks: &[f64]) -> Vec<String> {
    let step = match ticks {
        [a, b, ..] => (b - a).abs(),
        _ => 1.0,
    };
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    };
    ticks
        .iter()
        .map(|t| {
            let s = format!("{:.*}", decimals, t);
            // 避免出现 "-0"
            if s.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
                s.trim_start_matches('-').to_string()
            } else {
                s
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DosSample, DosSeries, EnergyWindow};
    use std::fs;
    use tempfile::TempDir;

    fn sample_plot() -> ComparisonPlot {
        let a = DosSeries::new(
            (-50..=50)
                .map(|i| {
                    let e = i as f64 * 0.1;
                    DosSample::new(e, 1.0, (-e * e).exp())
                })
                .collect(),
        )
        .shift(0.0);
        let b = DosSeries::new(a.samples().to_vec()).shift(0.5);
        ComparisonPlot::new(
            ("C-STO-00", Some(&a)),
            ("C-STO-20", Some(&b)),
            EnergyWindow::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_nice_ticks() {
        assert_eq!(nice_ticks(-4.0, 4.0, 8), vec![-4.0, -3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0]);
        let ticks = nice_ticks(0.0, 1.05, 6);
        assert_eq!(ticks.first(), Some(&0.0));
        assert!(ticks.iter().all(|t| *t <= 1.05));
        assert_eq!(nice_ticks(2.0, 2.0, 5), vec![2.0]);
    }

    #[test]
    fn test_tick_labels() {
        assert_eq!(tick_labels(&[-1.0, 0.0, 1.0]), vec!["-1", "0", "1"]);
        assert_eq!(tick_labels(&[-0.2, 0.0, 0.2]), vec!["-0.2", "0.0", "0.2"]);
    }

    #[test]
    fn test_layout_is_tight() {
        let plot = sample_plot();
        let layout = PageLayout::new(&plot);
        assert!(layout.page_width() > PLOT_WIDTH);
        assert!(layout.page_width() < PLOT_WIDTH + 40.0);
        assert!(layout.page_height() < PLOT_HEIGHT + 40.0);
        assert!((layout.map_x(-4.0) - layout.left).abs() < 1e-4);
        assert!((layout.map_x(4.0) - (layout.left + PLOT_WIDTH)).abs() < 1e-3);
    }

    #[test]
    fn test_export_overwrites_fixed_path() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join(PDF_FILE);
        fs::write(&target, "stale").unwrap();

        let path = export_pdf(&sample_plot(), dir.path()).unwrap();
        assert_eq!(path, target);

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_legend_keeps_fermi_marker_outside_window() {
        let s = DosSeries::new(vec![DosSample::new(1.0, 1.0, 0.5)]).shift(0.0);
        let window = EnergyWindow::new(1.0, 1.0).unwrap();
        let plot = ComparisonPlot::new(("a", Some(&s)), ("b", Some(&s)), window).unwrap();
        assert!(!plot.shows_fermi_level());

        let labels: Vec<&str> = legend_entries(&plot).iter().map(|e| e.0).collect();
        assert_eq!(labels, vec!["a", "b", plot.fermi_label.as_str()]);

        let dir = TempDir::new().unwrap();
        assert!(export_pdf(&plot, dir.path()).is_ok());
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let result = export_pdf(&sample_plot(), &dir.path().join("absent"));
        assert!(matches!(result, Err(QepdosError::FileWriteError { .. })));
    }
}
