//! # PDOS 比较图数据
//!
//! 将两个已平移的 PDOS 序列限制到同一能量窗口，生成与后端无关的图表描述。
//! PNG/SVG 与 PDF 后端都从同一个 `ComparisonPlot` 绘制。
//!
//! ## 依赖关系
//! - 被 `plot/surface.rs`, `plot/pdf.rs`, `commands/compare.rs` 使用
//! - 使用 `models/dos.rs`

use crate::error::{QepdosError, Result};
use crate::models::{EnergyWindow, ShiftedDosSeries};

pub const PLOT_TITLE: &str = "Projected DOS Comparison (Shifted by E_F)";
pub const X_LABEL: &str = "Energy - E_F (eV)";
pub const Y_LABEL: &str = "Projected Density of States (PDOS)";
pub const FERMI_LABEL: &str = "Fermi Level (E_F)";

/// 第一条曲线颜色（蓝，虚线）
pub const FIRST_COLOR: (u8, u8, u8) = (0, 0, 255);
/// 第二条曲线颜色（红，实线）
pub const SECOND_COLOR: (u8, u8, u8) = (255, 0, 0);

/// 曲线线型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// 单条曲线
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    /// 图例标签（算例名）
    pub label: String,
    /// (E - E_F, PDOS) 点列
    pub points: Vec<(f64, f64)>,
    pub style: LineStyle,
    pub color: (u8, u8, u8),
}

/// 比较图描述
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonPlot {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub fermi_label: String,
    pub window: EnergyWindow,
    /// 纵轴范围，总包含 0
    pub y_range: (f64, f64),
    /// 第一条为虚线，第二条为实线
    pub curves: Vec<Curve>,
}

impl ComparisonPlot {
    /// 从两个算例的平移序列构建比较图
    ///
    /// 任一侧缺失，或在窗口内没有样本时返回 `MissingData`。
    pub fn new(
        first: (&str, Option<&ShiftedDosSeries>),
        second: (&str, Option<&ShiftedDosSeries>),
        window: EnergyWindow,
    ) -> Result<Self> {
        let first_curve = build_curve(first, &window, LineStyle::Dashed, FIRST_COLOR)?;
        let second_curve = build_curve(second, &window, LineStyle::Solid, SECOND_COLOR)?;
        let curves = vec![first_curve, second_curve];
        let y_range = density_range(&curves);

        Ok(ComparisonPlot {
            title: PLOT_TITLE.to_string(),
            x_label: X_LABEL.to_string(),
            y_label: Y_LABEL.to_string(),
            fermi_label: FERMI_LABEL.to_string(),
            window,
            y_range,
            curves,
        })
    }

    /// 横轴显示范围；零宽窗口向两侧各扩 0.5 eV
    pub fn x_range(&self) -> (f64, f64) {
        if self.window.width() > 0.0 {
            (self.window.low, self.window.high)
        } else {
            (self.window.low - 0.5, self.window.high + 0.5)
        }
    }

    /// Fermi 能级是否落在显示窗口内
    pub fn shows_fermi_level(&self) -> bool {
        self.window.contains(0.0)
    }
}

/// 过滤到窗口内的 (能量, PDOS) 点列
fn build_curve(
    (label, series): (&str, Option<&ShiftedDosSeries>),
    window: &EnergyWindow,
    style: LineStyle,
    color: (u8, u8, u8),
) -> Result<Curve> {
    let missing = || QepdosError::MissingData {
        case: label.to_string(),
    };

    let series = series.filter(|s| !s.is_empty()).ok_or_else(missing)?;
    let points: Vec<(f64, f64)> = series
        .window(window)
        .into_iter()
        .map(|s| (s.energy_ev, s.pdos))
        .collect();

    if points.is_empty() {
        log::debug!("{}: no samples inside [{}, {}]", label, window.low, window.high);
        return Err(missing());
    }

    Ok(Curve {
        label: label.to_string(),
        points,
        style,
        color,
    })
}

/// 纵轴范围：包含 0 与全部点，上下各留 5%
fn density_range(curves: &[Curve]) -> (f64, f64) {
    let values = curves.iter().flat_map(|c| c.points.iter().map(|(_, y)| *y));
    let (min, max) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), y| (lo.min(y), hi.max(y)));

    let span = max - min;
    if span <= 0.0 {
        return (min, min + 1.0);
    }

    let pad = span * 0.05;
    let low = if min < 0.0 { min - pad } else { min };
    (low, max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DosSample, DosSeries};

    fn series(rows: &[(f64, f64)]) -> ShiftedDosSeries {
        DosSeries::new(
            rows.iter()
                .map(|(e, p)| DosSample::new(*e, *p * 2.0, *p))
                .collect(),
        )
        .shift(0.0)
    }

    #[test]
    fn test_filters_to_window() {
        let a = series(&[(-6.0, 1.0), (-4.0, 0.5), (0.0, 2.0), (4.0, 0.1), (4.01, 9.0)]);
        let b = series(&[(-3.0, 0.2), (3.0, 0.3), (10.0, 50.0)]);

        let plot = ComparisonPlot::new(("a", Some(&a)), ("b", Some(&b)), EnergyWindow::default())
            .unwrap();

        for curve in &plot.curves {
            assert!(curve.points.iter().all(|(e, _)| *e >= -4.0 && *e <= 4.0));
        }
        assert_eq!(plot.curves[0].points, vec![(-4.0, 0.5), (0.0, 2.0), (4.0, 0.1)]);
        assert_eq!(plot.curves[0].style, LineStyle::Dashed);
        assert_eq!(plot.curves[1].style, LineStyle::Solid);
        // 源序列不被修改
        assert_eq!(a.len(), 5);
        // 窗口外的大值不影响纵轴
        assert!(plot.y_range.1 < 3.0);
        assert_eq!(plot.y_range.0, 0.0);
    }

    #[test]
    fn test_series_outside_window_is_missing_data() {
        let a = series(&[(-1.0, 1.0)]);
        let b = series(&[(5.0, 1.0), (6.0, 2.0)]);

        let result = ComparisonPlot::new(("a", Some(&a)), ("b", Some(&b)), EnergyWindow::default());
        assert!(matches!(result, Err(QepdosError::MissingData { ref case }) if case == "b"));
    }

    #[test]
    fn test_absent_side_is_missing_data() {
        let a = series(&[(-1.0, 1.0)]);
        let result = ComparisonPlot::new(("a", None), ("b", Some(&a)), EnergyWindow::default());
        assert!(matches!(result, Err(QepdosError::MissingData { ref case }) if case == "a"));

        let empty = DosSeries::default().shift(1.0);
        let result =
            ComparisonPlot::new(("a", Some(&a)), ("b", Some(&empty)), EnergyWindow::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_ranges() {
        let a = series(&[(0.0, -1.0), (1.0, 1.0)]);
        let window = EnergyWindow::new(0.5, 0.5).unwrap();
        let b = series(&[(0.5, 0.0)]);
        let plot = ComparisonPlot::new(("a", Some(&b)), ("b", Some(&b)), window).unwrap();
        assert_eq!(plot.x_range(), (0.0, 1.0));
        assert_eq!(plot.y_range, (0.0, 1.0));
        assert!(!plot.shows_fermi_level());

        let plot =
            ComparisonPlot::new(("a", Some(&a)), ("b", Some(&a)), EnergyWindow::default()).unwrap();
        assert!(plot.y_range.0 < -1.0);
        assert!(plot.y_range.1 > 1.0);
        assert!(plot.shows_fermi_level());
    }
}
