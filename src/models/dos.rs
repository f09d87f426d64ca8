//! # 态密度数据模型
//!
//! 存储 Quantum ESPRESSO `projwfc.x` 输出的总 PDOS 表
//! (能量, 总 DOS, 投影 DOS) 及其以 Fermi 能量为零点的平移版本。
//!
//! ## 依赖关系
//! - 被 `parsers/pdos.rs` 生成
//! - 被 `plot/` 和 `commands/` 使用

use crate::error::{QepdosError, Result};

/// 单行 DOS 数据
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DosSample {
    /// 能量 (eV)
    pub energy_ev: f64,
    /// 总态密度
    pub dos: f64,
    /// 投影态密度
    pub pdos: f64,
}

impl DosSample {
    pub fn new(energy_ev: f64, dos: f64, pdos: f64) -> Self {
        DosSample {
            energy_ev,
            dos,
            pdos,
        }
    }
}

/// 单个算例的原始 DOS 序列，保持文件中的行顺序
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DosSeries {
    pub samples: Vec<DosSample>,
}

impl DosSeries {
    pub fn new(samples: Vec<DosSample>) -> Self {
        DosSeries { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// 以给定 Fermi 能量为零点平移能量轴，dos/pdos 保持不变
    pub fn shift(self, fermi_energy: f64) -> ShiftedDosSeries {
        let samples = self
            .samples
            .into_iter()
            .map(|s| DosSample::new(s.energy_ev - fermi_energy, s.dos, s.pdos))
            .collect();
        ShiftedDosSeries {
            fermi_energy,
            samples,
        }
    }
}

/// 以 Fermi 能量为零点的 DOS 序列
///
/// 平移只在构造时进行一次，之后样本不可变。
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftedDosSeries {
    fermi_energy: f64,
    samples: Vec<DosSample>,
}

impl ShiftedDosSeries {
    /// 平移所用的 Fermi 能量 (eV)
    pub fn fermi_energy(&self) -> f64 {
        self.fermi_energy
    }

    pub fn samples(&self) -> &[DosSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// 返回落在能量窗口内的样本（闭区间），不修改自身
    pub fn window(&self, window: &EnergyWindow) -> Vec<DosSample> {
        self.samples
            .iter()
            .filter(|s| window.contains(s.energy_ev))
            .copied()
            .collect()
    }

    /// 距离 Fermi 能级最近的样本
    pub fn nearest_to_fermi(&self) -> Option<&DosSample> {
        self.samples.iter().min_by(|a, b| {
            a.energy_ev
                .abs()
                .partial_cmp(&b.energy_ev.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    /// 平移后的能量范围 (min, max)
    pub fn energy_span(&self) -> Option<(f64, f64)> {
        if self.samples.is_empty() {
            return None;
        }
        let min = self
            .samples
            .iter()
            .map(|s| s.energy_ev)
            .fold(f64::INFINITY, f64::min);
        let max = self
            .samples
            .iter()
            .map(|s| s.energy_ev)
            .fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }
}

/// 显示/导出用的能量窗口 (eV)，闭区间
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyWindow {
    pub low: f64,
    pub high: f64,
}

impl Default for EnergyWindow {
    fn default() -> Self {
        EnergyWindow {
            low: -4.0,
            high: 4.0,
        }
    }
}

impl EnergyWindow {
    /// 创建窗口，要求 low <= high 且均为有限值
    pub fn new(low: f64, high: f64) -> Result<Self> {
        if !low.is_finite() || !high.is_finite() {
            return Err(QepdosError::InvalidRange(format!(
                "bounds must be finite, got ({}, {})",
                low, high
            )));
        }
        if low > high {
            return Err(QepdosError::InvalidRange(format!(
                "low bound {} exceeds high bound {}",
                low, high
            )));
        }
        Ok(EnergyWindow { low, high })
    }

    pub fn contains(&self, energy: f64) -> bool {
        self.low <= energy && energy <= self.high
    }

    pub fn width(&self) -> f64 {
        self.high - self.low
    }
}
