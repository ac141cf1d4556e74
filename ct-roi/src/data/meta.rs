//! 切片元信息: 窗口与 HU 线性变换参数.
//!
//! 解码层只负责 "尽力" 读出原始属性 ([`RawAttrs`]), 缺省值统一在
//! [`SliceMeta::resolve`] 中决定, 核心模块只接触解析完毕的 [`SliceMeta`].

use ndarray::ArrayView2;
use std::fmt::{self, Display, Formatter};

use super::window::CtWindow;

/// 解码时读到的原始属性. 缺失的属性为 `None`.
///
/// 多值属性 (如 `WindowCenter = 40\400`) 只保留第一个值.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawAttrs {
    /// 窗位.
    pub window_center: Option<f64>,
    /// 窗宽.
    pub window_width: Option<f64>,
    /// HU 变换斜率.
    pub rescale_slope: Option<f64>,
    /// HU 变换截距.
    pub rescale_intercept: Option<f64>,
    /// 层厚 (mm).
    pub slice_thickness: Option<f64>,
    /// 成像模态, 如 `CT`.
    pub modality: Option<String>,
}

/// 缺省值已解析完毕的切片元信息.
///
/// 层厚与模态只用于展示, 没有缺省值.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SliceMeta {
    window: CtWindow,
    slope: f64,
    intercept: f64,
    slice_thickness: Option<f64>,
    modality: Option<String>,
}

impl SliceMeta {
    /// 按如下缺省规则解析 `raw`:
    ///
    /// - 窗位缺失 (或非有限值) 时取原始像素 `grid` 的均值;
    /// - 窗宽缺失 (或为负、非有限值) 时取 `grid` 的极差 (max - min);
    /// - 斜率缺失时取 1, 截距缺失时取 0.
    ///
    /// 窗口统计量基于原始像素值 (HU 变换之前) 计算. `grid` 为空时两者均为 0.
    pub fn resolve(raw: &RawAttrs, grid: ArrayView2<f32>) -> Self {
        let slope = raw.rescale_slope.filter(|v| v.is_finite()).unwrap_or(1.0);
        let intercept = raw
            .rescale_intercept
            .filter(|v| v.is_finite())
            .unwrap_or(0.0);

        let level = raw
            .window_center
            .filter(|v| v.is_finite())
            .unwrap_or_else(|| grid_mean(grid));
        let width = raw
            .window_width
            .filter(|v| v.is_finite() && *v >= 0.0)
            .unwrap_or_else(|| grid_range(grid));

        // 两者都已经过滤为有限非负值, 不会失败.
        let window = CtWindow::new(level as f32, width as f32)
            .unwrap_or_else(CtWindow::from_liver_visual);

        Self {
            window,
            slope,
            intercept,
            slice_thickness: raw
                .slice_thickness
                .filter(|v| v.is_finite() && *v > 0.0),
            modality: raw
                .modality
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned),
        }
    }

    /// 直接由已知参数构建.
    #[inline]
    pub fn new(window: CtWindow, slope: f64, intercept: f64) -> Self {
        Self {
            window,
            slope,
            intercept,
            slice_thickness: None,
            modality: None,
        }
    }

    /// 显示用 CT 窗.
    #[inline]
    pub fn window(&self) -> CtWindow {
        self.window
    }

    /// HU 变换斜率.
    #[inline]
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// HU 变换截距.
    #[inline]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// 层厚 (mm).
    #[inline]
    pub fn slice_thickness(&self) -> Option<f64> {
        self.slice_thickness
    }

    /// 成像模态.
    #[inline]
    pub fn modality(&self) -> Option<&str> {
        self.modality.as_deref()
    }

    /// 将原始像素值转换为 HU 值: `raw * slope + intercept`.
    #[inline]
    pub fn to_hu(&self, raw: f32) -> f32 {
        (raw as f64 * self.slope + self.intercept) as f32
    }
}

/// 单行摘要, 缺失项显示为 `-`.
impl Display for SliceMeta {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "modality {}, ", self.modality().unwrap_or("-"))?;
        match self.slice_thickness {
            Some(t) => write!(f, "thickness {t} mm, ")?,
            None => f.write_str("thickness -, ")?,
        }
        write!(
            f,
            "window {}/{}, slope {}, intercept {}",
            self.window.level(),
            self.window.width(),
            self.slope,
            self.intercept
        )
    }
}

fn grid_mean(grid: ArrayView2<f32>) -> f64 {
    if grid.is_empty() {
        return 0.0;
    }
    grid.iter().map(|&v| v as f64).sum::<f64>() / grid.len() as f64
}

fn grid_range(grid: ArrayView2<f32>) -> f64 {
    let Some(&first) = grid.iter().next() else {
        return 0.0;
    };
    let (min, max) = grid
        .iter()
        .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    (max - min) as f64
}
