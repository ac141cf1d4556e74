use super::super::meta::SliceMeta;
use super::super::window::CtWindow;
use crate::Idx2d;
use ndarray::iter::Iter;
use ndarray::{Array2, ArrayView2, Ix2};
use std::ops::Index;
use std::path::{Path, PathBuf};

/// 拥有所有权的二维 CT 切片.
///
/// 同时保存两份数据:
///
/// 1. 绝对 HU 值 (已经过 `slope`/`intercept` 线性变换), 供统计使用;
/// 2. 按切片自身窗口截断后的 HU 值, 仅供显示.
///
/// 加载后不可变.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CtSlice {
    hu: Array2<f32>,
    windowed: Array2<f32>,
    meta: SliceMeta,
    source: Option<PathBuf>,
}

impl Index<Idx2d> for CtSlice {
    type Output = f32;

    /// 按 (高, 宽) 索引 HU 值.
    #[inline]
    fn index(&self, index: Idx2d) -> &Self::Output {
        &self.hu[index]
    }
}

impl CtSlice {
    /// 由原始像素值 `raw` 和解析完毕的元信息构建切片. 内部完成 HU 变换和窗口截断.
    pub fn from_raw(raw: Array2<f32>, meta: SliceMeta) -> Self {
        let hu = raw.mapv_into(|v| meta.to_hu(v));
        Self::with_meta(hu, meta)
    }

    /// 由已经是 HU 值的数据构建切片, 斜率为 1, 截距为 0.
    pub fn from_hu(hu: Array2<f32>, window: CtWindow) -> Self {
        Self::with_meta(hu, SliceMeta::new(window, 1.0, 0.0))
    }

    fn with_meta(hu: Array2<f32>, meta: SliceMeta) -> Self {
        let window = meta.window();
        let windowed = hu.mapv(|v| window.clamp(v));
        Self {
            hu,
            windowed,
            meta,
            source: None,
        }
    }

    /// 记录切片的来源文件.
    #[inline]
    pub fn with_source<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.source = Some(path.into());
        self
    }

    /// 来源文件. 手动构建的切片没有来源.
    #[inline]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 获得 HU 数据的一份不可变 shallow copy.
    #[inline]
    pub fn hu(&self) -> ArrayView2<'_, f32> {
        self.hu.view()
    }

    /// 获得窗口截断数据的一份不可变 shallow copy.
    #[inline]
    pub fn windowed(&self) -> ArrayView2<'_, f32> {
        self.windowed.view()
    }

    /// 元信息.
    #[inline]
    pub fn meta(&self) -> &SliceMeta {
        &self.meta
    }

    /// 显示用 CT 窗.
    #[inline]
    pub fn window(&self) -> CtWindow {
        self.meta.window()
    }

    /// 获取可以迭代 HU 值的迭代器.
    #[inline]
    pub fn iter(&self) -> Iter<'_, f32, Ix2> {
        self.hu.iter()
    }

    /// 获取给定位置 (高, 宽) 的 HU 值. 越界时返回 `None`.
    #[inline]
    pub fn get(&self, pos: Idx2d) -> Option<&f32> {
        self.hu.get(pos)
    }

    /// 图像的分辨率 (高, 宽).
    #[inline]
    pub fn shape(&self) -> Idx2d {
        self.hu.dim()
    }

    /// 图像的像素个数.
    #[inline]
    pub fn size(&self) -> usize {
        let (h, w) = self.shape();
        h * w
    }

    /// 获得图像的高.
    #[inline]
    pub fn height(&self) -> usize {
        self.shape().0
    }

    /// 获得图像的宽.
    #[inline]
    pub fn width(&self) -> usize {
        self.shape().1
    }

    /// 以行优先规则, 获取能迭代图像所有 `(索引, CT HU 值)` 的迭代器.
    #[inline]
    pub fn indexed_iter(&self) -> impl Iterator<Item = (Idx2d, &f32)> {
        self.hu.indexed_iter()
    }

    /// 按切片自身的窗口将 HU 值映射为 8-bit 灰度图.
    pub fn to_gray(&self) -> image::GrayImage {
        let (height, width) = self.shape();
        let window = self.window();
        let mut buf = image::GrayImage::new(width as u32, height as u32);
        for ((h, w), &hu) in self.indexed_iter() {
            let gray = window.eval(hu).unwrap_or(u8::MIN);
            buf.put_pixel(w as u32, h as u32, image::Luma([gray]));
        }
        buf
    }
}
