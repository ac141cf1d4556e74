//! 图像的持久化存储.

use super::CtSlice;
use image::{GrayImage, ImageResult};
use std::path::Path;

/// 总览图每行默认放置的切片数.
pub const MOSAIC_COLUMNS: usize = 15;

/// 表明一个可以通过 **可视化友好** 模式持久化存储的图像对象.
///
/// 以 CT HU 值存储的扫描在保存时会按其自身的 CT 窗口规范化为 8-bit 灰度图.
pub trait ImgWriteVis {
    /// 按照一定的可视化规则将图片保存到 `path` 路径.
    fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()>;
}

/// 按切片自身窗口保存.
impl ImgWriteVis for CtSlice {
    fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        self.to_gray().save(path)
    }
}

/// 以每行 [`MOSAIC_COLUMNS`] 张的总览图保存.
impl ImgWriteVis for [CtSlice] {
    fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        mosaic(self, MOSAIC_COLUMNS).save(path)
    }
}

/// 将 `slices` 按行优先顺序拼接为一张灰度总览图, 每行 `cols` 张.
///
/// 每个格子的大小取所有切片中最大的高和宽, 尺寸较小的切片贴在格子左上角.
/// `slices` 为空或 `cols == 0` 时返回空图像.
pub fn mosaic(slices: &[CtSlice], cols: usize) -> GrayImage {
    if slices.is_empty() || cols == 0 {
        return GrayImage::new(0, 0);
    }
    let cell_h = slices.iter().map(CtSlice::height).max().unwrap_or(0);
    let cell_w = slices.iter().map(CtSlice::width).max().unwrap_or(0);
    let cols = cols.min(slices.len());
    let rows = (slices.len() + cols - 1) / cols;

    let mut canvas = GrayImage::new((cell_w * cols) as u32, (cell_h * rows) as u32);
    for (i, sli) in slices.iter().enumerate() {
        let (r, c) = (i / cols, i % cols);
        image::imageops::replace(
            &mut canvas,
            &sli.to_gray(),
            (c * cell_w) as i64,
            (r * cell_h) as i64,
        );
    }
    canvas
}
