//! 切片到 OpenCV 矩阵的转换, 供交互前端绘制.
//!
//! # 注意
//!
//! 需要 `plot` feature.

use super::CtSlice;
use opencv::core::{Mat, Scalar, Size, CV_8UC1};
use opencv::prelude::MatTrait;

/// 按切片自身的 CT 窗口生成单通道 8-bit 矩阵. 像素值与 [`CtSlice::to_gray`] 一致.
pub fn gray_mat(sli: &CtSlice) -> opencv::Result<Mat> {
    let (h, w) = sli.shape();
    let mut mat =
        Mat::new_size_with_default(Size::new(w as i32, h as i32), CV_8UC1, Scalar::from(0))?;
    let window = sli.window();
    for ((i, j), &hu) in sli.indexed_iter() {
        *mat.at_2d_mut::<u8>(i as i32, j as i32)? = window.eval(hu).unwrap_or(u8::MIN);
    }
    Ok(mat)
}
