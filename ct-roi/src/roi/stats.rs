//! 多边形区域统计: 栅格化为像素掩膜, 并求 HU 均值.

use super::shape::{Point, Shape};
use crate::Idx2d;
use ndarray::{s, Array2, ArrayView2, Zip};
use num::ToPrimitive;
use std::ops::Range;

/// 一个区域的统计结果.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionMean {
    /// 区域内 HU 值的算术平均值. 区域内没有像素时为 0.
    pub mean: f64,
    /// 区域内像素个数.
    pub pixels: usize,
}

/// 闭区间 `[lo, hi]` 覆盖的像素中心索引, 截断到 `[0, len)`.
///
/// 先在浮点域内截断再转换, 远超图像范围的坐标不会使结果为空.
fn pixel_span(lo: f64, hi: f64, len: usize) -> Option<Range<usize>> {
    if len == 0 || lo.is_nan() || hi.is_nan() {
        return None;
    }
    let last = (len - 1) as f64;
    let start = lo.ceil().max(0.0);
    let end = hi.floor().min(last);
    if end < start {
        return None;
    }
    Some(start.to_usize()?..end.to_usize()? + 1)
}

impl Shape {
    /// 将多边形栅格化为 `(高, 宽) = shape` 的布尔掩膜. 像素 `(h, w)` 为 `true`
    /// 当且仅当其中心 `(w, h)` 位于多边形内部 (规则见 [`Shape::contains`]).
    ///
    /// 只有包围盒内的像素会被逐一判定, 结果与全图扫描相同.
    pub fn mask(&self, (height, width): Idx2d) -> Array2<bool> {
        let mut mask = Array2::from_elem((height, width), false);
        let Some((lo, hi)) = self.bounding_box() else {
            return mask;
        };
        let (Some(rows), Some(cols)) = (
            pixel_span(lo.y, hi.y, height),
            pixel_span(lo.x, hi.x, width),
        ) else {
            return mask;
        };

        let (r0, c0) = (rows.start, cols.start);
        let window = mask.slice_mut(s![rows, cols]);
        let rasterize = |(r, c): Idx2d, m: &mut bool| {
            *m = self.contains(Point::new((c + c0) as f64, (r + r0) as f64));
        };

        cfg_if::cfg_if! {
            if #[cfg(feature = "rayon")] {
                Zip::indexed(window).par_for_each(rasterize);
            } else {
                Zip::indexed(window).for_each(rasterize);
            }
        }
        mask
    }
}

/// 计算 `image` 中中心位于 `polygon` 内部的所有像素的均值与个数.
///
/// 没有任何像素位于内部时 (如单点形状、线段、完全越界的形状), 均值为 0.
pub fn region_mean(image: ArrayView2<f32>, polygon: &Shape) -> RegionMean {
    let mask = polygon.mask(image.dim());
    let mut sum = 0.0f64;
    let mut pixels = 0usize;
    Zip::from(&image).and(&mask).for_each(|&v, &inside| {
        if inside {
            sum += v as f64;
            pixels += 1;
        }
    });
    let mean = if pixels == 0 {
        0.0
    } else {
        sum / pixels as f64
    };
    RegionMean { mean, pixels }
}

/// 计算 `image` 中中心位于 `polygon` 内部的所有像素的算术平均值.
/// 没有任何像素位于内部时返回 0.
#[inline]
pub fn mean_inside(image: ArrayView2<f32>, polygon: &Shape) -> f64 {
    region_mean(image, polygon).mean
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn shape(pts: &[(f64, f64)]) -> Shape {
        Shape::from_vertices(pts.iter().copied().map(Point::from)).closed()
    }

    #[test]
    fn test_square_on_constant_image() {
        let image = Array2::from_elem((4, 4), 5.0f32);
        let s = shape(&[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0)]);
        let r = region_mean(image.view(), &s);
        assert_eq!(r.mean, 5.0);
        assert_eq!(r.pixels, 4);
        assert_eq!(mean_inside(image.view(), &s), 5.0);
    }

    #[test]
    fn test_zero_interior_is_zero() {
        let image = Array2::from_elem((8, 8), -42.0f32);
        for s in [
            Shape::default().closed(),
            Shape::begin(Point::new(3.0, 3.0)).closed(),
            shape(&[(1.0, 1.0), (6.0, 1.0)]),
            shape(&[(100.0, 100.0), (120.0, 100.0), (120.0, 130.0)]),
            shape(&[(-30.0, -30.0), (-10.0, -30.0), (-10.0, -5.0)]),
            shape(&[(1.2, 1.2), (1.8, 1.2), (1.8, 1.8), (1.2, 1.8)]),
        ] {
            let r = region_mean(image.view(), &s);
            assert_eq!(r.mean, 0.0, "{s:?}");
            assert_eq!(r.pixels, 0);
        }
    }

    #[test]
    fn test_mask_matches_full_scan() {
        let s = shape(&[(1.5, 0.2), (9.7, 3.0), (6.0, 8.9), (0.4, 6.5), (3.0, 4.0)]);
        let (h, w) = (10, 12);
        let mask = s.mask((h, w));
        for ((r, c), &m) in mask.indexed_iter() {
            assert_eq!(m, s.contains(Point::new(c as f64, r as f64)), "({r}, {c})");
        }
        assert!(mask.iter().any(|&m| m));
    }

    #[test]
    fn test_partially_outside_polygon() {
        // 左上角超出图像: 只统计图像内的部分.
        let image = Array2::from_shape_fn((4, 4), |(h, w)| (h * 4 + w) as f32);
        let s = shape(&[(-5.0, -5.0), (2.0, -5.0), (2.0, 2.0), (-5.0, 2.0)]);
        let r = region_mean(image.view(), &s);
        assert_eq!(r.pixels, 4);
        assert_eq!(r.mean, (0.0 + 1.0 + 4.0 + 5.0) / 4.0);
    }

    #[test]
    fn test_far_away_vertex() {
        // 一个顶点远超图像范围, 仍然覆盖图像中的像素.
        let image = Array2::from_elem((4, 4), 5.0f32);
        let s = shape(&[(-1.0, -1.0), (1e20, -1.0), (-1.0, 10.0)]);
        assert!(s.contains(Point::new(1.0, 1.0)));
        let r = region_mean(image.view(), &s);
        assert_eq!(r.mean, 5.0);
        assert!(r.pixels > 0);
        for ((h, w), &m) in s.mask((4, 4)).indexed_iter() {
            assert_eq!(m, s.contains(Point::new(w as f64, h as f64)), "({h}, {w})");
        }
    }

    #[test]
    fn test_mean_of_mixed_values() {
        let mut image = Array2::from_elem((6, 6), 0.0f32);
        image[(1, 1)] = 100.0;
        image[(1, 2)] = -20.0;
        image[(2, 1)] = 40.0;
        image[(2, 2)] = 0.0;
        let s = shape(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]);
        assert_eq!(mean_inside(image.view(), &s), 30.0);
    }

    #[test]
    fn test_pixel_span() {
        assert_eq!(pixel_span(0.0, 2.0, 4), Some(0..3));
        assert_eq!(pixel_span(-3.0, 1.5, 4), Some(0..2));
        assert_eq!(pixel_span(2.5, 9.0, 4), Some(3..4));
        assert_eq!(pixel_span(1.2, 1.8, 4), None);
        assert_eq!(pixel_span(5.0, 9.0, 4), None);
        assert_eq!(pixel_span(-9.0, -1.0, 4), None);
        assert_eq!(pixel_span(0.0, 1.0, 0), None);
        assert_eq!(pixel_span(f64::NAN, 1.0, 4), None);
        assert_eq!(pixel_span(-1.0, 1e20, 4), Some(0..4));
        assert_eq!(pixel_span(f64::NEG_INFINITY, f64::INFINITY, 4), Some(0..4));
    }
}
