//! 平面点与手绘多边形.
//!
//! 坐标系与图像显示一致: `x` 为列方向 (向右增长), `y` 为行方向 (向下增长).
//! 像素 `(h, w)` 的中心位于 `(x = w, y = h)`.

use itertools::Itertools;

/// 切片像素坐标系中的点. 鼠标位置可能落在像素之间, 因此使用浮点数.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// 列方向坐标.
    pub x: f64,
    /// 行方向坐标.
    pub y: f64,
}

impl Point {
    /// 构建点.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// 关于竖直线 `x = width / 2` 的镜像点 `(width - x, y)`.
    #[inline]
    pub fn mirror(self, width: f64) -> Self {
        Self::new(width - self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// 一个手绘多边形的顶点序列.
///
/// 绘制过程中为 "开放" 状态; 闭合时把第一个顶点追加到末尾. 闭合后不可再修改.
/// 只有一个顶点的形状也是合法的, 闭合后退化为一个点, 内部不含任何像素.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shape {
    vertices: Vec<Point>,
    closed: bool,
}

impl Shape {
    /// 以 `first` 为第一个顶点开始一个开放形状.
    #[inline]
    pub fn begin(first: Point) -> Self {
        Self {
            vertices: vec![first],
            closed: false,
        }
    }

    /// 由给定顶点构建开放形状.
    #[inline]
    pub fn from_vertices<I: IntoIterator<Item = Point>>(it: I) -> Self {
        Self {
            vertices: it.into_iter().collect(),
            closed: false,
        }
    }

    /// 追加顶点. 已闭合时什么也不做, 返回 `false`.
    #[inline]
    pub(crate) fn push(&mut self, p: Point) -> bool {
        if !self.closed {
            self.vertices.push(p);
        }
        !self.closed
    }

    /// 闭合形状: 把第一个顶点追加为最后一个顶点. 空形状和已闭合的形状保持不变.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        if let Some(&first) = self.vertices.first() {
            self.vertices.push(first);
        }
        self.closed = true;
    }

    /// 消费自我, 获得闭合的形状.
    #[inline]
    pub fn closed(mut self) -> Self {
        self.close();
        self
    }

    /// 是否已闭合?
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// 顶点序列. 闭合形状的首尾顶点相同.
    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// 顶点个数 (闭合形状包括重复的首顶点).
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// 是否没有任何顶点?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// 关于图像竖直中线的镜像形状: 每个顶点 `(x, y)` 变为 `(width - x, y)`.
    ///
    /// 保持顶点顺序和闭合状态. 空形状原样返回. 对整数和半像素坐标,
    /// `s.mirror(w).mirror(w) == s` 严格成立.
    pub fn mirror(&self, width: f64) -> Self {
        Self {
            vertices: self.vertices.iter().map(|p| p.mirror(width)).collect(),
            closed: self.closed,
        }
    }

    /// 包围盒 `(左上, 右下)`. 空形状返回 `None`.
    pub fn bounding_box(&self) -> Option<(Point, Point)> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(lo, hi), p| {
            (
                Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        }))
    }

    /// 判断 `p` 是否在多边形内部. 开放形状视为隐式闭合.
    ///
    /// # 判定规则
    ///
    /// 奇偶射线法 (PNPOLY): 从 `p` 向 `+x` 方向发出射线, 统计与边的交点个数.
    /// 一条边被计入当且仅当其两端点中恰有一个满足 `y > p.y` (半开区间), 并且交点严格位于
    /// `p` 的右侧. 因此正好落在边上的点: 左边界与上边界计入内部, 右边界与下边界不计入.
    /// 例如正方形 `[(0, 0), (0, 2), (2, 2), (2, 0)]` 包含的像素中心恰为 `[0, 2) x [0, 2)`.
    pub fn contains(&self, p: Point) -> bool {
        self.vertices
            .iter()
            .circular_tuple_windows()
            .fold(false, |inside, (a, b)| {
                if (a.y > p.y) != (b.y > p.y) {
                    // 两端点 y 值不同, 不会除零.
                    let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
                    if p.x < x_cross {
                        return !inside;
                    }
                }
                inside
            })
    }
}
