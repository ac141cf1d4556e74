//! 通用常量.

/// 一次会话需要采集的 ROI 个数.
pub const ROI_COUNT: usize = 7;

/// 默认展示的切片序号 (按文件名排序后, 从 0 开始).
pub const DEFAULT_SLICE_INDEX: usize = 10;

/// 三通道颜色, `(R, G, B)` 顺序.
pub mod rgb {
    /// 红.
    pub const RED: [u8; 3] = [255, 0, 0];
    /// 绿.
    pub const GREEN: [u8; 3] = [0, 255, 0];
    /// 蓝.
    pub const BLUE: [u8; 3] = [0, 0, 255];
    /// 黄.
    pub const YELLOW: [u8; 3] = [255, 255, 0];
    /// 紫.
    pub const PURPLE: [u8; 3] = [128, 0, 128];
    /// 橙.
    pub const ORANGE: [u8; 3] = [255, 165, 0];
    /// 粉.
    pub const PINK: [u8; 3] = [255, 192, 203];
}

/// 每个 ROI 的显示颜色, 按完成顺序. 对称区域使用同一颜色.
pub const ROI_COLORS: [(&str, [u8; 3]); ROI_COUNT] = [
    ("red", rgb::RED),
    ("green", rgb::GREEN),
    ("blue", rgb::BLUE),
    ("yellow", rgb::YELLOW),
    ("purple", rgb::PURPLE),
    ("orange", rgb::ORANGE),
    ("pink", rgb::PINK),
];

/// 第 `index` 个 ROI 的颜色. 超出范围时循环使用.
#[inline]
pub const fn roi_color(index: usize) -> [u8; 3] {
    ROI_COLORS[index % ROI_COUNT].1
}
