#![warn(missing_docs)] // <= 合适时移除它.
// #![warn(clippy::missing_docs_in_private_items)]  // <= too strict.

//! 核心库. 在单张 CT 切片上手绘 ROI, 自动计算其关于图像竖直中线的对称区域,
//! 并记录两者的平均 HU 值, 用于左右对称性比较.
//!
//! 该 crate 仅提供 `safe` 接口.
//!
//! # 组成
//!
//! ### 切片加载 ✅
//!
//! 读取目录下的 DICOM (或 `.npy`) 文件, 按文件名排序, 无法解码的文件被跳过并记录.
//! 缺失的窗位/窗宽/斜率/截距按切片内容补全.
//!
//! 实现位于 `ct-roi/src/dataset`.
//!
//! ### CT window 视图 ✅
//!
//! 提供一个独立的 CT 窗口对象, 以便将 CT HU 值转换为 8-bit 灰度值.
//!
//! 实现位于 `ct-roi/src/data/window.rs`.
//!
//! ### 缩略图拼接 ✅
//!
//! 实现位于 `ct-roi/src/data/slice/save.rs`.
//!
//! ### 手绘多边形, 镜像与区域均值 ✅
//!
//! 1. 事件驱动的多边形采集, 一次会话固定 7 个 ROI.
//! 2. 镜像: `(x, y)` -> `(W - x, y)`.
//! 3. 像素中心位于多边形内部 (奇偶规则, 半开边界) 的像素参与均值计算.
//! 4. 结果以制表符分隔写入文本文件.
//!
//! 实现位于 `ct-roi/src/roi`.
//!
//! # 坐标
//!
//! 数组索引使用 `(h, w)`, 平面点使用 `(x, y)`, 其中 `x = w`, `y = h`.

/// 二维索引 `(h, w)`.
pub type Idx2d = (usize, usize);

/// CT 切片基础数据结构.
mod data;

pub use data::{
    mosaic, CtSlice, CtWindow, ImgWriteVis, RawAttrs, SkippedFile, SliceMeta, SliceStore,
    MOSAIC_COLUMNS,
};

#[cfg(feature = "plot")]
pub use data::gray_mat;

pub mod consts;

pub mod dataset;

pub mod roi;

pub mod prelude;
