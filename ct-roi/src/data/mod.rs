//! CT 切片基础数据结构: 元信息, 窗口, 切片与切片集合.

pub mod meta;
pub mod slice;
mod store;
pub mod window;

pub use meta::{RawAttrs, SliceMeta};

pub use slice::{mosaic, CtSlice, ImgWriteVis, MOSAIC_COLUMNS};

#[cfg(feature = "plot")]
pub use slice::gray_mat;

pub use store::{SkippedFile, SliceStore};

pub use window::CtWindow;
