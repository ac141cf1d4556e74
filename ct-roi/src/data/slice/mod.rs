//! CT 切片对象及其可视化、持久化.

mod core;
mod save;

pub use core::CtSlice;

pub use save::{mosaic, ImgWriteVis, MOSAIC_COLUMNS};

cfg_if::cfg_if! {
    if #[cfg(feature = "plot")] {
        mod plot;

        pub use plot::gray_mat;
    }
}
