//! 交互式 ROI 对称性测量.
//!
//! 选择 DICOM 目录后, 在第 `$CT_ROI_SLICE_INDEX` 张切片上依次手绘 7 个 ROI.
//! 每个 ROI 松开鼠标后立即计算其与对称区域的平均 HU 值, 全部完成后写入记录文件.

mod runner;
mod ui;

fn main() {
    utils::init_logger();
    if let Err(e) = runner::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
