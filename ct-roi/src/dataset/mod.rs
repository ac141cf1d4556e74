//! 切片文件的解码与目录加载.

use std::path::{Path, PathBuf};

mod decoder;
mod dicom;
mod loader;

pub use decoder::{DecodeError, NpyDecoder, RawSlice, SliceDecoder};
pub use dicom::{attrs_of, DicomDecoder};
pub use loader::{load_dir, slice_loader, SliceLoader};

use crate::data::SliceStore;

/// 加载目录时的错误.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// 路径不存在或不是目录.
    #[error("{} is not a directory", .0.display())]
    InvalidDir(PathBuf),

    /// 列出目录时的 I/O 错误.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// 没有任何文件被成功解码. 参数为被跳过的文件数.
    #[error("no valid images ({skipped} files skipped)")]
    NoValidImages {
        /// 被跳过的文件数.
        skipped: usize,
    },
}

/// 以 DICOM 格式加载目录 `dir` 下的所有切片.
#[inline]
pub fn load_dicom_dir<P: AsRef<Path>>(dir: P) -> Result<SliceStore, LoadError> {
    load_dir(dir, DicomDecoder)
}

/// 获取 `{用户主目录}/dataset` 目录.
pub fn home_dataset_dir() -> Option<PathBuf> {
    let mut ans = dirs::home_dir()?;
    ans.push("dataset");
    Some(ans)
}
