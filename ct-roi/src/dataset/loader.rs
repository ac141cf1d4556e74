//! 目录切片加载器.
//!
//! 提供迭代器风格的数据集获取模式.

use super::decoder::{DecodeError, SliceDecoder};
use super::LoadError;
use crate::data::{CtSlice, SkippedFile, SliceStore};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// 从目录 `dir` 创建切片加载器. 目录下的普通文件按文件名升序解码,
/// 子目录被忽略.
///
/// 当 `dir` 不是目录时返回 `Err(LoadError::InvalidDir)`.
pub fn slice_loader<P: AsRef<Path>, D: SliceDecoder>(
    dir: P,
    decoder: D,
) -> Result<SliceLoader<D>, LoadError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(LoadError::InvalidDir(dir.to_owned()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            debug!("ignoring sub directory {}", entry.path().display());
            continue;
        }
        files.push(entry.path());
    }
    // 倒序存放, 以便从尾部弹出.
    files.sort_unstable_by(|a, b| b.file_name().cmp(&a.file_name()));

    Ok(SliceLoader {
        files_rev: files,
        decoder,
    })
}

/// 切片加载器, 逐个解码目录中的文件.
#[derive(Debug)]
pub struct SliceLoader<D> {
    files_rev: Vec<PathBuf>,
    decoder: D,
}

impl<D: SliceDecoder> Iterator for SliceLoader<D> {
    type Item = (PathBuf, Result<CtSlice, DecodeError>);

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.files_rev.pop()?;
        let data = self.decoder.decode_slice(&path);
        Some((path, data))
    }
}

impl<D: SliceDecoder> ExactSizeIterator for SliceLoader<D> {
    #[inline]
    fn len(&self) -> usize {
        self.files_rev.len()
    }
}

/// 用 `decoder` 加载目录 `dir` 下所有能解码的切片.
///
/// 解码失败的文件被跳过 (记录在 [`SliceStore::skipped`] 中, 并输出警告日志).
/// 打开 `rayon` feature 时并行解码, 结果顺序不变.
/// 一张切片也没有加载成功时返回 `Err(LoadError::NoValidImages)`.
pub fn load_dir<P: AsRef<Path>, D: SliceDecoder>(
    dir: P,
    decoder: D,
) -> Result<SliceStore, LoadError> {
    let loader = slice_loader(dir.as_ref(), decoder)?;

    cfg_if::cfg_if! {
        if #[cfg(feature = "rayon")] {
            use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};

            let SliceLoader { files_rev, decoder } = loader;
            let decoded: Vec<_> = files_rev
                .into_par_iter()
                .rev()
                .map(|path| {
                    let data = decoder.decode_slice(&path);
                    (path, data)
                })
                .collect();
        } else {
            let decoded: Vec<_> = loader.collect();
        }
    }

    let mut slices = Vec::with_capacity(decoded.len());
    let mut skipped = Vec::new();
    for (path, data) in decoded {
        match data {
            Ok(sli) => {
                debug!("decoded {} ({:?})", path.display(), sli.shape());
                slices.push(sli);
            }
            Err(error) => {
                warn!("skipping {}: {error}", path.display());
                skipped.push(SkippedFile { path, error });
            }
        }
    }

    if slices.is_empty() {
        return Err(LoadError::NoValidImages {
            skipped: skipped.len(),
        });
    }
    info!(
        "loaded {} slices from {} ({} skipped)",
        slices.len(),
        dir.as_ref().display(),
        skipped.len()
    );
    Ok(SliceStore::new(slices, skipped))
}
