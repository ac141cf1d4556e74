//! 会话记录: ROI 均值与对称区域均值.

use std::fmt::{self, Display, Formatter};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// 记录文件表头.
pub const RECORD_HEADER: &str = "ROI\tSymétrie";

/// 默认的记录文件名.
pub const DEFAULT_RECORD_FILE: &str = "moyennes_roi_symetries.txt";

/// 持久化记录时的错误.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// 写入目标文件失败. 内存中的记录不受影响, 可以换一个路径重试.
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        /// 目标路径.
        path: PathBuf,
        /// 底层 I/O 错误.
        source: io::Error,
    },
}

/// 按完成顺序排列的 `(ROI 均值, 对称区域均值)` 记录. 只能追加.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionRecord {
    roi_means: Vec<f64>,
    mirror_means: Vec<f64>,
}

impl SessionRecord {
    /// 初始化空记录.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一行.
    #[inline]
    pub fn record(&mut self, roi_mean: f64, mirror_mean: f64) {
        self.roi_means.push(roi_mean);
        self.mirror_means.push(mirror_mean);
    }

    /// 行数.
    #[inline]
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.roi_means.len(), self.mirror_means.len());
        self.roi_means.len()
    }

    /// 是否没有任何记录?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 所有 ROI 均值.
    #[inline]
    pub fn roi_means(&self) -> &[f64] {
        &self.roi_means
    }

    /// 所有对称区域均值.
    #[inline]
    pub fn mirror_means(&self) -> &[f64] {
        &self.mirror_means
    }

    /// 按顺序迭代 `(ROI 均值, 对称区域均值)`.
    #[inline]
    pub fn rows(&self) -> impl ExactSizeIterator<Item = (f64, f64)> + '_ {
        self.roi_means
            .iter()
            .copied()
            .zip(self.mirror_means.iter().copied())
    }

    /// 清空记录.
    pub(crate) fn clear(&mut self) {
        self.roi_means.clear();
        self.mirror_means.clear();
    }

    /// 以制表符分隔的表格形式写入 `w`: 表头一行, 之后每行
    /// `{roi:.2}\t{mirror:.2}`, 每行以换行符结尾.
    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        writeln!(w, "{RECORD_HEADER}")?;
        for (roi, mirror) in self.rows() {
            writeln!(w, "{roi:.2}\t{mirror:.2}")?;
        }
        Ok(())
    }

    /// 将记录写入 `path`, 覆盖已有文件.
    ///
    /// 失败时返回 `Err(RecordError::Io)`, 内存中的记录保持不变.
    pub fn finalize<P: AsRef<Path>>(&self, path: P) -> Result<(), RecordError> {
        let path = path.as_ref();
        let io_err = |source| RecordError::Io {
            path: path.to_owned(),
            source,
        };
        let mut w = BufWriter::new(File::create(path).map_err(io_err)?);
        self.write_to(&mut w).map_err(io_err)?;
        w.flush().map_err(io_err)
    }
}

/// 每行一条 `ROI i: x, Symétrie i: y`, 序号从 1 开始.
impl Display for SessionRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, (roi, mirror)) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "ROI {}: {roi:.2}, Symétrie {}: {mirror:.2}", i + 1, i + 1)?;
        }
        Ok(())
    }
}
