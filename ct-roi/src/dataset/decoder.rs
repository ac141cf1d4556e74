//! 单个切片文件的解码.

use crate::data::{CtSlice, RawAttrs, SliceMeta};
use ndarray::Array2;
use ndarray_npy::{read_npy, ReadNpyError};
use std::path::Path;

/// 单个文件解码失败的原因. 加载目录时该错误只会导致文件被跳过.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// 底层 I/O 错误.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// 无法作为 DICOM 对象读取.
    #[error("not a readable DICOM object: {0}")]
    Dicom(#[from] dicom_object::ReadError),

    /// 像素数据无法解码.
    #[error("pixel data could not be decoded: {0}")]
    PixelData(#[from] dicom_pixeldata::Error),

    /// npy 文件读取错误.
    #[error("npy grid could not be read: {0}")]
    Npy(#[from] ReadNpyError),

    /// 像素数据不是单帧单通道的二维网格. 参数为实际形状.
    #[error("unsupported pixel layout {0:?}, expected a single 2D grid")]
    Layout(Vec<usize>),
}

/// 解码结果: 原始像素网格 (HU 变换之前) 与尽力读取的属性.
#[derive(Clone, Debug)]
pub struct RawSlice {
    /// 原始像素值, 按 (高, 宽) 组织.
    pub grid: Array2<f32>,
    /// 原始属性.
    pub attrs: RawAttrs,
}

/// 表明一个可以把文件解码成二维切片的对象. 加载目录时可能被多个线程共享.
pub trait SliceDecoder: Sync {
    /// 解码 `path` 处的文件.
    fn decode(&self, path: &Path) -> Result<RawSlice, DecodeError>;

    /// 解码 `path` 处的文件, 并解析缺省元信息、完成 HU 变换.
    fn decode_slice(&self, path: &Path) -> Result<CtSlice, DecodeError> {
        let RawSlice { grid, attrs } = self.decode(path)?;
        let meta = SliceMeta::resolve(&attrs, grid.view());
        Ok(CtSlice::from_raw(grid, meta).with_source(path))
    }
}

impl<T: SliceDecoder + ?Sized> SliceDecoder for &T {
    #[inline]
    fn decode(&self, path: &Path) -> Result<RawSlice, DecodeError> {
        (**self).decode(path)
    }
}

/// 读取二维 `.npy` 网格. 所有属性都视为缺失.
///
/// 支持 `f32`, `f64`, `i16`, `u16`, `i32` 元素类型.
#[derive(Copy, Clone, Debug, Default)]
pub struct NpyDecoder;

fn read_npy_grid(path: &Path) -> Result<Array2<f32>, ReadNpyError> {
    // 只有类型描述不符时才继续尝试下一个元素类型.
    macro_rules! attempt {
        ($t: ty) => {
            match read_npy::<_, Array2<$t>>(path) {
                Ok(arr) => return Ok(arr.mapv(|v| v as f32)),
                Err(ReadNpyError::WrongDescriptor(_)) => {}
                Err(e) => return Err(e),
            }
        };
    }
    attempt!(f32);
    attempt!(f64);
    attempt!(i16);
    attempt!(u16);
    read_npy::<_, Array2<i32>>(path).map(|arr| arr.mapv(|v| v as f32))
}

impl SliceDecoder for NpyDecoder {
    fn decode(&self, path: &Path) -> Result<RawSlice, DecodeError> {
        let grid = read_npy_grid(path)?;
        Ok(RawSlice {
            grid,
            attrs: RawAttrs::default(),
        })
    }
}
