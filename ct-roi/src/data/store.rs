//! 一次加载得到的切片集合.

use super::CtSlice;
use crate::dataset::DecodeError;
use std::ops::Index;
use std::path::PathBuf;

/// 加载时被跳过的文件.
#[derive(Debug)]
pub struct SkippedFile {
    /// 文件路径.
    pub path: PathBuf,
    /// 解码错误.
    pub error: DecodeError,
}

/// 按文件名升序排列的切片集合, 同时保存被跳过的文件.
#[derive(Debug, Default)]
pub struct SliceStore {
    slices: Vec<CtSlice>,
    skipped: Vec<SkippedFile>,
}

impl Index<usize> for SliceStore {
    type Output = CtSlice;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.slices[index]
    }
}

impl SliceStore {
    /// 直接初始化.
    #[inline]
    pub(crate) fn new(slices: Vec<CtSlice>, skipped: Vec<SkippedFile>) -> Self {
        Self { slices, skipped }
    }

    /// 成功加载的切片数.
    #[inline]
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// 是否没有任何切片?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// 获取第 `index` 张切片. 越界时返回 `None`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&CtSlice> {
        self.slices.get(index)
    }

    /// 所有切片.
    #[inline]
    pub fn slices(&self) -> &[CtSlice] {
        &self.slices
    }

    /// 按升序迭代所有切片.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, CtSlice> {
        self.slices.iter()
    }

    /// 被跳过的文件.
    #[inline]
    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    /// 消费自我, 获得所有切片.
    #[inline]
    pub fn into_slices(self) -> Vec<CtSlice> {
        self.slices
    }
}
