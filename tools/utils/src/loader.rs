//! 对 `ct-roi::dataset` 的更一层封装. 从环境变量 (或对话框) 获取运行配置.

use ct_roi::consts::DEFAULT_SLICE_INDEX;
use ct_roi::roi::DEFAULT_RECORD_FILE;
use log::{info, warn};
use std::env;
use std::path::PathBuf;

/// 输入目录对应的环境变量.
pub const DICOM_DIR_VAR: &str = "CT_ROI_DICOM_DIR";

/// 切片序号对应的环境变量.
pub const SLICE_INDEX_VAR: &str = "CT_ROI_SLICE_INDEX";

/// 输出文件对应的环境变量.
pub const OUTPUT_VAR: &str = "CT_ROI_OUTPUT";

/// 总览图输出路径对应的环境变量.
pub const MOSAIC_VAR: &str = "CT_ROI_MOSAIC";

/// 读取非空的环境变量.
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.trim().is_empty())
}

/// 获取 DICOM 目录.
///
/// 1. 若环境变量 `$CT_ROI_DICOM_DIR` 非空, 则返回其值;
/// 2. 否则, 弹出目录选择对话框, 初始位置为 `$HOME/dataset` (若存在).
///
/// 用户取消对话框时返回 `None`.
pub fn dicom_dir_from_env_or_dialog() -> Option<PathBuf> {
    if let Some(d) = non_empty_var(DICOM_DIR_VAR) {
        return Some(PathBuf::from(d));
    }
    let mut dialog = rfd::FileDialog::new().set_title("Select a DICOM folder");
    if let Some(home) = ct_roi::dataset::home_dataset_dir().filter(|d| d.is_dir()) {
        dialog = dialog.set_directory(home);
    }
    let picked = dialog.pick_folder();
    if picked.is_none() {
        info!("folder selection cancelled");
    }
    picked
}

/// 解析切片序号, 无法解析时返回 `None`.
fn parse_index(s: &str) -> Option<usize> {
    s.trim().parse().ok()
}

/// 获取要展示的切片序号.
///
/// 1. 若环境变量 `$CT_ROI_SLICE_INDEX` 是合法的非负整数, 则返回其值;
/// 2. 否则, 返回 [`DEFAULT_SLICE_INDEX`].
pub fn slice_index_from_env() -> usize {
    match non_empty_var(SLICE_INDEX_VAR) {
        Some(s) => parse_index(&s).unwrap_or_else(|| {
            warn!("invalid ${SLICE_INDEX_VAR} `{s}`, using {DEFAULT_SLICE_INDEX}");
            DEFAULT_SLICE_INDEX
        }),
        None => DEFAULT_SLICE_INDEX,
    }
}

/// 获取记录文件路径.
///
/// 1. 若环境变量 `$CT_ROI_OUTPUT` 非空, 则返回其值;
/// 2. 否则, 返回当前目录下的 [`DEFAULT_RECORD_FILE`].
pub fn output_path_from_env() -> PathBuf {
    non_empty_var(OUTPUT_VAR).map_or_else(|| PathBuf::from(DEFAULT_RECORD_FILE), PathBuf::from)
}

/// 写入失败时的备用记录文件路径: `$HOME/` 下的 [`DEFAULT_RECORD_FILE`].
pub fn fallback_output_path() -> Option<PathBuf> {
    let mut ans = dirs::home_dir()?;
    ans.push(DEFAULT_RECORD_FILE);
    Some(ans)
}

/// 获取总览图输出路径. 未设置 `$CT_ROI_MOSAIC` 时不保存总览图.
pub fn mosaic_path_from_env() -> Option<PathBuf> {
    non_empty_var(MOSAIC_VAR).map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index("10"), Some(10));
        assert_eq!(parse_index(" 3 "), Some(3));
        assert_eq!(parse_index("-1"), None);
        assert_eq!(parse_index("ten"), None);
    }

    #[test]
    fn test_fallback_output_name() {
        if let Some(p) = fallback_output_path() {
            assert!(p.ends_with(DEFAULT_RECORD_FILE));
        }
    }
}
