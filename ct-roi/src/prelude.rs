//! 🍇欢迎光临🍓
//!
//! 涵盖了本 crate 一系列常用的功能.

pub use crate::Idx2d;

pub use crate::data::{CtSlice, CtWindow, ImgWriteVis, RawAttrs, SliceMeta, SliceStore};

#[cfg(feature = "plot")]
pub use crate::data::gray_mat;

pub use crate::consts::{DEFAULT_SLICE_INDEX, ROI_COLORS, ROI_COUNT};

pub use crate::dataset::{self, load_dicom_dir, load_dir, DicomDecoder, NpyDecoder, SliceDecoder};

pub use crate::roi::{
    CaptureState, Point, PointerEvent, RoiSession, SessionEvent, SessionRecord, Shape,
};
