//! 手绘 ROI 及其对称区域的测量.
//!
//! 数据流: 指针事件 -> [`RoiCapture`] 闭合形状 -> 镜像 -> [`region_mean`] -> [`SessionRecord`].
//! [`RoiSession`] 把上述步骤组合在一起.

mod capture;
mod record;
mod session;
mod shape;
mod stats;

pub use capture::{CaptureState, PointerEvent, RoiCapture, ShapeClosed};
pub use record::{RecordError, SessionRecord, DEFAULT_RECORD_FILE, RECORD_HEADER};
pub use session::{RoiMeasurement, RoiSession, SessionEvent};
pub use shape::{Point, Shape};
pub use stats::{mean_inside, region_mean, RegionMean};
