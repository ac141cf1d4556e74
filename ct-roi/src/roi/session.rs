//! ROI 测量会话: 把指针事件、镜像、区域统计和记录串联起来.

use super::capture::{CaptureState, PointerEvent, RoiCapture, ShapeClosed};
use super::record::{RecordError, SessionRecord};
use super::shape::{Point, Shape};
use super::stats::{region_mean, RegionMean};
use crate::data::CtSlice;
use log::info;
use std::path::Path;
use std::sync::Arc;

/// 一个 ROI 及其对称区域的测量结果.
#[derive(Clone, Debug, PartialEq)]
pub struct RoiMeasurement {
    /// 完成顺序, 从 0 开始.
    pub index: usize,
    /// 手绘形状 (已闭合).
    pub roi: Shape,
    /// 关于竖直中线的对称形状.
    pub mirror: Shape,
    /// 手绘形状内的 HU 统计.
    pub roi_mean: RegionMean,
    /// 对称形状内的 HU 统计.
    pub mirror_mean: RegionMean,
}

/// 会话对外产生的事件.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// 一个 ROI 测量完毕, 会话继续.
    Measured(RoiMeasurement),
    /// 最后一个 ROI 测量完毕, 会话结束. 调用方应随后调用 [`RoiSession::finalize`].
    Completed(RoiMeasurement),
}

impl SessionEvent {
    /// 事件携带的测量结果.
    #[inline]
    pub fn measurement(&self) -> &RoiMeasurement {
        match self {
            Self::Measured(m) | Self::Completed(m) => m,
        }
    }
}

/// 在一张切片上进行的 ROI 测量会话.
///
/// 所有状态变化都在事件处理函数中同步完成. 切片只读共享.
#[derive(Debug)]
pub struct RoiSession {
    slice: Arc<CtSlice>,
    capture: RoiCapture,
    measurements: Vec<RoiMeasurement>,
    record: SessionRecord,
}

impl RoiSession {
    /// 在 `slice` 上开始新会话.
    pub fn new<S: Into<Arc<CtSlice>>>(slice: S) -> Self {
        Self {
            slice: slice.into(),
            capture: RoiCapture::new(),
            measurements: Vec::new(),
            record: SessionRecord::new(),
        }
    }

    /// 会话所在的切片.
    #[inline]
    pub fn slice(&self) -> &CtSlice {
        &self.slice
    }

    /// 当前状态.
    #[inline]
    pub fn state(&self) -> CaptureState {
        self.capture.state()
    }

    /// 是否已完成所有 ROI?
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.capture.is_complete()
    }

    /// 按完成顺序排列的测量结果.
    #[inline]
    pub fn measurements(&self) -> &[RoiMeasurement] {
        &self.measurements
    }

    /// 正在绘制的形状.
    #[inline]
    pub fn current(&self) -> Option<&Shape> {
        self.capture.current()
    }

    /// 会话记录.
    #[inline]
    pub fn record(&self) -> &SessionRecord {
        &self.record
    }

    /// 按下. 返回事件是否被接受 (可据此决定是否重绘).
    #[inline]
    pub fn on_press(&mut self, p: Point) -> bool {
        self.capture.on_press(p)
    }

    /// 移动. 返回事件是否被接受.
    #[inline]
    pub fn on_drag(&mut self, p: Point) -> bool {
        self.capture.on_drag(p)
    }

    /// 松开. 若有形状闭合, 则计算其对称形状与两者的 HU 均值并追加到记录中.
    pub fn on_release(&mut self, p: Point) -> Option<SessionEvent> {
        let closed = self.capture.on_release(p)?;
        let m = self.measure(closed);
        info!(
            "ROI {}: mean {:.2} HU over {} px, mirror {:.2} HU over {} px",
            m.index + 1,
            m.roi_mean.mean,
            m.roi_mean.pixels,
            m.mirror_mean.mean,
            m.mirror_mean.pixels
        );
        self.record.record(m.roi_mean.mean, m.mirror_mean.mean);
        self.measurements.push(m.clone());

        if self.capture.is_complete() {
            info!("all {} ROIs measured", self.measurements.len());
            Some(SessionEvent::Completed(m))
        } else {
            Some(SessionEvent::Measured(m))
        }
    }

    /// 分发一个指针事件.
    pub fn handle(&mut self, event: PointerEvent) -> Option<SessionEvent> {
        match event {
            PointerEvent::Press(p) => {
                self.on_press(p);
                None
            }
            PointerEvent::Drag(p) => {
                self.on_drag(p);
                None
            }
            PointerEvent::Release(p) => self.on_release(p),
        }
    }

    /// 放弃当前会话的所有形状和记录, 回到第一个 ROI. 返回是否确实取消了.
    ///
    /// 会话完成后什么也不做: 形状与记录保持不变. 需要重新测量时应新建会话.
    pub fn cancel_session(&mut self) -> bool {
        if !self.capture.cancel_session() {
            return false;
        }
        self.measurements.clear();
        self.record.clear();
        info!("session cancelled");
        true
    }

    /// 将记录写入 `path`. 失败时记录保持不变, 可换路径重试.
    pub fn finalize<P: AsRef<Path>>(&self, path: P) -> Result<(), RecordError> {
        self.record.finalize(path.as_ref())?;
        info!(
            "{} ROI means written to {}",
            self.record.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    fn measure(&self, ShapeClosed { index, shape }: ShapeClosed) -> RoiMeasurement {
        let hu = self.slice.hu();
        let mirror = shape.mirror(self.slice.width() as f64);
        RoiMeasurement {
            index,
            roi_mean: region_mean(hu, &shape),
            mirror_mean: region_mean(hu, &mirror),
            roi: shape,
            mirror,
        }
    }
}
