//! 由指针事件驱动的多边形采集.

use super::shape::{Point, Shape};
use crate::consts::ROI_COUNT;

/// 外部指针事件源产生的事件.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerEvent {
    /// 按下.
    Press(Point),
    /// 按住并移动.
    Drag(Point),
    /// 松开.
    Release(Point),
}

/// 采集状态.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CaptureState {
    /// 等待 (或正在绘制) 第 `i` 个形状, `i < ROI_COUNT`.
    AwaitingShape(usize),
    /// 所有形状均已完成. 终止状态.
    SessionComplete,
}

/// 一个形状刚刚闭合.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeClosed {
    /// 形状的序号, 即完成顺序.
    pub index: usize,
    /// 闭合后的形状.
    pub shape: Shape,
}

/// 多边形采集器. 依次采集 [`ROI_COUNT`] 个手绘形状.
///
/// 事件按 "按下 -> (移动)* -> 松开" 的顺序到来. 同一时刻至多有一个形状正在绘制;
/// 形状一旦闭合便不可修改. 采集完成后忽略一切事件.
#[derive(Clone, Debug, Default)]
pub struct RoiCapture {
    closed: Vec<Shape>,
    current: Option<Shape>,
}

impl RoiCapture {
    /// 初始化, 处于 `AwaitingShape(0)` 状态.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前状态.
    #[inline]
    pub fn state(&self) -> CaptureState {
        match self.closed.len() {
            i if i < ROI_COUNT => CaptureState::AwaitingShape(i),
            _ => CaptureState::SessionComplete,
        }
    }

    /// 是否已经采集完所有形状?
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.state() == CaptureState::SessionComplete
    }

    /// 已闭合的形状, 按完成顺序排列.
    #[inline]
    pub fn shapes(&self) -> &[Shape] {
        &self.closed
    }

    /// 正在绘制的形状.
    #[inline]
    pub fn current(&self) -> Option<&Shape> {
        self.current.as_ref()
    }

    /// 按下: 以 `p` 为第一个顶点开始新形状. 返回事件是否被接受.
    ///
    /// 若已有形状正在绘制 (缺失了松开事件), `p` 作为普通顶点追加到该形状上.
    /// 采集完成后什么也不做.
    pub fn on_press(&mut self, p: Point) -> bool {
        if self.is_complete() {
            return false;
        }
        match self.current.as_mut() {
            Some(shape) => shape.push(p),
            None => {
                self.current = Some(Shape::begin(p));
                true
            }
        }
    }

    /// 移动: 仅当有形状正在绘制时追加 `p`. 返回事件是否被接受.
    pub fn on_drag(&mut self, p: Point) -> bool {
        match self.current.as_mut() {
            Some(shape) => shape.push(p),
            None => false,
        }
    }

    /// 松开: 闭合正在绘制的形状并前进到下一个序号. 松开位置不作为顶点.
    ///
    /// 没有形状正在绘制时返回 `None`.
    pub fn on_release(&mut self, _p: Point) -> Option<ShapeClosed> {
        let shape = self.current.take()?.closed();
        let index = self.closed.len();
        self.closed.push(shape.clone());
        Some(ShapeClosed { index, shape })
    }

    /// 分发一个指针事件. 只有松开事件可能产生结果.
    pub fn handle(&mut self, event: PointerEvent) -> Option<ShapeClosed> {
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

    /// 放弃正在绘制的形状以及所有已完成的形状, 回到 `AwaitingShape(0)`.
    /// 返回是否确实取消了.
    ///
    /// `SessionComplete` 是终止状态, 此时什么也不做.
    pub fn cancel_session(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        self.current = None;
        self.closed.clear();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_press_drag_release_cycle() {
        let mut cap = RoiCapture::new();
        assert_eq!(cap.state(), CaptureState::AwaitingShape(0));

        // 没有形状时的移动和松开被忽略.
        assert!(!cap.on_drag(p(5.0, 5.0)));
        assert_eq!(cap.on_release(p(5.0, 5.0)), None);

        assert!(cap.on_press(p(1.0, 1.0)));
        assert!(cap.on_drag(p(3.0, 1.0)));
        assert!(cap.on_drag(p(3.0, 3.0)));
        let done = cap.on_release(p(3.0, 3.0)).unwrap();

        assert_eq!(done.index, 0);
        assert!(done.shape.is_closed());
        assert_eq!(
            done.shape.vertices(),
            &[p(1.0, 1.0), p(3.0, 1.0), p(3.0, 3.0), p(1.0, 1.0)]
        );
        assert_eq!(cap.state(), CaptureState::AwaitingShape(1));
        assert_eq!(cap.current(), None);
        assert_eq!(cap.shapes(), &[done.shape]);
    }

    #[test]
    fn test_single_click_closes_to_point() {
        let mut cap = RoiCapture::new();
        cap.on_press(p(2.0, 2.0));
        let done = cap.on_release(p(2.0, 2.0)).unwrap();
        assert_eq!(done.shape.vertices(), &[p(2.0, 2.0), p(2.0, 2.0)]);
    }

    #[test]
    fn test_press_while_drawing_appends() {
        let mut cap = RoiCapture::new();
        cap.on_press(p(0.0, 0.0));
        cap.on_press(p(1.0, 0.0));
        assert_eq!(cap.current().unwrap().len(), 2);
        assert_eq!(cap.state(), CaptureState::AwaitingShape(0));
    }

    #[test]
    fn test_session_completes_and_ignores_events() {
        let mut cap = RoiCapture::new();
        for i in 0..ROI_COUNT {
            assert_eq!(cap.state(), CaptureState::AwaitingShape(i));
            cap.handle(PointerEvent::Press(p(i as f64, 0.0)));
            cap.handle(PointerEvent::Drag(p(i as f64, 1.0)));
            let done = cap.handle(PointerEvent::Release(p(i as f64, 1.0))).unwrap();
            assert_eq!(done.index, i);
        }
        assert!(cap.is_complete());
        assert_eq!(cap.shapes().len(), ROI_COUNT);

        assert!(!cap.on_press(p(9.0, 9.0)));
        assert!(!cap.on_drag(p(9.0, 9.0)));
        assert_eq!(cap.on_release(p(9.0, 9.0)), None);
        assert_eq!(cap.state(), CaptureState::SessionComplete);
        assert_eq!(cap.shapes().len(), ROI_COUNT);
    }

    #[test]
    fn test_cancel_session() {
        let mut cap = RoiCapture::new();
        cap.on_press(p(0.0, 0.0));
        cap.on_release(p(0.0, 0.0));
        cap.on_press(p(1.0, 1.0));
        cap.on_drag(p(2.0, 1.0));

        assert!(cap.cancel_session());
        assert_eq!(cap.state(), CaptureState::AwaitingShape(0));
        assert!(cap.current().is_none());
        assert!(cap.shapes().is_empty());

        // 取消后可以重新开始.
        cap.on_press(p(4.0, 4.0));
        assert_eq!(cap.on_release(p(4.0, 4.0)).unwrap().index, 0);
    }

    #[test]
    fn test_cancel_after_complete_is_ignored() {
        let mut cap = RoiCapture::new();
        for i in 0..ROI_COUNT {
            cap.on_press(p(i as f64, i as f64));
            cap.on_release(p(i as f64, i as f64));
        }
        assert!(cap.is_complete());

        assert!(!cap.cancel_session());
        assert_eq!(cap.state(), CaptureState::SessionComplete);
        assert_eq!(cap.shapes().len(), ROI_COUNT);
    }
}
