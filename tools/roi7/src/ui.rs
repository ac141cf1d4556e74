//! 窗口绘制与鼠标事件转换.

use ct_roi::consts::roi_color;
use ct_roi::prelude::*;
use ct_roi::gray_mat;
use opencv::core::{self, Mat, Scalar, Vector};
use opencv::highgui;
use opencv::imgproc;
use opencv::prelude::MatTraitConst;

/// 填充区域的不透明度.
const FILL_ALPHA: f64 = 0.35;

/// `[R, G, B]` 转为 OpenCV 的 BGR 标量.
#[inline]
fn bgr([r, g, b]: [u8; 3]) -> Scalar {
    Scalar::new(b as f64, g as f64, r as f64, 0.0)
}

/// 将形状顶点转换为 OpenCV 的单条折线.
fn polyline(shape: &Shape) -> Vector<Vector<core::Point>> {
    let pts: Vector<core::Point> = shape
        .vertices()
        .iter()
        .map(|p| core::Point::new(p.x.round() as i32, p.y.round() as i32))
        .collect();
    Vector::from_iter([pts])
}

/// 将 OpenCV 鼠标事件转换为指针事件. 不关心的事件返回 `None`.
pub fn pointer_event(event: i32, x: i32, y: i32, flags: i32) -> Option<PointerEvent> {
    let p = Point::new(x as f64, y as f64);
    match event {
        highgui::EVENT_LBUTTONDOWN => Some(PointerEvent::Press(p)),
        highgui::EVENT_MOUSEMOVE if flags & highgui::EVENT_FLAG_LBUTTON != 0 => {
            Some(PointerEvent::Drag(p))
        }
        highgui::EVENT_LBUTTONUP => Some(PointerEvent::Release(p)),
        _ => None,
    }
}

/// 切片底图. 每次重绘都在其副本上叠加形状.
pub struct Canvas {
    base: Mat,
}

impl Canvas {
    /// 按切片自身窗口生成三通道底图.
    pub fn new(slice: &CtSlice) -> opencv::Result<Self> {
        let gray = gray_mat(slice)?;
        let mut base = Mat::default();
        imgproc::cvt_color(&gray, &mut base, imgproc::COLOR_GRAY2BGR, 0)?;
        Ok(Self { base })
    }

    /// 绘制会话的当前状态: 已完成的 ROI 及其对称区域 (半透明填充 + 轮廓),
    /// 正在绘制的折线, 以及左上角的提示文字.
    pub fn render(&self, session: &RoiSession) -> opencv::Result<Mat> {
        let mut overlay = self.base.try_clone()?;
        for m in session.measurements() {
            let color = bgr(roi_color(m.index));
            for shape in [&m.roi, &m.mirror] {
                imgproc::fill_poly(
                    &mut overlay,
                    &polyline(shape),
                    color,
                    imgproc::LINE_8,
                    0,
                    core::Point::default(),
                )?;
            }
        }

        let mut out = Mat::default();
        core::add_weighted(
            &self.base,
            1.0 - FILL_ALPHA,
            &overlay,
            FILL_ALPHA,
            0.0,
            &mut out,
            -1,
        )?;

        for m in session.measurements() {
            let color = bgr(roi_color(m.index));
            for shape in [&m.roi, &m.mirror] {
                imgproc::polylines(
                    &mut out,
                    &polyline(shape),
                    true,
                    color,
                    1,
                    imgproc::LINE_AA,
                    0,
                )?;
            }
        }
        if let Some(cur) = session.current() {
            let color = bgr(roi_color(session.measurements().len()));
            imgproc::polylines(&mut out, &polyline(cur), false, color, 1, imgproc::LINE_AA, 0)?;
        }

        let hint = match session.state() {
            CaptureState::AwaitingShape(i) => {
                format!("ROI {}/{ROI_COUNT}  [c] cancel  [q] quit", i + 1)
            }
            CaptureState::SessionComplete => "done  [c] new session  [q] quit".to_string(),
        };
        imgproc::put_text(
            &mut out,
            &hint,
            core::Point::new(8, 20),
            imgproc::FONT_HERSHEY_SIMPLEX,
            0.5,
            Scalar::new(255.0, 255.0, 255.0, 0.0),
            1,
            imgproc::LINE_AA,
            false,
        )?;
        Ok(out)
    }
}
