/// CT 窗口, 包含窗位 (window level / center) 和窗宽 (window width).
///
/// 该窗口是只读的. 若要修改窗口参数, 你应该创建新的实例.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CtWindow {
    level: f32,
    width: f32,
}

impl CtWindow {
    /// 构建 CT 窗.
    ///
    /// `level` 必须是有限值, `width` 必须是非负有限值, 否则返回 `None`.
    /// 允许窗宽为 0: 此时所有 HU 值都会被截断到窗位上.
    pub fn new(level: f32, width: f32) -> Option<CtWindow> {
        if level.is_finite() && width.is_finite() && width >= 0.0 {
            Some(Self { level, width })
        } else {
            None
        }
    }

    /// 构建一个便于展示腹部扫描软组织结构的 CT 窗口. 该窗口的窗位为
    /// 60, 窗宽为 200.
    #[inline]
    pub const fn from_liver_visual() -> CtWindow {
        Self {
            level: 60.0,
            width: 200.0,
        }
    }

    /// 窗下限.
    #[inline]
    pub fn lower_bound(&self) -> f32 {
        self.level - self.width / 2.0
    }

    /// 窗上限.
    #[inline]
    pub fn upper_bound(&self) -> f32 {
        self.level + self.width / 2.0
    }

    /// 窗位.
    #[inline]
    pub fn level(&self) -> f32 {
        self.level
    }

    /// 窗宽.
    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// 将 `ct` HU 值截断到 `[窗下限, 窗上限]` 内. 这就是 "窗口化" 图像的像素值.
    ///
    /// NaN 原样返回.
    #[inline]
    pub fn clamp(&self, ct: f32) -> f32 {
        ct.clamp(self.lower_bound(), self.upper_bound())
    }

    /// 求在当前 CT 窗设置下, `ct` HU 值对应的灰度图像素整数值 (0 <= value <= 255)
    ///
    /// 如果 `ct` 无意义 (如 inf, NaN), 则返回 `None`.
    pub fn eval(&self, ct: f32) -> Option<u8> {
        self.eval_f32(ct).map(|v| v as u8)
    }

    /// 求在当前 CT 窗设置下, `ct` HU 值对应的灰度图像素分布点 (0.0 <= value <= 255.0).
    ///
    /// 如果 `ct` 无意义 (如 inf, NaN), 则返回 `None`.
    pub fn eval_f32(&self, ct: f32) -> Option<f32> {
        if !ct.is_finite() {
            return None;
        }
        let lb = self.lower_bound();
        // 窗宽为 0 时两个分支必中其一, 不会出现除零.
        if ct <= lb {
            Some(0.0)
        } else if ct >= self.upper_bound() {
            Some(255.0)
        } else {
            // 255, not 256.
            Some((ct - lb) / self.width() * 255.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::CtWindow;

    fn is_valid_init(level: f32, width: f32) -> bool {
        CtWindow::new(level, width).is_some()
    }

    #[test]
    fn test_ct_window_invalid_input() {
        assert!(!is_valid_init(0.0, -1.0));
        assert!(!is_valid_init(f32::NAN, 10.0));
        assert!(!is_valid_init(0.0, f32::INFINITY));
        assert!(is_valid_init(0.0, 0.0));
    }

    fn float_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_ct_window_generic() {
        // [60, 100]
        let ct = CtWindow::new(80.0, 40.0).unwrap();
        assert_eq!(ct.eval(f32::NAN), None);
        assert_eq!(ct.eval(f32::MIN), Some(0));
        assert_eq!(ct.eval(f32::MAX), Some(255));

        assert_eq!(ct.eval(50.0), Some(0));
        assert_eq!(ct.eval(60.0), Some(0));

        // boundary 1
        assert_eq!(ct.eval(60.1), Some(0));
        assert!(ct.eval_f32(60.1).unwrap() > 0.0);
        assert!(ct.eval_f32(60.1).unwrap() < 1.0);
        // -- boundary 1

        assert_eq!(ct.eval(70.0).unwrap(), (255.0 * 0.25) as u8);
        assert!(float_eq(ct.eval_f32(80.0).unwrap(), 255.0 * 0.5));
        assert_eq!(ct.eval(90.0).unwrap(), (255.0 * 0.75) as u8);

        // boundary 2
        assert_eq!(ct.eval(99.999), Some(254));
        assert_eq!(ct.eval(100.0).unwrap(), u8::MAX);
    }

    #[test]
    fn test_zero_width_window() {
        let ct = CtWindow::new(5.0, 0.0).unwrap();
        assert_eq!(ct.clamp(-100.0), 5.0);
        assert_eq!(ct.clamp(100.0), 5.0);
        assert_eq!(ct.eval(4.0), Some(0));
        assert_eq!(ct.eval(5.0), Some(0));
        assert_eq!(ct.eval(6.0), Some(255));
    }

    #[test]
    fn test_clamp_stays_in_window() {
        for (level, width) in [(40.0, 400.0), (-600.0, 1500.0), (60.0, 200.0), (0.0, 1.0)] {
            let ct = CtWindow::new(level, width).unwrap();
            let mut hu = -3000.0f32;
            while hu <= 3000.0 {
                let v = ct.clamp(hu);
                assert!(ct.lower_bound() <= v && v <= ct.upper_bound(), "{hu} -> {v}");
                hu += 7.5;
            }
        }
    }
}
