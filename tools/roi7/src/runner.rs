//! 程序运行函数.

use crate::ui::{pointer_event, Canvas};
use ct_roi::dataset::{load_dicom_dir, LoadError};
use ct_roi::prelude::*;
use log::{error, info, warn};
use opencv::highgui;
use std::sync::{mpsc, Arc};
use utils::loader;

const WINDOW: &str = "ROI symmetry";

/// 每轮事件循环等待按键的毫秒数.
const POLL_MS: i32 = 20;

const KEY_ESC: i32 = 27;

/// 运行时错误.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 加载目录失败.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// 窗口或绘图失败.
    #[error(transparent)]
    OpenCv(#[from] opencv::Error),
}

/// 写入记录文件. 失败时改写到主目录下.
fn save_record(session: &RoiSession) {
    let out = loader::output_path_from_env();
    let Err(e) = session.finalize(&out) else {
        return;
    };
    warn!("{e}");
    match loader::fallback_output_path() {
        Some(fallback) => {
            if let Err(e) = session.finalize(&fallback) {
                error!("{e}");
            }
        }
        None => error!("no home directory to fall back to"),
    }
}

/// 取消键: 未完成的会话被取消; 完成的会话不可取消, 换成同一切片上的新会话.
fn cancel_or_renew(session: &mut RoiSession, slice: &Arc<CtSlice>) {
    if !session.cancel_session() {
        info!("starting a new session");
        *session = RoiSession::new(Arc::clone(slice));
    }
}

/// 实际运行.
pub fn run() -> Result<(), AppError> {
    let Some(dir) = loader::dicom_dir_from_env_or_dialog() else {
        return Ok(());
    };
    let store = load_dicom_dir(&dir)?;
    info!(
        "{} slices loaded from {} ({} skipped)",
        store.len(),
        dir.display(),
        store.skipped().len()
    );

    if let Some(path) = loader::mosaic_path_from_env() {
        match store.slices().save(&path) {
            Ok(()) => info!("overview saved to {}", path.display()),
            Err(e) => warn!("failed to save overview to {}: {e}", path.display()),
        }
    }

    let wanted = loader::slice_index_from_env();
    let index = wanted.min(store.len() - 1);
    if index != wanted {
        warn!("slice {wanted} out of range, showing slice {index}");
    }
    let slice = Arc::new(store.into_slices().swap_remove(index));
    info!("slice {index}: {}x{}, {}", slice.height(), slice.width(), slice.meta());
    let canvas = Canvas::new(&slice)?;
    let mut session = RoiSession::new(Arc::clone(&slice));

    let (tx, rx) = mpsc::channel();
    highgui::named_window(WINDOW, highgui::WINDOW_AUTOSIZE)?;
    highgui::set_mouse_callback(
        WINDOW,
        Some(Box::new(move |event, x, y, flags| {
            if let Some(e) = pointer_event(event, x, y, flags) {
                let _ = tx.send(e);
            }
        })),
    )?;

    utils::sep();
    println!("Draw {ROI_COUNT} ROIs by dragging with the left mouse button.");
    println!("[c] cancel the session (or start a new one when done), [q] or [Esc] quit.");
    utils::sep();

    let mut dirty = true;
    loop {
        for event in rx.try_iter() {
            match session.handle(event) {
                Some(SessionEvent::Measured(m)) => println!(
                    "ROI {}: {:.2}, Symétrie {}: {:.2}",
                    m.index + 1,
                    m.roi_mean.mean,
                    m.index + 1,
                    m.mirror_mean.mean
                ),
                Some(SessionEvent::Completed(_)) => {
                    utils::sep();
                    println!("{}", session.record());
                    utils::sep();
                    save_record(&session);
                }
                None => {}
            }
            dirty = true;
        }

        if dirty {
            highgui::imshow(WINDOW, &canvas.render(&session)?)?;
            dirty = false;
        }

        match highgui::wait_key(POLL_MS)? {
            k if k == KEY_ESC || k == 'q' as i32 => break,
            k if k == 'c' as i32 => {
                cancel_or_renew(&mut session, &slice);
                dirty = true;
            }
            _ => {}
        }
    }
    highgui::destroy_all_windows()?;
    Ok(())
}
