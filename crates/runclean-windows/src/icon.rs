//! Best-effort application icon.
//!
//! The icon file ships next to the executable; during development it sits
//! in the working directory instead. Nothing here reports failure: a
//! missing icon just leaves the default one in place.

use std::path::{Path, PathBuf};

use runclean_core::log_debug;
use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::UI::Shell::SetCurrentProcessExplicitAppUserModelID;
use windows::Win32::UI::WindowsAndMessaging::{
    DestroyIcon, GetSystemMetrics, HICON, ICON_BIG, ICON_SMALL, IMAGE_ICON, LR_LOADFROMFILE,
    LoadImageW, SM_CXICON, SM_CXSMICON, SendMessageW, WM_SETICON,
};
use windows::core::PCWSTR;

use crate::to_wide;

/// Taskbar identity, so the window groups under its own icon rather than
/// whatever host launched it.
pub const APP_USER_MODEL_ID: &str = "knightnum.runclean.v1";

/// Sets the process AppUserModelID. Errors are ignored.
pub fn set_app_user_model_id() {
    let wide = to_wide(APP_USER_MODEL_ID);
    // SAFETY: the ID string is NUL-terminated and outlives the call.
    if let Err(e) = unsafe { SetCurrentProcessExplicitAppUserModelID(PCWSTR(wide.as_ptr())) } {
        log_debug!("could not set AppUserModelID: {e}");
    }
}

/// Places an icon file may live, in lookup order: beside the executable,
/// then the working directory.
pub fn candidates(file_name: &str) -> Vec<PathBuf> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf));
    let cwd = std::env::current_dir().ok();

    let mut paths: Vec<PathBuf> = Vec::new();
    for dir in [exe_dir, cwd].into_iter().flatten() {
        let path = dir.join(file_name);
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
    paths
}

/// Returns the first existing candidate for `file_name`.
pub fn find(file_name: &str) -> Option<PathBuf> {
    candidates(file_name).into_iter().find(|p| p.is_file())
}

/// Large and small icons loaded from a file, destroyed on drop.
pub struct AppIcon {
    big: HICON,
    small: HICON,
}

impl AppIcon {
    /// Loads `file_name` from the first place it exists.
    pub fn load(file_name: &str) -> Option<Self> {
        let path = find(file_name)?;
        // SAFETY: GetSystemMetrics is a pure query.
        let (big_size, small_size) =
            unsafe { (GetSystemMetrics(SM_CXICON), GetSystemMetrics(SM_CXSMICON)) };
        let big = load_from_file(&path, big_size)?;
        let small = load_from_file(&path, small_size).unwrap_or(big);
        Some(Self { big, small })
    }

    /// Assigns the icons to a top-level window's caption and taskbar button.
    pub fn apply(&self, hwnd: HWND) {
        // SAFETY: WM_SETICON takes an icon handle that stays valid for as
        // long as `self` lives.
        unsafe {
            SendMessageW(
                hwnd,
                WM_SETICON,
                Some(WPARAM(ICON_BIG as usize)),
                Some(LPARAM(self.big.0 as isize)),
            );
            SendMessageW(
                hwnd,
                WM_SETICON,
                Some(WPARAM(ICON_SMALL as usize)),
                Some(LPARAM(self.small.0 as isize)),
            );
        }
    }
}

impl Drop for AppIcon {
    fn drop(&mut self) {
        // SAFETY: both handles came from LoadImageW and are not shared.
        unsafe {
            if self.small != self.big {
                let _ = DestroyIcon(self.small);
            }
            let _ = DestroyIcon(self.big);
        }
    }
}

fn load_from_file(path: &Path, size: i32) -> Option<HICON> {
    let wide = to_wide(&path.to_string_lossy());
    // SAFETY: LR_LOADFROMFILE treats the name as a NUL-terminated path.
    let handle = unsafe {
        LoadImageW(
            None,
            PCWSTR(wide.as_ptr()),
            IMAGE_ICON,
            size,
            size,
            LR_LOADFROMFILE,
        )
    };
    match handle {
        Ok(h) if !h.is_invalid() => Some(HICON(h.0)),
        Ok(_) => None,
        Err(e) => {
            log_debug!("could not load icon {}: {e}", path.display());
            None
        }
    }
}
