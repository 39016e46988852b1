use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{
    IDYES, MB_ICONERROR, MB_ICONINFORMATION, MB_ICONQUESTION, MB_ICONWARNING, MB_OK, MB_YESNO,
    MESSAGEBOX_RESULT, MESSAGEBOX_STYLE, MessageBoxW,
};
use windows::core::PCWSTR;

use crate::to_wide;

/// Shows a warning with an OK button.
pub fn warning(owner: Option<HWND>, text: &str) {
    show(owner, "Warning", text, MB_OK | MB_ICONWARNING);
}

/// Shows an informational message with an OK button.
pub fn info(owner: Option<HWND>, title: &str, text: &str) {
    show(owner, title, text, MB_OK | MB_ICONINFORMATION);
}

/// Shows an error with an OK button.
pub fn error(owner: Option<HWND>, text: &str) {
    show(owner, "Error", text, MB_OK | MB_ICONERROR);
}

/// Asks a yes/no question. Returns `true` only for "Yes".
pub fn confirm(owner: Option<HWND>, text: &str) -> bool {
    show(owner, "Confirm", text, MB_YESNO | MB_ICONQUESTION) == IDYES
}

fn show(owner: Option<HWND>, title: &str, text: &str, style: MESSAGEBOX_STYLE) -> MESSAGEBOX_RESULT {
    let wide_title = to_wide(title);
    let wide_text = to_wide(text);
    // SAFETY: both strings are NUL-terminated and outlive the call. The
    // box runs its own modal loop on this thread.
    unsafe {
        MessageBoxW(
            owner,
            PCWSTR(wide_text.as_ptr()),
            PCWSTR(wide_title.as_ptr()),
            style,
        )
    }
}
