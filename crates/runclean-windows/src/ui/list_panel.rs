//! Scrolling panel with one checkbox per history entry.
//!
//! The panel owns its scroll position through the Win32 scrollbar itself
//! (`SCROLLINFO`), so its window procedure never needs application state.
//! Checkbox clicks are forwarded to the parent as ordinary `WM_COMMAND`s.

use std::mem;
use std::sync::Once;

use runclean_core::{HistoryEntry, Selection};
use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, POINT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    GetStockObject, HBRUSH, HDC, HFONT, MapWindowPoints, SetBkColor, WHITE_BRUSH,
};
use windows::Win32::UI::Controls::{BST_CHECKED, BST_UNCHECKED, SetScrollInfo};
use windows::Win32::UI::WindowsAndMessaging::{
    BM_SETCHECK, BS_AUTOCHECKBOX, CreateWindowExW, DefWindowProcW, DestroyWindow, GW_CHILD,
    GW_HWNDNEXT, GetClientRect, GetParent, GetScrollInfo, GetWindow, HMENU, MoveWindow,
    RegisterClassW, SB_BOTTOM, SB_LINEDOWN, SB_LINEUP, SB_PAGEDOWN, SB_PAGEUP, SB_THUMBPOSITION,
    SB_THUMBTRACK, SB_TOP, SB_VERT, SCROLLINFO, SCROLLINFO_MASK, SIF_ALL, SIF_PAGE, SIF_POS,
    SIF_RANGE, SW_ERASE, SW_INVALIDATE, SW_SCROLLCHILDREN, ScrollWindowEx, SendMessageW,
    WINDOW_EX_STYLE, WINDOW_STYLE, WM_COMMAND, WM_CTLCOLORBTN, WM_CTLCOLORSTATIC,
    WM_MOUSEWHEEL, WM_SETFONT, WM_SIZE, WM_VSCROLL, WNDCLASSW, WS_CHILD, WS_CLIPCHILDREN,
    WS_EX_CLIENTEDGE, WS_TABSTOP, WS_VISIBLE, WS_VSCROLL,
};
use windows::core::{PCWSTR, w};

use super::layout::Bounds;
use crate::{WinResult, to_wide};

/// Control ID of the first checkbox; entry `i` gets `ITEM_ID_BASE + i`.
pub(crate) const ITEM_ID_BASE: i32 = 0x1000;
const MAX_ITEMS: usize = 0x1000;

/// Height of one checkbox row.
const ROW_HEIGHT: i32 = 22;
const ROW_PADDING_X: i32 = 10;
const ROW_PADDING_Y: i32 = 4;
const WHEEL_DELTA: i32 = 120;
const WHEEL_ROWS: i32 = 3;

static REGISTER_CLASS: Once = Once::new();
const CLASS_NAME: PCWSTR = w!("RunCleanList");

fn ensure_class_registered() {
    REGISTER_CLASS.call_once(|| {
        let wc = WNDCLASSW {
            lpfnWndProc: Some(list_wnd_proc),
            lpszClassName: CLASS_NAME,
            // SAFETY: stock objects never need freeing.
            hbrBackground: unsafe { HBRUSH(GetStockObject(WHITE_BRUSH).0) },
            ..Default::default()
        };
        unsafe {
            RegisterClassW(&wc);
        }
    });
}

/// Maps a checkbox control ID back to its entry index.
pub(crate) fn item_index(control_id: i32) -> Option<usize> {
    let offset = control_id.checked_sub(ITEM_ID_BASE)?;
    usize::try_from(offset).ok().filter(|&i| i < MAX_ITEMS)
}

/// The panel window and the checkboxes it currently holds.
pub(crate) struct ListPanel {
    hwnd: HWND,
    items: Vec<HWND>,
    font: HFONT,
}

impl ListPanel {
    /// Creates the (empty) panel as a child of `parent`.
    pub fn create(parent: HWND, id: i32, bounds: Bounds, font: HFONT) -> WinResult<Self> {
        ensure_class_registered();

        let hwnd = unsafe {
            CreateWindowExW(
                WS_EX_CLIENTEDGE,
                CLASS_NAME,
                PCWSTR::null(),
                WS_CHILD | WS_VISIBLE | WS_VSCROLL | WS_CLIPCHILDREN | WS_TABSTOP,
                bounds.x,
                bounds.y,
                bounds.width,
                bounds.height,
                Some(parent),
                Some(HMENU(id as isize as *mut _)),
                None,
                None,
            )?
        };

        Ok(Self {
            hwnd,
            items: Vec::new(),
            font,
        })
    }

    /// Replaces every checkbox with a fresh, unticked one per entry and
    /// scrolls back to the top.
    pub fn rebuild(&mut self, entries: &[HistoryEntry]) {
        for item in self.items.drain(..) {
            unsafe {
                let _ = DestroyWindow(item);
            }
        }
        reset_scroll(self.hwnd);

        let width = item_width(self.hwnd);
        for (index, entry) in entries.iter().take(MAX_ITEMS).enumerate() {
            match self.create_item(index, &entry.command, width) {
                Ok(item) => self.items.push(item),
                Err(e) => runclean_core::log_warn!("could not create checkbox {index}: {e}"),
            }
        }

        set_content_height(self.hwnd, content_height(self.items.len()));
    }

    /// Pushes the selection's states onto the checkboxes.
    pub fn sync(&self, selection: &Selection) {
        for (item, &checked) in self.items.iter().zip(selection.states()) {
            let state = if checked { BST_CHECKED } else { BST_UNCHECKED };
            unsafe {
                SendMessageW(*item, BM_SETCHECK, Some(WPARAM(state.0 as usize)), None);
            }
        }
    }

    fn create_item(&self, index: usize, text: &str, width: i32) -> WinResult<HWND> {
        let wide_text = to_wide(text);
        let style = WS_CHILD | WS_VISIBLE | WS_TABSTOP | WINDOW_STYLE(BS_AUTOCHECKBOX as u32);
        let id = ITEM_ID_BASE + index as i32;
        let item = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE::default(),
                w!("BUTTON"),
                PCWSTR(wide_text.as_ptr()),
                style,
                ROW_PADDING_X,
                row_top(index),
                width,
                ROW_HEIGHT - 2,
                Some(self.hwnd),
                Some(HMENU(id as isize as *mut _)),
                None,
                None,
            )?
        };
        unsafe {
            SendMessageW(
                item,
                WM_SETFONT,
                Some(WPARAM(self.font.0 as usize)),
                Some(LPARAM(1)),
            );
        }
        Ok(item)
    }
}

fn row_top(index: usize) -> i32 {
    ROW_PADDING_Y + index as i32 * ROW_HEIGHT
}

fn content_height(rows: usize) -> i32 {
    if rows == 0 {
        0
    } else {
        row_top(rows) + ROW_PADDING_Y
    }
}

fn client_size(hwnd: HWND) -> (i32, i32) {
    let mut rect = RECT::default();
    unsafe {
        let _ = GetClientRect(hwnd, &mut rect);
    }
    (rect.right - rect.left, rect.bottom - rect.top)
}

fn item_width(hwnd: HWND) -> i32 {
    (client_size(hwnd).0 - 2 * ROW_PADDING_X).max(ROW_HEIGHT)
}

fn scroll_info(mask: SCROLLINFO_MASK) -> SCROLLINFO {
    SCROLLINFO {
        cbSize: mem::size_of::<SCROLLINFO>() as u32,
        fMask: mask,
        ..Default::default()
    }
}

fn read_scroll(hwnd: HWND) -> SCROLLINFO {
    let mut si = scroll_info(SIF_ALL);
    unsafe {
        let _ = GetScrollInfo(hwnd, SB_VERT, &mut si);
    }
    si
}

/// Largest valid scroll position for `content` pixels shown `page` at a time.
fn max_scroll(content: i32, page: i32) -> i32 {
    (content - page).max(0)
}

/// New scroll position for a `WM_VSCROLL` request, or `None` for codes
/// that do not move the view (such as `SB_ENDSCROLL`).
fn scroll_target(code: i32, pos: i32, page: i32, track: i32, max: i32) -> Option<i32> {
    let target = match code {
        c if c == SB_LINEUP.0 => pos - ROW_HEIGHT,
        c if c == SB_LINEDOWN.0 => pos + ROW_HEIGHT,
        c if c == SB_PAGEUP.0 => pos - page,
        c if c == SB_PAGEDOWN.0 => pos + page,
        c if c == SB_THUMBTRACK.0 || c == SB_THUMBPOSITION.0 => track,
        c if c == SB_TOP.0 => 0,
        c if c == SB_BOTTOM.0 => max,
        _ => return None,
    };
    Some(target.clamp(0, max))
}

/// Wheel movement in pixels; positive `delta` scrolls up.
fn wheel_target(delta: i16, pos: i32, max: i32) -> i32 {
    let step = i32::from(delta) * WHEEL_ROWS * ROW_HEIGHT / WHEEL_DELTA;
    (pos - step).clamp(0, max)
}

/// Moves the view so `target` is the top pixel, shifting the checkboxes.
fn scroll_to(hwnd: HWND, target: i32) {
    let si = read_scroll(hwnd);
    let page = si.nPage as i32;
    let content = si.nMax + 1;
    let pos = target.clamp(0, max_scroll(content, page));
    if pos == si.nPos {
        return;
    }

    let mut update = scroll_info(SIF_POS);
    update.nPos = pos;
    unsafe {
        SetScrollInfo(hwnd, SB_VERT, &update, true);
        ScrollWindowEx(
            hwnd,
            0,
            si.nPos - pos,
            None,
            None,
            None,
            None,
            SW_SCROLLCHILDREN | SW_INVALIDATE | SW_ERASE,
        );
    }
}

fn reset_scroll(hwnd: HWND) {
    scroll_to(hwnd, 0);
}

fn set_content_height(hwnd: HWND, content: i32) {
    let (_, page) = client_size(hwnd);
    let mut si = scroll_info(SIF_RANGE | SIF_PAGE);
    si.nMin = 0;
    si.nMax = (content - 1).max(0);
    si.nPage = page.max(0) as u32;
    unsafe {
        SetScrollInfo(hwnd, SB_VERT, &si, true);
    }
}

/// Keeps the page size and checkbox widths in step with the panel size.
fn on_resize(hwnd: HWND) {
    let si = read_scroll(hwnd);
    set_content_height(hwnd, si.nMax + 1);
    scroll_to(hwnd, si.nPos);

    let width = item_width(hwnd);
    unsafe {
        let mut child = GetWindow(hwnd, GW_CHILD).ok();
        while let Some(item) = child.filter(|c| !c.is_invalid()) {
            let mut rect = RECT::default();
            let _ = GetClientRect(item, &mut rect);
            let mut top_left = POINT::default();
            let _ = MapWindowPoints(
                Some(item),
                Some(hwnd),
                std::slice::from_mut(&mut top_left),
            );
            let _ = MoveWindow(
                item,
                top_left.x,
                top_left.y,
                width,
                rect.bottom - rect.top,
                true,
            );
            child = GetWindow(item, GW_HWNDNEXT).ok();
        }
    }
}

unsafe extern "system" fn list_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_VSCROLL => {
            let si = read_scroll(hwnd);
            let page = si.nPage as i32;
            let max = max_scroll(si.nMax + 1, page);
            let code = (wparam.0 & 0xFFFF) as i32;
            if let Some(target) = scroll_target(code, si.nPos, page, si.nTrackPos, max) {
                scroll_to(hwnd, target);
            }
            LRESULT(0)
        }
        WM_MOUSEWHEEL => {
            let delta = ((wparam.0 >> 16) & 0xFFFF) as u16 as i16;
            let si = read_scroll(hwnd);
            let max = max_scroll(si.nMax + 1, si.nPage as i32);
            scroll_to(hwnd, wheel_target(delta, si.nPos, max));
            LRESULT(0)
        }
        WM_SIZE => {
            on_resize(hwnd);
            LRESULT(0)
        }
        WM_COMMAND => {
            if let Ok(parent) = unsafe { GetParent(hwnd) } {
                unsafe { SendMessageW(parent, WM_COMMAND, Some(wparam), Some(lparam)) }
            } else {
                LRESULT(0)
            }
        }
        WM_CTLCOLORSTATIC | WM_CTLCOLORBTN => {
            // Checkboxes paint their background with the brush we return.
            unsafe {
                SetBkColor(HDC(wparam.0 as *mut _), COLORREF(0x00FF_FFFF));
                LRESULT(GetStockObject(WHITE_BRUSH).0 as isize)
            }
        }
        _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_ids_round_trip_to_indices() {
        // Act / Assert
        assert_eq!(item_index(ITEM_ID_BASE), Some(0));
        assert_eq!(item_index(ITEM_ID_BASE + 25), Some(25));
        assert_eq!(item_index(ITEM_ID_BASE - 1), None);
        assert_eq!(item_index(1), None);
        assert_eq!(item_index(ITEM_ID_BASE + MAX_ITEMS as i32), None);
    }

    #[test]
    fn content_height_covers_every_row() {
        // Act / Assert
        assert_eq!(content_height(0), 0);
        assert_eq!(content_height(1), ROW_PADDING_Y * 2 + ROW_HEIGHT);
        assert!(content_height(26) > 26 * ROW_HEIGHT);
    }

    #[test]
    fn scroll_target_clamps_to_range() {
        // Act / Assert
        assert_eq!(scroll_target(SB_LINEUP.0, 0, 100, 0, 300), Some(0));
        assert_eq!(scroll_target(SB_LINEDOWN.0, 0, 100, 0, 300), Some(ROW_HEIGHT));
        assert_eq!(scroll_target(SB_PAGEDOWN.0, 250, 100, 0, 300), Some(300));
        assert_eq!(scroll_target(SB_THUMBTRACK.0, 0, 100, 120, 300), Some(120));
        assert_eq!(scroll_target(SB_BOTTOM.0, 0, 100, 0, 300), Some(300));
        assert_eq!(scroll_target(SB_TOP.0, 200, 100, 0, 300), Some(0));
    }

    #[test]
    fn end_scroll_does_not_move() {
        // Arrange
        let end_scroll = windows::Win32::UI::WindowsAndMessaging::SB_ENDSCROLL.0;

        // Act / Assert
        assert_eq!(scroll_target(end_scroll, 40, 100, 0, 300), None);
    }

    #[test]
    fn wheel_scrolls_opposite_to_delta() {
        // Act / Assert
        assert_eq!(wheel_target(-120, 0, 500), 3 * ROW_HEIGHT);
        assert_eq!(wheel_target(120, 3 * ROW_HEIGHT, 500), 0);
        assert_eq!(wheel_target(120, 0, 500), 0);
        assert_eq!(wheel_target(-1200, 0, 100), 100);
    }

    #[test]
    fn max_scroll_is_zero_when_content_fits() {
        // Act / Assert
        assert_eq!(max_scroll(50, 200), 0);
        assert_eq!(max_scroll(500, 200), 300);
    }
}
