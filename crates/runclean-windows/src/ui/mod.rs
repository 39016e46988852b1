//! The main window.
//!
//! A fixed-size top-level window with a header, the scrolling checkbox
//! list, select-all and refresh buttons, the delete button and a
//! copyright line. All work happens on the thread that calls [`run`],
//! inside its message pump.

mod layout;
mod list_panel;

use std::cell::RefCell;

use runclean_core::config::WindowConfig;
use runclean_core::history::{DeleteOutcome, confirm_message};
use runclean_core::{HistoryList, HistoryStore, log_info};
use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    COLOR_BTNFACE, CreateFontW, DEFAULT_GUI_FONT, DeleteObject, FONT_CHARSET,
    FONT_CLIP_PRECISION, FONT_OUTPUT_PRECISION, FONT_QUALITY, GetStockObject, GetSysColorBrush,
    HDC, HFONT, SetBkMode, SetTextColor, TRANSPARENT, UpdateWindow,
};
use windows::Win32::System::SystemServices::SS_CENTER;
use windows::Win32::UI::Controls::BST_CHECKED;
use windows::Win32::UI::WindowsAndMessaging::{
    BM_GETCHECK, BN_CLICKED, BS_PUSHBUTTON, CW_USEDEFAULT, CreateWindowExW, DefWindowProcW,
    DispatchMessageW, GetClientRect, GetDlgCtrlID, GetDlgItem, GetMessageW, HMENU,
    IDC_ARROW, IsDialogMessageW, LoadCursorW, MSG, MoveWindow, PostMessageW, PostQuitMessage,
    RegisterClassW, SW_SHOW, SendMessageW, SetWindowTextW, ShowWindow,
    TranslateMessage, WINDOW_EX_STYLE, WINDOW_STYLE, WM_APP, WM_COMMAND, WM_CTLCOLORSTATIC,
    WM_DESTROY, WM_MOUSEWHEEL, WM_SETFONT, WM_SIZE, WNDCLASSW, WS_CAPTION, WS_CHILD,
    WS_CLIPCHILDREN, WS_MAXIMIZEBOX, WS_MINIMIZEBOX, WS_OVERLAPPED, WS_SYSMENU, WS_TABSTOP,
    WS_THICKFRAME, WS_VISIBLE,
};
use windows::core::{PCWSTR, w};

use crate::icon::{self, AppIcon};
use crate::{WinResult, dialog, to_wide};
use layout::Bounds;
use list_panel::ListPanel;

pub const WINDOW_TITLE: &str = "ClearRunHistory";
const HEADER_TEXT: &str = "Run Command History";
const COPYRIGHT_TEXT: &str = "Copyright \u{a9} 2025 Knightnum Limited. All rights reserved.";

const ID_HEADER: i32 = 100;
const ID_LIST: i32 = 101;
const ID_TOGGLE: i32 = 102;
const ID_REFRESH: i32 = 103;
const ID_DELETE: i32 = 104;
const ID_COPYRIGHT: i32 = 105;

/// Posted once the window is visible so the first registry read happens
/// after the window has painted.
const WM_LOAD_HISTORY: u32 = WM_APP + 1;

const COPYRIGHT_COLOR: COLORREF = COLORREF(0x0088_8888);

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

/// Opens the window over `store` and runs its message pump until the
/// window is closed.
pub fn run<S: HistoryStore + 'static>(config: &WindowConfig, store: S) -> WinResult<()> {
    icon::set_app_user_model_id();

    let hwnd = create_main_window(config)?;
    let app_icon = AppIcon::load(&config.icon);
    if let Some(icon) = &app_icon {
        icon.apply(hwnd);
    }

    let app: App = Box::new(Window::create(hwnd, HistoryList::new(store))?);
    APP.with(|cell| *cell.borrow_mut() = Some(app));

    unsafe {
        let _ = ShowWindow(hwnd, SW_SHOW);
        let _ = UpdateWindow(hwnd);
        PostMessageW(Some(hwnd), WM_LOAD_HISTORY, WPARAM(0), LPARAM(0))?;
    }

    run_message_pump(hwnd);

    // Release fonts only after every control using them is gone.
    APP.with(|cell| cell.borrow_mut().take());
    drop(app_icon);
    Ok(())
}

/// What the window procedure can ask of the application, independent of
/// the concrete store type.
trait Controller {
    fn reload(&mut self);
    fn toggle_all(&mut self);
    fn set_checked(&mut self, index: usize, checked: bool);
    fn delete_checked(&mut self);
}

type App = Box<dyn Controller>;

/// Runs `f` against the application unless it is missing or already in
/// use further up the stack (a modal dialog pumping messages).
fn with_app(f: impl FnOnce(&mut dyn Controller)) {
    APP.with(|cell| {
        if let Ok(mut slot) = cell.try_borrow_mut()
            && let Some(app) = slot.as_mut()
        {
            f(app.as_mut());
        }
    });
}

/// Fonts shared by the controls, deleted on drop.
struct Fonts {
    header: HFONT,
    item: HFONT,
    small: HFONT,
}

impl Fonts {
    fn create() -> Self {
        Self {
            header: tahoma(-15, 700),
            item: tahoma(-12, 400),
            small: tahoma(-9, 400),
        }
    }
}

impl Drop for Fonts {
    fn drop(&mut self) {
        unsafe {
            let _ = DeleteObject(self.header.into());
            let _ = DeleteObject(self.item.into());
            let _ = DeleteObject(self.small.into());
        }
    }
}

/// Creates a Tahoma font; `height` is in pixels (negative = character height).
fn tahoma(height: i32, weight: i32) -> HFONT {
    unsafe {
        CreateFontW(
            height,
            0,
            0,
            0,
            weight,
            0,
            0,
            0,
            FONT_CHARSET(0),
            FONT_OUTPUT_PRECISION(0),
            FONT_CLIP_PRECISION(0),
            FONT_QUALITY(0),
            0,
            w!("Tahoma"),
        )
    }
}

/// The window's controls bound to one history list.
struct Window<S> {
    hwnd: HWND,
    list: HistoryList<S>,
    panel: ListPanel,
    toggle: HWND,
    _fonts: Fonts,
}

impl<S: HistoryStore> Window<S> {
    fn create(hwnd: HWND, list: HistoryList<S>) -> WinResult<Self> {
        let fonts = Fonts::create();
        let (width, height) = client_size(hwnd);
        let l = layout::compute(width, height);

        let header = create_control(
            hwnd,
            w!("STATIC"),
            HEADER_TEXT,
            WINDOW_STYLE(SS_CENTER.0),
            l.header,
            ID_HEADER,
        )?;
        set_font(header, fonts.header);

        let panel = ListPanel::create(hwnd, ID_LIST, l.list, fonts.item)?;

        let push = WS_TABSTOP | WINDOW_STYLE(BS_PUSHBUTTON as u32);
        let toggle = create_control(
            hwnd,
            w!("BUTTON"),
            list.selection().toggle_label(),
            push,
            l.toggle,
            ID_TOGGLE,
        )?;
        let refresh = create_control(hwnd, w!("BUTTON"), "Refresh", push, l.refresh, ID_REFRESH)?;
        let delete = create_control(
            hwnd,
            w!("BUTTON"),
            "DELETE SELECTED",
            push,
            l.delete,
            ID_DELETE,
        )?;
        let gui_font = unsafe { HFONT(GetStockObject(DEFAULT_GUI_FONT).0) };
        for button in [toggle, refresh, delete] {
            set_font(button, gui_font);
        }

        let copyright = create_control(
            hwnd,
            w!("STATIC"),
            COPYRIGHT_TEXT,
            WINDOW_STYLE(SS_CENTER.0),
            l.copyright,
            ID_COPYRIGHT,
        )?;
        set_font(copyright, fonts.small);

        Ok(Self {
            hwnd,
            list,
            panel,
            toggle,
            _fonts: fonts,
        })
    }

    fn refresh_view(&mut self) {
        self.panel.rebuild(self.list.entries());
        self.panel.sync(self.list.selection());
        set_text(self.toggle, self.list.selection().toggle_label());
    }
}

impl<S: HistoryStore> Controller for Window<S> {
    fn reload(&mut self) {
        self.list.reload();
        self.refresh_view();
    }

    fn toggle_all(&mut self) {
        let applied = self.list.toggle_all();
        log_info!("toggle all: {applied}");
        self.panel.sync(self.list.selection());
        set_text(self.toggle, self.list.selection().toggle_label());
    }

    fn set_checked(&mut self, index: usize, checked: bool) {
        self.list.set_checked(index, checked);
    }

    fn delete_checked(&mut self) {
        let owner = Some(self.hwnd);
        let outcome = self
            .list
            .delete_checked(|count| dialog::confirm(owner, &confirm_message(count)));

        if matches!(outcome, DeleteOutcome::Deleted(_) | DeleteOutcome::Failed(_)) {
            self.refresh_view();
        }

        let Some(message) = outcome.message() else {
            return;
        };
        match outcome {
            DeleteOutcome::NothingSelected => dialog::warning(owner, &message),
            DeleteOutcome::Deleted(_) => dialog::info(owner, "Success", &message),
            DeleteOutcome::Failed(_) => dialog::error(owner, &message),
            DeleteOutcome::Cancelled => {}
        }
    }
}

fn create_main_window(config: &WindowConfig) -> WinResult<HWND> {
    let class_name = w!("RunCleanMain");
    let wc = WNDCLASSW {
        lpfnWndProc: Some(main_wnd_proc),
        lpszClassName: class_name,
        hCursor: unsafe { LoadCursorW(None, IDC_ARROW) }.unwrap_or_default(),
        hbrBackground: unsafe { GetSysColorBrush(COLOR_BTNFACE) },
        ..Default::default()
    };
    if unsafe { RegisterClassW(&wc) } == 0 {
        return Err("could not register the main window class".into());
    }

    let mut style = WS_OVERLAPPED | WS_CAPTION | WS_SYSMENU | WS_MINIMIZEBOX | WS_CLIPCHILDREN;
    if config.resizable {
        style |= WS_THICKFRAME | WS_MAXIMIZEBOX;
    }

    let title = to_wide(WINDOW_TITLE);
    let hwnd = unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            class_name,
            PCWSTR(title.as_ptr()),
            style,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            config.width,
            config.height,
            None,
            None,
            None,
            None,
        )?
    };
    Ok(hwnd)
}

fn create_control(
    parent: HWND,
    class: PCWSTR,
    text: &str,
    style: WINDOW_STYLE,
    bounds: Bounds,
    id: i32,
) -> WinResult<HWND> {
    let wide_text = to_wide(text);
    let hwnd = unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            class,
            PCWSTR(wide_text.as_ptr()),
            WS_CHILD | WS_VISIBLE | style,
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
    Ok(hwnd)
}

fn set_font(hwnd: HWND, font: HFONT) {
    unsafe {
        SendMessageW(
            hwnd,
            WM_SETFONT,
            Some(WPARAM(font.0 as usize)),
            Some(LPARAM(1)),
        );
    }
}

fn set_text(hwnd: HWND, text: &str) {
    let wide = to_wide(text);
    unsafe {
        let _ = SetWindowTextW(hwnd, PCWSTR(wide.as_ptr()));
    }
}

fn client_size(hwnd: HWND) -> (i32, i32) {
    let mut rect = RECT::default();
    unsafe {
        let _ = GetClientRect(hwnd, &mut rect);
    }
    (rect.right - rect.left, rect.bottom - rect.top)
}

/// Repositions every control for a new client size.
fn relayout(hwnd: HWND, width: i32, height: i32) {
    let l = layout::compute(width, height);
    let placements = [
        (ID_HEADER, l.header),
        (ID_LIST, l.list),
        (ID_TOGGLE, l.toggle),
        (ID_REFRESH, l.refresh),
        (ID_DELETE, l.delete),
        (ID_COPYRIGHT, l.copyright),
    ];
    for (id, b) in placements {
        if let Ok(control) = unsafe { GetDlgItem(Some(hwnd), id) } {
            unsafe {
                let _ = MoveWindow(control, b.x, b.y, b.width, b.height, true);
            }
        }
    }
}

/// Handles a `WM_COMMAND` from a button or checkbox.
fn on_command(wparam: WPARAM, lparam: LPARAM) {
    let id = (wparam.0 & 0xFFFF) as i32;
    let code = ((wparam.0 >> 16) & 0xFFFF) as u32;
    if code != BN_CLICKED {
        return;
    }

    match id {
        ID_TOGGLE => with_app(|app| app.toggle_all()),
        ID_REFRESH => with_app(|app| app.reload()),
        ID_DELETE => with_app(|app| app.delete_checked()),
        _ => {
            let Some(index) = list_panel::item_index(id) else {
                return;
            };
            let control = HWND(lparam.0 as *mut _);
            let state = unsafe { SendMessageW(control, BM_GETCHECK, None, None) };
            let checked = state.0 == BST_CHECKED.0 as isize;
            with_app(|app| app.set_checked(index, checked));
        }
    }
}

unsafe extern "system" fn main_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_LOAD_HISTORY => {
            with_app(|app| app.reload());
            LRESULT(0)
        }
        WM_COMMAND => {
            on_command(wparam, lparam);
            LRESULT(0)
        }
        WM_SIZE => {
            let width = (lparam.0 & 0xFFFF) as i32;
            let height = ((lparam.0 >> 16) & 0xFFFF) as i32;
            relayout(hwnd, width, height);
            LRESULT(0)
        }
        WM_MOUSEWHEEL => {
            // The wheel scrolls the list wherever focus happens to be.
            match unsafe { GetDlgItem(Some(hwnd), ID_LIST) } {
                Ok(list) => unsafe { SendMessageW(list, msg, Some(wparam), Some(lparam)) },
                Err(_) => LRESULT(0),
            }
        }
        WM_CTLCOLORSTATIC => {
            let control = HWND(lparam.0 as *mut _);
            let hdc = HDC(wparam.0 as *mut _);
            unsafe {
                if GetDlgCtrlID(control) == ID_COPYRIGHT {
                    SetTextColor(hdc, COPYRIGHT_COLOR);
                }
                SetBkMode(hdc, TRANSPARENT);
                LRESULT(GetSysColorBrush(COLOR_BTNFACE).0 as isize)
            }
        }
        WM_DESTROY => {
            unsafe { PostQuitMessage(0) };
            LRESULT(0)
        }
        _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

/// The Win32 message pump. Routes keyboard navigation (Tab, Space)
/// through the dialog manager and blocks until WM_QUIT is received.
fn run_message_pump(hwnd: HWND) {
    let mut msg = MSG::default();

    while unsafe { GetMessageW(&mut msg, None, 0, 0).as_bool() } {
        if unsafe { IsDialogMessageW(hwnd, &msg).as_bool() } {
            continue;
        }
        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}
