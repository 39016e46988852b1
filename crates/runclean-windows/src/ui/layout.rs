/// Position and size of a control in its parent's client area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

/// Where every main-window control goes for a given client size.
///
/// Top to bottom: header, scrolling list, the select/refresh row, the
/// delete button, the copyright line. The list takes whatever height is
/// left over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Layout {
    pub header: Bounds,
    pub list: Bounds,
    pub toggle: Bounds,
    pub refresh: Bounds,
    pub delete: Bounds,
    pub copyright: Bounds,
}

const LIST_MARGIN: i32 = 20;
const BUTTON_MARGIN: i32 = 30;
const HEADER_TOP: i32 = 12;
const HEADER_HEIGHT: i32 = 26;
const ROW_BUTTON_WIDTH: i32 = 110;
const BUTTON_HEIGHT: i32 = 28;
const COPYRIGHT_HEIGHT: i32 = 16;
const MIN_LIST_HEIGHT: i32 = 40;

pub(crate) fn compute(client_width: i32, client_height: i32) -> Layout {
    let header = Bounds::new(0, HEADER_TOP, client_width, HEADER_HEIGHT);

    let copyright = Bounds::new(
        0,
        client_height - 8 - COPYRIGHT_HEIGHT,
        client_width,
        COPYRIGHT_HEIGHT,
    );
    let delete = Bounds::new(
        BUTTON_MARGIN,
        copyright.y - 8 - BUTTON_HEIGHT,
        (client_width - 2 * BUTTON_MARGIN).max(0),
        BUTTON_HEIGHT,
    );
    let row_y = delete.y - 12 - BUTTON_HEIGHT;
    let toggle = Bounds::new(BUTTON_MARGIN, row_y, ROW_BUTTON_WIDTH, BUTTON_HEIGHT);
    let refresh = Bounds::new(
        (client_width - BUTTON_MARGIN - ROW_BUTTON_WIDTH).max(BUTTON_MARGIN),
        row_y,
        ROW_BUTTON_WIDTH,
        BUTTON_HEIGHT,
    );

    let list_top = header.bottom() + 12;
    let list = Bounds::new(
        LIST_MARGIN,
        list_top,
        (client_width - 2 * LIST_MARGIN).max(0),
        (row_y - 15 - list_top).max(MIN_LIST_HEIGHT),
    );

    Layout {
        header,
        list,
        toggle,
        refresh,
        delete,
        copyright,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_stacks_controls_without_overlap() {
        // Arrange: client area of a 450x580 fixed dialog frame.
        let (w, h) = (434, 541);

        // Act
        let l = compute(w, h);

        // Assert
        assert!(l.header.bottom() <= l.list.y);
        assert!(l.list.bottom() <= l.toggle.y);
        assert!(l.toggle.bottom() <= l.delete.y);
        assert!(l.delete.bottom() <= l.copyright.y);
        assert!(l.copyright.bottom() <= h);
        assert!(l.list.height > 300);
    }

    #[test]
    fn row_buttons_sit_on_opposite_sides() {
        // Act
        let l = compute(434, 541);

        // Assert
        assert_eq!(l.toggle.y, l.refresh.y);
        assert_eq!(l.toggle.x, 30);
        assert_eq!(l.refresh.x + l.refresh.width, 434 - 30);
    }

    #[test]
    fn list_keeps_minimum_height_when_cramped() {
        // Act
        let l = compute(200, 100);

        // Assert
        assert_eq!(l.list.height, MIN_LIST_HEIGHT);
        assert!(l.delete.width >= 0);
    }
}
