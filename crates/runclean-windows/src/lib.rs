/// Modal message boxes.
pub mod dialog;

/// Application icon and taskbar identity.
pub mod icon;

/// Run dialog history in the HKCU registry hive.
pub mod registry;

/// The main window.
pub mod ui;

pub use registry::RegistryStore;

/// A boxed error type for Win32 operations.
pub type WinResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Encodes `s` as a NUL-terminated UTF-16 string for Win32 calls.
pub(crate) fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_string_is_nul_terminated() {
        // Act
        let wide = to_wide("ab");

        // Assert
        assert_eq!(wide, [b'a' as u16, b'b' as u16, 0]);
    }
}
