//! The Run dialog history as stored under
//! `HKEY_CURRENT_USER\Software\Microsoft\Windows\CurrentVersion\Explorer\RunMRU`.
//!
//! Windows keeps one `REG_SZ` value per command (`a`, `b`, ...) plus an
//! `MRUList` value holding their recency order. Reading and deleting need
//! no elevation since HKCU is per-user.

use runclean_core::store::{HistoryStore, RawValue, StoreResult};
use runclean_core::{log_debug, log_info};
use windows::Win32::Foundation::{ERROR_MORE_DATA, ERROR_NO_MORE_ITEMS};
use windows::Win32::System::Registry::{
    HKEY, HKEY_CURRENT_USER, KEY_ALL_ACCESS, KEY_READ, REG_EXPAND_SZ, REG_SAM_FLAGS, REG_SZ,
    REG_VALUE_TYPE, RegCloseKey, RegDeleteValueW, RegEnumValueW, RegOpenKeyExW,
};
use windows::core::{PCWSTR, PWSTR};

use crate::to_wide;

/// Subkey of HKCU holding the Run dialog history.
pub const RUN_MRU_KEY: &str = r"Software\Microsoft\Windows\CurrentVersion\Explorer\RunMRU";

/// Longest value name the registry allows, in UTF-16 units, plus the NUL.
const MAX_VALUE_NAME: usize = 16_384;

/// Initial data buffer; grown on `ERROR_MORE_DATA`.
const INITIAL_DATA_BYTES: usize = 1024;

/// [`HistoryStore`] backed by a key under `HKEY_CURRENT_USER`.
#[derive(Debug, Clone)]
pub struct RegistryStore {
    path: String,
}

impl RegistryStore {
    /// The real Run dialog history.
    pub fn run_mru() -> Self {
        Self::with_path(RUN_MRU_KEY)
    }

    /// A store over any HKCU subkey.
    pub fn with_path(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Default for RegistryStore {
    fn default() -> Self {
        Self::run_mru()
    }
}

impl HistoryStore for RegistryStore {
    fn read_values(&self) -> StoreResult<Vec<RawValue>> {
        let key = OpenKey::open(&self.path, KEY_READ)?;
        let values = key.string_values();
        log_debug!("read {} values from HKCU\\{}", values.len(), self.path);
        Ok(values)
    }

    fn delete_values(&mut self, names: &[String]) -> StoreResult<()> {
        let key = OpenKey::open(&self.path, KEY_ALL_ACCESS)?;
        for name in names {
            key.delete_value(name)?;
            log_info!("deleted HKCU\\{}\\{name}", self.path);
        }
        Ok(())
    }
}

/// An open registry key, closed on drop.
struct OpenKey(HKEY);

impl OpenKey {
    fn open(path: &str, access: REG_SAM_FLAGS) -> StoreResult<Self> {
        let wide_path = to_wide(path);
        let mut key = HKEY::default();
        // SAFETY: RegOpenKeyExW is a standard Win32 registry API. The path
        // is NUL-terminated and `key` is closed by `Drop`.
        let status = unsafe {
            RegOpenKeyExW(
                HKEY_CURRENT_USER,
                PCWSTR(wide_path.as_ptr()),
                None,
                access,
                &mut key,
            )
        };
        status
            .ok()
            .map_err(|e| format!("could not open registry key HKCU\\{path}: {e}"))?;
        Ok(Self(key))
    }

    /// Enumerates values by index until the registry reports no more.
    ///
    /// Non-string values are skipped. Any error other than the end of the
    /// enumeration also ends it; whatever was read so far is returned.
    fn string_values(&self) -> Vec<RawValue> {
        let mut values = Vec::new();
        let mut name_buf = vec![0u16; MAX_VALUE_NAME];
        let mut data_buf = vec![0u8; INITIAL_DATA_BYTES];
        let mut index = 0u32;

        loop {
            let mut name_len = name_buf.len() as u32;
            let mut data_len = data_buf.len() as u32;
            let mut value_type = 0u32;
            // SAFETY: every buffer pointer is paired with its true length,
            // and the lengths are updated in place by the call.
            let status = unsafe {
                RegEnumValueW(
                    self.0,
                    index,
                    Some(PWSTR(name_buf.as_mut_ptr())),
                    &mut name_len,
                    None,
                    Some(&mut value_type as *mut u32),
                    Some(data_buf.as_mut_ptr()),
                    Some(&mut data_len as *mut u32),
                )
            };

            if status == ERROR_MORE_DATA {
                let needed = (data_len as usize).max(data_buf.len() * 2);
                data_buf.resize(needed, 0);
                continue;
            }
            if status == ERROR_NO_MORE_ITEMS {
                break;
            }
            if let Err(e) = status.ok() {
                log_debug!("enumeration stopped at index {index}: {e}");
                break;
            }
            index += 1;

            let kind = REG_VALUE_TYPE(value_type);
            if kind != REG_SZ && kind != REG_EXPAND_SZ {
                continue;
            }
            let name = String::from_utf16_lossy(&name_buf[..name_len as usize]);
            let data = decode_utf16_bytes(&data_buf[..data_len as usize]);
            values.push(RawValue { name, data });
        }

        values
    }

    fn delete_value(&self, name: &str) -> StoreResult<()> {
        let wide_name = to_wide(name);
        // SAFETY: RegDeleteValueW is a standard Win32 registry API.
        let status = unsafe { RegDeleteValueW(self.0, PCWSTR(wide_name.as_ptr())) };
        status
            .ok()
            .map_err(|e| format!("could not delete value '{name}': {e}"))?;
        Ok(())
    }
}

impl Drop for OpenKey {
    fn drop(&mut self) {
        // SAFETY: RegCloseKey is safe to call on any key we opened.
        let _ = unsafe { RegCloseKey(self.0) };
    }
}

/// Decodes registry string data (little-endian UTF-16) and drops the
/// terminating NULs. An odd trailing byte is ignored.
fn decode_utf16_bytes(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    let end = units
        .iter()
        .rposition(|&u| u != 0)
        .map_or(0, |last| last + 1);
    String::from_utf16_lossy(&units[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16_bytes(s: &str) -> Vec<u8> {
        s.encode_utf16().flat_map(u16::to_le_bytes).collect()
    }

    #[test]
    fn decodes_nul_terminated_string() {
        // Arrange
        let mut bytes = utf16_bytes("notepad\\1");
        bytes.extend_from_slice(&[0, 0]);

        // Act / Assert
        assert_eq!(decode_utf16_bytes(&bytes), "notepad\\1");
    }

    #[test]
    fn decodes_unterminated_and_empty_data() {
        // Act / Assert
        assert_eq!(decode_utf16_bytes(&utf16_bytes("cmd")), "cmd");
        assert_eq!(decode_utf16_bytes(&[]), "");
        assert_eq!(decode_utf16_bytes(&[0, 0, 0, 0]), "");
    }

    #[test]
    fn decodes_non_ascii_text() {
        // Act / Assert
        assert_eq!(
            decode_utf16_bytes(&utf16_bytes("explorer C:\\Users\\José\\1")),
            "explorer C:\\Users\\José\\1"
        );
    }

    #[test]
    fn missing_key_reads_as_error_and_loads_empty() {
        // Arrange
        let store = RegistryStore::with_path(r"Software\RunClean\NoSuchKey\ForTests");

        // Act
        let result = store.read_values();
        let entries = runclean_core::load_entries(&store);

        // Assert
        assert!(result.is_err());
        assert!(entries.is_empty());
    }

    #[test]
    fn deleting_from_missing_key_reports_error() {
        // Arrange
        let mut store = RegistryStore::with_path(r"Software\RunClean\NoSuchKey\ForTests");

        // Act
        let result = store.delete_values(&["a".into()]);

        // Assert
        let err = result.unwrap_err().to_string();
        assert!(err.contains("could not open registry key"));
    }

    #[test]
    fn default_store_targets_run_mru() {
        // Act / Assert
        assert_eq!(RegistryStore::default().path(), RUN_MRU_KEY);
    }
}
