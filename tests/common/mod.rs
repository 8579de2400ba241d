// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helpers shared by the integration tests.

use std::env;

/// Sets process environment variables for the lifetime of the guard.
///
/// Every name registered through the guard is removed on drop, including
/// names the code under test is expected to write.
#[derive(Default)]
pub struct EnvGuard {
    keys: Vec<String>,
}

#[allow(dead_code)]
impl EnvGuard {
    /// Creates an empty guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value` and removes it on drop.
    pub fn set(&mut self, key: &str, value: &str) -> &mut Self {
        env::set_var(key, value);
        self.keys.push(key.to_string());
        self
    }

    /// Makes sure `key` is unset now and after the test.
    pub fn unset(&mut self, key: &str) -> &mut Self {
        env::remove_var(key);
        self.keys.push(key.to_string());
        self
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            env::remove_var(key);
        }
    }
}

/// Creates a temporary file with the given content.
#[allow(dead_code)]
pub fn create_temp_file(content: &str, suffix: &str) -> tempfile::NamedTempFile {
    use std::io::Write;
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
