mod log_level;
mod policy;

use std::env;

use tempfile::TempDir;

/// RAII guard for environment variables - automatically restores on drop
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::remove_var(key);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}

/// Create a temp config directory and set MIG_CONFIG_DIR
pub(crate) fn setup_config_dir() -> (TempDir, EnvGuard) {
    let temp = TempDir::new().unwrap();
    let guard = EnvGuard::set("MIG_CONFIG_DIR", temp.path().to_str().unwrap());
    (temp, guard)
}

/// Write a config.toml that passes validation into the temp config dir.
pub(crate) fn write_valid_config(temp: &TempDir) {
    std::fs::write(
        temp.path().join("config.toml"),
        r#"
            [source]
            url = "https://old.example.com"
            api_key = "source-key"
            version_id = 7

            [target]
            endpoint = "new.example.com:8080"
            api_key = "target-key"
            project_id = 3
            version_id = 5
            fallback_assignee_id = 12
        "#,
    )
    .unwrap();
}
