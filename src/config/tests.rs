use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_soundroom_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("SOUNDROOM_CONFIG_PATH", "/tmp/soundroom-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/soundroom-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("soundroom")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("soundroom")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[player]
initial_volume = 0.8
volume_step = 0.1
scrub_seconds = 9

[audio]
tick_ms = 100
quit_fade_out_ms = 0

[ui]
header_text = "hello"
follow_current = false

[playlist]
source = "/srv/studio/tracks.json"
extensions = ["mp3"]
recursive = false

[contact]
bind_addr = "0.0.0.0:8080"

[contact.store]
project_id = "abc123"
dataset = "staging"

[logging]
filter = "soundroom=debug"
file = "/tmp/soundroom.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SOUNDROOM_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("SOUNDROOM__PLAYER__INITIAL_VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.player.initial_volume, 0.8);
    assert_eq!(s.player.restore_volume, 1.0);
    assert_eq!(s.player.volume_step, 0.1);
    assert_eq!(s.player.scrub_seconds, 9);
    assert_eq!(s.audio.tick_ms, 100);
    assert_eq!(s.audio.quit_fade_out_ms, 0);
    assert_eq!(s.ui.header_text, "hello");
    assert!(!s.ui.follow_current);
    assert_eq!(
        s.playlist.source.as_deref(),
        Some(std::path::Path::new("/srv/studio/tracks.json"))
    );
    assert_eq!(s.playlist.extensions, vec!["mp3".to_string()]);
    assert!(!s.playlist.recursive);
    assert_eq!(s.contact.bind_addr, "0.0.0.0:8080");
    assert_eq!(s.contact.route, "/api/contact");
    assert_eq!(s.contact.store.project_id, "abc123");
    assert_eq!(s.contact.store.dataset, "staging");
    assert_eq!(s.contact.store.document_type, "contactFromSubmission");
    assert_eq!(s.logging.filter, "soundroom=debug");
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
quit_fade_out_ms = 250
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SOUNDROOM_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("SOUNDROOM__AUDIO__QUIT_FADE_OUT_MS", "0");
    let _g3 = EnvGuard::set("SOUNDROOM__CONTACT__RECAPTCHA_SECRET", "s3cret");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.quit_fade_out_ms, 0);
    assert_eq!(s.contact.recaptcha_secret.as_deref(), Some("s3cret"));
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.player.initial_volume = 1.5;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.player.volume_step = 0.0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.tick_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.contact.route = "api/contact".into();
    assert!(s.validate().is_err());
}
