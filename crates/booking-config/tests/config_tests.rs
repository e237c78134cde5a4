use booking_config::{Config, ConfigError, ConfigManager};
use booking_core::ValidationPolicy;
use tempfile::tempdir;

#[test]
fn default_config_matches_booking_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.locale, "en-US");
    assert_eq!(cfg.notification_duration_ms, 5_000);
    assert_eq!(cfg.validation_policy, ValidationPolicy::AllFields);
    assert!(cfg.ui_color_enabled);
    assert!(cfg.data_root.is_none());
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    assert_eq!(manager.load().expect("load"), Config::default());
    assert!(manager.backups_dir().exists());
    assert_eq!(manager.base_dir(), dir.path());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(
        dir.path().join("config").join("config.json"),
        dir.path().join("config").join("backups"),
    );

    let mut cfg = Config::default();
    cfg.set("validation_policy", "required-only").unwrap();
    cfg.set("notification_duration_ms", "2500").unwrap();
    cfg.last_opened_department = Some("cardiology".into());

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert!(!manager.config_path().with_extension("json.tmp").exists());
}

#[test]
fn older_files_without_new_keys_still_load() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    std::fs::write(manager.config_path(), r#"{ "locale": "fr-FR" }"#).unwrap();

    let loaded = manager.load().expect("load");
    assert_eq!(loaded.locale, "fr-FR");
    assert_eq!(loaded.notification_duration_ms, 5_000);
    assert_eq!(loaded.validation_policy, ValidationPolicy::AllFields);
}

#[test]
fn oversized_duration_on_disk_is_capped_when_loaded() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    std::fs::write(
        manager.config_path(),
        r#"{ "locale": "en-US", "notification_duration_ms": 18446744073709551615 }"#,
    )
    .unwrap();

    let loaded = manager.load().expect("load");
    assert_eq!(loaded.notification_duration_ms, 86_400_000);
}

#[test]
fn restore_rejects_names_outside_the_backups_dir() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    manager.save(&Config::default()).expect("save");

    for name in ["../config.json", "..", "sub/config.json", "..\\config.json", ""] {
        assert!(
            matches!(manager.restore(name), Err(ConfigError::InvalidValue { .. })),
            "{name}"
        );
    }
}

#[test]
fn backups_list_and_restore() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let mut cfg = Config::default();
    cfg.set("high_contrast", "on").unwrap();
    let name = manager.backup(&cfg, Some("Before demo")).expect("backup");
    assert!(name.starts_with("config_"));
    assert!(name.ends_with("_before-demo.json"));

    let backups = manager.list_backups().expect("list");
    assert_eq!(backups, vec![name.clone()]);

    let restored = manager.restore(&name).expect("restore");
    assert!(restored.accessibility.high_contrast);
    assert!(manager.restore("config_19990101_0000.json").is_err());
}
