// tests/persistence.rs

use esp32guide::*;

fn block_on<F: std::future::Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(fut)
}

#[test]
fn fs_storage_round_trips_one_file_per_key() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStorage::new(dir.path()).unwrap();

    assert_eq!(store.get(CONFIG_KEY), None);
    store.put(CONFIG_KEY, r#"{"brokerIp":"10.0.0.7"}"#).unwrap();
    assert_eq!(store.get(CONFIG_KEY), Some(r#"{"brokerIp":"10.0.0.7"}"#.to_string()));

    assert!(dir.path().join(format!("{CONFIG_KEY}.json")).is_file());
    assert_eq!(store.get(CHECKLIST_KEY), None);
}

#[test]
fn workshop_state_reloads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let settings = AppSettings {
        data_dir: dir.path().to_path_buf(),
        ..AppSettings::default()
    };

    block_on(async {
        let store = FsStorage::new(dir.path()).unwrap();
        let state = WorkshopState::new(settings.clone(), Box::new(store));
        state.toggle_step("install_ide").await;
        state.toggle_step("breadboard").await;
        state.toggle_card("report").await;

        let mut config = WorkshopConfig::default();
        config.wifi_ssid = "workshop-net".into();
        state.set_config(config).await;
    });

    block_on(async {
        let store = FsStorage::new(dir.path()).unwrap();
        let state = WorkshopState::new(settings, Box::new(store));

        let progress = state.progress().await;
        assert_eq!(progress.completed, 2);
        assert_eq!(progress.cards_completed, 1);

        let config = state.config.read().await.clone();
        assert_eq!(config.wifi_ssid, "workshop-net");
        assert_eq!(config.broker_ip, WorkshopConfig::default().broker_ip);
    });
}

#[test]
fn corrupt_blob_on_disk_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStorage::new(dir.path()).unwrap();
    store.put(CHECKLIST_KEY, "not json at all").unwrap();
    store.put(CONFIG_KEY, r#"["wrong","shape"]"#).unwrap();

    let settings = AppSettings {
        data_dir: dir.path().to_path_buf(),
        ..AppSettings::default()
    };
    let state = WorkshopState::new(settings, Box::new(store));

    block_on(async {
        assert_eq!(state.progress().await.completed, 0);
        assert_eq!(*state.config.read().await, WorkshopConfig::default());
    });
}

// EOF
