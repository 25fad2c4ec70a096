//! End-to-end persistence: config -> file store -> encrypted storage -> reopen.

use std::sync::Arc;

use serde_json::{json, Value};
use tempfile::TempDir;
use wownow_core::config::Config;
use wownow_integration_tests::config_in;
use wownow_vault::produce::PRODUCE_STORE_KEY;
use wownow_vault::types::StoredUserInfo;
use wownow_vault::{
    AppStorage, EncryptedStorage, FileStore, KeyMaterial, KeyValueStore, ProduceStore,
};

fn open(config: &Config) -> (EncryptedStorage, Arc<FileStore>) {
    let store = Arc::new(FileStore::new(config.storage_path().unwrap()));
    let storage = EncryptedStorage::new(
        store.clone(),
        KeyMaterial::from_config(&config.encryption),
    );
    (storage, store)
}

#[tokio::test]
async fn test_values_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir, "app.iwownow.ai");

    {
        let (storage, _) = open(&config);
        storage.save_encrypted("k1", &json!({"a": 1})).await;
        storage.save_encrypted("k1", &json!({"a": 2})).await;
    }

    let (storage, _) = open(&config);
    assert_eq!(storage.load_encrypted::<Value>("k1").await, Some(json!({"a": 2})));
}

#[tokio::test]
async fn test_legacy_file_entry_loads() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir, "app.iwownow.ai");
    let (storage, store) = open(&config);

    store.set("k2", r#"{"a":1}"#).unwrap();
    assert_eq!(storage.load_encrypted::<Value>("k2").await, Some(json!({"a": 1})));
}

#[tokio::test]
async fn test_origin_change_reads_absent() {
    let dir = TempDir::new().unwrap();

    let (prod, _) = open(&config_in(&dir, "app.iwownow.ai"));
    prod.save_encrypted("state", &json!({"tab": 2})).await;

    let (staging, _) = open(&config_in(&dir, "staging.iwownow.ai"));
    assert_eq!(staging.load_encrypted::<Value>("state").await, None);
}

#[tokio::test]
async fn test_plain_and_encrypted_entries_share_a_store() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir, "app.iwownow.ai");
    let (storage, store) = open(&config);
    let app = AppStorage::new(store.clone());

    app.set_token(Some("jwt")).unwrap();
    app.set_user_info(Some(&StoredUserInfo {
        id: 1,
        nickname: "wow".to_string(),
        avatar: String::new(),
        mobile: None,
        email: None,
    }))
    .unwrap();

    let mut produce = ProduceStore::restore(storage.clone()).await;
    produce.set_device_id(Some(4)).await;
    produce.set_quantity(2).await;

    let keys = store.keys().unwrap();
    assert!(keys.contains(&PRODUCE_STORE_KEY.to_string()));
    assert!(keys.contains(&"token".to_string()));

    app.clear_auth().unwrap();
    let restored = ProduceStore::restore(storage).await;
    assert_eq!(restored.state().device_id, Some(4));
    assert_eq!(restored.state().quantity, 2);
    assert_eq!(app.token(), None);
}
