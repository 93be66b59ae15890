use anteroom::{
    Config, InMemoryStore, Platform, PreferencesStore, Role, SessionConfig, SessionStore,
    StorageAdapter, TimeoutPolicy, UserProfile,
};
use std::sync::Arc;
use std::time::Duration;

fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64
}

fn web_store() -> SessionStore {
    let adapter = StorageAdapter::new(Arc::new(InMemoryStore::new()), Platform::Web);
    SessionStore::new(adapter, SessionConfig::default(), Platform::Web)
}

fn vendor_profile() -> UserProfile {
    UserProfile::new(Role::Vendor)
        .with_field("username", serde_json::json!("amina"))
        .with_field("shop_id", serde_json::json!(17))
}

#[tokio::test]
async fn auth_round_trip_returns_exact_pair() {
    let store = web_store();
    let user = vendor_profile();

    store.set_auth("tok-abc-123", user.clone()).await;

    assert_eq!(store.token().await, Some("tok-abc-123".to_string()));
    assert_eq!(store.user().await, Some(user));
    assert!(store.is_authenticated().await);
}

#[tokio::test]
async fn clear_auth_twice_is_identical_to_once() {
    let store = web_store();
    store.set_auth("tok", vendor_profile()).await;

    store.clear_auth().await;
    let token_after_first = store.token().await;
    let user_after_first = store.user().await;
    let authed_after_first = store.is_authenticated().await;

    store.clear_auth().await;

    assert_eq!(store.token().await, token_after_first);
    assert_eq!(store.user().await, user_after_first);
    assert_eq!(store.is_authenticated().await, authed_after_first);
    assert!(!authed_after_first);
}

#[tokio::test]
async fn expiry_boundary_one_millisecond_each_side() {
    let timeout = Duration::from_secs(60);
    let config = SessionConfig {
        timeouts: TimeoutPolicy::fixed(timeout),
        ..SessionConfig::default()
    };
    let adapter = StorageAdapter::new(Arc::new(InMemoryStore::new()), Platform::Web);
    let store = SessionStore::new(adapter.clone(), config, Platform::Web);
    store.set_auth("tok", vendor_profile()).await;
    let activity_key = adapter.keys().last_activity;

    // One millisecond inside the window
    let just_inside = now_millis() - (timeout.as_millis() as u64 - 1);
    adapter.set(activity_key, just_inside.to_string()).await;
    assert!(store.is_session_valid().await);

    // One millisecond outside the window
    let just_outside = now_millis() - (timeout.as_millis() as u64 + 1);
    adapter.set(activity_key, just_outside.to_string()).await;
    assert!(!store.is_session_valid().await);
}

#[tokio::test]
async fn auto_login_flow_for_returning_vendor() {
    let adapter = StorageAdapter::new(Arc::new(InMemoryStore::new()), Platform::Native);
    let store = SessionStore::new(adapter.clone(), SessionConfig::default(), Platform::Native);

    // First launch: vendor logs in
    store.set_auth("tok", vendor_profile()).await;

    // Next launch: a fresh store over the same durable state
    let relaunched = SessionStore::new(adapter, SessionConfig::default(), Platform::Native);
    assert!(relaunched.auto_login().await);
    assert_eq!(relaunched.token().await, Some("tok".to_string()));
    // The fast-path snapshot is primed after restore
    assert!(relaunched.current().await.is_some());
}

#[tokio::test]
async fn auto_login_never_restores_customers() {
    let adapter = StorageAdapter::new(Arc::new(InMemoryStore::new()), Platform::Native);
    let store = SessionStore::new(adapter.clone(), SessionConfig::default(), Platform::Native);
    store.set_auth("tok", UserProfile::new(Role::Customer)).await;

    let relaunched = SessionStore::new(adapter, SessionConfig::default(), Platform::Native);
    assert!(!relaunched.auto_login().await);
    assert!(!relaunched.is_authenticated().await);
}

#[tokio::test]
async fn ensure_authenticated_restores_any_valid_role() {
    let adapter = StorageAdapter::new(Arc::new(InMemoryStore::new()), Platform::Web);
    let store = SessionStore::new(adapter.clone(), SessionConfig::default(), Platform::Web);
    store.set_auth("tok", UserProfile::new(Role::Customer)).await;

    let foregrounded = SessionStore::new(adapter, SessionConfig::default(), Platform::Web);
    assert!(foregrounded.ensure_authenticated().await);
    assert!(foregrounded.current().await.is_some());
}

#[tokio::test]
async fn cross_backend_isolation_under_key_schemas() {
    // One physical backend viewed through both key schemas: a record written
    // by the native shell must be invisible to a web-keyed reader.
    let backend = Arc::new(InMemoryStore::new());
    let native_store = SessionStore::new(
        StorageAdapter::new(backend.clone(), Platform::Native),
        SessionConfig::default(),
        Platform::Native,
    );
    let web_store = SessionStore::new(
        StorageAdapter::new(backend, Platform::Web),
        SessionConfig::default(),
        Platform::Web,
    );

    native_store.set_auth("native-tok", vendor_profile()).await;

    assert!(native_store.is_authenticated().await);
    assert!(!web_store.is_authenticated().await);
    assert_eq!(web_store.token().await, None);
}

#[tokio::test]
async fn separate_backends_share_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let native_backend = Arc::new(
        PreferencesStore::open(dir.path().join("preferences.json"))
            .await
            .unwrap(),
    );
    let web_backend = Arc::new(InMemoryStore::new());

    let native_store = SessionStore::new(
        StorageAdapter::new(native_backend, Platform::Native),
        SessionConfig::default(),
        Platform::Native,
    );
    let web_store = SessionStore::new(
        StorageAdapter::new(web_backend, Platform::Web),
        SessionConfig::default(),
        Platform::Web,
    );

    native_store.set_auth("native-tok", vendor_profile()).await;
    web_store.set_auth("web-tok", UserProfile::new(Role::Customer)).await;

    assert_eq!(native_store.token().await, Some("native-tok".to_string()));
    assert_eq!(web_store.token().await, Some("web-tok".to_string()));

    native_store.clear_auth().await;
    // Clearing the native session leaves the web session untouched
    assert_eq!(web_store.token().await, Some("web-tok".to_string()));
}

#[tokio::test]
async fn session_survives_preferences_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.json");

    {
        let backend = Arc::new(PreferencesStore::open(&path).await.unwrap());
        let store = SessionStore::new(
            StorageAdapter::new(backend, Platform::Native),
            SessionConfig::default(),
            Platform::Native,
        );
        store.set_auth("tok-persisted", vendor_profile()).await;
    }

    // "App restart": everything reconstructed from disk
    let backend = Arc::new(PreferencesStore::open(&path).await.unwrap());
    let store = SessionStore::new(
        StorageAdapter::new(backend, Platform::Native),
        SessionConfig::default(),
        Platform::Native,
    );

    assert!(store.auto_login().await);
    assert_eq!(store.token().await, Some("tok-persisted".to_string()));
    let user = store.user().await.unwrap();
    assert_eq!(user.extra.get("username").unwrap(), "amina");
}

#[tokio::test]
async fn config_from_defaults_builds_working_stack() {
    let config = Config::builder()
        .with_platform(Platform::Web)
        .build()
        .unwrap();

    assert_eq!(config.platform, Platform::Web);
    assert_eq!(
        config.session.timeouts.timeout_for(Platform::Web, None),
        Duration::from_secs(24 * 3600)
    );
    assert_eq!(
        config.session.timeouts.timeout_for(Platform::Native, Some(Role::Vendor)),
        Duration::from_secs(7 * 24 * 3600)
    );
}
