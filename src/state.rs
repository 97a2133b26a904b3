use std::sync::Arc;

use crate::config::AppConfig;
use crate::storage::{Storage, StorageClient};
use crate::store::TableStore;

#[derive(Clone)]
pub struct AppState {
    pub store: TableStore,
    pub storage: Arc<dyn StorageClient>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let store = TableStore::new(&config.store);
        let storage =
            Arc::new(Storage::new(&config.storage).await?) as Arc<dyn StorageClient>;
        Ok(Self {
            store,
            storage,
            config,
        })
    }

    pub fn from_parts(
        store: TableStore,
        storage: Arc<dyn StorageClient>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            store,
            storage,
            config,
        }
    }

    /// State wired to a caller-supplied table API URL and an in-memory
    /// storage fake. Used by tests; never by the binary.
    pub fn fake(store_url: &str) -> Self {
        use crate::config::{JwtConfig, StorageConfig, StoreConfig};

        let config = Arc::new(AppConfig {
            store: StoreConfig {
                url: store_url.into(),
                api_key: "test-key".into(),
            },
            storage: StorageConfig {
                endpoint: "http://fake.local".into(),
                bucket: "profile".into(),
                access_key: "fake".into(),
                secret_key: "fake".into(),
                region: "us-east-1".into(),
            },
            jwt: JwtConfig {
                secret: "test-secret".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 15,
            },
            allowed_origins: Vec::new(),
        });

        let store = TableStore::new(&config.store);
        let storage = Arc::new(MemoryStorage::default()) as Arc<dyn StorageClient>;
        Self {
            store,
            storage,
            config,
        }
    }
}

/// In-memory stand-in for the object storage collaborator.
#[derive(Default)]
pub struct MemoryStorage {
    objects: std::sync::Mutex<std::collections::BTreeMap<String, bytes::Bytes>>,
}

#[async_trait::async_trait]
impl StorageClient for MemoryStorage {
    async fn put_object(
        &self,
        key: &str,
        body: bytes::Bytes,
        _content_type: &str,
    ) -> anyhow::Result<()> {
        self.objects.lock().unwrap().insert(key.to_string(), body);
        Ok(())
    }

    async fn get_object(&self, key: &str) -> anyhow::Result<Option<bytes::Bytes>> {
        Ok(self.objects.lock().unwrap().get(key).cloned())
    }

    async fn list_keys(&self, prefix: &str) -> anyhow::Result<Vec<String>> {
        Ok(self
            .objects
            .lock()
            .unwrap()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}
