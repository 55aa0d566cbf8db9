//! Schema sources
//!
//! A [`SchemaSource`] answers "which attributes does the resource at this
//! address have". The shell reads them from a JSON snapshot of description
//! responses; [`CachedSchemaSource`] keeps fetched trees for a while so that
//! every keystroke does not re-read the snapshot.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::{debug, info};

use super::{DescriptorTree, ResourceAddress, attributes_from_response};
use crate::error::SchemaError;

/// Provider of attribute descriptions per resource address
pub trait SchemaSource: Send + Sync {
    /// Fetch the attribute descriptions of a resource
    ///
    /// # Arguments
    /// * `address` - Resource whose attributes are wanted
    ///
    /// # Returns
    /// * `Ok(None)` - The resource is unknown or describes no attributes
    /// * `Ok(Some(tree))` - The attribute descriptions
    fn fetch_schema(
        &self,
        address: &ResourceAddress,
    ) -> Result<Option<Arc<DescriptorTree>>, SchemaError>;

    /// Drop anything cached so the next fetch sees fresh data
    fn invalidate(&self) {}
}

/// Fixed in-memory trees, keyed by address
#[derive(Debug, Default, Clone)]
pub struct StaticSchemaSource {
    trees: HashMap<ResourceAddress, Arc<DescriptorTree>>,
}

impl StaticSchemaSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, address: ResourceAddress, tree: DescriptorTree) -> Self {
        self.trees.insert(address, Arc::new(tree));
        self
    }
}

impl SchemaSource for StaticSchemaSource {
    fn fetch_schema(
        &self,
        address: &ResourceAddress,
    ) -> Result<Option<Arc<DescriptorTree>>, SchemaError> {
        Ok(self.trees.get(address).cloned())
    }
}

/// JSON snapshot file mapping address strings to description responses
///
/// The file is read on every fetch; wrap it in a [`CachedSchemaSource`] for
/// interactive use.
#[derive(Debug, Clone)]
pub struct SnapshotSchemaSource {
    path: PathBuf,
}

impl SnapshotSchemaSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Addresses present in the snapshot
    pub fn addresses(&self) -> Result<Vec<ResourceAddress>, SchemaError> {
        let snapshot = self.read()?;
        snapshot
            .keys()
            .map(|key| {
                key.parse::<ResourceAddress>()
                    .map_err(|e| SchemaError::InvalidFormat(format!("{e}")))
            })
            .collect()
    }

    fn read(&self) -> Result<serde_json::Map<String, Value>, SchemaError> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| SchemaError::Unreadable(format!("{}: {e}", self.path.display())))?;
        parse_snapshot(&content)
    }
}

/// Parse snapshot text into its address → response map
pub fn parse_snapshot(content: &str) -> Result<serde_json::Map<String, Value>, SchemaError> {
    match serde_json::from_str(content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(SchemaError::InvalidFormat(
            "snapshot must be an object keyed by resource address".to_string(),
        )),
        Err(e) => Err(SchemaError::InvalidFormat(e.to_string())),
    }
}

impl SchemaSource for SnapshotSchemaSource {
    fn fetch_schema(
        &self,
        address: &ResourceAddress,
    ) -> Result<Option<Arc<DescriptorTree>>, SchemaError> {
        info!("Loading schema for {} from {}", address, self.path.display());

        let snapshot = self.read()?;
        let response = snapshot.get(&address.to_string()).or_else(|| {
            // keys may be written with different spacing or trailing slashes
            snapshot
                .iter()
                .find(|(key, _)| key.parse::<ResourceAddress>().ok().as_ref() == Some(address))
                .map(|(_, response)| response)
        });

        match response {
            Some(response) => Ok(attributes_from_response(response)?.map(Arc::new)),
            None => {
                debug!("No description for {} in snapshot", address);
                Ok(None)
            }
        }
    }
}

/// Cached schema for one address
struct CacheEntry {
    schema: Option<Arc<DescriptorTree>>,
    fetched_at: Instant,
}

/// TTL cache in front of another source
pub struct CachedSchemaSource<S> {
    inner: S,
    entries: RwLock<HashMap<ResourceAddress, CacheEntry>>,
    ttl: Duration,
}

impl<S: SchemaSource> CachedSchemaSource<S> {
    /// Create a cache
    ///
    /// # Arguments
    /// * `inner` - Source consulted on a miss
    /// * `ttl` - How long a fetched schema stays valid
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn cached(&self, address: &ResourceAddress) -> Option<Option<Arc<DescriptorTree>>> {
        // a poisoned lock is treated as a miss
        let entries = self.entries.read().ok()?;
        entries
            .get(address)
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.schema.clone())
    }
}

impl<S: SchemaSource> SchemaSource for CachedSchemaSource<S> {
    fn fetch_schema(
        &self,
        address: &ResourceAddress,
    ) -> Result<Option<Arc<DescriptorTree>>, SchemaError> {
        if let Some(schema) = self.cached(address) {
            return Ok(schema);
        }

        debug!("Schema cache miss for {}", address);
        let schema = self.inner.fetch_schema(address)?;

        if let Ok(mut entries) = self.entries.write() {
            entries.insert(
                address.clone(),
                CacheEntry {
                    schema: schema.clone(),
                    fetched_at: Instant::now(),
                },
            );
        }
        Ok(schema)
    }

    fn invalidate(&self) {
        debug!("Dropping cached schemas");
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
        self.inner.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AttributeDescriptor, AttributeType, PrimitiveType};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        fetches: AtomicUsize,
    }

    impl SchemaSource for CountingSource {
        fn fetch_schema(
            &self,
            _address: &ResourceAddress,
        ) -> Result<Option<Arc<DescriptorTree>>, SchemaError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(Some(Arc::new(DescriptorTree::new())))
        }
    }

    fn counting() -> CountingSource {
        CountingSource {
            fetches: AtomicUsize::new(0),
        }
    }

    fn write_snapshot(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "attrsh-{}-{}.json",
            name,
            std::process::id()
        ));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_cache_reuses_within_ttl() {
        let cache = CachedSchemaSource::new(counting(), Duration::from_secs(60));
        let root = ResourceAddress::root();

        cache.fetch_schema(&root).unwrap();
        cache.fetch_schema(&root).unwrap();
        assert_eq!(cache.inner().fetches.load(Ordering::SeqCst), 1);

        let other = root.child("subsystem", "web");
        cache.fetch_schema(&other).unwrap();
        assert_eq!(cache.inner().fetches.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_cache_expires() {
        let cache = CachedSchemaSource::new(counting(), Duration::ZERO);
        let root = ResourceAddress::root();

        cache.fetch_schema(&root).unwrap();
        cache.fetch_schema(&root).unwrap();
        assert_eq!(cache.inner().fetches.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_cache_invalidate() {
        let cache = CachedSchemaSource::new(counting(), Duration::from_secs(60));
        let root = ResourceAddress::root();

        cache.fetch_schema(&root).unwrap();
        cache.invalidate();
        cache.fetch_schema(&root).unwrap();
        assert_eq!(cache.inner().fetches.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_static_source() {
        let tree = DescriptorTree::new().with(
            "name",
            AttributeDescriptor::new(AttributeType::Primitive(PrimitiveType::String)),
        );
        let source = StaticSchemaSource::new().with(ResourceAddress::root(), tree);

        assert!(source.fetch_schema(&ResourceAddress::root()).unwrap().is_some());
        assert!(
            source
                .fetch_schema(&ResourceAddress::root().child("a", "b"))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_snapshot_source() {
        let path = write_snapshot(
            "snapshot",
            r#"{
                "/subsystem=web": {
                    "outcome": "success",
                    "result": {"attributes": {"name": {"type": "STRING"}}}
                },
                "/subsystem=ejb/": {
                    "result": {"attributes": {"pool": {"type": "INT"}}}
                }
            }"#,
        );
        let source = SnapshotSchemaSource::new(&path);

        let web = "/subsystem=web".parse().unwrap();
        let tree = source.fetch_schema(&web).unwrap().unwrap();
        assert!(tree.get("name").is_some());

        let ejb = "/subsystem=ejb".parse().unwrap();
        assert!(source.fetch_schema(&ejb).unwrap().is_some());

        assert!(source.fetch_schema(&ResourceAddress::root()).unwrap().is_none());
        assert_eq!(source.addresses().unwrap().len(), 2);

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_snapshot_errors() {
        let missing = SnapshotSchemaSource::new("/nonexistent/attrsh.json");
        assert!(matches!(
            missing.fetch_schema(&ResourceAddress::root()),
            Err(SchemaError::Unreadable(_))
        ));

        assert!(matches!(parse_snapshot("[]"), Err(SchemaError::InvalidFormat(_))));
        assert!(matches!(parse_snapshot("{"), Err(SchemaError::InvalidFormat(_))));
    }
}
