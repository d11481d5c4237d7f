use mockall::mock;

use crate::store::KeyValueStore;

// Mock store for testing persistence failures
mock! {
    pub Store {}

    impl KeyValueStore for Store {
        fn get(&self, key: &str) -> eyre::Result<Option<String>>;

        fn set(&self, key: &str, value: &str) -> eyre::Result<()>;
    }
}
