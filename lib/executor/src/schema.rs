use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};

use crate::engine::ExecutableSchema;

/// Building the executable schema failed. Cloneable because the same failure
/// is handed to every request awaiting the shared build.
#[derive(Debug, Clone, thiserror::Error)]
#[error("failed to build executable schema: {message}")]
pub struct SchemaBuildError {
    pub message: String,
}

impl SchemaBuildError {
    pub fn new(message: impl Into<String>) -> Self {
        SchemaBuildError {
            message: message.into(),
        }
    }
}

/// Produces the executable schema. Called at most once per process.
#[async_trait]
pub trait SchemaFactory: Send + Sync {
    async fn build(&self) -> Result<Arc<dyn ExecutableSchema>, SchemaBuildError>;
}

type SharedBuild = Shared<BoxFuture<'static, Result<Arc<dyn ExecutableSchema>, SchemaBuildError>>>;

/// Memoized schema handle.
///
/// The factory runs lazily on the first `get` and its result, success or
/// failure, is shared with every later caller. Callers arriving while the
/// build is in flight await the same future instead of starting another
/// build. A cached failure is permanent for the life of the process; a
/// restart is the recovery path, same as a failed boot.
pub struct SchemaState {
    factory: Arc<dyn SchemaFactory>,
    build: OnceLock<SharedBuild>,
}

impl SchemaState {
    pub fn new(factory: Arc<dyn SchemaFactory>) -> Self {
        SchemaState {
            factory,
            build: OnceLock::new(),
        }
    }

    pub async fn get(&self) -> Result<Arc<dyn ExecutableSchema>, SchemaBuildError> {
        let build = self.build.get_or_init(|| {
            let factory = self.factory.clone();
            async move { factory.build().await }.boxed().shared()
        });
        build.clone().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::Value;

    use super::*;
    use crate::engine::{EngineArgs, EngineOutput, EngineResponse};

    impl std::fmt::Debug for dyn ExecutableSchema {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("ExecutableSchema")
        }
    }

    struct NullSchema;

    #[async_trait]
    impl ExecutableSchema for NullSchema {
        async fn execute(&self, _args: EngineArgs<'_>) -> EngineOutput {
            EngineOutput::Complete(EngineResponse {
                data: Value::Null,
                errors: vec![],
            })
        }
    }

    struct CountingFactory {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl SchemaFactory for CountingFactory {
        async fn build(&self) -> Result<Arc<dyn ExecutableSchema>, SchemaBuildError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(SchemaBuildError::new("bad type definitions"))
            } else {
                Ok(Arc::new(NullSchema))
            }
        }
    }

    #[tokio::test]
    async fn factory_runs_once_across_many_gets() {
        let factory = Arc::new(CountingFactory {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let state = SchemaState::new(factory.clone());

        for _ in 0..5 {
            state.get().await.unwrap();
        }
        assert_eq!(factory.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn build_failure_is_cached() {
        let factory = Arc::new(CountingFactory {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let state = SchemaState::new(factory.clone());

        let first = state.get().await.unwrap_err();
        let second = state.get().await.unwrap_err();
        assert_eq!(first.message, "bad type definitions");
        assert_eq!(second.message, "bad type definitions");
        assert_eq!(factory.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn factory_does_not_run_before_first_get() {
        let factory = Arc::new(CountingFactory {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let _state = SchemaState::new(factory.clone());
        assert_eq!(factory.calls.load(Ordering::SeqCst), 0);
    }
}
