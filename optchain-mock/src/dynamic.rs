use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use optchain_core::{Chain, ChainConnector, ChainError};

/// Instruction for how a call should behave for a given symbol.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(ChainError),
}

#[derive(Default)]
struct InternalState {
    chain_rules: HashMap<String, MockBehavior<Chain>>,
    requests: Vec<String>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `option_chain` calls for a specific symbol.
    pub async fn set_chain_behavior(&self, symbol: &str, behavior: MockBehavior<Chain>) {
        let mut guard = self.state.lock().await;
        guard.chain_rules.insert(symbol.to_string(), behavior);
    }

    /// Symbols requested so far, in call order.
    pub async fn requests(&self) -> Vec<String> {
        self.state.lock().await.requests.clone()
    }

    /// Clear all configured behaviors and the request log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.chain_rules.clear();
        guard.requests.clear();
    }
}

/// A connector that defers all behavior to an external controller.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn ChainConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn ChainConnector>, controller)
    }
}

#[async_trait]
impl ChainConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn option_chain(&self, symbol: &str) -> Result<Chain, ChainError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.requests.push(symbol.to_string());
            guard.chain_rules.get(symbol).cloned()
        };

        match behavior {
            Some(MockBehavior::Return(chain)) => Ok(chain),
            Some(MockBehavior::Fail(e)) => Err(e),
            None => Err(ChainError::not_found(format!("option chain for {symbol}"))),
        }
    }
}
