use folio_bridge::{RendererPort, BRIDGE_INIT_SCRIPT};
use folio_common::BridgeError;

/// Headless renderer for the command-line host. Scripts are logged, not run.
#[derive(Debug, Default)]
pub struct ConsoleRenderer {
    evaluated: usize,
    injected: bool,
}

impl ConsoleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the renderer half of the bridge. Idempotent.
    pub fn inject_bridge(&mut self) -> Result<(), BridgeError> {
        if self.injected {
            return Ok(());
        }
        self.evaluate_script(BRIDGE_INIT_SCRIPT)?;
        self.injected = true;
        Ok(())
    }

    pub fn evaluated(&self) -> usize {
        self.evaluated
    }
}

impl RendererPort for ConsoleRenderer {
    fn evaluate_script(&mut self, script: &str) -> Result<(), BridgeError> {
        if !self.injected && script != BRIDGE_INIT_SCRIPT {
            return Err(BridgeError::Script("bridge not injected".into()));
        }
        self.evaluated += 1;
        tracing::debug!(len = script.len(), script = %script.trim(), "evaluate_script");
        Ok(())
    }
}
