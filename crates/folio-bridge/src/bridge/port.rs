use folio_common::BridgeError;

/// Anything that can run script in the page.
pub trait RendererPort {
    fn evaluate_script(&mut self, script: &str) -> Result<(), BridgeError>;
}

/// Records scripts in order. Used by headless hosts and tests.
impl RendererPort for Vec<String> {
    fn evaluate_script(&mut self, script: &str) -> Result<(), BridgeError> {
        self.push(script.to_string());
        Ok(())
    }
}
