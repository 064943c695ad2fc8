use std::collections::HashMap;

/// Chain identifier to Codex network id.
#[derive(Debug, Clone, Default)]
pub struct ChainIds(pub HashMap<String, i64>);

impl ChainIds {
    /// A missing chain and a network id of 0 both mean "not resolvable".
    pub fn resolve(&self, chain: &str) -> Option<i64> {
        self.0.get(chain).copied().filter(|id| *id != 0)
    }
}
