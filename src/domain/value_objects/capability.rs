//! Capability tokens gating administrative operations

use serde::{Deserialize, Serialize};

/// A privilege that can be attached to a capability token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// May change engine parameters (emission rate, wallet limits).
    Admin,
    /// May credit token supply directly (faucet / operational grants).
    Minter,
}

/// An unforgeable-by-convention set of capabilities held by a caller.
///
/// Tokens are issued at engine construction and passed explicitly into
/// administrative operations; there is no ambient role lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapabilityToken {
    capabilities: Vec<Capability>,
}

impl CapabilityToken {
    pub fn new(capabilities: Vec<Capability>) -> Self {
        Self { capabilities }
    }

    /// A token carrying every capability, for the engine operator.
    pub fn root() -> Self {
        Self::new(vec![Capability::Admin, Capability::Minter])
    }

    pub fn allows(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_token_allows_everything() {
        let token = CapabilityToken::root();
        assert!(token.allows(Capability::Admin));
        assert!(token.allows(Capability::Minter));
    }

    #[test]
    fn test_empty_token_allows_nothing() {
        let token = CapabilityToken::default();
        assert!(!token.allows(Capability::Admin));
        assert!(!token.allows(Capability::Minter));
    }
}
