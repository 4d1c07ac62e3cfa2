//! API token generation.

use uuid::Uuid;

/// Generator for opaque API tokens.
#[derive(Debug, Clone, Default)]
pub struct TokenGenerator {
    _private: (),
}

impl TokenGenerator {
    /// Create a new token generator.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Generate a cryptographically random opaque token.
    ///
    /// Tokens carry no time component and are safe to hand to clients.
    #[must_use]
    pub fn generate(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_token() {
        let generator = TokenGenerator::new();
        let t1 = generator.generate();
        let t2 = generator.generate();

        assert_eq!(t1.len(), 32);
        assert_eq!(t2.len(), 32);
        assert_ne!(t1, t2);
        assert!(t1.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
