//! Credential acquisition for pushes to HTTPS remotes.

use anyhow::{Context, Result};
use console::Term;

/// Source of access tokens for authenticated pushes. Implementations must
/// not echo the input or persist the value anywhere.
pub trait CredentialProvider {
    fn token(&self, remote: &str) -> Result<String>;
}

/// Prompts on the terminal with echo disabled.
pub struct TerminalPrompt;

impl CredentialProvider for TerminalPrompt {
    fn token(&self, remote: &str) -> Result<String> {
        let term = Term::stderr();
        term.write_str(&format!("Access token for {remote}: "))
            .context("failed to write credential prompt")?;
        let token = term
            .read_secure_line()
            .context("failed to read access token")?;
        Ok(token.trim().to_string())
    }
}

/// Fixed token for non-interactive callers and tests.
pub struct StaticToken(pub String);

impl CredentialProvider for StaticToken {
    fn token(&self, _remote: &str) -> Result<String> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::{CredentialProvider, StaticToken};

    #[test]
    fn static_token_returns_fixed_value() {
        let provider = StaticToken("abc123".to_string());
        let token = provider.token("https://example.com/repo.git").expect("token");
        assert_eq!(token, "abc123");
    }
}
