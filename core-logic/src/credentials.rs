//! Credential loading and address derivation.
//!
//! Input files are newline-delimited plaintext, one private key or
//! address per line. Blank lines and `#` comments are skipped, order is
//! preserved. Loaded values are zeroized on drop and never logged in
//! full.

use std::fmt;
use std::path::Path;

use ethers::signers::LocalWallet;
use ethers::types::Address;
use ethers::utils::to_checksum;
use tracing::error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::WalletError;

/// A single line from a credential file: either a private key or a plain
/// address, interpretation is up to the tool.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Credential {
    raw: String,
}

impl Credential {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Redacted form for logs: first and last 10 characters. Counted in
    /// chars, not bytes: file lines are untrusted and may hold pasted
    /// non-ASCII text.
    pub fn preview(&self) -> String {
        let chars: Vec<char> = self.raw.chars().collect();
        if chars.len() <= 20 {
            return self.raw.clone();
        }
        let head: String = chars[..10].iter().collect();
        let tail: String = chars[chars.len() - 10..].iter().collect();
        format!("{}...{}", head, tail)
    }

    /// Derive a signing wallet from a private-key credential.
    /// Deterministic; a malformed key is a per-item error, not a fatal one.
    pub fn derive_wallet(&self) -> Result<LocalWallet, WalletError> {
        self.raw
            .parse::<LocalWallet>()
            .map_err(|_| WalletError::InvalidKeyFormat)
    }

    /// Parse an address-type credential.
    pub fn parse_address(&self) -> Result<Address, WalletError> {
        self.raw
            .parse::<Address>()
            .map_err(|_| WalletError::InvalidAddress {
                value: self.preview(),
            })
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("raw", &"***REDACTED***")
            .finish()
    }
}

/// Checksum rendering of a derived address.
pub fn checksum(address: &Address) -> String {
    to_checksum(address, None)
}

/// Read a credential file. Fails softly: a read error is logged and an
/// empty list returned; the caller treats "nothing to do" as fatal.
pub fn load_credentials(path: impl AsRef<Path>) -> Vec<Credential> {
    let path = path.as_ref();
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to read credential file {:?}: {}", path, e);
            return Vec::new();
        }
    };

    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(Credential::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::signers::Signer;
    use std::io::Write;

    #[test]
    fn loader_strips_blank_lines_and_comments() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "0xaaa\n\n   \n# a comment\n  0xbbb  \n0xccc\n\n"
        )
        .unwrap();

        let creds = load_credentials(file.path());
        assert_eq!(creds.len(), 3);
        assert_eq!(creds[0].raw(), "0xaaa");
        assert_eq!(creds[1].raw(), "0xbbb");
        assert_eq!(creds[2].raw(), "0xccc");
    }

    #[test]
    fn missing_file_yields_empty_list() {
        let creds = load_credentials("/definitely/not/here.txt");
        assert!(creds.is_empty());
    }

    #[test]
    fn derivation_is_deterministic() {
        let key = "0000000000000000000000000000000000000000000000000000000000000001";
        let cred = Credential::new(key);

        let first = cred.derive_wallet().unwrap().address();
        let second = cred.derive_wallet().unwrap().address();
        assert_eq!(first, second);
        assert_eq!(
            checksum(&first),
            "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
        );
    }

    #[test]
    fn malformed_key_is_an_error_not_a_panic() {
        assert!(Credential::new("not-a-key").derive_wallet().is_err());
        assert!(Credential::new("0x1234").derive_wallet().is_err());
    }

    #[test]
    fn preview_survives_multibyte_garbage_lines() {
        // a pasted non-key line must stay a loggable per-item skip,
        // never a panic
        let cred = Credential::new("密钥备份二〇二四年一月十五日星期一测试键值对照");
        let p = cred.preview();
        assert!(p.contains("..."));
        assert!(p.starts_with("密钥备份二〇二四年一"));
        assert!(p.ends_with("日星期一测试键值对照"));

        // at the 20-char boundary the line is returned whole
        let short = Credential::new("密钥备份二〇二四年一月十五日星期一测试键");
        assert_eq!(short.preview(), short.raw());
    }

    #[test]
    fn preview_redacts_the_middle() {
        let cred = Credential::new(
            "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
        );
        let p = cred.preview();
        assert!(p.starts_with("0x59c6995e"));
        assert!(p.ends_with("3b6b78690d"));
        assert!(p.contains("..."));
    }
}
