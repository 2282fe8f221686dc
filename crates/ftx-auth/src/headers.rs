//! Names of the authentication headers
//!
//! The header names are exchange-specific configuration rather than part of
//! the signing contract. The defaults are the ones FTX expects.

/// Header names used on signed requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    /// Carries the API key
    pub key: String,
    /// Carries the hex signature
    pub sign: String,
    /// Carries the nonce the signature was computed with
    pub timestamp: String,
    /// Carries the percent-encoded subaccount name, when one is configured
    pub subaccount: String,
}

impl AuthHeaders {
    /// Create a set of header names
    pub fn new(
        key: impl Into<String>,
        sign: impl Into<String>,
        timestamp: impl Into<String>,
        subaccount: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            sign: sign.into(),
            timestamp: timestamp.into(),
            subaccount: subaccount.into(),
        }
    }

    /// FTX header names
    pub fn ftx() -> Self {
        Self::new("FTX-KEY", "FTX-SIGN", "FTX-TS", "FTX-SUBACCOUNT")
    }

    /// Generic `API-*` header names used by several FTX-derived venues
    pub fn generic() -> Self {
        Self::new("API-KEY", "API-SIGN", "API-TIMESTAMP", "API-SUBACCOUNT")
    }

    /// All signing header names, subaccount included
    pub fn names(&self) -> [&str; 4] {
        [&self.key, &self.sign, &self.timestamp, &self.subaccount]
    }
}

impl Default for AuthHeaders {
    fn default() -> Self {
        Self::ftx()
    }
}
