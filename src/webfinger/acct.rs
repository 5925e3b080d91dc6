// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The `acct` URI scheme (RFC 7565).
//!
//! An [`AcctUri`] holds the account in decoded form. Percent-encoding is
//! applied exactly once when rendering and removed exactly once when parsing
//! or assigning, following RFC 3986 §2.4 ("implementations must not
//! percent-encode or decode the same string more than once").
//!
//! [`AcctUri::build`] takes operator-entered, unescaped text. Passing an
//! already-encoded account therefore encodes it a second time:
//!
//! ```rust,ignore
//! let uri = AcctUri::build(Some("juliet%40capulet.example"), Some("shoppingsite.example"))?;
//! assert_eq!(uri.to_string(), "acct:juliet%2540capulet.example@shoppingsite.example");
//! ```

use std::fmt;
use std::str::FromStr;

pub const SCHEME: &str = "acct";

/// Construction errors for [`AcctUri`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AcctError {
    #[error("missing scheme for acct URI")]
    MissingScheme,

    #[error("unsupported scheme for acct URI: {0}")]
    UnsupportedScheme(String),

    #[error("missing opaque part for acct URI")]
    MissingOpaque,

    #[error("missing account part for acct URI")]
    MissingAccount,

    #[error("account part not percent-encoded for acct URI")]
    AccountNotEncoded,

    #[error("account part does not decode to UTF-8 for acct URI")]
    AccountNotUtf8,
}

/// An `acct:<account>@<host>` identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AcctUri {
    account: String,
    host: String,
}

impl AcctUri {
    /// Build from raw, unescaped components. Missing parts default to the
    /// empty string; the account is percent-encoded once before the checked
    /// constructor splits it back out.
    pub fn build(account: Option<&str>, host: Option<&str>) -> Result<Self, AcctError> {
        let account = encode(account.unwrap_or_default());
        let host = host.unwrap_or_default();
        Self::from_opaque(Some(&format!("{account}@{host}")))
    }

    /// Checked construction from an opaque part (`<encoded account>@<host>`).
    ///
    /// The account goes through [`AcctUri::set_account`], so an empty account
    /// or an unescaped `@` inside it is rejected.
    pub fn from_opaque(opaque: Option<&str>) -> Result<Self, AcctError> {
        let opaque = opaque
            .filter(|o| !o.is_empty())
            .ok_or(AcctError::MissingOpaque)?;
        let (account, host) = split_opaque(opaque);

        let mut uri = Self {
            account: String::new(),
            host: host.to_string(),
        };
        uri.set_account(account)?;
        Ok(uri)
    }

    /// Parse an `acct:` URI string.
    ///
    /// The account is not validated here: `acct:example.com` parses with an
    /// empty account so bare-host lookups can be recognized by the resolver.
    pub fn parse(input: &str) -> Result<Self, AcctError> {
        let (scheme, opaque) = input.split_once(':').ok_or(AcctError::MissingScheme)?;
        if scheme.is_empty() {
            return Err(AcctError::MissingScheme);
        }
        if !scheme.eq_ignore_ascii_case(SCHEME) {
            return Err(AcctError::UnsupportedScheme(scheme.to_string()));
        }
        // `acct://...` is hierarchical, which leaves no opaque part.
        if opaque.is_empty() || opaque.starts_with('/') {
            return Err(AcctError::MissingOpaque);
        }

        let (account, host) = split_opaque(opaque);
        Ok(Self {
            account: decode(account)?,
            host: host.to_string(),
        })
    }

    /// The decoded account name.
    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Assign a percent-encoded account. The value is decoded once before it
    /// is stored.
    pub fn set_account(&mut self, value: &str) -> Result<(), AcctError> {
        if value.is_empty() {
            return Err(AcctError::MissingAccount);
        }
        if value.contains('@') {
            return Err(AcctError::AccountNotEncoded);
        }

        self.account = decode(value)?;
        Ok(())
    }
}

impl fmt::Display for AcctUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SCHEME}:{}@{}", encode(&self.account), self.host)
    }
}

impl FromStr for AcctUri {
    type Err = AcctError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Split on the last `@`. Without one, the whole opaque part is the host.
fn split_opaque(opaque: &str) -> (&str, &str) {
    opaque.rsplit_once('@').unwrap_or(("", opaque))
}

fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn decode(value: &str) -> Result<String, AcctError> {
    urlencoding::decode(value)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| AcctError::AccountNotUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_example() {
        let uri = AcctUri::parse("acct:foobar@status.example.net").unwrap();

        assert_eq!(uri.account(), "foobar");
        assert_eq!(uri.host(), "status.example.net");
        assert_eq!(uri.to_string(), "acct:foobar@status.example.net");
    }

    #[test]
    fn building_from_encoded_strings_doubly_encodes() {
        let uri = AcctUri::build(Some("juliet%40capulet.example"), Some("shoppingsite.example"))
            .unwrap();

        assert_eq!(
            uri.to_string(),
            "acct:juliet%2540capulet.example@shoppingsite.example"
        );
        assert_eq!(uri.account(), "juliet%40capulet.example");
        assert_eq!(uri.host(), "shoppingsite.example");
    }

    #[test]
    fn building_from_unencoded_strings() {
        let uri = AcctUri::build(Some("juliet@capulet.example"), Some("shoppingsite.example"))
            .unwrap();

        assert_eq!(
            uri.to_string(),
            "acct:juliet%40capulet.example@shoppingsite.example"
        );
        assert_eq!(uri.account(), "juliet@capulet.example");
        assert_eq!(uri.host(), "shoppingsite.example");
    }

    #[test]
    fn parse_decodes_the_account_once() {
        let uri = AcctUri::parse("acct:juliet%40capulet.example@shoppingsite.example").unwrap();

        assert_eq!(uri.account(), "juliet@capulet.example");
        assert_eq!(uri.host(), "shoppingsite.example");
        assert_eq!(
            uri.to_string(),
            "acct:juliet%40capulet.example@shoppingsite.example"
        );
    }

    #[test]
    fn parse_rejects_accounts_that_are_not_utf8() {
        assert_eq!(
            AcctUri::parse("acct:%FF@bagend.com").unwrap_err(),
            AcctError::AccountNotUtf8
        );
        assert_eq!(
            AcctUri::parse("acct:bilbo%C3@bagend.com").unwrap_err(),
            AcctError::AccountNotUtf8
        );
    }

    #[test]
    fn build_then_parse_round_trips_the_account() {
        for account in ["bilbo", "bilbo baggins", "ünïcödé", "100%", "a+b", "tilde~"] {
            for host in [Some("bagend.com"), Some(""), None] {
                let built = AcctUri::build(Some(account), host).unwrap();
                let parsed = AcctUri::parse(&built.to_string()).unwrap();
                assert_eq!(parsed.account(), account);
                assert_eq!(parsed.host(), host.unwrap_or_default());
            }
        }
    }

    #[test]
    fn checked_construction_rejects_unescaped_account() {
        let err = AcctUri::from_opaque(Some("juliet@capulet.example@shoppingsite.example"))
            .unwrap_err();
        assert_eq!(err, AcctError::AccountNotEncoded);
    }

    #[test]
    fn checked_construction_rejects_missing_opaque() {
        assert_eq!(AcctUri::from_opaque(None).unwrap_err(), AcctError::MissingOpaque);
        assert_eq!(AcctUri::from_opaque(Some("")).unwrap_err(), AcctError::MissingOpaque);
    }

    #[test]
    fn checked_construction_rejects_missing_account() {
        let err = AcctUri::from_opaque(Some("shoppingsite.example")).unwrap_err();
        assert_eq!(err, AcctError::MissingAccount);
    }

    #[test]
    fn build_without_account_fails() {
        assert_eq!(
            AcctUri::build(None, Some("bagend.com")).unwrap_err(),
            AcctError::MissingAccount
        );
    }

    #[test]
    fn parse_allows_a_bare_host() {
        let uri = AcctUri::parse("acct:bagend.com").unwrap();

        assert_eq!(uri.account(), "");
        assert_eq!(uri.host(), "bagend.com");
    }

    #[test]
    fn parse_rejects_other_schemes_and_shapes() {
        assert_eq!(
            AcctUri::parse("mailto:bilbo@bagend.com").unwrap_err(),
            AcctError::UnsupportedScheme("mailto".into())
        );
        assert_eq!(AcctUri::parse("bilbo@bagend.com").unwrap_err(), AcctError::MissingScheme);
        assert_eq!(AcctUri::parse("acct:").unwrap_err(), AcctError::MissingOpaque);
        assert_eq!(AcctUri::parse("acct://bagend.com").unwrap_err(), AcctError::MissingOpaque);
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let uri: AcctUri = "ACCT:bilbo@bagend.com".parse().unwrap();
        assert_eq!(uri.to_string(), "acct:bilbo@bagend.com");
    }

    #[test]
    fn set_account_validates_and_decodes() {
        let mut uri = AcctUri::parse("acct:bagend.com").unwrap();

        assert_eq!(uri.set_account("").unwrap_err(), AcctError::MissingAccount);
        assert_eq!(uri.set_account("a@b").unwrap_err(), AcctError::AccountNotEncoded);

        assert_eq!(uri.set_account("%FF").unwrap_err(), AcctError::AccountNotUtf8);

        uri.set_account("bilbo%20baggins").unwrap();
        assert_eq!(uri.account(), "bilbo baggins");
        assert_eq!(uri.to_string(), "acct:bilbo%20baggins@bagend.com");
    }
}
