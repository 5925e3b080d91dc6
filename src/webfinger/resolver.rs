// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Resolution of a requested resource to a JRD.

use serde_json::Value;

use super::acct::{AcctError, AcctUri};
use super::diagnostics::Diagnostics;
use super::jrd::Jrd;
use super::params::QueryParameters;

/// Read-only view of the author data a resolver looks accounts up in.
pub trait AccountStore {
    /// Raw record for an exact account name.
    fn account(&self, name: &str) -> Option<&Value>;

    /// Number of accounts in the store.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The only account, when the store holds exactly one.
    fn sole_account(&self) -> Option<(&str, &Value)>;
}

/// Why a resource could not be resolved. All variants surface as 404.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("unsupported resource scheme: {0}")]
    UnsupportedScheme(String),

    #[error("malformed acct resource: {0}")]
    MalformedResource(AcctError),

    #[error("unknown account: {0}")]
    UnknownAccount(String),
}

static NO_DATA: Value = Value::Null;

/// The `webfinger` member of an account record, or `null` when absent.
pub fn webfinger_data(record: &Value) -> &Value {
    record.get("webfinger").unwrap_or(&NO_DATA)
}

/// Resolve `resource` against `store`.
///
/// An exact account match wins. Otherwise `acct:<host>` for the configured
/// host resolves to the sole account when the store holds exactly one, with
/// the subject rewritten to `acct:<host>@<host>`.
pub fn resolve<S: AccountStore + ?Sized>(
    resource: &str,
    request_host: Option<&str>,
    params: &QueryParameters,
    store: &S,
    diagnostics: &mut Diagnostics,
) -> Result<Jrd, ResolveError> {
    let mut uri = AcctUri::parse(resource).map_err(|err| match err {
        AcctError::UnsupportedScheme(scheme) => ResolveError::UnsupportedScheme(scheme),
        other => ResolveError::MalformedResource(other),
    })?;

    let record = if let Some(record) = store.account(uri.account()) {
        record
    } else if uri.account().is_empty() && Some(uri.host()) == request_host {
        let (_, record) = store
            .sole_account()
            .ok_or_else(|| ResolveError::UnknownAccount(resource.to_string()))?;
        let host = uri.host().to_string();
        uri.set_account(&host)
            .map_err(ResolveError::MalformedResource)?;
        record
    } else {
        return Err(ResolveError::UnknownAccount(uri.account().to_string()));
    };

    let mut jrd = Jrd::parse(&uri.to_string(), webfinger_data(record), diagnostics);
    if let Some(rels) = &params.rel {
        jrd.retain_rels(rels);
    }

    Ok(jrd)
}
