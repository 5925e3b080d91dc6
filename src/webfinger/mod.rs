// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # WebFinger Core
//!
//! Protocol logic for RFC 7033 discovery, independent of the HTTP layer.
//!
//! ## Modules
//!
//! - `acct` - the `acct:` URI scheme (RFC 7565)
//! - `params` - WebFinger query string decoding
//! - `link_relation` - IANA registered relations and extension URIs
//! - `jrd`, `link`, `properties` - JSON Resource Descriptor sanitization
//! - `resolver` - request resource to descriptor
//! - `diagnostics` - warning sink for pruned fragments

pub mod acct;
pub mod diagnostics;
pub mod jrd;
pub mod link;
pub mod link_relation;
pub mod params;
pub mod properties;
pub mod resolver;
pub mod uri;

pub use acct::{AcctError, AcctUri};
pub use diagnostics::Diagnostics;
pub use jrd::{Alias, Jrd};
pub use link::{Href, Link};
pub use link_relation::LinkRelationType;
pub use params::QueryParameters;
pub use properties::{Properties, Titles};
pub use resolver::{resolve, AccountStore, ResolveError};
pub use uri::is_uri;
