//! Typed contract calls.
//!
//! Every transaction this client can produce targets one of a closed
//! set of entry points, so calls are a tagged enum rather than a
//! stringly-typed argument bag. Adding an entry point means adding a
//! variant here and updating the encoding in one place.

use sharegate_core::{Cid, PublicKey, ShareId, Timestamp};

use crate::abi;

/// A mutating contract call, carried inside an unsigned transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareCall {
    /// Record a new share gating `cid` for `recipients` until `expiry`.
    ///
    /// Recipients are sorted by key bytes and hold no duplicates; the
    /// builder establishes that before the call is constructed.
    CreateShare {
        cid: Cid,
        recipients: Vec<PublicKey>,
        expiry: Timestamp,
    },
    /// Mark the share with `share_id` revoked.
    RevokeShare { share_id: ShareId },
}

impl ShareCall {
    /// The contract entry point this call targets.
    pub fn entry_point(&self) -> &'static str {
        match self {
            Self::CreateShare { .. } => abi::EP_CREATE_SHARE,
            Self::RevokeShare { .. } => abi::EP_REVOKE_SHARE,
        }
    }
}

/// A read-only contract invocation. Not signed, not submitted; it runs
/// against current ledger state and costs nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareQuery {
    /// Return the cid behind `share_id` if the caller is allowed.
    CidIfAllowed { share_id: ShareId },
}

impl ShareQuery {
    /// The contract entry point this query targets.
    pub fn entry_point(&self) -> &'static str {
        match self {
            Self::CidIfAllowed { .. } => abi::EP_GET_CID_IF_ALLOWED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_entry_points() {
        let create = ShareCall::CreateShare {
            cid: Cid::new("bafy-test"),
            recipients: vec![PublicKey::from_bytes([1; 32])],
            expiry: Timestamp::from_secs(1000),
        };
        assert_eq!(create.entry_point(), "create_share");

        let revoke = ShareCall::RevokeShare {
            share_id: ShareId::new(3),
        };
        assert_eq!(revoke.entry_point(), "revoke_share");
    }

    #[test]
    fn test_query_entry_point() {
        let query = ShareQuery::CidIfAllowed {
            share_id: ShareId::new(0),
        };
        assert_eq!(query.entry_point(), "get_cid_if_allowed");
    }
}
