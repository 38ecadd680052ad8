//! The deployed contract's ABI: entry points, argument names, and
//! revert codes.
//!
//! These constants are the single source of truth shared by the
//! transaction builder, the reference ledger, and result decoding.
//! They must match the deployed contract exactly.

use sharegate_core::Motes;

/// Entry point that records a new share and assigns its id.
pub const EP_CREATE_SHARE: &str = "create_share";

/// Entry point that marks an existing share revoked.
pub const EP_REVOKE_SHARE: &str = "revoke_share";

/// Read-only entry point that returns the cid when access is allowed.
pub const EP_GET_CID_IF_ALLOWED: &str = "get_cid_if_allowed";

/// Argument name for the content identifier.
pub const ARG_CID: &str = "cid";

/// Argument name for the recipient key list.
pub const ARG_RECIPIENTS: &str = "recipients";

/// Argument name for the expiry timestamp.
pub const ARG_EXPIRY: &str = "expiry";

/// Argument name for the share identifier.
pub const ARG_SHARE_ID: &str = "share_id";

/// Payment attached to mutating transactions when the caller does not
/// override it.
pub const DEFAULT_PAYMENT: Motes = Motes::new(10_000_000_000);

/// Contract revert codes surfaced through execution failures.
///
/// Codes 102-104 are access decisions on the query path; everything
/// else reports a rejected mutation.
pub mod code {
    /// create_share was called with an empty recipient list.
    pub const EMPTY_RECIPIENTS: u16 = 100;
    /// revoke_share was called by an account that does not own the share.
    pub const NOT_OWNER: u16 = 101;
    /// No share exists under the given id.
    pub const SHARE_NOT_FOUND: u16 = 102;
    /// The share exists but has been revoked or has expired.
    pub const REVOKED_OR_EXPIRED: u16 = 103;
    /// The caller is neither the owner nor a recipient of the share.
    pub const NO_ACCESS: u16 = 104;
    /// create_share was called with an expiry at or before block time.
    pub const EXPIRY_NOT_FUTURE: u16 = 105;
}
