//! # Rapport Codec
//!
//! Moves answer state between two browser sessions without a server.
//!
//! ```text
//! Answer[] ──pack──> "0g4..."            (one char per question)
//!                        │
//! { p1n, p1a, p2n?, p2a? } ──encode──> base64 token ──> ?data= / ?report=
//!                        │
//! URL ──parse_shared_state──> Fresh | Invite | Report
//! ```
//!
//! Decoding never fails loudly: tokens come from links a partner pasted, so
//! anything malformed decodes to `None` (or `SharedState::Fresh`).

mod error;
mod pack;
mod share;
mod token;

pub use error::{CodecError, Result};
pub use pack::{is_packed_alphabet, pack, unpack};
pub use share::{
    invite_url, is_environment_sharable, parse_shared_state, rebuild_report, report_url,
    share_url, sharable_base_url, SharedState,
};
pub use token::{decode, decode_for, encode, try_decode, try_decode_for, try_encode};
