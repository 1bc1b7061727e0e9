//! Content references for off-chain diploma documents
//!
//! The registry stores an opaque reference; when the reference is a hex
//! SHA-256 digest of the document, a holder of the document can check it
//! against the record without trusting the storage layer.

use credential_registry::CredentialRecord;
use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of a document, usable as a content reference
pub fn document_reference(document: &[u8]) -> String {
    hex::encode(Sha256::digest(document))
}

/// Whether `document` hashes to the reference stored on `record`
pub fn matches_document(record: &CredentialRecord, document: &[u8]) -> bool {
    record
        .content_reference
        .as_deref()
        .is_some_and(|reference| reference.eq_ignore_ascii_case(&document_reference(document)))
}
