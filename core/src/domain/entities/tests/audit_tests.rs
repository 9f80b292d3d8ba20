//! Unit tests for the audit record entity

use crate::domain::entities::audit::TokenAuditRecord;

#[test]
fn test_new_record() {
    let record = TokenAuditRecord::new("u1", "access", "refresh");

    assert_eq!(record.subject, "u1");
    assert_eq!(record.access_token, "access");
    assert_eq!(record.refresh_token, "refresh");
    assert_eq!(record.created_at, record.updated_at);
}

#[test]
fn test_records_have_distinct_ids() {
    let first = TokenAuditRecord::new("u1", "a", "r");
    let second = TokenAuditRecord::new("u1", "a", "r");

    assert_ne!(first.id, second.id);
}
