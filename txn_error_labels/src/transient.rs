//! Transient transaction error judgment
//!
//! An error code for which this returns true indicates a transaction failure
//! with no persistent side effects: the whole transaction may be retried.

use txn_error_codes::{ErrorCode, ErrorTaxonomy, RegistryTaxonomy};

/// Judge `code` against the compiled registry taxonomy
pub fn is_transient_transaction_error(
    code: ErrorCode,
    has_write_concern_error: bool,
    is_commit_or_abort: bool,
) -> bool {
    is_transient_transaction_error_with(
        &RegistryTaxonomy,
        code,
        has_write_concern_error,
        is_commit_or_abort,
    )
}

/// Judge `code` against an arbitrary taxonomy
pub fn is_transient_transaction_error_with<T>(
    taxonomy: &T,
    code: ErrorCode,
    has_write_concern_error: bool,
    is_commit_or_abort: bool,
) -> bool
where
    T: ErrorTaxonomy + ?Sized,
{
    let mut is_transient = matches!(
        code,
        ErrorCode::WRITE_CONFLICT
            | ErrorCode::LOCK_TIMEOUT
            | ErrorCode::PREPARED_TRANSACTION_IN_PROGRESS
    );

    is_transient |= taxonomy.is_snapshot_error(code)
        || taxonomy.is_need_retargetting_error(code)
        || code == ErrorCode::STALE_DB_VERSION;

    if is_commit_or_abort {
        // NoSuchTransaction after a write concern error: the commit may
        // already be durable
        is_transient |= code == ErrorCode::NO_SUCH_TRANSACTION && !has_write_concern_error;
    } else {
        is_transient |= taxonomy.is_retriable_error(code) || code == ErrorCode::NO_SUCH_TRANSACTION;
    }

    is_transient
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconditionally_transient_codes() {
        for code in [
            ErrorCode::WRITE_CONFLICT,
            ErrorCode::LOCK_TIMEOUT,
            ErrorCode::PREPARED_TRANSACTION_IN_PROGRESS,
        ] {
            for has_wc in [false, true] {
                for commit_or_abort in [false, true] {
                    assert!(
                        is_transient_transaction_error(code, has_wc, commit_or_abort),
                        "{} wc={} commit={}",
                        code,
                        has_wc,
                        commit_or_abort
                    );
                }
            }
        }
    }

    #[test]
    fn test_snapshot_retargeting_and_stale_db_version() {
        for code in [
            ErrorCode::SNAPSHOT_UNAVAILABLE,
            ErrorCode::SNAPSHOT_TOO_OLD,
            ErrorCode::STALE_CONFIG,
            ErrorCode::STALE_SHARD_VERSION,
            ErrorCode::STALE_DB_VERSION,
        ] {
            assert!(is_transient_transaction_error(code, true, true), "{}", code);
            assert!(is_transient_transaction_error(code, false, false), "{}", code);
        }
    }

    #[test]
    fn test_no_such_transaction_on_commit() {
        assert!(is_transient_transaction_error(
            ErrorCode::NO_SUCH_TRANSACTION,
            false,
            true
        ));
        assert!(!is_transient_transaction_error(
            ErrorCode::NO_SUCH_TRANSACTION,
            true,
            true
        ));
    }

    #[test]
    fn test_no_such_transaction_mid_transaction() {
        // Write concern presence is irrelevant outside commit/abort
        assert!(is_transient_transaction_error(
            ErrorCode::NO_SUCH_TRANSACTION,
            false,
            false
        ));
        assert!(is_transient_transaction_error(
            ErrorCode::NO_SUCH_TRANSACTION,
            true,
            false
        ));
    }

    #[test]
    fn test_retriable_codes_only_transient_outside_commit() {
        let code = ErrorCode::NOT_WRITABLE_PRIMARY;
        assert!(is_transient_transaction_error(code, false, false));
        assert!(!is_transient_transaction_error(code, false, true));
    }

    #[test]
    fn test_other_codes_not_transient() {
        for code in [
            ErrorCode::DUPLICATE_KEY,
            ErrorCode::TRANSACTION_COMMITTED,
            ErrorCode::CHANGE_STREAM_FATAL_ERROR,
            ErrorCode::new(16945),
        ] {
            for has_wc in [false, true] {
                for commit_or_abort in [false, true] {
                    assert!(!is_transient_transaction_error(code, has_wc, commit_or_abort));
                }
            }
        }
    }
}
