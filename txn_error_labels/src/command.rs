//! Transaction finalization command names

pub const COMMIT_TRANSACTION: &str = "commitTransaction";
pub const COORDINATE_COMMIT_TRANSACTION: &str = "coordinateCommitTransaction";
pub const ABORT_TRANSACTION: &str = "abortTransaction";

/// Exact, case-sensitive match against the commit/abort commands
pub fn is_commit_or_abort(command_name: &str) -> bool {
    matches!(
        command_name,
        COMMIT_TRANSACTION | COORDINATE_COMMIT_TRANSACTION | ABORT_TRANSACTION
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finalization_commands() {
        assert!(is_commit_or_abort("commitTransaction"));
        assert!(is_commit_or_abort("coordinateCommitTransaction"));
        assert!(is_commit_or_abort("abortTransaction"));
    }

    #[test]
    fn test_no_case_folding_or_aliases() {
        assert!(!is_commit_or_abort("committransaction"));
        assert!(!is_commit_or_abort("CommitTransaction"));
        assert!(!is_commit_or_abort("commit"));
        assert!(!is_commit_or_abort(" abortTransaction"));
        assert!(!is_commit_or_abort("insert"));
        assert!(!is_commit_or_abort(""));
    }
}
