//! Error label assembly
//!
//! Evaluates the three label predicates for one failed command and assembles
//! them in fixed order: TransientTransactionError, RetryableWriteError,
//! NonResumableChangeStreamError.

use txn_error_codes::{ErrorCode, ErrorTaxonomy};

use crate::command;
use crate::config;
use crate::label::{ErrorLabel, LabelSet};
use crate::session::SessionOptions;
use crate::transient::is_transient_transaction_error_with;

/// Inputs of a single classification. Holds no state between calls.
pub struct ErrorLabelBuilder<'a, T: ErrorTaxonomy + ?Sized> {
    taxonomy: &'a T,
    session_options: &'a SessionOptions,
    command_name: &'a str,
    code: Option<ErrorCode>,
    wc_code: Option<ErrorCode>,
    is_internal_client: bool,
}

impl<'a, T: ErrorTaxonomy + ?Sized> ErrorLabelBuilder<'a, T> {
    pub fn new(
        taxonomy: &'a T,
        session_options: &'a SessionOptions,
        command_name: &'a str,
        code: Option<ErrorCode>,
        wc_code: Option<ErrorCode>,
        is_internal_client: bool,
    ) -> Self {
        Self {
            taxonomy,
            session_options,
            command_name,
            code,
            wc_code,
            is_internal_client,
        }
    }

    /// Only applied when `autocommit` is present, which marks a
    /// multi-statement transaction. Its value (always false) is not read.
    pub fn is_transient_transaction_error(&self) -> bool {
        let Some(code) = self.code else {
            log::trace!("{}: no error code", ErrorLabel::TransientTransaction);
            return false;
        };

        let in_transaction =
            self.session_options.has_txn_number() && self.session_options.has_autocommit();
        let applies = in_transaction
            && is_transient_transaction_error_with(
                self.taxonomy,
                code,
                self.wc_code.is_some(),
                self.is_commit_or_abort(),
            );

        log::trace!(
            "{}: {} (code={}, in_transaction={})",
            ErrorLabel::TransientTransaction,
            applies,
            code,
            in_transaction
        );
        applies
    }

    pub fn is_retryable_write_error(&self) -> bool {
        // Internal clients coordinate their own retries
        if self.is_internal_client {
            log::trace!("{}: internal client", ErrorLabel::RetryableWrite);
            return false;
        }

        let is_retryable_write =
            self.session_options.has_txn_number() && !self.session_options.has_autocommit();

        let is_transaction_commit_or_abort = self.session_options.has_txn_number()
            && self.session_options.has_autocommit()
            && self.is_commit_or_abort();

        if !(is_retryable_write || is_transaction_commit_or_abort) {
            log::trace!(
                "{}: not a retryable write or transaction commit/abort",
                ErrorLabel::RetryableWrite
            );
            return false;
        }

        let retriable = |code: Option<ErrorCode>| {
            code.map_or(false, |code| self.taxonomy.is_retriable_error(code))
        };
        let applies = retriable(self.code) || retriable(self.wc_code);

        log::trace!(
            "{}: {} (code={}, wc_code={})",
            ErrorLabel::RetryableWrite,
            applies,
            display_code(self.code),
            display_code(self.wc_code)
        );
        applies
    }

    pub fn is_non_resumable_change_stream_error(&self) -> bool {
        let applies = self
            .code
            .map_or(false, |code| self.taxonomy.is_non_resumable_change_stream_error(code));

        log::trace!(
            "{}: {} (code={})",
            ErrorLabel::NonResumableChangeStream,
            applies,
            display_code(self.code)
        );
        applies
    }

    /// Assemble the label set.
    ///
    /// # Panics
    ///
    /// If both TransientTransactionError and RetryableWriteError apply. The two
    /// are mutually exclusive; reaching this is a classification defect.
    pub fn build(&self) -> LabelSet {
        let mut labels = LabelSet::new();

        let transient = self.is_transient_transaction_error();
        if transient {
            labels.push(ErrorLabel::TransientTransaction);
        }

        if self.is_retryable_write_error() {
            if transient {
                log::error!(
                    "Invariant violated: {} and {} both apply (command={}, code={:?}, wc_code={:?}, session={:?})",
                    ErrorLabel::TransientTransaction,
                    ErrorLabel::RetryableWrite,
                    self.command_name,
                    self.code,
                    self.wc_code,
                    self.session_options
                );
                panic!(
                    "{} and {} are mutually exclusive (command '{}')",
                    ErrorLabel::TransientTransaction,
                    ErrorLabel::RetryableWrite,
                    self.command_name
                );
            }
            labels.push(ErrorLabel::RetryableWrite);
        }

        if self.is_non_resumable_change_stream_error() {
            labels.push(ErrorLabel::NonResumableChangeStream);
        }

        if config::preferences().log_decisions {
            log::debug!(
                "Error labels {} for command={} code={} wc_code={} txn_number={:?} autocommit={:?} internal={}",
                labels,
                self.command_name,
                display_code(self.code),
                display_code(self.wc_code),
                self.session_options.txn_number,
                self.session_options.autocommit,
                self.is_internal_client
            );
        }

        labels
    }

    fn is_commit_or_abort(&self) -> bool {
        command::is_commit_or_abort(self.command_name)
    }
}

fn display_code(code: Option<ErrorCode>) -> String {
    code.map_or_else(|| "none".to_string(), |code| code.to_string())
}
