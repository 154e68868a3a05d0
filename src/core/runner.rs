//! Refund runner
//!
//! Submits validated refund requests one at a time through an injected
//! [`RefundGateway`], classifies every outcome, and accumulates the run
//! summary. Strictly sequential: no reordering, no concurrency, no retries.
//! Each row is attempted exactly once; operators re-run the tool with a
//! reduced CSV if they want retries.
//!
//! # Failure isolation
//!
//! Nothing that happens while submitting one row can stop the rows after it.
//! Gateway errors of every category are converted into
//! [`RefundOutcome::Failure`] records at the row boundary and logged; the
//! loop then moves on.

use crate::gateway::{GatewayError, RefundCall, RefundGateway};
use crate::logging::RunLog;
use crate::types::{FailureDetail, RefundOutcome, RefundRequest, RunSummary};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Per-run refund configuration
///
/// The currency applies to every refund in the run; it is never inferred
/// from the input file.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// ISO currency code attached to every refund
    pub currency: String,
    /// Reason string recorded with every refund
    pub reason: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            currency: "USD".to_string(),
            reason: "Refund processed via batch script".to_string(),
        }
    }
}

/// Sequential refund processor
///
/// Generic over the gateway so tests substitute a scripted in-memory
/// implementation.
pub struct RefundRunner<G: RefundGateway> {
    gateway: G,
    config: RunConfig,
}

impl<G: RefundGateway> RefundRunner<G> {
    /// Create a runner over the given gateway and configuration
    pub fn new(gateway: G, config: RunConfig) -> Self {
        RefundRunner { gateway, config }
    }

    /// Consume the runner and hand back the gateway
    ///
    /// Lets callers inspect a recording gateway after a run.
    pub fn into_gateway(self) -> G {
        self.gateway
    }

    /// Process every request in order and return the run summary
    ///
    /// Emits one processing line and one outcome line per request, then the
    /// final summary block. An empty request list produces a warning and a
    /// zero summary without attempting any call.
    pub fn run(&self, requests: &[RefundRequest], log: &mut RunLog) -> RunSummary {
        let mut summary = RunSummary::default();

        if requests.is_empty() {
            log.warn("No valid refund data found in CSV");
            return summary;
        }

        for (i, request) in requests.iter().enumerate() {
            log.info(&format!(
                "Processing refund {}/{} - Payment ID: {}, Amount: ${:.2}",
                i + 1,
                requests.len(),
                request.payment_id,
                request.amount
            ));

            let outcome = self.submit_one(request);

            match &outcome {
                RefundOutcome::Success {
                    refund_id,
                    status,
                    amount,
                    ..
                } => {
                    summary.record_success();
                    log.info(&format!(
                        "✓ Refund successful - Row {} - Refund ID: {}, Status: {}, Amount: ${:.2}",
                        request.source_row, refund_id, status, amount
                    ));
                }
                RefundOutcome::Failure {
                    payment_id,
                    amount,
                    detail,
                } => {
                    summary.record_failure();
                    log.error(&format!(
                        "✗ Refund failed - Row {} - Payment ID: {}, Amount: ${:.2}, {}",
                        request.source_row, payment_id, amount, detail
                    ));
                }
            }
        }

        log.info("=== PROCESSING COMPLETE ===");
        log.info(&format!("Total refunds processed: {}", summary.total));
        log.info(&format!("Successful refunds: {}", summary.successful));
        log.info(&format!("Failed refunds: {}", summary.failed));
        if let Some(rate) = summary.success_rate() {
            log.info(&format!("Success rate: {:.1}%", rate));
        }

        summary
    }

    /// Submit a single request and classify the result
    ///
    /// Never propagates an error: every failure shape becomes a Failure
    /// outcome for this one row.
    fn submit_one(&self, request: &RefundRequest) -> RefundOutcome {
        let Some(amount_minor_units) = to_minor_units(request.amount) else {
            return RefundOutcome::Failure {
                payment_id: request.payment_id.clone(),
                amount: request.amount,
                detail: FailureDetail::Unexpected {
                    message: format!(
                        "amount {} cannot be represented in minor units",
                        request.amount
                    ),
                },
            };
        };

        let call = RefundCall {
            idempotency_key: Uuid::new_v4().to_string(),
            amount_minor_units,
            currency: self.config.currency.clone(),
            payment_id: request.payment_id.clone(),
            reason: self.config.reason.clone(),
        };

        match self.gateway.submit_refund(&call) {
            Ok(receipt) => RefundOutcome::Success {
                refund_id: receipt.refund_id,
                status: receipt.status,
                amount: request.amount,
                currency: receipt.currency,
                created_at: receipt.created_at,
            },
            Err(error) => RefundOutcome::Failure {
                payment_id: request.payment_id.clone(),
                amount: request.amount,
                detail: classify_gateway_error(error),
            },
        }
    }
}

/// Convert a major-unit amount to minor units, truncating
///
/// Multiplies by 100 and truncates toward zero, so 10.005 becomes 1000
/// minor units (the half-cent is dropped). Returns None when the
/// multiplication overflows or the result does not fit in an i64; the
/// caller records that as a row failure rather than aborting the run.
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    amount.checked_mul(Decimal::ONE_HUNDRED)?.trunc().to_i64()
}

fn classify_gateway_error(error: GatewayError) -> FailureDetail {
    match error {
        GatewayError::Declined { errors } => FailureDetail::Declined { errors },
        GatewayError::Api { message } => FailureDetail::ApiException { message },
        GatewayError::Unexpected { message } => FailureDetail::Unexpected { message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::RefundReceipt;
    use crate::types::ApiErrorEntry;
    use rstest::rstest;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::fs;
    use tempfile::TempDir;

    /// Gateway that replays scripted results and records every call
    struct ScriptedGateway {
        results: RefCell<VecDeque<Result<RefundReceipt, GatewayError>>>,
        calls: RefCell<Vec<RefundCall>>,
    }

    impl ScriptedGateway {
        fn new(results: Vec<Result<RefundReceipt, GatewayError>>) -> Self {
            ScriptedGateway {
                results: RefCell::new(results.into()),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<RefundCall> {
            self.calls.borrow().clone()
        }
    }

    impl RefundGateway for ScriptedGateway {
        fn submit_refund(&self, call: &RefundCall) -> Result<RefundReceipt, GatewayError> {
            self.calls.borrow_mut().push(call.clone());
            self.results
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| panic!("gateway called more times than scripted"))
        }
    }

    fn receipt(refund_id: &str) -> Result<RefundReceipt, GatewayError> {
        Ok(RefundReceipt {
            refund_id: refund_id.to_string(),
            status: "COMPLETED".to_string(),
            amount_minor_units: 1050,
            currency: "USD".to_string(),
            created_at: "2024-06-01T12:00:00Z".to_string(),
        })
    }

    fn request(payment_id: &str, amount: Decimal, source_row: u64) -> RefundRequest {
        RefundRequest {
            payment_id: payment_id.to_string(),
            amount,
            source_row,
        }
    }

    #[rstest]
    #[case::whole_dollars(Decimal::new(25, 0), Some(2500))]
    #[case::two_decimals(Decimal::new(1050, 2), Some(1050))]
    #[case::truncates_half_cent(Decimal::new(10005, 3), Some(1000))]
    #[case::truncates_sub_cent(Decimal::new(9999, 4), Some(99))]
    #[case::one_cent(Decimal::new(1, 2), Some(1))]
    #[case::overflow_is_none(Decimal::MAX, None)]
    fn test_to_minor_units(#[case] amount: Decimal, #[case] expected: Option<i64>) {
        assert_eq!(to_minor_units(amount), expected);
    }

    #[test]
    fn test_overflowing_amount_is_row_failure_not_panic() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let (mut log, path) = RunLog::create(dir.path()).unwrap();

        // An amount too large for minor units fails its own row and the
        // row after it is still attempted
        let gateway = ScriptedGateway::new(vec![receipt("ref_2")]);
        let requests = vec![
            request("PAY_HUGE", Decimal::MAX, 2),
            request("PAY_2", Decimal::new(1050, 2), 3),
        ];

        let runner = RefundRunner::new(gateway, RunConfig::default());
        let summary = runner.run(&requests, &mut log);

        assert_eq!(summary, RunSummary { total: 2, successful: 1, failed: 1 });

        // The overflowing row never reached the gateway
        let calls = runner.gateway.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].payment_id, "PAY_2");

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Error: Unexpected Error"));
        assert!(content.contains("cannot be represented in minor units"));
    }

    #[test]
    fn test_successful_run_counts_and_calls() {
        let gateway = ScriptedGateway::new(vec![receipt("ref_1"), receipt("ref_2")]);
        let requests = vec![
            request("PAY_1", Decimal::new(1050, 2), 2),
            request("PAY_2", Decimal::new(2500, 2), 3),
        ];

        let runner = RefundRunner::new(gateway, RunConfig::default());
        let summary = runner.run(&requests, &mut RunLog::without_file());

        assert_eq!(summary, RunSummary { total: 2, successful: 2, failed: 0 });
        assert_eq!(summary.success_rate(), Some(100.0));

        let calls = runner.gateway.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].payment_id, "PAY_1");
        assert_eq!(calls[0].amount_minor_units, 1050);
        assert_eq!(calls[1].payment_id, "PAY_2");
        assert_eq!(calls[1].amount_minor_units, 2500);
    }

    #[test]
    fn test_failure_does_not_stop_later_rows() {
        let gateway = ScriptedGateway::new(vec![
            Err(GatewayError::Declined {
                errors: vec![ApiErrorEntry {
                    code: Some("PAYMENT_NOT_FOUND".to_string()),
                    detail: Some("Payment not found".to_string()),
                }],
            }),
            receipt("ref_2"),
        ]);
        let requests = vec![
            request("PAY_A", Decimal::new(1050, 2), 2),
            request("PAY_B", Decimal::new(2500, 2), 3),
        ];

        let runner = RefundRunner::new(gateway, RunConfig::default());
        let summary = runner.run(&requests, &mut RunLog::without_file());

        assert_eq!(summary, RunSummary { total: 2, successful: 1, failed: 1 });

        // B was still attempted after A failed
        let calls = runner.gateway.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].payment_id, "PAY_B");
    }

    #[rstest]
    #[case::api_exception(GatewayError::Api { message: "connection refused".to_string() })]
    #[case::unexpected(GatewayError::Unexpected { message: "boom".to_string() })]
    fn test_exception_categories_count_as_failed(#[case] error: GatewayError) {
        let gateway = ScriptedGateway::new(vec![Err(error)]);
        let requests = vec![request("PAY_1", Decimal::new(1050, 2), 2)];

        let runner = RefundRunner::new(gateway, RunConfig::default());
        let summary = runner.run(&requests, &mut RunLog::without_file());

        assert_eq!(summary, RunSummary { total: 1, successful: 0, failed: 1 });
    }

    #[test]
    fn test_idempotency_keys_unique_per_row() {
        let gateway = ScriptedGateway::new(vec![receipt("ref_1"), receipt("ref_2")]);
        let requests = vec![
            request("PAY_1", Decimal::new(1050, 2), 2),
            // Same payment twice is legal; tokens must still differ
            request("PAY_1", Decimal::new(1050, 2), 3),
        ];

        let runner = RefundRunner::new(gateway, RunConfig::default());
        runner.run(&requests, &mut RunLog::without_file());

        let calls = runner.gateway.calls();
        assert_eq!(calls.len(), 2);
        assert_ne!(calls[0].idempotency_key, calls[1].idempotency_key);
        assert!(!calls[0].idempotency_key.is_empty());
    }

    #[test]
    fn test_currency_and_reason_come_from_config() {
        let gateway = ScriptedGateway::new(vec![receipt("ref_1")]);
        let requests = vec![request("PAY_1", Decimal::new(1050, 2), 2)];
        let config = RunConfig {
            currency: "CAD".to_string(),
            reason: "goodwill".to_string(),
        };

        let runner = RefundRunner::new(gateway, config);
        runner.run(&requests, &mut RunLog::without_file());

        let calls = runner.gateway.calls();
        assert_eq!(calls[0].currency, "CAD");
        assert_eq!(calls[0].reason, "goodwill");
    }

    #[test]
    fn test_empty_input_attempts_no_calls() {
        let gateway = ScriptedGateway::new(vec![]);
        let runner = RefundRunner::new(gateway, RunConfig::default());
        let summary = runner.run(&[], &mut RunLog::without_file());

        assert_eq!(summary, RunSummary::default());
        assert_eq!(summary.success_rate(), None);
        assert!(runner.gateway.calls().is_empty());
    }

    #[test]
    fn test_log_contains_refund_id_status_and_summary() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let (mut log, path) = RunLog::create(dir.path()).unwrap();

        let gateway = ScriptedGateway::new(vec![
            receipt("ref_abc"),
            Err(GatewayError::Api {
                message: "connection refused".to_string(),
            }),
        ]);
        let requests = vec![
            request("PAY_1", Decimal::new(1050, 2), 2),
            request("PAY_2", Decimal::new(725, 2), 3),
        ];

        let runner = RefundRunner::new(gateway, RunConfig::default());
        runner.run(&requests, &mut log);

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Refund ID: ref_abc, Status: COMPLETED, Amount: $10.50"));
        assert!(content.contains(
            "✗ Refund failed - Row 3 - Payment ID: PAY_2, Amount: $7.25, \
             Error: API Exception, Message: connection refused"
        ));
        assert!(content.contains("Total refunds processed: 2"));
        assert!(content.contains("Successful refunds: 1"));
        assert!(content.contains("Failed refunds: 1"));
        assert!(content.contains("Success rate: 50.0%"));
    }
}
