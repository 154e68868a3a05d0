//! Square-backed refund gateway
//!
//! Implements [`RefundGateway`] against Square's `POST /v2/refunds` endpoint
//! using a blocking HTTP client. Response classification mirrors the API's
//! contract: a body with a `refund` object is success, a body with an
//! `errors` array is a structured decline, and transport failures surface as
//! API exceptions.

use crate::cli::Environment;
use crate::gateway::{GatewayError, RefundCall, RefundGateway, RefundReceipt};
use crate::types::{ApiErrorEntry, RefundError};
use serde::{Deserialize, Serialize};

const REFUNDS_PATH: &str = "/v2/refunds";

/// Refund gateway backed by the Square Refunds API
pub struct SquareGateway {
    http: reqwest::blocking::Client,
    base_url: String,
    access_token: String,
}

impl SquareGateway {
    /// Create a gateway for the given access token and environment
    ///
    /// # Errors
    ///
    /// Returns [`RefundError::GatewayInit`] when the underlying HTTP client
    /// cannot be constructed (e.g. no TLS backend available).
    pub fn new(access_token: String, environment: Environment) -> Result<Self, RefundError> {
        let http = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| RefundError::GatewayInit {
                message: e.to_string(),
            })?;

        Ok(SquareGateway {
            http,
            base_url: environment.base_url().to_string(),
            access_token,
        })
    }
}

impl RefundGateway for SquareGateway {
    fn submit_refund(&self, call: &RefundCall) -> Result<RefundReceipt, GatewayError> {
        let body = RefundPaymentBody::from_call(call);
        let url = format!("{}{}", self.base_url, REFUNDS_PATH);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .map_err(|e| GatewayError::Api {
                message: e.to_string(),
            })?;

        // Square returns the errors array in the body on non-2xx statuses,
        // so the body is decoded regardless of status
        let payload: RefundPaymentResponse =
            response.json().map_err(|e| GatewayError::Api {
                message: e.to_string(),
            })?;

        classify_response(payload)
    }
}

/// Request body for `POST /v2/refunds`
#[derive(Debug, Serialize)]
struct RefundPaymentBody<'a> {
    idempotency_key: &'a str,
    amount_money: Money<'a>,
    payment_id: &'a str,
    reason: &'a str,
}

#[derive(Debug, Serialize)]
struct Money<'a> {
    amount: i64,
    currency: &'a str,
}

impl<'a> RefundPaymentBody<'a> {
    fn from_call(call: &'a RefundCall) -> Self {
        RefundPaymentBody {
            idempotency_key: &call.idempotency_key,
            amount_money: Money {
                amount: call.amount_minor_units,
                currency: &call.currency,
            },
            payment_id: &call.payment_id,
            reason: &call.reason,
        }
    }
}

/// Response body for `POST /v2/refunds`
///
/// Exactly one of `refund` and `errors` is populated in practice; both being
/// absent is classified as an unexpected error rather than a success.
#[derive(Debug, Deserialize)]
struct RefundPaymentResponse {
    refund: Option<RefundBody>,
    #[serde(default)]
    errors: Vec<ApiErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct RefundBody {
    id: Option<String>,
    status: Option<String>,
    amount_money: Option<ResponseMoney>,
    created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMoney {
    amount: Option<i64>,
    currency: Option<String>,
}

/// Classify a decoded response body into a receipt or an error
fn classify_response(payload: RefundPaymentResponse) -> Result<RefundReceipt, GatewayError> {
    if let Some(refund) = payload.refund {
        let money = refund.amount_money.unwrap_or(ResponseMoney {
            amount: None,
            currency: None,
        });
        return Ok(RefundReceipt {
            refund_id: refund.id.unwrap_or_default(),
            status: refund.status.unwrap_or_default(),
            amount_minor_units: money.amount.unwrap_or_default(),
            currency: money.currency.unwrap_or_default(),
            created_at: refund.created_at.unwrap_or_default(),
        });
    }

    if !payload.errors.is_empty() {
        return Err(GatewayError::Declined {
            errors: payload.errors,
        });
    }

    Err(GatewayError::Unexpected {
        message: "response contained neither a refund nor errors".to_string(),
    })
}
