//! Payments: residents record them as pending, admins settle them.

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};

#[derive(Debug, Deserialize)]
pub struct Payment {
    pub id: i64,
    /// Decimal amount as the backend serializes it, e.g. "1500.00".
    pub amount: String,
    pub payment_date: String,
    pub payment_status: String,
    pub payment_method: String,
    /// Resident id the payment belongs to.
    #[serde(default)]
    pub resident: Option<i64>,
}

#[derive(Debug, Serialize)]
struct NewPayment<'a> {
    amount: f64,
    payment_method: &'a str,
    payment_status: &'a str,
}

#[derive(Debug, Serialize)]
struct PaymentStatusPatch<'a> {
    payment_status: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct PaymentDecision {
    pub message: String,
    pub status: String,
}

impl ApiClient {
    pub async fn payments(&self) -> Result<Vec<Payment>, ApiError> {
        self.get_json("payments/").await
    }

    /// Record a payment. New payments always start pending; only an
    /// admin moves them on.
    pub async fn create_payment(&self, amount: f64, method: &str) -> Result<Payment, ApiError> {
        self.post_json(
            "payments/",
            &NewPayment {
                amount,
                payment_method: method,
                payment_status: "pending",
            },
        )
        .await
    }

    /// Admin action. `status` must be completed or rejected.
    pub async fn settle_payment(&self, id: i64, status: &str) -> Result<PaymentDecision, ApiError> {
        self.patch_json(
            &format!("payments/{}/approve_payment/", id),
            &PaymentStatusPatch {
                payment_status: status,
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_parses_decimal_string() {
        let payment: Payment = serde_json::from_str(
            r#"{
                "id": 12,
                "amount": "1500.00",
                "payment_date": "2025-03-05T08:00:00Z",
                "payment_status": "pending",
                "payment_method": "UPI",
                "resident": 7
            }"#,
        )
        .unwrap();
        assert_eq!(payment.amount, "1500.00");
        assert_eq!(payment.resident, Some(7));
    }

    #[test]
    fn test_new_payment_starts_pending() {
        let body = serde_json::to_value(NewPayment {
            amount: 1500.0,
            payment_method: "UPI",
            payment_status: "pending",
        })
        .unwrap();
        assert_eq!(body["payment_status"], "pending");
        assert_eq!(body["amount"], 1500.0);
    }
}
