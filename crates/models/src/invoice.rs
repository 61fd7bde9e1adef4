use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{empty_as_none, lenient_timestamp, null_as_default, wire_enum, Record};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Partial,
    Paid,
}

wire_enum!(PaymentStatus, "payment_status", {
    Unpaid => "unpaid",
    Partial => "partial",
    Paid => "paid",
});

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Check,
    CreditCard,
    BankTransfer,
    Other,
}

wire_enum!(PaymentMethod, "payment_method", {
    Cash => "cash",
    Check => "check",
    CreditCard => "credit_card",
    BankTransfer => "bank_transfer",
    Other => "other",
});

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub customer_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub customer_name: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub job_id: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub invoice_number: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub invoice_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub service_description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub payment_status: PaymentStatus,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub paid_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp", skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
}

/// Payment details that are meaningful for the current status.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Payment {
    pub method: Option<PaymentMethod>,
    pub paid_date: Option<NaiveDate>,
}

impl Invoice {
    /// `None` for unpaid invoices regardless of what the record carries;
    /// the paid date only counts once the invoice is fully paid.
    pub fn effective_payment(&self) -> Option<Payment> {
        match self.payment_status {
            PaymentStatus::Unpaid => None,
            PaymentStatus::Partial => Some(Payment { method: self.payment_method, paid_date: None }),
            PaymentStatus::Paid => Some(Payment { method: self.payment_method, paid_date: self.paid_date }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InvoiceInput {
    pub customer_id: String,
    pub customer_name: String,
    pub job_id: Option<String>,
    pub invoice_number: Option<String>,
    pub invoice_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub service_description: Option<String>,
    pub amount: f64,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub paid_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl Record for Invoice {
    type Input = InvoiceInput;
    const ENTITY: &'static str = "Invoice";

    fn id(&self) -> &str { &self.id }
}
