use common::format;
use models::{Invoice, PaymentStatus};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PaymentView {
    pub method: Option<String>,
    pub paid_date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceRow {
    pub id: String,
    pub invoice_number: Option<String>,
    pub customer_id: String,
    pub customer_name: String,
    pub job_id: Option<String>,
    pub service_description: Option<String>,
    pub amount: f64,
    pub amount_label: String,
    pub invoice_date: Option<String>,
    pub due_date: Option<String>,
    pub payment_status: PaymentStatus,
    /// Absent for unpaid invoices.
    pub payment: Option<PaymentView>,
    pub notes: Option<String>,
}

impl From<&Invoice> for InvoiceRow {
    fn from(i: &Invoice) -> Self {
        let payment = i.effective_payment().map(|p| PaymentView {
            method: p.method.map(|m| format::title_case(m.as_str())),
            paid_date: p.paid_date.map(format::long_date),
        });
        Self {
            id: i.id.clone(),
            invoice_number: i.invoice_number.clone(),
            customer_id: i.customer_id.clone(),
            customer_name: i.customer_name.clone(),
            job_id: i.job_id.clone(),
            service_description: i.service_description.clone(),
            amount: i.amount,
            amount_label: format::currency(i.amount),
            invoice_date: i.invoice_date.map(format::long_date),
            due_date: i.due_date.map(format::long_date),
            payment_status: i.payment_status,
            payment,
            notes: i.notes.clone(),
        }
    }
}
