//! Entity records owned by the hosted backend.
//!
//! Everything here is a transient copy: the backend assigns ids and timestamps,
//! this crate only describes the wire shape and the small amount of
//! field-level validation the forms rely on.

pub mod errors;
pub mod record;
pub mod customer;
pub mod job;
pub mod invoice;
pub mod service_request;
pub mod user;

pub use customer::{Customer, CustomerInput, CustomerStatus, PropertySize};
pub use invoice::{Invoice, InvoiceInput, Payment, PaymentMethod, PaymentStatus};
pub use job::{Job, JobInput, JobStatus, ServiceType};
pub use record::Record;
pub use service_request::{RequestStatus, ServiceRequest, ServiceRequestInput, TimePreference};
pub use user::User;
