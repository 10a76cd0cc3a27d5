//! Domain models
//!
//! - [`Visitor`] / [`Registration`] - persisted check-ins
//! - [`GroupedRegistration`] - report-time consolidation per member
//! - [`Member`] - roster entry (read-only reference data)
//! - [`ChurchInfo`] - display strings for the registration form

pub mod church;
pub mod member;
pub mod registration;
pub mod visitor;

pub use church::ChurchInfo;
pub use member::Member;
pub use registration::{
    GroupedRegistration, Registration, RegistrationForm, RegistrationUpdate, StoredRegistration,
};
pub use visitor::Visitor;
