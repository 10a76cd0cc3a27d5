//! Repository Module
//!
//! Typed access to the collections of the document store.

pub mod registration;

pub use registration::RegistrationRepository;
