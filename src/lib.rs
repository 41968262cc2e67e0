//! Library Gateway Application
//!
//! Stateless gateway translating inbound CRUD requests into single calls
//! against the book and user backend services.

pub mod modules;
