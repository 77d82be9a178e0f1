//! Application layer services implementing business logic.
//!
//! Services consume the [`crate::domain::repositories::LinkRepository`] trait
//! and give HTTP handlers and the admin CLI a single entry point per operation.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation, lookup and listing
//! - [`services::redirect_service::RedirectService`] - Code resolution with click accounting
//! - [`services::code_allocator::CodeAllocator`] - Random code allocation and alias claims

pub mod services;
