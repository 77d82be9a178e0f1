//! Business logic services for the application layer.

pub mod code_allocator;
pub mod link_service;
pub mod redirect_service;

pub use code_allocator::{CodeAllocator, CodePolicy};
pub use link_service::{DEFAULT_RECENT_LIMIT, LinkService};
pub use redirect_service::RedirectService;
