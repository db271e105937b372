//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod booking_repo;
pub mod ticket_repo;
pub mod ticket_template_repo;

pub use booking_repo::BookingRepo;
pub use ticket_repo::TicketRepo;
pub use ticket_template_repo::TicketTemplateRepo;
