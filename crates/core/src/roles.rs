//! Role name constants shared by the API layer and access checks.

/// Back-office administrator. May access any ticket or booking.
pub const ROLE_ADMIN: &str = "admin";

/// Event organizer. May access tickets for their own events and manage
/// their own ticket templates.
pub const ROLE_ORGANIZER: &str = "organizer";

/// Regular end user. May access their own bookings and tickets.
pub const ROLE_USER: &str = "user";
