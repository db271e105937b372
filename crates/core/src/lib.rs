//! Be Out ticket-generation domain logic.
//!
//! Pure, I/O-free building blocks for the PDF ticket pipeline:
//!
//! - [`qr`] — QR payload resolution from the configured policy.
//! - [`qr_image`] — QR symbol encoding as a PNG data URI.
//! - [`ticket_config`] — template/event configuration records and the
//!   shallow override merge.
//! - [`layout`] — ticket size and layout profiles.
//! - [`render`] — the self-contained HTML ticket document.
//!
//! Database access lives in `beout-db`; the headless conversion engine
//! and batch producer live in `beout-pdf`.

pub mod context;
pub mod error;
pub mod hashing;
pub mod layout;
pub mod qr;
pub mod qr_image;
pub mod render;
pub mod roles;
pub mod ticket_config;
pub mod types;
