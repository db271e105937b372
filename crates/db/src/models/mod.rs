//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - `FromRow` + `Serialize` row structs matching database rows or joins
//! - `Deserialize` create/update DTOs where the API writes

pub mod booking;
pub mod ticket;
pub mod ticket_template;
