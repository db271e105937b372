//! HTTP request handlers, one module per resource.

pub mod ticket_templates;
pub mod tickets;
