//! SeaORM entities for the relational backend. Cross-entity references
//! are plain columns, not foreign keys — the client/order relation in
//! particular is denormalized through the customer email by design.

pub mod academy;
pub mod accounts;
pub mod catalog;
pub mod chat;
pub mod orders;
pub mod projects;
pub mod requests;
