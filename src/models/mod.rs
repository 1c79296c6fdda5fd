pub mod academy;
pub mod accounts;
pub mod catalog;
pub mod chat;
pub mod orders;
pub mod projects;
pub mod requests;
