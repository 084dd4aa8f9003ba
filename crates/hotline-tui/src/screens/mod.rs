pub mod auth;
pub mod call;
pub mod contacts;
pub mod history;
pub mod requests;
pub mod search;
