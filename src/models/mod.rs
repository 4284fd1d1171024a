pub mod credential;
pub mod engine;
pub mod requests;
pub mod responses;
