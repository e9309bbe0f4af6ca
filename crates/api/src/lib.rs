#![forbid(unsafe_code)]

pub mod attachments;
pub mod import;
pub mod seed;
pub mod views;
