pub mod common;
pub mod curl;
pub mod openapi;
