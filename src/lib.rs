//! Starts a Step Functions execution for each S3 upload notification
//! received.

pub mod app;
pub mod client;
pub mod conf;
pub mod engine;
pub mod error;
pub mod event;
pub mod naming;
pub mod trigger;
