//! Task tracking handlers for API Gateway backed by a single DynamoDB table.
//!
//! Each handler lives in [`handlers`] and is deployed as its own Lambda
//! binary; `task-api` bundles all of them behind one router.

pub mod common;
pub mod handlers;
