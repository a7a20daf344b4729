#![doc = "The `taskboard` library crate."]
#![doc = ""]
#![doc = "This crate contains the core logic of a multi-user shared todo list:"]
#![doc = "credential hashing, bearer-token issuance and verification, role-based"]
#![doc = "access control, the persistent user/task stores, routing configuration"]
#![doc = "and error handling. The binary (`main.rs`) wires these into a server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
