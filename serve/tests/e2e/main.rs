//! End-to-end tests: real server on 127.0.0.1:0, requests over HTTP with reqwest.

mod common;
mod explain;
mod failures;
mod init_logging;
mod validation;
