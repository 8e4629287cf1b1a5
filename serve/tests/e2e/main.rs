//! End-to-end tests: a real server on 127.0.0.1:0 with mock transports, driven by reqwest.

mod common;
mod health;
mod invalid_body;
mod mistral_http;
mod recommend_direct;
mod recommend_normalized;
