#[path = "../common/mod.rs"]
mod common;

mod api_test;
mod service_test;
