pub mod request_tracing;
