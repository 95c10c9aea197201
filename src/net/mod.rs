//! Network layer.
//!
//! # Data Flow
//! ```text
//! TcpListener (bound in main or tests)
//!     → plain: axum::serve
//!     → TLS:   tls.rs (load PEM) → axum_server rustls acceptor
//! ```

pub mod tls;
