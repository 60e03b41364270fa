//! FreightFlow Rust Library
//!
//! Este crate une el flujo de cotización con la aplicación:
//! - `config`: configuración desde variables de entorno (.env).
//! - `errors`: errores de la aplicación.
//! - `quote_session`: sesión interactiva que conduce el engine.
//!
//! Puede usarse desde `main.rs` o por otros crates/clientes.

pub mod config;
pub mod errors;
pub mod quote_session;

pub use config::{AppConfig, CONFIG};
pub use errors::AppError;
pub use quote_session::{Command, QuoteSession, Reply};
