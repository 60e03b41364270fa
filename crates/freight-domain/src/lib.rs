// freight-domain library entry point
pub mod cargo;
pub mod error;
pub mod quote_form;
pub mod requirement;
pub mod shipping;
pub use cargo::{cargo_types, categories, CARGO_CATEGORIES};
pub use error::DomainError;
pub use quote_form::QuoteFormData;
pub use requirement::QuoteRequirement;
pub use shipping::{parse_shipping_date, LocationType, SeaFreightMode, ShippingType};
