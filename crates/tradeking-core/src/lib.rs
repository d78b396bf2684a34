//! Core types and errors for the TradeKing client.
//!
//! This crate provides the foundational building blocks including:
//! - The error taxonomy shared by every API call
//! - Fixed-point price representation (milli-dollars)
//! - OCC option symbol formatting and parsing
//! - Typed coercion of quote payload fields
//! - FIXML order document construction

pub mod error;
pub mod fixml;
pub mod option;
pub mod price;
pub mod quote;

pub use error::{ApiError, ApiResult};
pub use option::{OptionQuery, OptionRight, OptionSymbol};
pub use price::Price;
pub use quote::QuoteValue;
