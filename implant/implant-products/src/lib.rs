//! Product-line definitions for the implant catalog-scheme engine.
//!
//! Each module authors one vendor's [`ProductDefinition`](implant_scheme::ProductDefinition)
//! as plain data - label allocation, sub-range table, calibration landmarks,
//! similar-size rules and transform parameters - and exposes a `scheme()`
//! constructor. The [`ProductRegistry`] bundles all of them behind a single
//! label lookup.
//!
//! Label integers mirror the vendor catalogs verbatim and are persisted in
//! surgical plans; they must never be renumbered.
//!
//! # Example
//!
//! ```
//! use implant_products::corail;
//! use implant_types::AnatomSide;
//!
//! let scheme = corail::scheme();
//! let config = scheme.default_configuration(AnatomSide::Right);
//! assert!(config.valid_assembly);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
// Calibration tables are data, not logic.
#![allow(clippy::too_many_lines)]
#![allow(clippy::unreadable_literal)]

pub mod actis;
pub mod amistem;
pub mod corail;
pub mod ecofit;
pub mod fit;
pub mod optimys;
mod registry;
mod support;

pub use registry::ProductRegistry;
