//! Catalog-scheme resolution engine for modular implant product lines.
//!
//! Given an opaque integer shape label this crate answers three questions:
//!
//! - **Which named sub-range contains it?** ([`LabelClassifier`])
//! - **What is the most similar size in another sub-range?**
//!   ([`SimilarLabelResolver`], rule-table driven with authored 2-3-hop
//!   chains through intermediate families)
//! - **Where does the component go?** ([`TransformComposer`]: head seating,
//!   resection plane, stem-to-stem repositioning, canonical normal frame,
//!   anatomical fine adjustment)
//!
//! One shared engine evaluates per-product data tables; product lines differ
//! only in their [`ProductDefinition`]. The [`ProductScheme`] façade bundles
//! the components behind the stable contract every product implements
//! identically.
//!
//! # Quick Start
//!
//! ```no_run
//! use implant_scheme::ProductScheme;
//! use implant_types::AnatomSide;
//!
//! fn place_head(scheme: &ProductScheme) {
//!     let config = scheme.default_configuration(AnatomSide::Right);
//!     let seat = scheme
//!         .head_to_stem(config.head_label, config.stem_label)
//!         .unwrap();
//!     println!("head frame: {:?}", seat.to_matrix4());
//! }
//! ```
//!
//! # Concurrency
//!
//! All tables are read-only after construction; every operation is a
//! synchronous O(1) lookup or short composition. Schemes are freely shared
//! across threads. Callers own their `ImplantConfiguration` values and must
//! synchronize any sharing themselves.
//!
//! # Errors
//!
//! Handing an operation a label outside its declared domain is a
//! precondition violation reported as [`SchemeError`]. Policy cases never
//! error: "no similar size" returns the source label, labels beyond the
//! authored calibration rows read as the zero landmark set, and incomplete
//! configurations validate to `valid_assembly = false`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod classify;
mod compose;
mod definition;
mod error;
mod landmarks;
mod scheme;
mod similar;

pub use classify::{LabelClassifier, LabelKind, StemLabel};
pub use compose::TransformComposer;
pub use definition::{
    ChainAnchor, ChainHop, ChainRule, CutBboxRule, CutPlaneRule, FfOffsetRule, HeadSeating,
    LandmarkData, NormalFrameRule, OffsetRule, ProductDefinition, SideRequirement, SideStamp,
    SimilarRule, StemShiftRule, StemShiftTable,
};
pub use error::{SchemeError, SchemeResult};
pub use landmarks::LandmarkTable;
pub use scheme::ProductScheme;
pub use similar::SimilarLabelResolver;
