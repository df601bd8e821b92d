//! Reusable schemas, typed outputs and helpers built on `schemata-core`.
//!
//! | Module      | Use case                                               |
//! |-------------|--------------------------------------------------------|
//! | [`math`]    | step-by-step math tutor (`MathReasoning`)              |
//! | [`summary`] | structured article summary (`ArticleSummary`)          |
//! | [`product`] | `product_search` function tool (`ProductSearch`)       |
//! | [`source`]  | in-memory [`schemata_core::transport::ContentSource`]  |

pub mod math;
pub mod product;
pub mod source;
pub mod summary;

pub use math::{MathReasoning, Step};
pub use product::{ProductCategory, ProductSearch};
pub use source::StaticContentSource;
pub use summary::{ArticleSummary, Concept};
