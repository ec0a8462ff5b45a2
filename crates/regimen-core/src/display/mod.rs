//! Markdown formatting for models, collections and operation results.
//!
//! Domain models implement [`std::fmt::Display`] in [`models`]; newtype
//! wrappers in [`collections`] and [`results`] add context such as empty
//! collection messages or "what changed" headers. All output is markdown so
//! the CLI can render it richly or print it as plain text.
//!
//! - [`collections`]: PlanSummaries, Exercises, CompletionBoard, Reasons
//! - [`results`]: CreateResult, UpdateResult, DeleteResult and edit results
//! - [`status`]: OperationStatus success/failure lines
//! - [`datetime`]: local time formatting
//! - [`models`]: Display implementations for domain models
//!
//! # Examples
//!
//! ```rust
//! use regimen_core::display::OperationStatus;
//!
//! let failure = OperationStatus::failure("Could not save completion".to_string());
//! assert!(format!("{failure}").starts_with("Error:"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{CompletionBoard, Exercises, PlanSummaries, Reasons};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
