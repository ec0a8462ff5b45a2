//! Plan composition: pure operations over an ordered exercise collection.
//!
//! Every operation takes the caller's entries by reference and returns a new,
//! normalized `Vec`; nothing here mutates its input. Positions are 0-based
//! array indices, while `sort_order` is the 1-based position written only by
//! [`normalize`].
//!
//! ```text
//! edit event ─▶ guard ─▶ ops ─▶ normalize ─▶ EditSession buffer
//!                                                 │
//!                       validate ◀── build_command┘
//! ```
//!
//! - [`ordering`]: the `sort_order == index + 1` invariant
//! - [`ops`]: add, remove, update, reorder, move, swap
//! - [`guard`]: duplicate detection by `exercise_id`
//! - [`validate`]: range and shape checks that accumulate every problem
//! - [`session`]: one editing session's buffer plus its persisted baseline

pub mod guard;
pub mod ops;
pub mod ordering;
pub mod session;
pub mod validate;

pub use guard::{filter_new, is_duplicate, partition_new};
pub use ops::{add_many, move_entry, remove_at, reorder, swap_entries, update_at, AddDefaults};
pub use ordering::{is_normalized, normalize};
pub use session::EditSession;
pub use validate::{validate, validate_all, ValidationReport};
