//! Completion tracking with optimistic writes.
//!
//! [`CompletionSync`] keeps a [`CompletionCache`] of per-exercise completion
//! records and pushes each toggle to a [`CompletionBackend`]:
//!
//! ```text
//! set_completion
//!   ├─ snapshot plan records
//!   ├─ write optimistic record          ── readers see it immediately
//!   └─ spawned task                     ── survives a dropped caller
//!        ├─ backend.set_completion().await
//!        ├─ Ok  → mark plan caches stale     ── next refresh() refetches
//!        └─ Err → restore snapshot, mark stale, emit RolledBack
//! ```
//!
//! The editor half of the crate never touches this state.

pub mod backend;
pub mod cache;
pub mod sync;

pub use backend::CompletionBackend;
pub use cache::{CacheScope, CompletionCache, PlanSnapshot};
pub use sync::{CompletionSync, SyncEvent};
