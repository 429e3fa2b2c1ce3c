//! Live reload of the derived outputs.
//!
//! After the initial pass, daemon mode watches the source file's parent
//! directory (not the file itself, so editors that delete and recreate the
//! file on save keep working) and reruns the [`Pipeline`](crate::Pipeline)
//! whenever the source is written or created.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐  events  ┌─────────────┐ accept ┌──────────┐
//! │   notify    │─────────▶│ SourceWatch │───────▶│ Pipeline │
//! │  (inotify)  │─────────▶│ (Debouncer) │        │  ::run   │
//! └─────────────┘  errors  └─────────────┘        └──────────┘
//! ```
//!
//! # State machine
//!
//! | From | On | To |
//! |------|----|----|
//! | Idle | event for another file | Idle |
//! | Idle | write/create, stat fails | Idle |
//! | Idle | write/create within debounce window | Idle |
//! | Idle | write/create outside the window | Debounced |
//! | Debounced | settle delay, pass completes (any outcome) | Idle |
//! | any | watcher error | unchanged |
//! | any | event or error channel closed | Stopped |
//!
//! Passes are never cancelled and never retried; the next trigger is the
//! next filesystem event.

mod debounce;
mod types;
mod watcher;

pub use debounce::Debouncer;
pub use types::{
    DEFAULT_DEBOUNCE, DEFAULT_SETTLE, WatchError, WatchOptions, WatchState, WatchStats,
};
pub use watcher::{SourceWatch, start_notify, watch};
