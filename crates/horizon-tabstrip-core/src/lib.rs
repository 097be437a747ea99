//! Core systems for Horizon Tabstrip.
//!
//! This crate provides the cooperative, single-threaded building blocks the
//! tab-strip controller runs on:
//!
//! - **Signal/Slot System**: Type-safe change notification
//! - **Timers**: One-shot and repeating timers driven by a virtual clock
//! - **Tick Queue**: Coalesced next-tick work, one pending unit per key
//! - **Logging**: `tracing` targets for every subsystem
//!
//! Nothing here spawns threads or blocks. Time only moves when the owner
//! calls [`TimerManager::fire_next`] or [`TimerManager::advance_to`], which
//! keeps every deferred behavior deterministic under test.
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_tabstrip_core::Signal;
//!
//! let value_changed = Signal::<Option<String>>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Selection changed to: {:?}", value);
//! });
//!
//! value_changed.emit(Some("home".to_string()));
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Timer Example
//!
//! ```
//! use horizon_tabstrip_core::TimerManager;
//! use std::time::Duration;
//!
//! let mut timers = TimerManager::new();
//! let id = timers.start_one_shot(Duration::from_millis(70));
//!
//! assert_eq!(timers.fire_next(Duration::from_millis(69)), None);
//! assert_eq!(timers.fire_next(Duration::from_millis(70)), Some(id));
//! assert_eq!(timers.now(), Duration::from_millis(70));
//! ```

mod error;
pub mod logging;
pub mod signal;
mod tick;
mod timer;

pub use error::{CoreError, Result, TimerError};
pub use signal::{ConnectionId, Signal};
pub use tick::TickQueue;
pub use timer::{TimerId, TimerManager};
