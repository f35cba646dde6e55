#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Collector capability traits and a minimal mark-phase collector.
pub mod gc;

/// The string-intern table.
///
/// This module provides an `Interner` that wraps a `Table` keyed by string
/// handles and hands out one canonical handle per distinct content.
pub mod interner;

/// String objects and the key traits the table is generic over.
pub mod string;

pub mod table;

pub use gc::CollectorHooks;
pub use interner::Interner;
pub use string::StrRef;
pub use string::hash_bytes;
pub use table::Table;
