//! DL-Bus Hardware Abstraction Layer
//!
//! This crate defines the hardware capabilities the DL-Bus receiver
//! needs from a platform, so the same decode pipeline can run on any
//! chip HAL (or on the host, against [`sim::SimPin`]).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Receiver pipeline (dlbus-core)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dlbus-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ chip HAL pin  │       │ sim::SimPin   │
//! │ (RP2040, ESP) │       │ (host tests)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::EdgeInput`] - edge-notifying digital input pin

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod sim;

// Re-export key traits at crate root for convenience
pub use gpio::{EdgeInput, Level};
pub use sim::SimPin;
