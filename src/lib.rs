//! # ttdecode
//!
//! Decoder for frames sent by Thinking Things stacks:
//! - Frame splitting into header and module segments
//! - Typed attributes for each supported module code
//! - Sleep directives (`<value>$<condition>`)
//! - The Black Button request/response sub-protocol
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  "#A1#LU,142.86,0$#K1,300$"                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ split_frame
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Decoder                               │
//! │            (sequential or scoped-thread fan-out)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ one segment each
//!          ┌────────────┴────────────┐
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  tokenize   │          │   resolve   │
//!   │   (`,`)     │─────────►│ ModuleCode  │
//!   └─────────────┘          └──────┬──────┘
//!                                   │ parse
//!                                   ▼
//!                           ┌─────────────┐
//!                           │ ModuleDelta │──► ModuleRecord
//!                           └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! let payload = ttdecode::decode("#A1#LU,142.86,0$").unwrap();
//! assert_eq!(payload.id, "A1");
//! assert_eq!(payload.modules[0].attributes[0].value, "142.86");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod model;
pub mod protocol;
pub mod collab;
pub mod modules;
pub mod decoder;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{DecodeError, Result};
pub use config::{DecoderConfig, FanOut, SleepPolicy};
pub use model::{Attribute, AttributeType, Metadata, ModuleRecord, ParsedPayload, SleepDirective};
pub use collab::{HumidityCalibration, RawHumidity, RequestIdGenerator, UuidGenerator};
pub use modules::black_button::{states, Operation, RequestState};
pub use modules::ModuleCode;
pub use decoder::{decode, Decoder};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of ttdecode
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
