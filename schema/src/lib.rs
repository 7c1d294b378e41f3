//! The engine-control console schema.
//!
//! Every message exchanged between the ECU and a host is defined here as a
//! plain struct implementing [`wire::Message`]:
//! - Telemetry: [`EngineUpdate`] and [`Event`], with implicit-presence scalars
//! - Configuration: [`Configuration`] and its sections, with explicit presence
//! - Control: [`Request`] and [`Response`]
//! - The [`ConsoleMessage`] envelope that carries any of the above
//!
//! # Design Principles
//!
//! - **Fixed storage** - Repeated fields and strings are `heapless` containers
//!   with the capacities in [`limits`]. Decode rejects input that would exceed
//!   them.
//! - **Static worst case** - Every type's `MAX_SIZE` is a `const`, so a buffer
//!   for [`wire::StaticBuffer`] can be sized at compile time.
//! - **Oneofs are enums** - Only the selected alternative exists.
//!
//! # Example
//!
//! ```
//! use schema::{ConsoleKind, ConsoleMessage, Request, RequestKind};
//! use wire::{Message, StaticBuffer};
//!
//! let msg = ConsoleMessage::from(ConsoleKind::Request(Request {
//!     id: 1,
//!     kind: Some(RequestKind::Ping),
//! }));
//!
//! let buf: StaticBuffer<{ ConsoleMessage::MAX_SIZE }> = StaticBuffer::encode(&msg);
//! assert_eq!(buf.len(), msg.encoded_len());
//! assert_eq!(ConsoleMessage::decode_from_slice(&buf).unwrap(), msg);
//! ```

pub mod config;
mod console;
mod enums;
pub mod limits;
mod request;
mod response;
mod telemetry;

pub use config::Configuration;
pub use console::{ConsoleKind, ConsoleMessage};
pub use enums::{
    DecoderLossReason, DwellType, InputEdge, InputType, OutputType, SensorFault, SensorMethod,
    SensorSource, TriggerType,
};
pub use request::{Request, RequestKind, SetConfigRequest};
pub use response::{
    FirmwareInfo, FlashConfigResponse, GetConfigResponse, Response, ResponseKind,
    SetConfigResponse,
};
pub use telemetry::{Calculations, EngineUpdate, Event, EventKind, Header, Position, Sensors};
