//! # SOAP Protocol Building Blocks
//!
//! This module contains the low-level pieces the invoker composes for one exchange:
//!
//! * [`envelope`]: SOAPAction computation and envelope assembly.
//! * [`codec`]: translation between `serde_json::Value` arguments and XML fragments.
//! * [`transport`]: delivery of an envelope to a network location.
//!
//! None of them knows about the service tree. They work on plain strings, values and headers.
pub mod codec;
pub mod envelope;
pub mod transport;
