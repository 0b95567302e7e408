//! Shim programs for the AMQP 1.0 type interoperability test suite.
//!
//! The suite drives one shim pair per client implementation: a sender that
//! encodes JSON test values as AMQP typed message bodies, and a receiver that
//! decodes the bodies back into a stable textual form for comparison against
//! the other implementations. All AMQP protocol work (connection, session and
//! link state machines, framing, flow control) is delegated to [`fe2o3_amqp`];
//! this crate only maps between the suite's JSON conventions and AMQP values.

pub mod amqp_type;
pub mod encode;
pub mod error;
pub mod receiver;
pub mod render;
pub mod sender;

pub use amqp_type::AmqpType;
pub use error::Error;
pub use receiver::ReceiverShim;
pub use sender::SenderShim;
