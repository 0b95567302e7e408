//! The closed set of errors shared by both shims.

use fe2o3_amqp::connection::OpenError;
use fe2o3_amqp::link::{
    IllegalLinkStateError, ReceiverAttachError, RecvError, SendError, SenderAttachError,
};
use fe2o3_amqp::session::BeginError;

/// All failures the shims can produce.
///
/// The first group mirrors the error vocabulary shared by every shim in the
/// interop suite; the transparent variants wrap the protocol engine's own
/// error types. Every variant is fatal: the shims close the link and the
/// connection in order and exit non-zero, there is no retry path.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed command line invocation
    #[error("ArgumentError: {0}")]
    Argument(String),

    /// The declared AMQP type is not in the fixed vocabulary
    #[error("UnknownAmqpTypeError: \"{0}\" is not a recognized AMQP type")]
    UnknownAmqpType(String),

    /// The declared AMQP type is in the vocabulary but not handled by the shims
    #[error("UnsupportedAmqpTypeError: AMQP type \"{0}\" is not supported")]
    UnsupportedAmqpType(&'static str),

    /// The wire type of a received message body disagrees with the declared type
    #[error("IncorrectMessageBodyTypeError: expected \"{expected}\", received \"{found}\"")]
    IncorrectMessageBodyType {
        expected: &'static str,
        found: &'static str,
    },

    /// A nested list or map member has a type outside the narrow recursive set
    #[error("IncorrectValueTypeError: \"{0}\" is not valid inside a received list or map")]
    IncorrectValueType(&'static str),

    /// A sender test value does not parse as the declared type
    #[error("InvalidTestValueError: {value} is not a valid \"{amqp_type}\" test value")]
    InvalidTestValue {
        amqp_type: &'static str,
        value: String,
    },

    /// The sender's test value argument is not valid JSON
    #[error("JsonParserError: {0}")]
    JsonParser(#[from] serde_json::Error),

    /// The broker settled a sent message with a non-Accepted outcome
    #[error("delivery was not accepted: {0}")]
    NotAccepted(String),

    #[error(transparent)]
    Open(#[from] OpenError),

    #[error(transparent)]
    Begin(#[from] BeginError),

    #[error(transparent)]
    ReceiverAttach(#[from] ReceiverAttachError),

    #[error(transparent)]
    SenderAttach(#[from] SenderAttachError),

    #[error(transparent)]
    Recv(#[from] RecvError),

    #[error(transparent)]
    Send(#[from] SendError),

    #[error(transparent)]
    IllegalLinkState(#[from] IllegalLinkStateError),
}
