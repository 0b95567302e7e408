//! The receiving half of the shim pair: consume a bounded number of typed
//! messages from one queue and collect their rendered values.

use fe2o3_amqp::types::messaging::Body;
use fe2o3_amqp::types::primitives::Value;
use fe2o3_amqp::{Connection, Delivery, Receiver, Session};
use serde_json::Value as JsonValue;
use tracing::error;

use crate::amqp_type::AmqpType;
use crate::error::Error;
use crate::render::render_body;

/// Receives `expected` messages of one declared AMQP type from a queue.
///
/// The shim attaches a single receiver link, renders every body against the
/// declared type, and tears the link, session and connection down once the
/// bound is reached or a message fails to decode. Engine errors during the
/// teardown itself are diagnostics only.
pub struct ReceiverShim {
    broker_addr: String,
    queue: String,
    amqp_type: AmqpType,
    expected: u32,
}

impl ReceiverShim {
    /// Creates the shim, rejecting the `array` type before any I/O happens.
    pub fn new(
        broker_addr: impl Into<String>,
        queue: impl Into<String>,
        amqp_type: AmqpType,
        expected: u32,
    ) -> Result<Self, Error> {
        if amqp_type == AmqpType::Array {
            return Err(Error::UnsupportedAmqpType("array"));
        }
        Ok(Self {
            broker_addr: broker_addr.into(),
            queue: queue.into(),
            amqp_type,
            expected,
        })
    }

    /// Runs the receive loop to completion and returns the rendered values
    /// in receipt order.
    pub async fn run(&self) -> Result<Vec<JsonValue>, Error> {
        let url = format!("amqp://{}", self.broker_addr);
        let mut connection = Connection::open("amqp-types-receiver", &url[..]).await?;
        let mut session = Session::begin(&mut connection).await?;
        let mut receiver =
            Receiver::attach(&mut session, "amqp-types-receiver-link", &self.queue[..]).await?;

        let result = self.recv_all(&mut receiver).await;

        // A decode failure still closes the link and connection in order;
        // failures reported by the engine here do not mask `result`.
        if let Err(err) = receiver.close().await {
            error!(error = %err, "error closing receiver link");
        }
        if let Err(err) = session.end().await {
            error!(error = %err, "error ending session");
        }
        if let Err(err) = connection.close().await {
            error!(error = %err, "error closing connection");
        }

        result
    }

    async fn recv_all(&self, receiver: &mut Receiver) -> Result<Vec<JsonValue>, Error> {
        let mut values = Vec::with_capacity(self.expected as usize);
        let mut received: u32 = 0;
        while received < self.expected {
            let delivery: Delivery<Body<Value>> = receiver.recv().await?;
            receiver.accept(&delivery).await?;
            received += 1;
            values.push(render_body(self.amqp_type, delivery.into_body())?);
        }
        Ok(values)
    }
}

/// Permissive count parsing: decimal, or hex with a `0x` prefix.
pub fn parse_expected_count(s: &str) -> Result<u32, Error> {
    let trimmed = s.trim();
    let parsed = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => trimmed.parse(),
    };
    parsed.map_err(|_| Error::Argument(format!("invalid expected message count \"{}\"", s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_parses_decimal_and_hex() {
        assert_eq!(parse_expected_count("0").unwrap(), 0);
        assert_eq!(parse_expected_count("10").unwrap(), 10);
        assert_eq!(parse_expected_count(" 10 ").unwrap(), 10);
        assert_eq!(parse_expected_count("0x10").unwrap(), 16);
        assert_eq!(parse_expected_count("0X10").unwrap(), 16);
    }

    #[test]
    fn count_rejects_garbage() {
        for s in ["", "-1", "ten", "0x", "1.5"] {
            assert!(matches!(parse_expected_count(s), Err(Error::Argument(_))));
        }
    }

    #[test]
    fn array_is_rejected_at_construction() {
        let result = ReceiverShim::new("localhost:5672", "q", AmqpType::Array, 1);
        assert!(matches!(result, Err(Error::UnsupportedAmqpType("array"))));
    }
}
