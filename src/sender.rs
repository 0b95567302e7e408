//! The sending half of the shim pair: encode each JSON test value as a typed
//! AMQP message and send it to the queue under test.

use fe2o3_amqp::types::messaging::{Message, Outcome, Properties};
use fe2o3_amqp::{Connection, Sender, Session};
use serde_json::Value as JsonValue;
use tracing::error;

use crate::amqp_type::AmqpType;
use crate::encode::encode_test_value;
use crate::error::Error;

/// Sends one message per test value, all of one declared AMQP type.
pub struct SenderShim {
    broker_addr: String,
    queue: String,
    amqp_type: AmqpType,
    test_values: Vec<JsonValue>,
}

impl SenderShim {
    /// Creates the shim, rejecting the `array` type before any I/O happens.
    pub fn new(
        broker_addr: impl Into<String>,
        queue: impl Into<String>,
        amqp_type: AmqpType,
        test_values: Vec<JsonValue>,
    ) -> Result<Self, Error> {
        if amqp_type == AmqpType::Array {
            return Err(Error::UnsupportedAmqpType("array"));
        }
        Ok(Self {
            broker_addr: broker_addr.into(),
            queue: queue.into(),
            amqp_type,
            test_values,
        })
    }

    /// Sends every test value and waits for each to be accepted.
    pub async fn run(&self) -> Result<(), Error> {
        let url = format!("amqp://{}", self.broker_addr);
        let mut connection = Connection::open("amqp-types-sender", &url[..]).await?;
        let mut session = Session::begin(&mut connection).await?;
        let mut sender =
            Sender::attach(&mut session, "amqp-types-sender-link", &self.queue[..]).await?;

        let result = self.send_all(&mut sender).await;

        if let Err(err) = sender.close().await {
            error!(error = %err, "error closing sender link");
        }
        if let Err(err) = session.end().await {
            error!(error = %err, "error ending session");
        }
        if let Err(err) = connection.close().await {
            error!(error = %err, "error closing connection");
        }

        result
    }

    async fn send_all(&self, sender: &mut Sender) -> Result<(), Error> {
        for (sent, test_value) in self.test_values.iter().enumerate() {
            let body = encode_test_value(self.amqp_type, test_value)?;
            let message = Message::builder()
                .properties(
                    Properties::builder()
                        .message_id(sent as u64 + 1)
                        .build(),
                )
                .value(body)
                .build();
            match sender.send(message).await? {
                Outcome::Accepted(_) => {}
                outcome => return Err(Error::NotAccepted(format!("{:?}", outcome))),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn array_is_rejected_at_construction() {
        let result = SenderShim::new("localhost:5672", "q", AmqpType::Array, vec![json!([])]);
        assert!(matches!(result, Err(Error::UnsupportedAmqpType("array"))));
    }
}
