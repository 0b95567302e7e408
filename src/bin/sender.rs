//! Sender shim for the AMQP types interop test.
//!
//! Args: 1: Broker address (ip-addr:port)
//!       2: Queue name
//!       3: AMQP type
//!       4: Test value(s) as a JSON array

use std::env;
use std::process::ExitCode;

use serde_json::Value as JsonValue;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use qpid_interop_shim::{AmqpType, Error, SenderShim};

fn parse_args() -> Result<SenderShim, Error> {
    let mut args = env::args().skip(1);
    match (args.next(), args.next(), args.next(), args.next(), args.next()) {
        (Some(broker_addr), Some(queue), Some(amqp_type), Some(test_values), None) => {
            let amqp_type: AmqpType = amqp_type.parse()?;
            let test_values = match serde_json::from_str::<JsonValue>(&test_values)? {
                JsonValue::Array(values) => values,
                _ => {
                    return Err(Error::Argument(
                        "test values must be a JSON array".to_string(),
                    ))
                }
            };
            SenderShim::new(broker_addr, queue, amqp_type, test_values)
        }
        _ => Err(Error::Argument(
            "expected <broker-addr> <queue-name> <amqp-type> <json-test-values>".to_string(),
        )),
    }
}

async fn run() -> Result<(), Error> {
    let shim = parse_args()?;
    shim.run().await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("AmqpSender error: {}", err);
            ExitCode::FAILURE
        }
    }
}
