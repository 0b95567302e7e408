//! Receiver shim for the AMQP types interop test.
//!
//! Args: 1: Broker address (ip-addr:port)
//!       2: Queue name
//!       3: AMQP type
//!       4: Expected number of test values to receive
//!
//! On success prints the AMQP type on one line and the received values as a
//! compact JSON array on the next.

use std::env;
use std::process::ExitCode;

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use qpid_interop_shim::receiver::{parse_expected_count, ReceiverShim};
use qpid_interop_shim::{AmqpType, Error};

fn parse_args() -> Result<(String, String, AmqpType, u32), Error> {
    let mut args = env::args().skip(1);
    match (args.next(), args.next(), args.next(), args.next(), args.next()) {
        (Some(broker_addr), Some(queue), Some(amqp_type), Some(count), None) => {
            let amqp_type: AmqpType = amqp_type.parse()?;
            let expected = parse_expected_count(&count)?;
            Ok((broker_addr, queue, amqp_type, expected))
        }
        _ => Err(Error::Argument(
            "expected <broker-addr> <queue-name> <amqp-type> <expected-count>".to_string(),
        )),
    }
}

async fn run() -> Result<(), Error> {
    let (broker_addr, queue, amqp_type, expected) = parse_args()?;
    let shim = ReceiverShim::new(broker_addr, queue, amqp_type, expected)?;
    let values = shim.run().await?;

    println!("{}", amqp_type);
    println!("{}", serde_json::to_string(&values)?);
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // stdout carries the test output, so diagnostics go to stderr
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("AmqpReceiver error: {}", err);
            ExitCode::FAILURE
        }
    }
}
