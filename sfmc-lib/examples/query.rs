//! Query a data extension held by the in-memory backend.
//!
//! Run with: cargo run --example query

use std::sync::Arc;

use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::SimpleLogger;

use sfmc_lib::SfmcClient;
use sfmc_lib::api::query::Operator;
use sfmc_lib::backend::MemoryBackend;
use sfmc_lib::model::DataExtension;
use sfmc_lib::model::Record;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = SimpleLogger::init(LevelFilter::Debug, Config::default());

    let backend = Arc::new(MemoryBackend::new());
    backend.define(DataExtension::key("SendLog"), ["SubscriberKey", "JobID"]);

    let client = SfmcClient::builder().backend(backend).build();
    let send_log = client.data_extension("SendLog");

    for (key, job, email) in [
        ("S-1", "100", "ann@x.com"),
        ("S-2", "100", "bob@y.com"),
        ("S-1", "101", "ann@x.com"),
    ] {
        send_log
            .create(
                Record::new()
                    .key("SubscriberKey", key)
                    .key("JobID", job)
                    .set("EmailAddress", email),
            )
            .await?;
    }

    let rows = send_log
        .get(["SubscriberKey", "JobID"])
        .and_where_str("EmailAddress", "eq", "ann@x.com")?
        .await?;

    println!("Sends to ann@x.com:");
    for row in rows {
        println!("  {:?}", row.properties());
    }

    let ack = send_log
        .delete()
        .and_where("JobID", Operator::Equals, "100")
        .await?;
    println!("Deleted {} rows of job 100", ack.rows_affected());

    Ok(())
}
