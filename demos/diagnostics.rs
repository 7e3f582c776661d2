use std::env;

use atag_one::OneClient;

const USAGE: &str = "usage: diagnostics <email> <password> [setpoint]";

#[tokio::main]
async fn main() -> atag_one::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let email = args.get(1).expect(USAGE);
    let password = args.get(2).expect(USAGE);
    let setpoint: Option<f64> = args
        .get(3)
        .map(|s| s.parse().expect("setpoint has to be a numeric value"));

    let mut client = OneClient::builder(email, password).build();
    client.login().await?;

    if let Some(temperature) = setpoint {
        let room_temperature = client.set_temperature(temperature).await?;
        println!("{room_temperature:.1}");
    } else {
        let report = client.diagnostics().await?;
        println!(
            "{}",
            serde_json::to_string_pretty(&report).expect("report serializes")
        );
    }
    Ok(())
}
