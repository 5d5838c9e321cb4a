use clap::Parser;

const DEFAULT_DEVICE_ID: &str = "device123";

#[derive(Parser, Clone, Debug)]
pub struct SensorDataOptions {
    #[clap(long, default_value = DEFAULT_DEVICE_ID)]
    pub device_id: String,

    /// Only records from this timestamp on
    #[clap(long)]
    pub timestamp: Option<String>,
}
