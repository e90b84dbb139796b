use clap::Parser;
use lorapack_core::Record;
use lorapack_sensors::default_codec;
use std::fs;

#[derive(Parser, Debug)]
#[command(name = "lorapack-encodeframe")]
struct Args {
    /// JSON file holding one record, as printed by `decodeframe --json`.
    #[arg(long)]
    record: String,
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let codec = default_codec()?;
    let record: Record = serde_json::from_str(&fs::read_to_string(&args.record)?)?;

    match codec.encode(&record) {
        Ok(frame) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&frame)?);
            } else {
                println!("device_id: {}", frame.device_id);
                println!("payload:   {}", frame.payload_hex());
            }
        }
        Err(e) => {
            eprintln!("encode failed: {e}");
            std::process::exit(1);
        }
    }
    Ok(())
}
