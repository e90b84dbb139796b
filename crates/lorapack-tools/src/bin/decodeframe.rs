use clap::Parser;
use lorapack_sensors::default_codec;
use lorapack_tools::{print_record, RecordTypeArg};

#[derive(Parser, Debug)]
#[command(name = "lorapack-decodeframe")]
struct Args {
    #[arg(long, value_enum)]
    record_type: RecordTypeArg,
    #[arg(long)]
    device_id: String,
    #[arg(long)]
    payload: String,
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let codec = default_codec()?;

    match codec.decode_hex(args.record_type.as_str(), &args.payload, &args.device_id) {
        Ok(record) => print_record(&record, args.json)?,
        Err(e) => {
            eprintln!("decode failed: {e}");
            std::process::exit(1);
        }
    }
    Ok(())
}
