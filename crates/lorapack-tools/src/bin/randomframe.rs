use clap::Parser;
use lorapack_core::Overrides;
use lorapack_sensors::default_codec;
use lorapack_tools::{print_record, RecordTypeArg};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Parser, Debug)]
#[command(name = "lorapack-randomframe")]
struct Args {
    #[arg(long, value_enum)]
    record_type: RecordTypeArg,
    #[arg(long)]
    device_id: Option<String>,
    #[arg(long, default_value_t = 1)]
    count: u32,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let codec = default_codec()?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let record_type = args.record_type.as_str();

    for i in 0..args.count {
        let record = codec.random_record(
            record_type,
            args.device_id.as_deref(),
            &Overrides::new(),
            &mut rng,
        )?;
        let frame = codec.encode(&record)?;
        let decoded = codec.decode_hex(record_type, &frame.payload_hex(), &frame.device_id)?;
        if decoded != record {
            eprintln!("round trip mismatch on frame {i}");
            eprintln!("  generated: {record:?}");
            eprintln!("  decoded:   {decoded:?}");
            std::process::exit(1);
        }
        log::info!("frame {i} round-tripped");

        println!("{} {}", frame.device_id, frame.payload_hex());
        print_record(&record, args.json)?;
    }
    Ok(())
}
