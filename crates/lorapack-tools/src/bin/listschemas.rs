use clap::Parser;
use lorapack_core::{BitRange, FieldDescriptor, FieldRole};
use lorapack_sensors::default_codec;

#[derive(Parser, Debug)]
#[command(name = "lorapack-listschemas")]
struct Args {
    #[arg(long)]
    json: bool,
}

fn describe(field: &FieldDescriptor) -> String {
    let role = match &field.role {
        FieldRole::Enum { space } => format!("enum {space}"),
        FieldRole::BitfieldStatus { status } => format!("status {status}"),
        FieldRole::Custom(role) => format!("custom {role}"),
        other => format!("{other:?}"),
    };
    let bits = match field.bit_range {
        Some(BitRange { start, end }) => format!(" bits {start}..={end}"),
        None => String::new(),
    };
    format!(
        "{:<28} {:>2}..={:<2}{bits}  {role}  {:?} scale {}",
        field.name, field.byte_start, field.byte_end, field.converter, field.scale
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let codec = default_codec()?;

    for record_type in codec.record_types() {
        let schema = codec.schema(record_type)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(schema)?);
            continue;
        }
        println!("{record_type} ({} bytes):", schema.total_size);
        for field in &schema.fields {
            if field.is_device_id() {
                println!("  {:<28} device identifier", field.name);
            } else {
                println!("  {}", describe(field));
            }
        }
    }
    Ok(())
}
