use clap::ValueEnum;
use lorapack_core::Record;
use lorapack_sensors::{gas, safe_gas, safety_signal, weather};

/// CLI-friendly enum for selecting a sensor record type.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RecordTypeArg {
    Weather,
    SafetySignal,
    SafeGas,
    Gas,
}

impl RecordTypeArg {
    /// The record type name the codec registers.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weather => weather::RECORD_TYPE,
            Self::SafetySignal => safety_signal::RECORD_TYPE,
            Self::SafeGas => safe_gas::RECORD_TYPE,
            Self::Gas => gas::RECORD_TYPE,
        }
    }
}

/// Prints `record` as pretty JSON or as one `name = value` line per field.
pub fn print_record(record: &Record, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        println!("{}:", record.record_type);
        for (name, value) in record.iter() {
            println!("  {name} = {value}");
        }
    }
    Ok(())
}
