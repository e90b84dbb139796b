/// MSB-first bit extraction and big-endian integer packing.
pub mod bits;
/// Bounds-checked view over an uplink payload and its device identifier.
pub mod reader;
/// Bounds-checked writer over a zero-filled payload buffer.
pub mod writer;
