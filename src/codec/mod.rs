pub mod bits;

pub use bits::{BitStream, bits_to_bytes, bytes_to_bits};
