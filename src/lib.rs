//! QAM link simulator over an AWGN channel.
//!
//! Bits are split onto two bipolar rails (cosine and sine carriers), summed,
//! pushed through a noisy channel and recovered by energy detection.

pub mod ber;
pub mod channel;
pub mod codec;
pub mod config;
pub mod error;
pub mod link;
pub mod modem;
pub mod payload;
pub mod sweep;
pub mod ui;
pub mod utils;

pub use ber::{ErrorReport, evaluate};
pub use channel::{AwgnChannel, Channel, IdealChannel};
pub use codec::{BitStream, bits_to_bytes, bytes_to_bits};
pub use config::LinkConfig;
pub use error::{LinkError, LinkResult};
pub use link::{LinkReport, QamLink, Transmission};
pub use payload::{Dimensions, Payload};
