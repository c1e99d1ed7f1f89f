/// Bit error counting between transmitted and recovered streams
use crate::error::{LinkError, LinkResult};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Serialize)]
pub struct ErrorReport {
    pub bits: usize,
    pub errors: usize,
    /// errors / bits; NaN when no bits were compared
    pub bit_error_rate: f64,
}

impl ErrorReport {
    /// False for an empty comparison, where the rate is undefined
    pub fn is_defined(&self) -> bool {
        self.bits > 0
    }

    pub fn is_error_free(&self) -> bool {
        self.errors == 0
    }
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_defined() {
            write!(
                f,
                "{} errors, BER {:.4}",
                self.errors, self.bit_error_rate
            )
        } else {
            write!(f, "{} errors, BER undefined (no bits)", self.errors)
        }
    }
}

/// Count positions where `tx` and `rx` differ. Lengths must match.
pub fn evaluate(tx: &[u8], rx: &[u8]) -> LinkResult<ErrorReport> {
    if tx.len() != rx.len() {
        return Err(LinkError::LengthMismatch {
            transmitted: tx.len(),
            received: rx.len(),
        });
    }

    if let Some(&value) = tx.iter().chain(rx).find(|&&b| b > 1) {
        return Err(LinkError::invalid_parameter(
            "bits",
            format!("error evaluation expects 0/1 values, got {}", value),
        ));
    }

    let errors = tx
        .iter()
        .zip(rx)
        .filter(|(a, b)| a != b)
        .count();

    let bit_error_rate = if tx.is_empty() {
        f64::NAN
    } else {
        errors as f64 / tx.len() as f64
    };

    Ok(ErrorReport {
        bits: tx.len(),
        errors,
        bit_error_rate,
    })
}
