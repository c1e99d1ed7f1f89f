/// Payload boundary: flat bytes in, flat bytes plus their shape out
use crate::error::{LinkError, LinkResult};
use crate::utils::io::read_binary_file;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// Shape used to fold the recovered bytes back into the source layout.
/// The signal chain never looks inside.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub shape: Vec<usize>,
}

impl Dimensions {
    pub fn flat(len: usize) -> Self {
        Self { shape: vec![len] }
    }

    pub fn element_count(&self) -> usize {
        self.shape.iter().product()
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.shape.iter().map(|d| d.to_string()).collect();
        write!(f, "{}", parts.join("x"))
    }
}

/// Parses `HxWxC` style shapes, e.g. `120x80x3`
impl FromStr for Dimensions {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let shape = s
            .split(['x', 'X', ','])
            .map(|part| {
                part.trim().parse::<usize>().map_err(|e| {
                    LinkError::invalid_parameter("shape", format!("'{}': {}", part, e))
                })
            })
            .collect::<LinkResult<Vec<usize>>>()?;
        if shape.is_empty() || shape.contains(&0) {
            return Err(LinkError::invalid_parameter(
                "shape",
                format!("'{}' has an empty axis", s),
            ));
        }
        Ok(Self { shape })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payload {
    pub bytes: Vec<u8>,
    pub dimensions: Dimensions,
}

impl Payload {
    pub fn new(bytes: Vec<u8>, dimensions: Dimensions) -> LinkResult<Self> {
        check_size("payload loader", bytes.len(), &dimensions)?;
        Ok(Self { bytes, dimensions })
    }

    pub fn flat(bytes: Vec<u8>) -> Self {
        let dimensions = Dimensions::flat(bytes.len());
        Self { bytes, dimensions }
    }

    /// Raw file contents; with `shape` given, its product must equal the file size
    pub fn from_file(path: &Path, shape: Option<Dimensions>) -> LinkResult<Self> {
        let bytes = read_binary_file(path)?;
        let payload = match shape {
            Some(dimensions) => Self::new(bytes, dimensions)?,
            None => Self::flat(bytes),
        };
        info!(
            "Loaded payload {} ({} bytes, shape {})",
            path.display(),
            payload.bytes.len(),
            payload.dimensions
        );
        Ok(payload)
    }

    pub fn random<R: Rng>(len: usize, rng: &mut R) -> Self {
        let bytes = (0..len).map(|_| rng.random()).collect();
        Self::flat(bytes)
    }

    /// Fold recovered bytes back under the original dimensions
    pub fn reconstruct(bytes: Vec<u8>, dimensions: &Dimensions) -> LinkResult<Self> {
        check_size("payload reconstruction", bytes.len(), dimensions)?;
        Ok(Self {
            bytes,
            dimensions: dimensions.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn check_size(stage: &'static str, len: usize, dimensions: &Dimensions) -> LinkResult<()> {
    if dimensions.element_count() != len {
        return Err(LinkError::invalid_length(
            stage,
            format!(
                "{} bytes cannot fill shape {} ({} elements)",
                len,
                dimensions,
                dimensions.element_count()
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::io::Write;

    #[test]
    fn test_shape_parsing() {
        let dims: Dimensions = "4x3x2".parse().unwrap();
        assert_eq!(dims.shape, vec![4, 3, 2]);
        assert_eq!(dims.element_count(), 24);
        assert_eq!(dims.to_string(), "4x3x2");
        assert!("4x0".parse::<Dimensions>().is_err());
        assert!("abc".parse::<Dimensions>().is_err());
    }

    #[test]
    fn test_reconstruct_checks_size() {
        let dims = Dimensions { shape: vec![2, 2] };
        assert!(Payload::reconstruct(vec![1, 2, 3, 4], &dims).is_ok());
        assert!(matches!(
            Payload::reconstruct(vec![1, 2, 3], &dims),
            Err(LinkError::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_from_file_with_and_without_shape() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[10, 20, 30, 40, 50, 60]).unwrap();

        let flat = Payload::from_file(file.path(), None).unwrap();
        assert_eq!(flat.dimensions, Dimensions::flat(6));

        let shaped = Payload::from_file(file.path(), Some("2x3".parse().unwrap())).unwrap();
        assert_eq!(shaped.dimensions.shape, vec![2, 3]);

        assert!(Payload::from_file(file.path(), Some("4x2".parse().unwrap())).is_err());
    }

    #[test]
    fn test_random_payload_is_seeded() {
        let mut a = rand::rngs::StdRng::seed_from_u64(5);
        let mut b = rand::rngs::StdRng::seed_from_u64(5);
        assert_eq!(Payload::random(32, &mut a), Payload::random(32, &mut b));
    }
}
