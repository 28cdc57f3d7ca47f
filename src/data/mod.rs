use std::fs;
use std::io::Cursor;
use std::path::Path;

use bincode::ErrorKind;
use thiserror::Error;

use crate::graph::graph::SafetyNetwork;

/// Compression level used when encoding a precomputed network.
///
/// Distance matrices are mostly repeated infinities and compress well, so the
/// level favours size over encoding time.
const NETWORK_COMPRESSION_LEVEL: i32 = 19;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] Box<ErrorKind>),
    #[error("Compression error: {0}")]
    Compression(#[source] std::io::Error),
    #[error("network data is inconsistent")]
    Inconsistent,
}

pub fn serialize_network(network: &SafetyNetwork) -> Result<Vec<u8>, DataError> {
    let encoded = bincode::serialize(network)?;
    let mut cursor = Cursor::new(encoded);
    zstd::stream::encode_all(&mut cursor, NETWORK_COMPRESSION_LEVEL).map_err(DataError::Compression)
}

pub fn deserialize_network(bytes: &[u8]) -> Result<SafetyNetwork, DataError> {
    let mut cursor = Cursor::new(bytes);
    let decoded = zstd::stream::decode_all(&mut cursor).map_err(DataError::Compression)?;
    let network: SafetyNetwork = bincode::deserialize(&decoded)?;
    if !network.is_consistent() {
        return Err(DataError::Inconsistent);
    }
    Ok(network)
}

pub fn write_network_to_file<P: AsRef<Path>>(
    network: &SafetyNetwork,
    path: P,
) -> Result<(), DataError> {
    let bytes = serialize_network(network)?;
    fs::write(path, bytes)?;
    Ok(())
}

pub fn read_network_from_file<P: AsRef<Path>>(path: P) -> Result<SafetyNetwork, DataError> {
    let bytes = fs::read(path)?;
    deserialize_network(&bytes)
}
