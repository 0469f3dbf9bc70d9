use anyhow::Result;
use serde::{Deserialize, Serialize};

use flatepack::Error;
use flatepack::frame::{self, LENGTH_PREFIX_SIZE};

#[test]
fn bytes_round_trip() -> Result<()> {
    let payloads: [&[u8]; 4] = [
        b"hello, world",
        b"a",
        &[0u8; 257],
        b"the quick brown fox jumps over the lazy dog",
    ];
    for payload in payloads {
        let framed = frame::compress(payload)?;
        assert_eq!(frame::decompress(framed.as_slice())?, payload);
    }
    Ok(())
}

#[test]
fn empty_input_round_trip() -> Result<()> {
    let framed = frame::compress(&[])?;
    assert_eq!(&framed[..LENGTH_PREFIX_SIZE], &0u32.to_le_bytes());
    assert!(framed.len() > LENGTH_PREFIX_SIZE, "GZIP stream is missing");
    assert!(frame::decompress(framed.as_slice())?.is_empty());
    Ok(())
}

#[test]
fn large_buffer_round_trip() -> Result<()> {
    let payload: Vec<u8> = (0..(1 << 20) + 7).map(|i| (i * 31 % 251) as u8).collect();
    let framed = frame::compress(&payload)?;
    assert_eq!(
        &framed[..LENGTH_PREFIX_SIZE],
        &(payload.len() as u32).to_le_bytes()
    );
    assert_eq!(frame::decompress(framed.as_slice())?, payload);
    Ok(())
}

#[test]
fn frame_declares_the_original_length() -> Result<()> {
    let framed = frame::compress(b"0123456789")?;
    assert_eq!(&framed[..LENGTH_PREFIX_SIZE], &10u32.to_le_bytes());
    assert_eq!(frame::declared_len(&framed)?, 10);
    Ok(())
}

#[test]
fn trailing_bytes_after_the_frame_are_left_alone() -> Result<()> {
    let mut framed = frame::compress(b"payload")?;
    framed.extend_from_slice(b"trailing garbage");
    assert_eq!(frame::decompress(framed.as_slice())?, b"payload");
    Ok(())
}

#[test]
fn corrupt_gzip_payload_is_invalid_data() {
    let mut framed = 5u32.to_le_bytes().to_vec();
    framed.extend_from_slice(b"definitely not a gzip stream");
    let err = frame::decompress(framed.as_slice()).unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)), "got {err:?}");
}

#[test]
fn truncated_prefix_is_invalid_data() {
    let err = frame::decompress([0x01u8, 0x02].as_slice()).unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)), "got {err:?}");
}

#[test]
fn stream_shorter_than_declared_is_invalid_data() -> Result<()> {
    let mut framed = frame::compress(b"short payload")?;
    // Declare more bytes than the GZIP stream will ever produce.
    framed[..LENGTH_PREFIX_SIZE].copy_from_slice(&100u32.to_le_bytes());
    let err = frame::decompress(framed.as_slice()).unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)), "got {err:?}");
    Ok(())
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Telemetry {
    node: String,
    samples: Vec<u32>,
    healthy: bool,
}

#[test]
fn typed_round_trip() -> Result<()> {
    let value = Telemetry {
        node: "edge-7".to_string(),
        samples: vec![3, 1, 4, 1, 5, 9, 2, 6],
        healthy: true,
    };
    let framed = frame::compress_value(&value, |v| Ok(serde_json::to_vec(v)?))?;
    let back: Telemetry =
        frame::decompress_value(framed.as_slice(), |bytes| Ok(serde_json::from_slice(bytes)?))?;
    assert_eq!(back, value);
    Ok(())
}

#[test]
fn serializer_failure_propagates_unchanged() {
    let err = frame::compress_value(&42u32, |_| anyhow::bail!("serializer exploded")).unwrap_err();
    assert!(matches!(err, Error::Convert(_)), "got {err:?}");
    assert!(err.to_string().contains("serializer exploded"));
}

#[test]
fn deserializer_failure_propagates_unchanged() -> Result<()> {
    let framed = frame::compress(b"not json at all")?;
    let err = frame::decompress_value(framed.as_slice(), |bytes| {
        Ok(serde_json::from_slice::<Telemetry>(bytes)?)
    })
    .unwrap_err();
    assert!(matches!(err, Error::Convert(_)), "got {err:?}");
    Ok(())
}
