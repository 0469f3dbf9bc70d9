//! String convenience layer over the frame codec.
//!
//! Strings travel as UTF-8 bytes inside ordinary frames; there is no
//! string-specific wire format.

use std::io::Read;

use crate::error::{Error, Result};
use crate::frame;

/// Compress a string into a length-prefixed GZIP frame of its UTF-8 bytes.
pub fn compress_text(text: &str) -> Result<Vec<u8>> {
    frame::compress(text.as_bytes())
}

/// Decompress a frame and decode the recovered bytes as UTF-8.
///
/// # Errors
///
/// Returns [`Error::InvalidData`] if the decompressed bytes are not valid
/// UTF-8, in addition to the failures of [`frame::decompress`].
pub fn decompress_text<R: Read>(source: R) -> Result<String> {
    let payload = frame::decompress(source)?;
    String::from_utf8(payload)
        .map_err(|err| Error::InvalidData(format!("decompressed text is not valid UTF-8: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_round_trip() {
        let frame = compress_text("héllo, wörld").unwrap();
        assert_eq!(decompress_text(frame.as_slice()).unwrap(), "héllo, wörld");
    }

    #[test]
    fn non_utf8_payload_is_invalid_data() {
        let frame = crate::frame::compress(&[0xff, 0xfe, 0x80]).unwrap();
        let err = decompress_text(frame.as_slice()).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }
}
