//! Response body transfer codings.
//!
//! A resource offers encodings as `(name, Encoder)` pairs; once the flow
//! has negotiated a non-identity coding, the assembler runs the matching
//! encoder over the finished body and labels the response with
//! `Content-Encoding`.

use bytes::Bytes;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fmt;
use std::io;
use std::io::Write;
use std::sync::Arc;

/// A whole-body encoder.
///
/// `Identity` passes bytes through untouched. `Gzip` compresses with
/// flate2. `Custom` wraps an arbitrary transform supplied by the resource.
#[derive(Clone)]
pub enum Encoder {
    Identity,
    Gzip,
    Custom(Arc<dyn Fn(&[u8]) -> io::Result<Vec<u8>> + Send + Sync>),
}

impl Encoder {
    pub fn encode(&self, input: Bytes) -> io::Result<Bytes> {
        match self {
            Self::Identity => Ok(input),
            Self::Gzip => {
                let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
                encoder.write_all(&input)?;
                Ok(Bytes::from(encoder.finish()?))
            }
            Self::Custom(transform) => Ok(Bytes::from(transform(&input)?)),
        }
    }
}

impl fmt::Debug for Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => f.write_str("Identity"),
            Self::Gzip => f.write_str("Gzip"),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    #[test]
    fn identity_passes_through() {
        let input = Bytes::from_static(b"hello");
        assert_eq!(Encoder::Identity.encode(input.clone()).unwrap(), input);
    }

    #[test]
    fn gzip_round_trips() {
        let input = Bytes::from_static(b"a body worth compressing, repeated, repeated, repeated");
        let encoded = Encoder::Gzip.encode(input.clone()).unwrap();
        assert_ne!(encoded, input);

        let mut decoded = Vec::new();
        GzDecoder::new(&encoded[..]).read_to_end(&mut decoded).unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn custom_transform_applies() {
        let upper = Encoder::Custom(Arc::new(|input| Ok(input.to_ascii_uppercase())));
        assert_eq!(upper.encode(Bytes::from_static(b"abc")).unwrap(), Bytes::from_static(b"ABC"));
    }
}
