//! Magic-number classification of remote results

/// Zip local file header
pub const ZIP_SIGNATURE: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// JPEG start-of-image followed by a JFIF or Exif marker
pub const JPEG_SIGNATURES: [[u8; 4]; 2] = [[0xFF, 0xD8, 0xFF, 0xE0], [0xFF, 0xD8, 0xFF, 0xE1]];

/// `%PDF`
pub const PDF_SIGNATURE: [u8; 4] = *b"%PDF";

/// Kind of single document a tool produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Pdf,
    Jpeg,
}

impl FileKind {
    pub fn mime_type(self) -> &'static str {
        match self {
            FileKind::Pdf => "application/pdf",
            FileKind::Jpeg => "image/jpeg",
        }
    }

    /// Extension (with the dot) expected on archive entries of this kind
    pub fn extension(self) -> &'static str {
        match self {
            FileKind::Pdf => ".pdf",
            FileKind::Jpeg => ".jpg",
        }
    }

    fn matches(self, leading: &[u8]) -> bool {
        match self {
            FileKind::Pdf => leading == PDF_SIGNATURE,
            FileKind::Jpeg => JPEG_SIGNATURES.iter().any(|sig| leading == sig),
        }
    }
}

/// Shape of a remote result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// One document of the expected kind
    Single { kind: FileKind, data: Vec<u8> },
    /// A zip archive, still to be filtered
    Archive(Vec<u8>),
    /// Neither; carries the leading bytes for logging
    Unrecognized { leading: Vec<u8> },
}

/// Classify `data` by its first four bytes.
///
/// A zip signature always wins, whatever the tool expected or the client
/// asked for; only then is the expected single-document kind tested.
pub fn classify(data: Vec<u8>, expected: FileKind) -> Payload {
    let leading = &data[..data.len().min(4)];

    if leading == ZIP_SIGNATURE {
        Payload::Archive(data)
    } else if expected.matches(leading) {
        Payload::Single {
            kind: expected,
            data,
        }
    } else {
        Payload::Unrecognized {
            leading: leading.to_vec(),
        }
    }
}
