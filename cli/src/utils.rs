use std::fs;
use std::io::{self, Read};
use std::str::FromStr;

use asn1::Asn1Object;
use gossl::decoder::Decoder;
use pem::Pem;

use crate::error::Result;

/// Read input from a file or stdin.
///
/// `None` and `"-"` both select stdin.
pub(crate) fn read_input(file: Option<&str>) -> Result<Vec<u8>> {
    match file {
        Some("-") | None => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            Ok(buffer)
        }
        Some(path) => Ok(fs::read(path)?),
    }
}

/// Decode ASN.1 objects from PEM or raw DER input. PEM is tried first.
pub(crate) fn decode_objects(data: &[u8]) -> Result<Vec<Asn1Object>> {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(pem) = Pem::from_str(text) {
            let der: Vec<u8> = pem.decode()?;
            let (objects, _) = asn1::read_objects(&der, 0, der.len())?;
            return Ok(objects);
        }
    }

    let (objects, _) = asn1::read_objects(data, 0, data.len())?;
    Ok(objects)
}

/// Renders bytes as colon-separated hex, `line_bytes` per line, each line
/// prefixed with `indent`.
pub(crate) fn format_hex(data: &[u8], line_bytes: usize, indent: &str) -> String {
    let mut lines = Vec::new();
    let mut line = Vec::with_capacity(line_bytes);
    for (i, b) in data.iter().enumerate() {
        line.push(format!("{b:02x}"));
        if line.len() == line_bytes || i + 1 == data.len() {
            lines.push(format!("{indent}{}", line.join(":")));
            line.clear();
        }
    }

    lines.join("\n")
}
