pub mod archive_server;

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;

/// Builds an in-memory ZIP. Names ending in `/` become directory entries.
pub fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut w = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        if name.ends_with('/') {
            w.add_directory(*name, SimpleFileOptions::default()).unwrap();
        } else {
            w.start_file(*name, SimpleFileOptions::default()).unwrap();
            w.write_all(data).unwrap();
        }
    }
    w.finish().unwrap().into_inner()
}

/// One file, `a.txt` containing `alpha`.
pub fn alpha_zip() -> Vec<u8> {
    build_zip(&[("a.txt", b"alpha".as_slice())])
}

/// A stored (uncompressed) archive whose single entry's payload has one byte
/// flipped after writing, so the entry fails its CRC check on read.
pub fn crc_mismatch_zip() -> Vec<u8> {
    const PAYLOAD: &[u8] = b"ZCTA5CE10,GEOID10,ALAND10,AWATER10";
    let mut w = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let opts = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    w.start_file("zcta.csv", opts).unwrap();
    w.write_all(PAYLOAD).unwrap();
    let mut bytes = w.finish().unwrap().into_inner();

    let at = bytes
        .windows(PAYLOAD.len())
        .position(|win| win == PAYLOAD)
        .unwrap();
    bytes[at] ^= 0xff;
    bytes
}
