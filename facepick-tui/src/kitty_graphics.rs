//! Kitty graphics protocol commands for raw RGBA sample files
//!
//! See: https://sw.kovidgoyal.net/kitty/graphics-protocol/

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::io::Write;
use std::path::Path;

/// Transmit an RGBA file by path and display it at the cursor.
///
/// The terminal reads the file itself, so only the encoded path is sent.
/// The image is scaled into `cols` x `rows` cells and the cursor stays put.
pub fn transmit_file(
    path: &Path,
    width: u32,
    height: u32,
    image_id: u32,
    cols: u16,
    rows: u16,
) -> anyhow::Result<Vec<u8>> {
    let mut output = Vec::new();
    let encoded = BASE64.encode(path.to_string_lossy().as_bytes());

    // a=T transmit+display, f=32 RGBA, t=f regular file, q=2 no replies, C=1 keep cursor
    write!(
        output,
        "\x1b_Ga=T,f=32,t=f,s={},v={},i={},c={},r={},q=2,C=1;{}\x1b\\",
        width, height, image_id, cols, rows, encoded
    )?;

    Ok(output)
}

/// Delete an image and free its data
pub fn delete_image(image_id: u32) -> anyhow::Result<Vec<u8>> {
    let mut output = Vec::new();
    write!(output, "\x1b_Ga=d,d=I,i={},q=2\x1b\\", image_id)?;
    Ok(output)
}
