//! Example of encoding and decoding with the standard and a custom alphabet

use emx_base91::{Alphabet, Decoder, Encoder, EncodingStats, STANDARD_SYMBOLS};

fn main() -> anyhow::Result<()> {
    println!("=== base91 Example ===\n");

    // Simulated JPEG header
    let data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46];

    let encoder = Encoder::default();
    let encoded = encoder.encode(&data);
    println!("Encoded {} bytes: {}", data.len(), encoded);

    let decoded = Decoder::default().decode(&encoded)?;
    assert_eq!(decoded, data);

    // Custom alphabet: the standard symbols in reverse order
    let reversed: Vec<u8> = STANDARD_SYMBOLS.iter().rev().copied().collect();
    let alphabet = Alphabet::new(&reversed)?;
    let custom = Encoder::new(&alphabet).encode(&data);
    println!("Custom alphabet:  {}", custom);
    assert_eq!(Decoder::new(&alphabet).decode(&custom)?, data);

    // Corrupt input keeps everything before the bad symbol
    let broken = format!("{} {}", &encoded[..4], &encoded[4..]);
    let partial = Decoder::default().decode_partial(&broken);
    if let Some(err) = partial.error {
        println!("\n{} ({} bytes recovered)", err, partial.data.len());
    }

    println!("\n{}", EncodingStats::measure(&encoder, &data));
    println!("\nRound-trip verification passed!");

    Ok(())
}
