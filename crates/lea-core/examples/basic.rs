//! Encrypts a few blocks through the batch path and checks them against single-block calls.

use lea_core::{BatchConfig, Lea};

fn main() -> Result<(), lea_core::Error> {
    let key = [
        0x0f, 0x1e, 0x2d, 0x3c, 0x4b, 0x5a, 0x69, 0x78, 0x87, 0x96, 0xa5, 0xb4, 0xc3, 0xd2, 0xe1,
        0xf0,
    ];
    let cipher = Lea::new(&key)?;

    let mut data = [0u8; 48];
    data[..16].copy_from_slice(b"first block here");
    data[16..32].copy_from_slice(b"second blockhere");
    data[32..].copy_from_slice(b"third block here");

    let mut ct = [0u8; 48];
    cipher.process_blocks(&BatchConfig::encrypt().parallel(true), &data, None, &mut ct)?;

    for (plain, cipher_block) in data.chunks_exact(16).zip(ct.chunks_exact(16)) {
        let mut block = [0u8; 16];
        block.copy_from_slice(plain);
        assert_eq!(cipher.encrypt_block(&block), cipher_block);
    }

    println!("example succeeded; batch output matches single-block LEA");
    Ok(())
}
