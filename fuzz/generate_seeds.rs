#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(width: u32, height: u32) -> Vec<u8> {
    let mut out = b"farbfeld".to_vec();
    out.extend_from_slice(&width.to_be_bytes());
    out.extend_from_slice(&height.to_be_bytes());
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 1x1 semi-transparent yellow
    let mut yellow = header(1, 1);
    yellow.extend_from_slice(&[0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x80, 0x80]);
    fs::write(format!("{dir}/yellow_1x1.ff"), yellow).unwrap();

    // 2x3 black/white/red
    let mut l = header(2, 3);
    for px in [[0u16, 0, 0, 0xffff], [0xffff; 4], [0, 0, 0, 0xffff], [0xffff; 4], [0, 0, 0, 0xffff], [0xffff, 0, 0, 0xffff]] {
        for c in px {
            l.extend_from_slice(&c.to_be_bytes());
        }
    }
    fs::write(format!("{dir}/tetromino_2x3.ff"), l).unwrap();

    // Zero-sized and truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/zero_width.ff"), header(0, 9)).unwrap();
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/magic_only.bin"), b"farbfeld").unwrap();
    fs::write(format!("{dir}/short_header.bin"), b"farbfeld\x00\x00\x00\x01\x00").unwrap();
    let mut cut = header(4, 4);
    cut.extend_from_slice(&[0x12; 37]);
    fs::write(format!("{dir}/cut_mid_row.ff"), cut).unwrap();
    fs::write(format!("{dir}/huge_claim.ff"), header(u32::MAX, u32::MAX)).unwrap();

    println!("Generated seed corpus in {dir}/");
}
