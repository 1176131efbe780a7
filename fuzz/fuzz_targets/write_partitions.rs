#![no_main]

use libfuzzer_sys::fuzz_target;
use adlersum::{Accumulator, ChecksumService, Digest, ServiceConfig};

fuzz_target!(|input: (u8, Vec<u16>, Vec<u8>)| {
    let (chunk_seed, cuts, data) = input;
    let chunk_size = usize::from(chunk_seed) * 4 + 1;

    let mut expected = Accumulator::new();
    expected.update_slice(&data);

    // Verify: per-byte and slice updates agree
    let mut bytewise = Accumulator::new();
    for &byte in &data {
        bytewise.update(byte);
    }
    assert_eq!(bytewise, expected);

    // Verify: any split into writes yields the one-shot digest
    let mut bounds: Vec<usize> = cuts
        .iter()
        .map(|&c| usize::from(c) % (data.len() + 1))
        .collect();
    bounds.push(0);
    bounds.push(data.len());
    bounds.sort_unstable();

    let config = ServiceConfig::default().with_chunk_size(chunk_size);
    let mut service = ChecksumService::new(config).unwrap();
    for window in bounds.windows(2) {
        let mut part = data[window[0]..window[1]].to_vec();
        let len = part.len();
        assert_eq!(service.write(&mut part, len).unwrap(), len);
    }
    assert_eq!(service.digest(), Digest::from_packed(expected.pack()));

    // Verify: the checkpoint word restores an identical state
    let checkpoint = service.serialize_checkpoint();
    let mut successor = ChecksumService::default();
    successor.restore_from_checkpoint(checkpoint);
    assert_eq!(successor.accumulator(), service.accumulator());

    // Verify: a read delivers exactly the digest and resets
    let mut out = [0u8; 8];
    assert_eq!(service.read(&mut out[..], 8).unwrap(), 8);
    assert_eq!(Digest::from_slice(&out), Some(Digest::from_packed(expected.pack())));
    assert_eq!(service.accumulator().pack(), 1);
});
