// Integration tests for the checksum service request surface
// Tests cover: read/write semantics, reset-on-read, chunking, live update

use std::io::Cursor;

use adlersum::{
    Accumulator, ChecksumService, CheckpointStore, Digest, LifecycleState, MemoryCheckpointStore,
    ReadSource, ServiceConfig, ServiceError, StartReason, TransferError, TransferSource,
    WriteSink,
};
use bytes::{Bytes, BytesMut};
use proptest::prelude::*;

fn running_service() -> ChecksumService {
    let mut service = ChecksumService::default();
    service
        .start(StartReason::Fresh, &mut MemoryCheckpointStore::new())
        .expect("fresh start never fails");
    service
}

fn read_digest(service: &mut ChecksumService) -> [u8; 8] {
    let mut out = [0u8; 8];
    service.read(&mut out[..], 8).expect("read should succeed");
    out
}

/// Source that serves `data` but refuses the copy at `fail_offset`.
struct FailingSource {
    data: Bytes,
    fail_offset: u64,
}

impl TransferSource for FailingSource {
    fn copy_into(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), TransferError> {
        if offset == self.fail_offset {
            return Err(TransferError::Refused(-14));
        }
        self.data.copy_into(offset, buf)
    }
}

// ============================================================================
// Read / Write Semantics
// ============================================================================

#[test]
fn test_abc_then_reset() {
    let mut service = running_service();

    let written = service.write(&mut Bytes::from_static(b"abc"), 3).unwrap();
    assert_eq!(written, 3);

    assert_eq!(&read_digest(&mut service), b"024d0127");
    assert_eq!(
        &read_digest(&mut service),
        b"00000001",
        "A successful read must reset the state"
    );
}

#[test]
fn test_short_read_does_not_reset() {
    let mut service = running_service();
    service.write(&mut b"ab".to_vec(), 2).unwrap();

    let mut small = [0u8; 7];
    let err = service.read(&mut small[..], 7).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidArgument { .. }));

    service.write(&mut b"c".to_vec(), 1).unwrap();
    assert_eq!(
        &read_digest(&mut service),
        b"024d0127",
        "Rejected read must leave earlier writes in place"
    );
}

#[test]
fn test_write_zero_is_noop() {
    let mut service = running_service();
    let before = *service.accumulator();

    assert_eq!(service.write(&mut Bytes::new(), 0).unwrap(), 0);
    assert_eq!(*service.accumulator(), before);
}

#[test]
fn test_read_into_growable_sink() {
    let mut service = running_service();
    service.write(&mut b"Wikipedia".to_vec(), 9).unwrap();

    let mut out = BytesMut::new();
    assert_eq!(service.read(&mut out, 64).unwrap(), 8);
    assert_eq!(&out[..], b"11e60398");
}

#[test]
fn test_service_survives_errors() {
    let mut service = running_service();

    let mut short = b"xy".to_vec();
    assert!(service.write(&mut short, 10).is_err());
    assert!(service.read(&mut [0u8; 4][..], 4).is_err());

    service.write(&mut b"abc".to_vec(), 3).unwrap();
    assert_eq!(&read_digest(&mut service), b"024d0127");
}

// ============================================================================
// Chunked Transfers
// ============================================================================

#[test]
fn test_large_write_matches_one_shot() {
    let data: Vec<u8> = (0..10_000).map(|i| (i * 7 + 13) as u8).collect();

    let mut expected = Accumulator::new();
    expected.update_slice(&data);

    let mut service = running_service();
    let mut source = Bytes::from(data.clone());
    assert_eq!(service.write(&mut source, data.len()).unwrap(), data.len());

    assert_eq!(service.digest(), Digest::from_packed(expected.pack()));
}

#[test]
fn test_small_chunk_config() {
    let data: Vec<u8> = (0..777).map(|i| (i % 256) as u8).collect();
    let config = ServiceConfig::default().with_chunk_size(10);

    let mut chunked = ChecksumService::new(config).unwrap();
    chunked.write(&mut data.clone(), data.len()).unwrap();

    let mut default = running_service();
    default.write(&mut data.clone(), data.len()).unwrap();

    assert_eq!(chunked.digest(), default.digest());
}

#[test]
fn test_write_from_reader() {
    let data: Vec<u8> = (0..3000).map(|i| (i % 97) as u8).collect();

    let mut service = running_service();
    let mut source = ReadSource::new(Cursor::new(data.clone()));
    service.write(&mut source, data.len()).unwrap();
    assert_eq!(source.position(), 3000);

    let mut expected = Accumulator::new();
    expected.update_slice(&data);
    assert_eq!(service.accumulator(), &expected);
}

#[test]
fn test_read_into_writer() {
    let mut service = running_service();
    service.write(&mut b"abc".to_vec(), 3).unwrap();

    let mut sink = WriteSink::new(Vec::new());
    service.read(&mut sink, 8).unwrap();
    assert_eq!(sink.into_inner(), b"024d0127");
}

#[test]
fn test_failed_write_is_not_atomic() {
    let data: Vec<u8> = (0..2500).map(|i| (i % 256) as u8).collect();
    let mut source = FailingSource {
        data: Bytes::from(data.clone()),
        fail_offset: 2048,
    };

    let mut service = running_service();
    let err = service.write(&mut source, data.len()).unwrap_err();
    assert!(matches!(err, ServiceError::Transfer(TransferError::Refused(-14))));

    let mut expected = Accumulator::new();
    expected.update_slice(&data[..2048]);
    assert_eq!(
        service.accumulator(),
        &expected,
        "Chunks before the failure stay folded in"
    );
}

// ============================================================================
// Live Update
// ============================================================================

#[test]
fn test_handoff_preserves_state() {
    let mut store = MemoryCheckpointStore::new();

    let mut old = ChecksumService::default();
    old.start(StartReason::Fresh, &mut store).unwrap();
    old.write(&mut b"Wiki".to_vec(), 4).unwrap();
    assert!(old.prepare_update());
    let published = old.save_state(&mut store).unwrap();
    assert_eq!(store.retrieve("adler_sum"), Ok(published));

    let mut new = ChecksumService::default();
    new.start(StartReason::LiveUpdate, &mut store).unwrap();
    assert_eq!(new.state(), LifecycleState::Running);
    assert!(
        !store.contains("adler_sum"),
        "Checkpoint must be deleted once consumed"
    );

    new.write(&mut b"pedia".to_vec(), 5).unwrap();
    assert_eq!(&read_digest(&mut new), b"11e60398");
}

#[test]
fn test_restart_discards_checkpoint_state() {
    let mut store = MemoryCheckpointStore::new();
    store.publish("adler_sum", 0x024d_0127, true).unwrap();

    let mut service = ChecksumService::default();
    service.start(StartReason::Restarting, &mut store).unwrap();
    assert_eq!(&read_digest(&mut service), b"00000001");
}

#[test]
fn test_live_update_missing_checkpoint() {
    let mut service = ChecksumService::default();
    let err = service
        .start(StartReason::LiveUpdate, &mut MemoryCheckpointStore::new())
        .unwrap_err();

    assert!(matches!(err, ServiceError::Checkpoint(_)));
    assert_eq!(service.state(), LifecycleState::LiveUpdateInit);
    assert_eq!(service.digest().as_bytes(), b"00000001");
}

#[test]
fn test_custom_checkpoint_key() {
    let config = ServiceConfig::default().with_checkpoint_key("sum_v2");
    let mut store = MemoryCheckpointStore::new();

    let mut old = ChecksumService::new(config).unwrap();
    old.start(StartReason::Fresh, &mut store).unwrap();
    old.save_state(&mut store).unwrap();
    assert!(store.contains("sum_v2"));
    assert!(!store.contains("adler_sum"));
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_chunk_invariance(
        data in proptest::collection::vec(any::<u8>(), 0..4096),
        cuts in proptest::collection::vec(any::<usize>(), 0..8),
        chunk_size in 1usize..=1024,
    ) {
        let mut one_shot = Accumulator::new();
        one_shot.update_slice(&data);

        let mut bytewise = Accumulator::new();
        for &byte in &data {
            bytewise.update(byte);
        }
        prop_assert_eq!(bytewise, one_shot);

        // Split into arbitrary writes, each through the chunked path.
        let mut bounds: Vec<usize> = cuts.iter().map(|c| c % (data.len() + 1)).collect();
        bounds.push(0);
        bounds.push(data.len());
        bounds.sort_unstable();

        let config = ServiceConfig::default().with_chunk_size(chunk_size);
        let mut service = ChecksumService::new(config).unwrap();
        for window in bounds.windows(2) {
            let mut part = data[window[0]..window[1]].to_vec();
            let len = part.len();
            prop_assert_eq!(service.write(&mut part, len).unwrap(), len);
        }

        prop_assert_eq!(service.accumulator().pack(), one_shot.pack());
    }

    #[test]
    fn prop_restore_equivalence(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
        let mut original = Accumulator::new();
        original.update_slice(&data);
        prop_assert!(original.is_canonical());

        let checkpoint = original.pack();
        let mut restored = Accumulator::new();
        restored.unpack(checkpoint);

        prop_assert_eq!(restored.pack(), checkpoint);
        prop_assert_eq!(Digest::from_packed(checkpoint).to_packed(), checkpoint);
    }
}
