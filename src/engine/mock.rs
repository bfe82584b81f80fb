//! Mock IO engine for testing
//!
//! Simulates a file of fixed size without any system calls. Every call is recorded,
//! and individual calls can be scripted to fail or to transfer fewer bytes than
//! requested.
//!
//! Clones share state, so a test can keep a handle while the engine itself is
//! boxed and consumed by a worker.

use super::{IOEngine, OperationType};
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};

/// Record of a call made through the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRecord {
    pub op_type: OperationType,
    /// Cursor position when the call was made (target offset for seeks)
    pub offset: u64,
    pub length: usize,
}

#[derive(Default)]
struct MockState {
    cursor: u64,
    records: Vec<OperationRecord>,
    calls: HashMap<OperationType, u64>,
    failures: HashMap<(OperationType, u64), io::ErrorKind>,
    short: HashMap<(OperationType, u64), usize>,
}

/// Mock IO engine
#[derive(Clone)]
pub struct MockEngine {
    size: u64,
    state: Arc<Mutex<MockState>>,
}

impl MockEngine {
    /// Create a mock over a virtual file of `size` bytes
    pub fn new(size: u64) -> Self {
        Self {
            size,
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Fail the `nth` (0-based) call of `op_type`
    pub fn fail_at(&self, op_type: OperationType, nth: u64, kind: io::ErrorKind) {
        self.state.lock().unwrap().failures.insert((op_type, nth), kind);
    }

    /// Make the `nth` read or write transfer only `bytes`
    pub fn short_at(&self, op_type: OperationType, nth: u64, bytes: usize) {
        self.state.lock().unwrap().short.insert((op_type, nth), bytes);
    }

    /// All calls made so far, in order
    pub fn records(&self) -> Vec<OperationRecord> {
        self.state.lock().unwrap().records.clone()
    }

    /// Number of calls of `op_type` made so far
    pub fn count(&self, op_type: OperationType) -> u64 {
        self.state.lock().unwrap().calls.get(&op_type).copied().unwrap_or(0)
    }

    /// Offsets of the reads and writes, in order
    pub fn transfer_offsets(&self) -> Vec<u64> {
        self.records()
            .into_iter()
            .filter(|r| matches!(r.op_type, OperationType::Read | OperationType::Write))
            .map(|r| r.offset)
            .collect()
    }

    fn call(&self, op_type: OperationType, length: usize) -> io::Result<usize> {
        let mut state = self.state.lock().unwrap();
        let nth = {
            let n = state.calls.entry(op_type).or_insert(0);
            let nth = *n;
            *n += 1;
            nth
        };

        let offset = state.cursor;
        state.records.push(OperationRecord { op_type, offset, length });

        if let Some(kind) = state.failures.get(&(op_type, nth)) {
            return Err(io::Error::new(*kind, format!("mock {} failure", op_type)));
        }

        let remaining = self.size.saturating_sub(offset) as usize;
        let transferred = state
            .short
            .get(&(op_type, nth))
            .copied()
            .unwrap_or(length)
            .min(length)
            .min(remaining);
        state.cursor += transferred as u64;
        Ok(transferred)
    }
}

impl IOEngine for MockEngine {
    fn seek(&mut self, offset: u64) -> io::Result<()> {
        {
            let mut state = self.state.lock().unwrap();
            state.cursor = offset;
        }
        self.call(OperationType::Seek, 0).map(|_| ())
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.call(OperationType::Read, buf.len())
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.call(OperationType::Write, buf.len())
    }

    fn sync(&mut self) -> io::Result<()> {
        self.call(OperationType::Sync, 0).map(|_| ())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_engine_basic() {
        let mut engine = MockEngine::new(16384);
        let mut buffer = vec![0u8; 4096];

        engine.seek(4096).unwrap();
        assert_eq!(engine.read(&mut buffer).unwrap(), 4096);
        assert_eq!(engine.read(&mut buffer).unwrap(), 4096);

        assert_eq!(engine.transfer_offsets(), vec![4096, 8192]);
        assert_eq!(engine.count(OperationType::Seek), 1);
        assert_eq!(engine.count(OperationType::Read), 2);
    }

    #[test]
    fn test_mock_engine_failure() {
        let mut engine = MockEngine::new(16384);
        engine.fail_at(OperationType::Write, 1, io::ErrorKind::Other);
        let buffer = vec![0u8; 4096];

        assert!(engine.write(&buffer).is_ok());
        let err = engine.write(&buffer).unwrap_err();
        assert_eq!(err.to_string(), "mock write failure");
        assert!(engine.write(&buffer).is_ok());
    }

    #[test]
    fn test_mock_engine_partial_transfer() {
        let mut engine = MockEngine::new(16384);
        engine.short_at(OperationType::Read, 0, 100);
        let mut buffer = vec![0u8; 4096];

        assert_eq!(engine.read(&mut buffer).unwrap(), 100);
        assert_eq!(engine.read(&mut buffer).unwrap(), 4096);
        assert_eq!(engine.transfer_offsets(), vec![0, 100]);
    }

    #[test]
    fn test_mock_engine_eof() {
        let mut engine = MockEngine::new(6000);
        let mut buffer = vec![0u8; 4096];

        assert_eq!(engine.read(&mut buffer).unwrap(), 4096);
        assert_eq!(engine.read(&mut buffer).unwrap(), 6000 - 4096);
        assert_eq!(engine.read(&mut buffer).unwrap(), 0);
    }

    #[test]
    fn test_mock_engine_clones_share_state() {
        let handle = MockEngine::new(8192);
        let mut boxed: Box<dyn IOEngine> = Box::new(handle.clone());

        boxed.sync().unwrap();
        assert_eq!(handle.count(OperationType::Sync), 1);
        assert_eq!(handle.records()[0].op_type, OperationType::Sync);
    }
}
