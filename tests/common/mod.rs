//! Shared test infrastructure for status-light integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::{Cell, RefCell};
use heapless::{Deque, String, Vec};
use status_light::{
    Color, Connection, LedStrip, LineRead, Link, PinIo, PinMode, ReadLine, TimeDuration,
    TimeInstant, TimeSource, TransportError,
};
use std::rc::Rc;

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_add(duration.0).map(TestInstant)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Pin I/O
// ============================================================================

pub const LINES: usize = 16;

/// Mock GPIO bank. All lines idle high, like pulled-up open buttons.
pub struct MockIo {
    levels: [bool; LINES],
    analog: [u16; LINES],
    modes: [Option<PinMode>; LINES],
}

impl MockIo {
    pub fn new() -> Self {
        Self {
            levels: [true; LINES],
            analog: [0; LINES],
            modes: [None; LINES],
        }
    }

    pub fn set_level(&mut self, line: u8, high: bool) {
        self.levels[line as usize] = high;
    }

    pub fn level(&self, line: u8) -> bool {
        self.levels[line as usize]
    }

    /// Closes an active-low button.
    pub fn press(&mut self, line: u8) {
        self.set_level(line, false);
    }

    pub fn release(&mut self, line: u8) {
        self.set_level(line, true);
    }

    pub fn set_analog(&mut self, line: u8, value: u16) {
        self.analog[line as usize] = value;
    }

    pub fn mode(&self, line: u8) -> Option<PinMode> {
        self.modes[line as usize]
    }
}

impl PinIo for MockIo {
    fn configure(&mut self, line: u8, mode: PinMode) {
        self.modes[line as usize] = Some(mode);
    }

    fn read(&mut self, line: u8) -> bool {
        self.levels[line as usize]
    }

    fn write(&mut self, line: u8, high: bool) {
        self.levels[line as usize] = high;
    }

    fn read_analog(&mut self, line: u8) -> u16 {
        self.analog[line as usize]
    }

    fn write_analog(&mut self, line: u8, value: u16) {
        self.analog[line as usize] = value;
    }
}

// ============================================================================
// Mock LED Strip
// ============================================================================

/// Mock strip that records fills and shows
pub struct MockStrip {
    buffer: Color,
    shown: Vec<Color, 64>,
    fills: usize,
}

impl MockStrip {
    pub fn new() -> Self {
        Self {
            buffer: status_light::BLACK,
            shown: Vec::new(),
            fills: 0,
        }
    }

    /// Colors committed with `show`, oldest first (first 64 only)
    pub fn shown(&self) -> &[Color] {
        &self.shown
    }

    pub fn last_shown(&self) -> Option<Color> {
        self.shown.last().copied()
    }

    pub fn fills(&self) -> usize {
        self.fills
    }
}

impl LedStrip for MockStrip {
    fn fill(&mut self, color: Color) {
        self.buffer = color;
        self.fills += 1;
    }

    fn show(&mut self) {
        let _ = self.shown.push(self.buffer);
    }
}

// ============================================================================
// Mock Network Link
// ============================================================================

/// One scripted line read.
#[derive(Debug, Clone, Copy)]
pub enum Script {
    /// A complete line.
    Line(&'static str),
    /// The timeout expires after these bytes arrived.
    Partial(&'static str),
}

fn play(script: Option<Script>, buf: &mut [u8]) -> LineRead {
    let (text, complete) = match script {
        Some(Script::Line(text)) => (text, true),
        Some(Script::Partial(text)) => (text, false),
        None => return LineRead::TimedOut(0),
    };
    let n = text.len().min(buf.len());
    buf[..n].copy_from_slice(&text.as_bytes()[..n]);
    if complete {
        LineRead::Line(n)
    } else {
        LineRead::TimedOut(n)
    }
}

/// Inbound connection replaying scripted lines
pub struct MockConnection {
    lines: Deque<Script, 40>,
    reads: Rc<Cell<usize>>,
    replies: Rc<RefCell<Vec<String<32>, 8>>>,
}

impl ReadLine for MockConnection {
    fn read_line(&mut self, buf: &mut [u8], _timeout_ms: u64) -> LineRead {
        self.reads.set(self.reads.get() + 1);
        play(self.lines.pop_front(), buf)
    }
}

impl Connection for MockConnection {
    fn respond(&mut self, status_line: &str) {
        let mut reply = String::new();
        let _ = reply.push_str(status_line);
        let _ = self.replies.borrow_mut().push(reply);
    }
}

/// Outbound response with at most one line
pub struct MockResponse {
    line: Option<Script>,
}

impl ReadLine for MockResponse {
    fn read_line(&mut self, buf: &mut [u8], _timeout_ms: u64) -> LineRead {
        play(self.line.take(), buf)
    }
}

/// Scripted link: queued inbound connections and queued outbound responses.
///
/// A `get` with no queued response succeeds but its read times out empty.
pub struct MockLink {
    inbound: Deque<MockConnection, 4>,
    responses: Deque<Result<Script, TransportError>, 8>,
    requests: Vec<String<128>, 16>,
    reads: Rc<Cell<usize>>,
    replies: Rc<RefCell<Vec<String<32>, 8>>>,
}

impl MockLink {
    pub fn new() -> Self {
        Self {
            inbound: Deque::new(),
            responses: Deque::new(),
            requests: Vec::new(),
            reads: Rc::new(Cell::new(0)),
            replies: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Queues an inbound connection that will deliver `lines`.
    pub fn push_inbound(&mut self, lines: &[Script]) {
        let mut queued = Deque::new();
        for line in lines {
            let _ = queued.push_back(*line);
        }
        let _ = self.inbound.push_back(MockConnection {
            lines: queued,
            reads: Rc::clone(&self.reads),
            replies: Rc::clone(&self.replies),
        });
    }

    /// Queues the outcome of the next outbound request.
    pub fn push_response(&mut self, response: Result<Script, TransportError>) {
        let _ = self.responses.push_back(response);
    }

    /// URLs requested so far, oldest first
    pub fn requests(&self) -> &[String<128>] {
        &self.requests
    }

    /// Lines sent back on inbound connections
    pub fn replies(&self) -> Vec<String<32>, 8> {
        self.replies.borrow().clone()
    }

    /// Number of line reads made on inbound connections
    pub fn inbound_reads(&self) -> usize {
        self.reads.get()
    }
}

impl Link for MockLink {
    type Inbound = MockConnection;
    type Response = MockResponse;

    fn accept(&mut self) -> Option<MockConnection> {
        self.inbound.pop_front()
    }

    fn get(&mut self, url: &str) -> Result<MockResponse, TransportError> {
        let mut recorded = String::new();
        let _ = recorded.push_str(url);
        let _ = self.requests.push(recorded);

        match self.responses.pop_front() {
            Some(Ok(line)) => Ok(MockResponse { line: Some(line) }),
            Some(Err(err)) => Err(err),
            None => Ok(MockResponse { line: None }),
        }
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub const ENDPOINT: &str = "http://10.0.0.5";
pub const PUSH_CALL: &str = "http://10.0.0.5:9000/state/set?state=call&remote";
pub const PULL: &str = "http://10.0.0.5:9000/state/get?remote";
