//! Shared test support: a manually-advanced clock and scripted hardware
//! mocks. Each integration test binary pulls in what it needs.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::error::Error;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use cane_traits::{Accelerometer, Button, Clock, GpsFeed, Haptic, HttpTransport, Ranger, SmsTransport};

/// Deterministic clock: `sleep` advances virtual time without blocking.
#[derive(Clone)]
pub struct ManualClock {
    origin: Instant,
    offset: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Total virtual time slept so far.
    pub fn elapsed(&self) -> Duration {
        *self.offset.lock().unwrap()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + *self.offset.lock().unwrap()
    }

    fn sleep(&self, d: Duration) {
        let mut off = self.offset.lock().unwrap();
        *off = off.saturating_add(d);
    }
}

/// Accelerometer replaying a script; `None` entries inject read failures.
/// The last entry repeats once the script is exhausted.
pub struct SeqAccel {
    seq: Vec<Option<[i16; 3]>>,
    idx: usize,
}

impl SeqAccel {
    pub fn new(seq: impl Into<Vec<Option<[i16; 3]>>>) -> Self {
        Self {
            seq: seq.into(),
            idx: 0,
        }
    }
}

impl Accelerometer for SeqAccel {
    fn read_axes(&mut self) -> Result<[i16; 3], Box<dyn Error + Send + Sync>> {
        let i = self.idx.min(self.seq.len().saturating_sub(1));
        self.idx += 1;
        match self.seq.get(i).copied().flatten() {
            Some(axes) => Ok(axes),
            None => Err("injected accel read failure".into()),
        }
    }
}

/// Ranger returning a fixed echo time in microseconds.
pub struct ConstRanger(pub u32);

impl Ranger for ConstRanger {
    fn echo_micros(&mut self, _timeout: Duration) -> Result<u32, Box<dyn Error + Send + Sync>> {
        Ok(self.0)
    }
}

/// Ranger whose echo never returns.
pub struct FailRanger;

impl Ranger for FailRanger {
    fn echo_micros(&mut self, _timeout: Duration) -> Result<u32, Box<dyn Error + Send + Sync>> {
        Err("echo timeout".into())
    }
}

/// Haptic spy recording every level change (`true` = high).
pub struct SpyHaptic {
    pub events: Rc<RefCell<Vec<bool>>>,
}

impl SpyHaptic {
    pub fn new() -> Self {
        Self {
            events: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn events_handle(&self) -> Rc<RefCell<Vec<bool>>> {
        self.events.clone()
    }
}

impl Haptic for SpyHaptic {
    fn set_high(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.events.borrow_mut().push(true);
        Ok(())
    }
    fn set_low(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.events.borrow_mut().push(false);
        Ok(())
    }
}

/// Button replaying a script of pressed states; the last value repeats.
pub struct ScriptButton {
    script: Vec<bool>,
    idx: usize,
}

impl ScriptButton {
    pub fn new(script: impl Into<Vec<bool>>) -> Self {
        Self {
            script: script.into(),
            idx: 0,
        }
    }

    /// Never pressed.
    pub fn released() -> Self {
        Self::new([false])
    }

    /// Pressed from sub-interval `n` (0-based) onward.
    pub fn pressed_from(n: usize) -> Self {
        let mut script = vec![false; n];
        script.push(true);
        Self::new(script)
    }
}

impl Button for ScriptButton {
    fn is_pressed(&mut self) -> Result<bool, Box<dyn Error + Send + Sync>> {
        let i = self.idx.min(self.script.len().saturating_sub(1));
        self.idx += 1;
        Ok(self.script.get(i).copied().unwrap_or(false))
    }
}

/// GPS feed with no data at all.
pub struct NoGps;

impl GpsFeed for NoGps {
    fn has_data(&mut self) -> bool {
        false
    }
    fn read_line(&mut self) -> Result<String, Box<dyn Error + Send + Sync>> {
        Err("no buffered line".into())
    }
}

/// GPS feed replaying queued lines.
pub struct SeqGps {
    lines: VecDeque<String>,
}

impl SeqGps {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl GpsFeed for SeqGps {
    fn has_data(&mut self) -> bool {
        !self.lines.is_empty()
    }
    fn read_line(&mut self) -> Result<String, Box<dyn Error + Send + Sync>> {
        self.lines.pop_front().ok_or_else(|| "drained".into())
    }
}

/// HTTP transport returning a scripted body or error.
pub struct ScriptHttp {
    pub response: Result<String, String>,
}

impl ScriptHttp {
    pub fn body(s: impl Into<String>) -> Self {
        Self {
            response: Ok(s.into()),
        }
    }

    pub fn failing(msg: impl Into<String>) -> Self {
        Self {
            response: Err(msg.into()),
        }
    }
}

impl HttpTransport for ScriptHttp {
    fn get(&mut self, _url: &str, _timeout: Duration) -> Result<String, Box<dyn Error + Send + Sync>> {
        match &self.response {
            Ok(body) => Ok(body.clone()),
            Err(msg) => Err(msg.clone().into()),
        }
    }
}

/// SMS spy recording sent bodies.
pub struct SpySms {
    pub sent: Rc<RefCell<Vec<String>>>,
}

impl SpySms {
    pub fn new() -> Self {
        Self {
            sent: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn sent_handle(&self) -> Rc<RefCell<Vec<String>>> {
        self.sent.clone()
    }
}

impl SmsTransport for SpySms {
    fn send(&mut self, body: &str, _timeout: Duration) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.sent.borrow_mut().push(body.to_string());
        Ok(())
    }
}

// ── Ordering probes: mocks that log the sequence of hardware touches ──────

pub type TouchLog = Rc<RefCell<Vec<&'static str>>>;

pub struct LoggingRanger {
    pub label: &'static str,
    pub log: TouchLog,
    pub us: u32,
}

impl Ranger for LoggingRanger {
    fn echo_micros(&mut self, _timeout: Duration) -> Result<u32, Box<dyn Error + Send + Sync>> {
        self.log.borrow_mut().push(self.label);
        Ok(self.us)
    }
}

pub struct LoggingButton {
    pub log: TouchLog,
    pub pressed: bool,
}

impl Button for LoggingButton {
    fn is_pressed(&mut self) -> Result<bool, Box<dyn Error + Send + Sync>> {
        self.log.borrow_mut().push("button");
        Ok(self.pressed)
    }
}

pub struct LoggingAccel {
    pub log: TouchLog,
    pub axes: [i16; 3],
}

impl Accelerometer for LoggingAccel {
    fn read_axes(&mut self) -> Result<[i16; 3], Box<dyn Error + Send + Sync>> {
        self.log.borrow_mut().push("accel");
        Ok(self.axes)
    }
}
