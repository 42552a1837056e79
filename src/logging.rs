//! Minimal category/level logger for chip-internal tracing.
//!
//! The chip is a leaf component with no business calling into `log`/`tracing`
//! itself; callers that embed it into a larger bus are free to do that at a
//! higher level. What's useful here is a cheap, dependency-free way to trace
//! the handful of state transitions worth watching when a ROM misbehaves:
//! timer expiry, an interrupt latch, a rejected `tick()`.
//!
//! # Usage
//!
//! ```rust
//! use emu_riot6532::logging::{LogConfig, LogLevel, LogCategory};
//!
//! LogConfig::global().set_level(LogCategory::Timer, LogLevel::Debug);
//! if LogConfig::global().should_log(LogCategory::Timer, LogLevel::Debug) {
//!     eprintln!("timer: expired");
//! }
//! ```

use std::sync::atomic::{AtomicU8, Ordering};

/// Log level for controlling verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Off = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl LogLevel {
    /// Parse a log level from a string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "off" | "0" => Some(LogLevel::Off),
            "error" | "err" | "1" => Some(LogLevel::Error),
            "warn" | "warning" | "2" => Some(LogLevel::Warn),
            "info" | "3" => Some(LogLevel::Info),
            "debug" | "4" => Some(LogLevel::Debug),
            "trace" | "5" => Some(LogLevel::Trace),
            _ => None,
        }
    }

    fn to_u8(self) -> u8 {
        self as u8
    }

    fn from_u8(val: u8) -> Self {
        match val {
            0 => LogLevel::Off,
            1 => LogLevel::Error,
            2 => LogLevel::Warn,
            3 => LogLevel::Info,
            4 => LogLevel::Debug,
            5 => LogLevel::Trace,
            _ => LogLevel::Off,
        }
    }
}

/// Log category for the chip's internal subsystems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogCategory {
    /// RAM array reads/writes.
    Ram,
    /// Port/DDR register access and port read-back.
    Io,
    /// Timer countdown, expiry, free-run.
    Timer,
    /// PA7 edge detection.
    Edge,
    /// Interrupt latch sets/clears.
    Interrupt,
    /// Clock interlock (tick/tick_done) protocol.
    Clock,
}

/// Global logging configuration, one atomic level per category plus a
/// global fallback.
pub struct LogConfig {
    global_level: AtomicU8,
    ram_level: AtomicU8,
    io_level: AtomicU8,
    timer_level: AtomicU8,
    edge_level: AtomicU8,
    interrupt_level: AtomicU8,
    clock_level: AtomicU8,
}

impl LogConfig {
    const fn new() -> Self {
        Self {
            global_level: AtomicU8::new(LogLevel::Off as u8),
            ram_level: AtomicU8::new(LogLevel::Off as u8),
            io_level: AtomicU8::new(LogLevel::Off as u8),
            timer_level: AtomicU8::new(LogLevel::Off as u8),
            edge_level: AtomicU8::new(LogLevel::Off as u8),
            interrupt_level: AtomicU8::new(LogLevel::Off as u8),
            clock_level: AtomicU8::new(LogLevel::Off as u8),
        }
    }

    /// The global singleton instance.
    pub fn global() -> &'static Self {
        static INSTANCE: LogConfig = LogConfig::new();
        &INSTANCE
    }

    pub fn set_global_level(&self, level: LogLevel) {
        self.global_level.store(level.to_u8(), Ordering::Relaxed);
    }

    pub fn get_global_level(&self) -> LogLevel {
        LogLevel::from_u8(self.global_level.load(Ordering::Relaxed))
    }

    pub fn set_level(&self, category: LogCategory, level: LogLevel) {
        self.atomic_for(category).store(level.to_u8(), Ordering::Relaxed);
    }

    pub fn get_level(&self, category: LogCategory) -> LogLevel {
        LogLevel::from_u8(self.atomic_for(category).load(Ordering::Relaxed))
    }

    fn atomic_for(&self, category: LogCategory) -> &AtomicU8 {
        match category {
            LogCategory::Ram => &self.ram_level,
            LogCategory::Io => &self.io_level,
            LogCategory::Timer => &self.timer_level,
            LogCategory::Edge => &self.edge_level,
            LogCategory::Interrupt => &self.interrupt_level,
            LogCategory::Clock => &self.clock_level,
        }
    }

    /// True if a message at `level` in `category` should be emitted: a
    /// category-specific level, if set, wins; otherwise fall back to the
    /// global level.
    pub fn should_log(&self, category: LogCategory, level: LogLevel) -> bool {
        let category_level = self.get_level(category);
        if category_level != LogLevel::Off {
            level <= category_level
        } else {
            level <= self.get_global_level()
        }
    }

    /// Reset every category (and the global fallback) to `Off`.
    pub fn reset(&self) {
        self.set_global_level(LogLevel::Off);
        self.set_level(LogCategory::Ram, LogLevel::Off);
        self.set_level(LogCategory::Io, LogLevel::Off);
        self.set_level(LogCategory::Timer, LogLevel::Off);
        self.set_level(LogCategory::Edge, LogLevel::Off);
        self.set_level(LogCategory::Interrupt, LogLevel::Off);
        self.set_level(LogCategory::Clock, LogLevel::Off);
    }
}

/// Log a message if `category`/`level` is enabled.
#[macro_export]
macro_rules! chip_log {
    ($category:expr, $level:expr, $($arg:tt)*) => {
        if $crate::logging::LogConfig::global().should_log($category, $level) {
            eprintln!($($arg)*);
        }
    };
}
