//! Cycle-accurate core of a MOS/Rockwell 6532 RIOT (RAM-I/O-Timer) chip.
//!
//! The 6532 bundles three independent facilities behind one 32-byte
//! register window: 128 bytes of static RAM, two 8-bit bidirectional I/O
//! ports with direction registers, and a programmable down-counter with
//! an edge-detect interrupt latched off port A's bit 7 (PA7).
//!
//! # Two-phase clock
//!
//! Every bus `read`/`write` only touches shadow fields or reads committed
//! ones; neither advances time. A host cycle is driven by exactly one
//! [`Chip::tick`] followed by one [`Chip::tick_done`]: `tick` samples the
//! PA7 input and runs the input-edge check against the *previous* cycle's
//! committed state, and `tick_done` commits every shadow register, runs the
//! output-edge check, and advances the timer. This interlock is what lets
//! other chips on the same bus observe this one at any point in a cycle
//! without caring what order they're driven in relative to each other.
//!
//! # What this crate does not model
//!
//! The 6502-family CPU, the address-space multiplexer that routes a CPU
//! address to this chip's RAM window versus its I/O window, the input-pin
//! sources (joysticks, switches), and any display or save-state machinery
//! are all out of scope — they're callers or collaborators, reached only
//! through the interfaces below.

mod edge;
mod interrupts;
mod io_map;
pub mod logging;
mod ports;
mod ram;
mod timer;

pub use edge::EdgeStyle;

use edge::EdgeDetector;
use interrupts::Interrupts;
use io_map::{decode_read, decode_write, ReadOp, WriteOp};
use logging::{LogCategory, LogLevel};
use ports::Ports;
use ram::Ram;
use thiserror::Error;
use timer::Timer;

/// Fatal chip errors. Both kinds are unrecoverable protocol violations by
/// the caller; recovery is re-initialization via [`Chip::power_on`] or
/// [`Chip::reset`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChipError {
    /// `tick()` was called again before the previous cycle's `tick_done()`
    /// ran.
    #[error("tick() called without a matching tick_done() completing the previous cycle")]
    ProtocolViolation,
}

type InputFn = Box<dyn Fn() -> u8>;

/// A single 6532 RIOT chip instance.
pub struct Chip {
    ram: Ram,
    ports: Ports,
    timer: Timer,
    interrupts: Interrupts,
    edge: EdgeDetector,

    port_a_input: Option<InputFn>,
    port_b_input: Option<InputFn>,

    tick_done: bool,
    debug_tag: Option<String>,
}

impl Chip {
    /// Create a freshly power-on chip: RAM zeroed, every register at its
    /// reset value, ready for its first `tick()`.
    pub fn new() -> Self {
        let mut chip = Self {
            ram: Ram::new(),
            ports: Ports::new(),
            timer: Timer::new(),
            interrupts: Interrupts::new(),
            edge: EdgeDetector::new(),
            port_a_input: None,
            port_b_input: None,
            tick_done: true,
            debug_tag: None,
        };
        chip.power_on();
        chip
    }

    /// Full initialization: zero RAM, then apply reset-state defaults.
    pub fn power_on(&mut self) {
        self.ram.power_on();
        self.reset();
    }

    /// Soft reset: every register back to its power-on default, RAM left
    /// untouched.
    pub fn reset(&mut self) {
        self.ports.power_on();
        self.timer.power_on();
        self.interrupts.power_on();
        self.edge.power_on();
        self.tick_done = true;
    }

    /// Attach an opaque, display-only label (e.g. the owning bus's name)
    /// used only in trace log lines; never read back by the chip.
    pub fn set_debug_tag(&mut self, tag: impl Into<String>) {
        self.debug_tag = Some(tag.into());
    }

    pub fn set_port_a_input(&mut self, f: impl Fn() -> u8 + 'static) {
        self.port_a_input = Some(Box::new(f));
    }

    pub fn clear_port_a_input(&mut self) {
        self.port_a_input = None;
    }

    pub fn set_port_b_input(&mut self, f: impl Fn() -> u8 + 'static) {
        self.port_b_input = Some(Box::new(f));
    }

    pub fn clear_port_b_input(&mut self) {
        self.port_b_input = None;
    }

    fn read_port_a_input(&self) -> u8 {
        self.port_a_input.as_ref().map_or(0, |f| f())
    }

    fn read_port_b_input(&self) -> u8 {
        self.port_b_input.as_ref().map_or(0, |f| f())
    }

    /// RAM window read, address masked to 7 bits.
    pub fn read_ram(&self, addr: u16) -> u8 {
        self.ram.read(addr)
    }

    /// RAM window write, address masked to 7 bits.
    pub fn write_ram(&mut self, addr: u16, v: u8) {
        self.ram.write(addr, v);
    }

    /// I/O window read, address masked to 5 bits; decoding per the
    /// register map in the crate-level docs and `io_map`.
    pub fn read_io(&mut self, addr: u16) -> u8 {
        match decode_read(addr) {
            ReadOp::PortA => self.ports.read_a(self.read_port_a_input()),
            ReadOp::PortADdr => self.ports.a_ddr(),
            ReadOp::PortB => self.ports.read_b(self.read_port_b_input()),
            ReadOp::PortBDdr => self.ports.b_ddr(),
            ReadOp::Timer => {
                self.interrupts.stage_timer_disarm();
                chip_log!(
                    LogCategory::Timer,
                    LogLevel::Trace,
                    "riot: timer read (disarm) -> {:#04x}",
                    self.timer.value()
                );
                self.timer.value()
            }
            ReadOp::TimerRearm => {
                self.interrupts.stage_timer_rearm();
                self.timer.value()
            }
            ReadOp::Status => {
                let status = self.interrupts.status_byte();
                self.interrupts.stage_clear_edge_latch();
                self.edge.stage_disarm();
                chip_log!(
                    LogCategory::Interrupt,
                    LogLevel::Trace,
                    "riot: status read -> {:#04x}",
                    status
                );
                status
            }
            ReadOp::None => 0,
        }
    }

    /// I/O window write, address masked to 5 bits; decoding per the
    /// register map in the crate-level docs and `io_map`.
    pub fn write_io(&mut self, addr: u16, v: u8) {
        match decode_write(addr) {
            WriteOp::PortA => self.ports.stage_write_a(v),
            WriteOp::PortADdr => self.ports.stage_write_a_ddr(v),
            WriteOp::PortB => self.ports.stage_write_b(v),
            WriteOp::PortBDdr => self.ports.stage_write_b_ddr(v),
            WriteOp::EdgeControl { style, arm } => self.edge.stage_control(style, arm),
            WriteOp::TimerWrite { multiplier, arm } => {
                self.timer.stage_write(v, multiplier);
                self.interrupts.stage_from_timer_write(arm);
                chip_log!(
                    LogCategory::Timer,
                    LogLevel::Debug,
                    "riot: timer write {:#04x} multiplier={} arm={}",
                    v,
                    multiplier,
                    arm
                );
            }
            WriteOp::None => {}
        }
    }

    /// Committed Port A output latch.
    pub fn port_a_output(&self) -> u8 {
        self.ports.a_output()
    }

    /// Committed Port B output latch.
    pub fn port_b_output(&self) -> u8 {
        self.ports.b_output()
    }

    /// Aggregate interrupt-line observer: true iff either latch bit is set.
    pub fn raised(&self) -> bool {
        self.interrupts.raised()
    }

    /// Phase one of a host cycle: sample PA7's input side and run the
    /// input-edge check against the prior sample.
    pub fn tick(&mut self) -> Result<(), ChipError> {
        if !self.tick_done {
            chip_log!(
                LogCategory::Clock,
                LogLevel::Error,
                "riot{}: tick() called twice without an intervening tick_done()",
                self.debug_tag.as_deref().map_or(String::new(), |t| format!(" [{t}]"))
            );
            return Err(ChipError::ProtocolViolation);
        }
        self.tick_done = false;

        let new_a = self.read_port_a_input() & !self.ports.a_ddr();
        self.edge.check(self.edge.hold_port_a(), new_a, &mut self.interrupts);
        self.edge.sample_input(new_a);

        Ok(())
    }

    /// Phase two of a host cycle: commit every shadow register, run the
    /// output-edge check, and advance the timer.
    pub fn tick_done(&mut self) {
        let (old_a, new_a) = self.ports.commit_a_output();
        self.edge.check(old_a, new_a, &mut self.interrupts);
        self.ports.commit_rest();

        self.edge.commit();

        self.timer.advance(&mut self.interrupts);
        self.timer.commit();
        self.interrupts.commit();

        self.tick_done = true;
    }
}

impl Default for Chip {
    fn default() -> Self {
        Self::new()
    }
}
