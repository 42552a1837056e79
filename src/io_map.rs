//! Decodes a 5-bit I/O-window address into a read or write effect.
//!
//! Real registers alias across many addresses because several address
//! lines are "don't-care" bits; rather than repeat the bit-pattern
//! cascade at every call site, each access is decoded once into one of
//! these small enums and dispatched with a single `match`.

use crate::edge::EdgeStyle;

/// Effect of a `read_io` access, once aliasing has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOp {
    PortA,
    PortADdr,
    PortB,
    PortBDdr,
    /// Return Timer; disarm the timer interrupt.
    Timer,
    /// Return Timer; re-arm the timer interrupt.
    TimerRearm,
    /// Return the combined status byte; clear the edge latch.
    Status,
    /// Address outside the decoded map: reads as 0, no side effect.
    None,
}

/// Effect of a `write_io` access, once aliasing has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    PortA,
    PortADdr,
    PortB,
    PortBDdr,
    EdgeControl { style: EdgeStyle, arm: bool },
    TimerWrite { multiplier: u16, arm: bool },
    /// Address outside the decoded map: write is discarded.
    None,
}

pub fn decode_read(addr: u16) -> ReadOp {
    match addr & 0x1F {
        0x00 | 0x08 | 0x10 | 0x18 => ReadOp::PortA,
        0x01 | 0x09 | 0x11 | 0x19 => ReadOp::PortADdr,
        0x02 | 0x0A | 0x12 | 0x1A => ReadOp::PortB,
        0x03 | 0x0B | 0x13 | 0x1B => ReadOp::PortBDdr,
        0x04 | 0x06 | 0x14 | 0x16 => ReadOp::Timer,
        0x0C | 0x0E | 0x1C | 0x1E => ReadOp::TimerRearm,
        0x05 | 0x07 | 0x0D | 0x0F | 0x15 | 0x17 | 0x1D | 0x1F => ReadOp::Status,
        _ => ReadOp::None,
    }
}

pub fn decode_write(addr: u16) -> WriteOp {
    match addr & 0x1F {
        0x00 | 0x08 | 0x10 | 0x18 => WriteOp::PortA,
        0x01 | 0x09 | 0x11 | 0x19 => WriteOp::PortADdr,
        0x02 | 0x0A | 0x12 | 0x1A => WriteOp::PortB,
        0x03 | 0x0B | 0x13 | 0x1B => WriteOp::PortBDdr,
        0x04 | 0x0C => WriteOp::EdgeControl { style: EdgeStyle::Negative, arm: false },
        0x05 | 0x0D => WriteOp::EdgeControl { style: EdgeStyle::Positive, arm: false },
        0x06 | 0x0E => WriteOp::EdgeControl { style: EdgeStyle::Negative, arm: true },
        0x07 | 0x0F => WriteOp::EdgeControl { style: EdgeStyle::Positive, arm: true },
        a @ (0x14..=0x17 | 0x1C..=0x1F) => {
            let arm = a & 0x08 != 0;
            let multiplier = match a & 0x07 {
                4 => 1,
                5 => 8,
                6 => 64,
                7 => 1024,
                _ => unreachable!("low 3 bits of a timer-write address are always 4..=7"),
            };
            WriteOp::TimerWrite { multiplier, arm }
        }
        _ => WriteOp::None,
    }
}
