use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::decoder::{Decoder, Mode};
use crate::disasm::{arm, thumb, UNDEFINED};
use crate::isa::{arm::ArmDecoder, thumb::ThumbDecoder};

const ARM: Mode = <ArmDecoder as Decoder>::MODE;
const THUMB: Mode = <ThumbDecoder as Decoder>::MODE;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub mode: Mode,
    /// Address of the first instruction.
    pub base: u32,
}

/// One disassembled instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub addr: u32,
    pub raw: u32,
    pub mnemonic: String,
}

/// Split `bytes` into little-endian instruction words of `mode`'s width.
/// A trailing partial word is zero-padded.
pub fn words_from_bytes(bytes: &[u8], mode: Mode) -> Vec<u32> {
    let width = mode.width() as usize;
    bytes
        .chunks(width)
        .map(|chunk| {
            let mut buf = [0u8; 4];
            buf[..chunk.len()].copy_from_slice(chunk);
            u32::from_le_bytes(buf)
        })
        .collect()
}

/// Disassemble a raw byte buffer according to `cfg`.
pub fn disassemble(bytes: &[u8], cfg: &Config) -> Vec<Line> {
    let words = words_from_bytes(bytes, cfg.mode);
    match cfg.mode {
        Mode::Arm => disassemble_arm(&words, cfg.base),
        Mode::Thumb => {
            let halfwords: Vec<u16> = words.iter().map(|&w| w as u16).collect();
            disassemble_thumb(&halfwords, cfg.base)
        }
    }
}

/// ARM words carry no state between each other, so each line only needs its
/// own address.
pub fn disassemble_arm(words: &[u32], base: u32) -> Vec<Line> {
    debug!(base, count = words.len(), "disassembling arm stream");
    let mut addr = base;
    let mut out = Vec::with_capacity(words.len());
    for &raw in words {
        let mnemonic = arm::render(raw, ARM.pc(addr));
        if mnemonic == UNDEFINED {
            trace!(addr, raw, "undefined arm instruction");
        }
        out.push(Line { addr, raw, mnemonic });
        addr = addr.wrapping_add(ARM.width());
    }
    out
}

pub fn disassemble_thumb(halfwords: &[u16], base: u32) -> Vec<Line> {
    debug!(base, count = halfwords.len(), "disassembling thumb stream");
    let mut stream = ThumbStream::new(base);
    halfwords.iter().map(|&hw| stream.step(hw)).collect()
}

/// Sequential Thumb decoder carrying the `bl` link value forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbStream {
    addr: u32,
    lr: u32,
}

impl ThumbStream {
    pub fn new(base: u32) -> Self {
        Self { addr: base, lr: 0 }
    }

    /// Address of the next halfword.
    pub fn addr(&self) -> u32 {
        self.addr
    }

    /// Link value the next halfword will see.
    pub fn lr(&self) -> u32 {
        self.lr
    }

    pub fn step(&mut self, raw: u16) -> Line {
        let addr = self.addr;
        let mnemonic = thumb::render(raw, THUMB.pc(addr), self.lr);
        if mnemonic == UNDEFINED {
            trace!(addr, raw, "undefined thumb instruction");
        }
        self.lr = thumb::next_carried_link(raw, addr);
        self.addr = addr.wrapping_add(THUMB.width());
        Line {
            addr,
            raw: u32::from(raw),
            mnemonic,
        }
    }
}

/// Link value observed by each halfword of a stream starting at `base`.
///
/// Once materialised, every halfword can be rendered on its own with
/// `thumb::render(hw, pc, links[i])`.
pub fn carried_links(halfwords: &[u16], base: u32) -> Vec<u32> {
    let mut lr = 0;
    let mut addr = base;
    halfwords
        .iter()
        .map(|&hw| {
            let seen = lr;
            lr = thumb::next_carried_link(hw, addr);
            addr = addr.wrapping_add(THUMB.width());
            seen
        })
        .collect()
}
