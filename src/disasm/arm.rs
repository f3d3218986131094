use bitflags::bitflags;

use super::{hex, ins, register_list, UNDEFINED};
use crate::bits::{bit, field, rotate_right, sign_extend};
use crate::decoder::{ArmCategory, Decoder};
use crate::isa::arm::ArmDecoder;
use crate::lexicon::{bios_function, condition, reg, shift};

const DATA_OPS: [&str; 16] = [
    "and", "eor", "sub", "rsb", "add", "adc", "sbc", "rsc", "tst", "teq", "cmp", "cmn", "orr",
    "mov", "bic", "mvn",
];

const OP_SUB: u32 = 0b0010;
const OP_ADD: u32 = 0b0100;
const OP_MOV: u32 = 0b1101;
const OP_MVN: u32 = 0b1111;

const SHIFT_LSL: u32 = 0b00;
const SHIFT_LSR: u32 = 0b01;
const SHIFT_ASR: u32 = 0b10;
const SHIFT_ROR: u32 = 0b11;

const MULTIPLY_LONG: [&str; 4] = ["umull", "umlal", "smull", "smlal"];

/// Stack-style suffixes indexed by `[load][P:U]`.
const BLOCK_SUFFIXES: [[&str; 4]; 2] = [["ed", "ea", "fd", "fa"], ["fa", "fd", "ea", "ed"]];

bitflags! {
    /// PSR field mask of `msr` (bits 16..19).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
    pub struct PsrFields: u32 {
        const C = 1 << 16;
        const X = 1 << 17;
        const S = 1 << 18;
        const F = 1 << 19;
    }
}

impl PsrFields {
    /// `_fsxc`-style suffix, empty when no field is selected.
    fn suffix(self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let mut out = String::from("_");
        for (flag, letter) in [(Self::F, 'f'), (Self::S, 's'), (Self::X, 'x'), (Self::C, 'c')] {
            if self.contains(flag) {
                out.push(letter);
            }
        }
        out
    }
}

fn cond(word: u32) -> &'static str {
    condition(field(word, 28, 4))
}

fn rotated_immediate(word: u32) -> u32 {
    rotate_right(field(word, 0, 8), field(word, 8, 4) << 1)
}

/// Second operand in register form (bits 0..11).
pub fn shifted_register(word: u32) -> String {
    let rm = reg(field(word, 0, 4));
    let kind = field(word, 5, 2);

    if bit(word, 4) {
        return format!("{rm},{} {}", shift(kind), reg(field(word, 8, 4)));
    }

    let amount = match (field(word, 7, 5), kind) {
        (0, SHIFT_LSR | SHIFT_ASR) => 32,
        (0, SHIFT_ROR) => return format!("{rm},rrx"),
        (0, SHIFT_LSL) => return rm.to_string(),
        (n, _) => n,
    };
    format!("{rm},{} {}", shift(kind), hex(amount))
}

/// Render a 32-bit ARM instruction; `pc` is the instruction address + 8.
pub fn render(word: u32, pc: u32) -> String {
    match ArmDecoder::new().classify(word) {
        ArmCategory::BranchExchange => branch_exchange(word),
        ArmCategory::BranchLink => branch_link(word, pc),
        ArmCategory::DataProcessing => data_processing(word, pc),
        ArmCategory::StatusTransfer => status_transfer(word),
        ArmCategory::Multiply => multiply(word),
        ArmCategory::MultiplyLong => multiply_long(word),
        ArmCategory::SingleDataTransfer => single_data_transfer(word),
        ArmCategory::HalfSignedDataTransfer => half_signed_data_transfer(word),
        ArmCategory::BlockDataTransfer => block_data_transfer(word),
        ArmCategory::SingleDataSwap => single_data_swap(word),
        ArmCategory::SoftwareInterrupt => software_interrupt(word),
        ArmCategory::Undefined => UNDEFINED.to_string(),
    }
}

fn branch_exchange(word: u32) -> String {
    ins(format!("bx{}", cond(word)), reg(field(word, 0, 4)))
}

fn branch_link(word: u32, pc: u32) -> String {
    let offset = sign_extend(field(word, 0, 24), 24) << 2;
    let mnemonic = if bit(word, 24) { "bl" } else { "b" };
    ins(
        format!("{mnemonic}{}", cond(word)),
        hex(pc.wrapping_add(offset as u32)),
    )
}

fn data_processing(word: u32, pc: u32) -> String {
    let rd = reg(field(word, 12, 4));
    let rn_index = field(word, 16, 4);
    let rn = reg(rn_index);
    let opcode = field(word, 21, 4);
    let immediate = bit(word, 25);
    // Compare ops always set flags; the S is implied there.
    let compare = opcode >> 2 == 0b10;
    let flags = if bit(word, 20) && !compare { "s" } else { "" };
    let mnemonic = format!("{}{flags}{}", DATA_OPS[opcode as usize], cond(word));

    let literal = immediate && rn_index == 15 && matches!(opcode, OP_ADD | OP_SUB);
    let operand = if immediate {
        let value = rotated_immediate(word);
        match opcode {
            OP_ADD if literal => hex(pc.wrapping_add(value)),
            OP_SUB if literal => hex(pc.wrapping_sub(value)),
            _ => hex(value),
        }
    } else {
        shifted_register(word)
    };

    if literal {
        return ins(mnemonic, format!("{rd},={operand}"));
    }
    match opcode {
        _ if compare => ins(mnemonic, format!("{rn},{operand}")),
        OP_MOV | OP_MVN => ins(mnemonic, format!("{rd},{operand}")),
        _ => ins(mnemonic, format!("{rd},{rn},{operand}")),
    }
}

fn status_transfer(word: u32) -> String {
    let psr = if bit(word, 22) { "spsr" } else { "cpsr" };

    if !bit(word, 21) {
        let rd = reg(field(word, 12, 4));
        return ins(format!("mrs{}", cond(word)), format!("{rd},{psr}"));
    }

    let operand = if bit(word, 25) {
        hex(rotated_immediate(word))
    } else {
        reg(field(word, 0, 4)).to_string()
    };
    let fields = PsrFields::from_bits_truncate(word).suffix();
    ins(format!("msr{}", cond(word)), format!("{psr}{fields},{operand}"))
}

fn multiply(word: u32) -> String {
    let rm = reg(field(word, 0, 4));
    let rs = reg(field(word, 8, 4));
    let rn = reg(field(word, 12, 4));
    let rd = reg(field(word, 16, 4));
    let flags = if bit(word, 20) { "s" } else { "" };

    if bit(word, 21) {
        ins(format!("mla{flags}{}", cond(word)), format!("{rd},{rm},{rs},{rn}"))
    } else {
        ins(format!("mul{flags}{}", cond(word)), format!("{rd},{rm},{rs}"))
    }
}

fn multiply_long(word: u32) -> String {
    let rm = reg(field(word, 0, 4));
    let rs = reg(field(word, 8, 4));
    let rd_lo = reg(field(word, 12, 4));
    let rd_hi = reg(field(word, 16, 4));
    let flags = if bit(word, 20) { "s" } else { "" };
    let base = MULTIPLY_LONG[field(word, 21, 2) as usize];

    ins(
        format!("{base}{flags}{}", cond(word)),
        format!("{rd_lo},{rd_hi},{rm},{rs}"),
    )
}

/// `[Rn,{-}off]{!}` or `[Rn],{-}off`.
fn address(rn: &str, offset: &str, word: u32) -> String {
    let sign = if bit(word, 23) { "" } else { "-" };
    if bit(word, 24) {
        let writeback = if bit(word, 21) { "!" } else { "" };
        format!("[{rn},{sign}{offset}]{writeback}")
    } else {
        format!("[{rn}],{sign}{offset}")
    }
}

fn single_data_transfer(word: u32) -> String {
    let rd = reg(field(word, 12, 4));
    let rn = reg(field(word, 16, 4));
    // I = 1 selects the register offset for this format.
    let offset = if bit(word, 25) {
        shifted_register(word)
    } else {
        hex(field(word, 0, 12))
    };
    let op = if bit(word, 20) { "ldr" } else { "str" };
    let byte = if bit(word, 22) { "b" } else { "" };
    // Post-indexed with W set forces a user-mode access.
    let user = if !bit(word, 24) && bit(word, 21) { "t" } else { "" };

    ins(
        format!("{op}{byte}{user}{}", cond(word)),
        format!("{rd},{}", address(rn, &offset, word)),
    )
}

fn half_signed_data_transfer(word: u32) -> String {
    let rd = reg(field(word, 12, 4));
    let rn = reg(field(word, 16, 4));
    let offset = if bit(word, 22) {
        hex((field(word, 8, 4) << 4) | field(word, 0, 4))
    } else {
        reg(field(word, 0, 4)).to_string()
    };
    let op = if bit(word, 20) { "ldr" } else { "str" };
    let sign = if bit(word, 6) { "s" } else { "" };
    let size = if bit(word, 5) { "h" } else { "b" };

    ins(
        format!("{op}{sign}{size}{}", cond(word)),
        format!("{rd},{}", address(rn, &offset, word)),
    )
}

fn block_data_transfer(word: u32) -> String {
    let list = register_list(field(word, 0, 16) as u16);
    let rn = reg(field(word, 16, 4));
    let load = bit(word, 20);
    let writeback = if bit(word, 21) { "!" } else { "" };
    let user = if bit(word, 22) { "^" } else { "" };
    let suffix = BLOCK_SUFFIXES[load as usize][field(word, 23, 2) as usize];
    let op = if load { "ldm" } else { "stm" };

    ins(
        format!("{op}{suffix}{}", cond(word)),
        format!("{rn}{writeback},{list}{user}"),
    )
}

fn single_data_swap(word: u32) -> String {
    let rm = reg(field(word, 0, 4));
    let rd = reg(field(word, 12, 4));
    let rn = reg(field(word, 16, 4));
    let byte = if bit(word, 22) { "b" } else { "" };

    ins(format!("swp{byte}{}", cond(word)), format!("{rd},{rm},[{rn}]"))
}

fn software_interrupt(word: u32) -> String {
    ins(
        format!("swi{}", cond(word)),
        bios_function(field(word, 0, 8)),
    )
}
