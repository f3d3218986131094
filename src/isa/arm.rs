use crate::bits::{bit, field};
use crate::decoder::{ArmCategory, Decoder, Mode};

/// ARMv4T 32-bit instruction classifier.
///
/// Follows the ARM7TDMI encoding table. The condition field (bits 28..31)
/// never takes part; multiply, swap and halfword transfers are carved out of
/// the data-processing space before it is claimed as a whole.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArmDecoder;

impl ArmDecoder {
    pub fn new() -> Self {
        Self
    }
}

/// Opcode of `bx Rn` with the condition and Rn fields masked out (bits 4..27).
const BX_PATTERN: u32 = 0b0001_0010_1111_1111_1111_0001;

impl Decoder for ArmDecoder {
    type Word = u32;
    type Category = ArmCategory;

    const MODE: Mode = Mode::Arm;

    fn classify(&self, word: u32) -> ArmCategory {
        use ArmCategory::*;

        if field(word, 4, 24) == BX_PATTERN {
            return BranchExchange;
        }

        match field(word, 25, 3) {
            0b000 => {
                if field(word, 4, 4) == 0b1001 {
                    return multiply_or_swap(word);
                }
                if bit(word, 7) && bit(word, 4) {
                    // SH = 00 is the multiply/swap space handled above.
                    let load = bit(word, 20);
                    let sign = bit(word, 6);
                    return if !load && sign { Undefined } else { HalfSignedDataTransfer };
                }
                if is_psr_space(word) {
                    return status_transfer(word, false);
                }
                DataProcessing
            }
            0b001 => {
                if is_psr_space(word) {
                    return status_transfer(word, true);
                }
                DataProcessing
            }
            0b010 => SingleDataTransfer,
            // Register offset forms; bit 4 set is the architecturally undefined slot.
            0b011 => {
                if bit(word, 4) {
                    Undefined
                } else {
                    SingleDataTransfer
                }
            }
            0b100 => BlockDataTransfer,
            0b101 => BranchLink,
            // Coprocessor data transfer
            0b110 => Undefined,
            _ => {
                if bit(word, 24) {
                    SoftwareInterrupt
                } else {
                    // CDP / MRC / MCR
                    Undefined
                }
            }
        }
    }
}

/// `cond 000x xxxx .... .... 1001 ....`
fn multiply_or_swap(word: u32) -> ArmCategory {
    if field(word, 22, 6) == 0 {
        return ArmCategory::Multiply;
    }
    match field(word, 23, 5) {
        0b00001 => ArmCategory::MultiplyLong,
        0b00010 if field(word, 20, 2) == 0 && field(word, 8, 4) == 0 => ArmCategory::SingleDataSwap,
        _ => ArmCategory::Undefined,
    }
}

/// tst/teq/cmp/cmn opcodes with the S bit clear.
fn is_psr_space(word: u32) -> bool {
    field(word, 23, 2) == 0b10 && !bit(word, 20)
}

fn status_transfer(word: u32, immediate: bool) -> ArmCategory {
    let write = bit(word, 21);
    let valid = if write {
        // MSR: Rd field is fixed at 1111; register form has 0 in bits 4..11.
        field(word, 12, 4) == 0xF && (immediate || field(word, 4, 8) == 0)
    } else {
        // MRS: register form only, source field 1111 and a zero operand.
        !immediate && field(word, 16, 4) == 0xF && field(word, 0, 12) == 0
    };
    if valid {
        ArmCategory::StatusTransfer
    } else {
        ArmCategory::Undefined
    }
}
