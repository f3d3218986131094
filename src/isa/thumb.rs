use crate::bits::{bit, field};
use crate::decoder::{Decoder, Mode, ThumbCategory};

/// ARMv4T 16-bit Thumb instruction classifier.
///
/// The nineteen Thumb formats are told apart by their top bits:
///
/// ```text
/// 000 11     add/subtract              1000       load/store halfword
/// 000 xx     move shifted register     1001       sp-relative load/store
/// 001        immediate operations      1010       load address
/// 010000     alu operations            1011 0000  add offset to sp
/// 010001     hi register ops / bx      1011 x10x  push/pop
/// 01001      pc-relative load          1100       load/store multiple
/// 0101 xx0   register offset           1101 1111  swi
/// 0101 xx1   sign-extended byte/half   1101 cccc  conditional branch
/// 011        immediate offset          11100      unconditional branch
///                                      1111 x     long branch with link
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct ThumbDecoder;

impl ThumbDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for ThumbDecoder {
    type Word = u16;
    type Category = ThumbCategory;

    const MODE: Mode = Mode::Thumb;

    fn classify(&self, word: u16) -> ThumbCategory {
        use ThumbCategory::*;

        match field(word, 13, 3) {
            0b000 => {
                if field(word, 11, 2) == 0b11 {
                    AddSubtract
                } else {
                    MoveShiftedRegister
                }
            }
            0b001 => ImmediateOperations,
            0b010 => match field(word, 10, 3) {
                0b000 => AluOperations,
                0b001 => HighRegisterOperations,
                0b010 | 0b011 => LoadPcRelative,
                _ => {
                    if bit(word, 9) {
                        LoadStoreByteHalf
                    } else {
                        LoadStoreRegisterOffset
                    }
                }
            },
            0b011 => LoadStoreImmediateOffset,
            0b100 => {
                if bit(word, 12) {
                    LoadStoreSpRelative
                } else {
                    LoadStoreHalf
                }
            }
            0b101 => {
                if !bit(word, 12) {
                    LoadRelativeAddress
                } else if field(word, 8, 4) == 0b0000 {
                    AddOffsetSp
                } else if field(word, 9, 2) == 0b10 {
                    PushPopRegisters
                } else {
                    Undefined
                }
            }
            0b110 => {
                if !bit(word, 12) {
                    return LoadStoreMultiple;
                }
                match field(word, 8, 4) {
                    0b1111 => SoftwareInterrupt,
                    // Condition "always" is unallocated in this format.
                    0b1110 => Undefined,
                    _ => ConditionalBranch,
                }
            }
            _ => {
                if bit(word, 12) {
                    LongBranchLink
                } else if bit(word, 11) {
                    // blx suffix, not present before v5
                    Undefined
                } else {
                    UnconditionalBranch
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ThumbCategory::*;

    fn classify(word: u16) -> ThumbCategory {
        ThumbDecoder::new().classify(word)
    }

    #[test]
    fn shift_and_arithmetic_formats() {
        assert_eq!(classify(0x0088), MoveShiftedRegister); // lsl r0,r1,#2
        assert_eq!(classify(0x1000), MoveShiftedRegister); // asr r0,r0,#32
        assert_eq!(classify(0x1888), AddSubtract); // add r0,r1,r2
        assert_eq!(classify(0x1C08), AddSubtract); // add r0,r1,#0
        assert_eq!(classify(0x2005), ImmediateOperations); // mov r0,#5
        assert_eq!(classify(0x4048), AluOperations); // eor r0,r1
        assert_eq!(classify(0x4770), HighRegisterOperations); // bx lr
    }

    #[test]
    fn load_store_formats() {
        assert_eq!(classify(0x4801), LoadPcRelative);
        assert_eq!(classify(0x5088), LoadStoreRegisterOffset);
        assert_eq!(classify(0x5E88), LoadStoreByteHalf);
        assert_eq!(classify(0x6848), LoadStoreImmediateOffset);
        assert_eq!(classify(0x8848), LoadStoreHalf);
        assert_eq!(classify(0x9801), LoadStoreSpRelative);
        assert_eq!(classify(0xA001), LoadRelativeAddress);
        assert_eq!(classify(0xC803), LoadStoreMultiple);
    }

    #[test]
    fn stack_formats() {
        assert_eq!(classify(0xB082), AddOffsetSp);
        assert_eq!(classify(0xB510), PushPopRegisters);
        assert_eq!(classify(0xBD10), PushPopRegisters);
        assert_eq!(classify(0xB100), Undefined);
        assert_eq!(classify(0xBE00), Undefined);
    }

    #[test]
    fn branch_formats() {
        assert_eq!(classify(0xD0FE), ConditionalBranch);
        assert_eq!(classify(0xDDFE), ConditionalBranch);
        assert_eq!(classify(0xDE00), Undefined);
        assert_eq!(classify(0xDF06), SoftwareInterrupt);
        assert_eq!(classify(0xE7FE), UnconditionalBranch);
        assert_eq!(classify(0xE800), Undefined);
        assert_eq!(classify(0xF000), LongBranchLink);
        assert_eq!(classify(0xF800), LongBranchLink);
    }
}
