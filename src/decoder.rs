use serde::{Deserialize, Serialize};

/// Instruction set state the stream is decoded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Arm,
    Thumb,
}

impl Mode {
    /// Instruction size in bytes.
    pub const fn width(self) -> u32 {
        match self {
            Self::Arm => 4,
            Self::Thumb => 2,
        }
    }

    /// Distance from an instruction's address to the pc it observes
    /// (two fetches ahead in the pipeline).
    pub const fn fetch_offset(self) -> u32 {
        self.width() * 2
    }

    pub const fn pc(self, addr: u32) -> u32 {
        addr.wrapping_add(self.fetch_offset())
    }
}

/// Instruction formats of the 32-bit ARM encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmCategory {
    BranchExchange,
    BranchLink,
    DataProcessing,
    StatusTransfer,
    Multiply,
    MultiplyLong,
    SingleDataTransfer,
    HalfSignedDataTransfer,
    BlockDataTransfer,
    SingleDataSwap,
    SoftwareInterrupt,
    Undefined,
}

/// Instruction formats of the 16-bit Thumb encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThumbCategory {
    MoveShiftedRegister,
    AddSubtract,
    ImmediateOperations,
    AluOperations,
    HighRegisterOperations,
    LoadPcRelative,
    LoadStoreRegisterOffset,
    LoadStoreByteHalf,
    LoadStoreImmediateOffset,
    LoadStoreHalf,
    LoadStoreSpRelative,
    LoadRelativeAddress,
    AddOffsetSp,
    PushPopRegisters,
    LoadStoreMultiple,
    ConditionalBranch,
    SoftwareInterrupt,
    UnconditionalBranch,
    LongBranchLink,
    Undefined,
}

/// Classifies raw instruction words of one encoding into its format category.
///
/// Classification is total: every word maps to a category, with
/// `Undefined` covering the unallocated space.
pub trait Decoder {
    type Word: Copy;
    type Category: Copy;

    const MODE: Mode;

    fn classify(&self, word: Self::Word) -> Self::Category;
}
