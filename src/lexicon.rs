//! Static name tables used by the renderers.

pub const REGISTERS: [&str; 16] = [
    "r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8", "r9", "r10", "r11", "r12", "sp", "lr",
    "pc",
];

/// Condition suffixes indexed by the 4-bit condition field. `al` renders empty.
pub const CONDITIONS: [&str; 16] = [
    "eq", "ne", "cs", "cc", "mi", "pl", "vs", "vc", "hi", "ls", "ge", "lt", "gt", "le", "", "nv",
];

pub const SHIFTS: [&str; 4] = ["lsl", "lsr", "asr", "ror"];

/// GBA BIOS call names, indexed by the SWI comment byte.
pub const BIOS_FUNCTIONS: [&str; 43] = [
    "SoftReset",
    "RegisterRamReset",
    "Halt",
    "Stop",
    "IntrWait",
    "VBlankIntrWait",
    "Div",
    "DivArm",
    "Sqrt",
    "ArcTan",
    "ArcTan2",
    "CpuSet",
    "CpuFastSet",
    "GetBiosChecksum",
    "BgAffineSet",
    "ObjAffineSet",
    "BitUnPack",
    "LZ77UnCompWram",
    "LZ77UnCompVram",
    "HuffUnComp",
    "RLUnCompReadNormalWram",
    "RLUnCompReadNormalVram",
    "Diff8bitUnFilterWram",
    "Diff8bitUnFilterVram",
    "Diff16bitUnFilter",
    "SoundBias",
    "SoundDriverInit",
    "SoundDriverMode",
    "SoundDriverMain",
    "SoundDriverVSync",
    "SoundChannelClear",
    "MidiKey2Freq",
    "MusicPlayerOpen",
    "MusicPlayerStart",
    "MusicPlayerStop",
    "MusicPlayerContinue",
    "MusicPlayerFadeOut",
    "MultiBoot",
    "HardReset",
    "CustomHalt",
    "SoundDriverVSyncOff",
    "SoundDriverVSyncOn",
    "SoundGetJumpList",
];

pub const UNKNOWN_BIOS_FUNCTION: &str = "Unknown";

#[inline]
pub fn reg(index: u32) -> &'static str {
    REGISTERS[(index & 0xF) as usize]
}

#[inline]
pub fn condition(index: u32) -> &'static str {
    CONDITIONS[(index & 0xF) as usize]
}

#[inline]
pub fn shift(index: u32) -> &'static str {
    SHIFTS[(index & 0x3) as usize]
}

pub fn bios_function(index: u32) -> &'static str {
    BIOS_FUNCTIONS
        .get(index as usize)
        .copied()
        .unwrap_or(UNKNOWN_BIOS_FUNCTION)
}
