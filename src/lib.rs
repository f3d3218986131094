pub mod bits;
pub mod decoder;
pub mod disasm;
pub mod driver;
pub mod lexicon;

pub mod isa {
    pub mod arm; // 32-bit ARM state
    pub mod thumb; // 16-bit Thumb state
}

pub use decoder::{ArmCategory, Decoder, Mode, ThumbCategory};
pub use disasm::thumb::next_carried_link;
pub use driver::{
    carried_links, disassemble, disassemble_arm, disassemble_thumb, words_from_bytes, Config, Line,
    ThumbStream,
};
pub use isa::arm::ArmDecoder;
pub use isa::thumb::ThumbDecoder;

pub fn classify_arm(word: u32) -> ArmCategory {
    ArmDecoder::new().classify(word)
}

pub fn classify_thumb(word: u16) -> ThumbCategory {
    ThumbDecoder::new().classify(word)
}

/// Render an ARM word; `pc` is its address + 8.
pub fn render_arm(word: u32, pc: u32) -> String {
    disasm::arm::render(word, pc)
}

/// Render a Thumb halfword; `pc` is its address + 4 and `lr` the carried
/// link value from the preceding halfword.
pub fn render_thumb(word: u16, pc: u32, lr: u32) -> String {
    disasm::thumb::render(word, pc, lr)
}
