use super::{hex, ins, register_list, BL_SETUP, UNDEFINED};
use crate::bits::{bit, field, sign_extend};
use crate::decoder::{Decoder, ThumbCategory};
use crate::isa::thumb::ThumbDecoder;
use crate::lexicon::{bios_function, condition, reg};

const SHIFT_OPS: [&str; 3] = ["lsl", "lsr", "asr"];
const IMMEDIATE_OPS: [&str; 4] = ["mov", "cmp", "add", "sub"];
const ALU_OPS: [&str; 16] = [
    "and", "eor", "lsl", "lsr", "asr", "adc", "sbc", "ror", "tst", "neg", "cmp", "cmn", "orr",
    "mul", "bic", "mvn",
];
const HIGH_REGISTER_OPS: [&str; 4] = ["add", "cmp", "mov", "bx"];
const OP_BX: u32 = 0b11;
const REGISTER_OFFSET_OPS: [&str; 4] = ["str", "strb", "ldr", "ldrb"];
const SIGN_EXTENDED_OPS: [&str; 4] = ["strh", "ldrsb", "ldrh", "ldrsh"];
const IMMEDIATE_OFFSET_OPS: [&str; 4] = ["str", "ldr", "strb", "ldrb"];

/// Render a 16-bit Thumb instruction.
///
/// `pc` is the instruction address + 4. `lr` is the carried link value left
/// by the previous halfword (see [`next_carried_link`]); only the second half
/// of a `bl` pair reads it.
pub fn render(word: u16, pc: u32, lr: u32) -> String {
    match ThumbDecoder::new().classify(word) {
        ThumbCategory::MoveShiftedRegister => move_shifted_register(word),
        ThumbCategory::AddSubtract => add_subtract(word),
        ThumbCategory::ImmediateOperations => immediate_operations(word),
        ThumbCategory::AluOperations => alu_operations(word),
        ThumbCategory::HighRegisterOperations => high_register_operations(word),
        ThumbCategory::LoadPcRelative => load_pc_relative(word, pc),
        ThumbCategory::LoadStoreRegisterOffset => load_store_register_offset(word),
        ThumbCategory::LoadStoreByteHalf => load_store_byte_half(word),
        ThumbCategory::LoadStoreImmediateOffset => load_store_immediate_offset(word),
        ThumbCategory::LoadStoreHalf => load_store_half(word),
        ThumbCategory::LoadStoreSpRelative => load_store_sp_relative(word),
        ThumbCategory::LoadRelativeAddress => load_relative_address(word, pc),
        ThumbCategory::AddOffsetSp => add_offset_sp(word),
        ThumbCategory::PushPopRegisters => push_pop_registers(word),
        ThumbCategory::LoadStoreMultiple => load_store_multiple(word),
        ThumbCategory::ConditionalBranch => conditional_branch(word, pc),
        ThumbCategory::SoftwareInterrupt => software_interrupt(word),
        ThumbCategory::UnconditionalBranch => unconditional_branch(word, pc),
        ThumbCategory::LongBranchLink => long_branch_link(word, lr),
        ThumbCategory::Undefined => UNDEFINED.to_string(),
    }
}

/// Link value the halfword at `addr` leaves for its successor:
/// `addr + 4 + (signExtend11(word[0..11]) << 12)`.
/// Applies to every halfword, not only `bl` prefixes.
pub fn next_carried_link(word: u16, addr: u32) -> u32 {
    let high = sign_extend(field(word, 0, 11), 11) << 12;
    addr.wrapping_add(4).wrapping_add(high as u32)
}

/// Word-aligned pc used by pc-relative loads and `add Rd,pc,#imm`.
fn aligned(pc: u32) -> u32 {
    pc & !0x3
}

fn low_reg(word: u16, start: u32) -> &'static str {
    reg(field(word, start, 3))
}

fn move_shifted_register(word: u16) -> String {
    let rd = low_reg(word, 0);
    let rs = low_reg(word, 3);
    let amount = field(word, 6, 5);
    // Opcode 11 belongs to add/subtract and never reaches here.
    let op = SHIFT_OPS[field(word, 11, 2) as usize % SHIFT_OPS.len()];

    ins(op, format!("{rd},{rs},{}", hex(amount)))
}

fn add_subtract(word: u16) -> String {
    let rd = low_reg(word, 0);
    let rs = low_reg(word, 3);
    let rn = field(word, 6, 3);
    let immediate = bit(word, 10);

    if immediate && rn == 0 {
        return ins("mov", format!("{rd},{rs}"));
    }
    let op = if bit(word, 9) { "sub" } else { "add" };
    let operand = if immediate { hex(rn) } else { reg(rn).to_string() };
    ins(op, format!("{rd},{rs},{operand}"))
}

fn immediate_operations(word: u16) -> String {
    let rd = low_reg(word, 8);
    let op = IMMEDIATE_OPS[field(word, 11, 2) as usize];
    ins(op, format!("{rd},{}", hex(field(word, 0, 8))))
}

fn alu_operations(word: u16) -> String {
    let rd = low_reg(word, 0);
    let rs = low_reg(word, 3);
    ins(ALU_OPS[field(word, 6, 4) as usize], format!("{rd},{rs}"))
}

fn high_register_operations(word: u16) -> String {
    // H1/H2 extend Rd/Rs into r8..r15.
    let rd = reg(field(word, 0, 3) | (field(word, 7, 1) << 3));
    let rs = reg(field(word, 3, 3) | (field(word, 6, 1) << 3));
    let opcode = field(word, 8, 2);
    let op = HIGH_REGISTER_OPS[opcode as usize];

    if opcode == OP_BX {
        ins(op, rs)
    } else {
        ins(op, format!("{rd},{rs}"))
    }
}

fn load_pc_relative(word: u16, pc: u32) -> String {
    let rd = low_reg(word, 8);
    let target = aligned(pc).wrapping_add(field(word, 0, 8) << 2);
    ins("ldr", format!("{rd},[{}]", hex(target)))
}

fn load_store_register_offset(word: u16) -> String {
    let rd = low_reg(word, 0);
    let rb = low_reg(word, 3);
    let ro = low_reg(word, 6);
    let op = REGISTER_OFFSET_OPS[field(word, 10, 2) as usize];
    ins(op, format!("{rd},[{rb},{ro}]"))
}

fn load_store_byte_half(word: u16) -> String {
    let rd = low_reg(word, 0);
    let rb = low_reg(word, 3);
    let ro = low_reg(word, 6);
    let op = SIGN_EXTENDED_OPS[field(word, 10, 2) as usize];
    ins(op, format!("{rd},[{rb},{ro}]"))
}

fn load_store_immediate_offset(word: u16) -> String {
    let rd = low_reg(word, 0);
    let rb = low_reg(word, 3);
    let opcode = field(word, 11, 2);
    // Word accesses scale the offset by 4, byte accesses don't.
    let offset = field(word, 6, 5) << (!opcode & 0b10);
    ins(
        IMMEDIATE_OFFSET_OPS[opcode as usize],
        format!("{rd},[{rb},{}]", hex(offset)),
    )
}

fn load_store_half(word: u16) -> String {
    let rd = low_reg(word, 0);
    let rb = low_reg(word, 3);
    let offset = field(word, 6, 5) << 1;
    let op = if bit(word, 11) { "ldrh" } else { "strh" };
    ins(op, format!("{rd},[{rb},{}]", hex(offset)))
}

fn load_store_sp_relative(word: u16) -> String {
    let rd = low_reg(word, 8);
    let offset = field(word, 0, 8) << 2;
    let op = if bit(word, 11) { "ldr" } else { "str" };
    ins(op, format!("{rd},[sp,{}]", hex(offset)))
}

fn load_relative_address(word: u16, pc: u32) -> String {
    let rd = low_reg(word, 8);
    let offset = field(word, 0, 8) << 2;

    if bit(word, 11) {
        ins("add", format!("{rd},sp,{}", hex(offset)))
    } else {
        ins("add", format!("{rd},={}", hex(aligned(pc).wrapping_add(offset))))
    }
}

fn add_offset_sp(word: u16) -> String {
    let offset = field(word, 0, 7) << 2;
    let sign = if bit(word, 7) { "-" } else { "" };
    ins("add", format!("sp,{sign}{}", hex(offset)))
}

fn push_pop_registers(word: u16) -> String {
    let pop = bit(word, 11);
    // R folds in lr for push, pc for pop.
    let extra = if pop { 15 } else { 14 };
    let list = field(word, 0, 8) | (field(word, 8, 1) << extra);
    let op = if pop { "pop" } else { "push" };
    ins(op, register_list(list as u16))
}

fn load_store_multiple(word: u16) -> String {
    let rb = low_reg(word, 8);
    let list = register_list(field(word, 0, 8) as u16);
    let op = if bit(word, 11) { "ldmia" } else { "stmia" };
    ins(op, format!("{rb}!,{list}"))
}

fn conditional_branch(word: u16, pc: u32) -> String {
    let offset = sign_extend(field(word, 0, 8), 8) << 1;
    ins(
        format!("b{}", condition(field(word, 8, 4))),
        hex(pc.wrapping_add(offset as u32)),
    )
}

fn software_interrupt(word: u16) -> String {
    ins("swi", bios_function(field(word, 0, 8)))
}

fn unconditional_branch(word: u16, pc: u32) -> String {
    let offset = sign_extend(field(word, 0, 11), 11) << 1;
    ins("b", hex(pc.wrapping_add(offset as u32)))
}

fn long_branch_link(word: u16, lr: u32) -> String {
    if !bit(word, 11) {
        return ins("bl", BL_SETUP);
    }
    let offset = field(word, 0, 11) << 1;
    ins("bl", hex(lr.wrapping_add(offset)))
}
