use pretty_assertions::assert_eq;

use disarmv4t::lexicon::CONDITIONS;
use disarmv4t::render_arm;

// Expected text for a mnemonic/operand pair in the listing column layout.
fn line(mnemonic: &str, operands: &str) -> String {
    format!("{mnemonic:<8} {operands}")
}

// Render a word located at `addr` (pc = addr + 8).
fn at(addr: u32, word: u32) -> String {
    render_arm(word, addr + 8)
}

// Encode a data-processing instruction with an immediate operand.
fn enc_dp_imm(cond: u32, opcode: u32, s: bool, rn: u32, rd: u32, rot: u32, imm8: u32) -> u32 {
    (cond << 28) | (1 << 25) | (opcode << 21) | ((s as u32) << 20) | (rn << 16) | (rd << 12) | (rot << 8) | imm8
}

#[test]
fn mov_immediate_end_to_end() {
    let text = at(0x1000, 0xE3A0_0005);
    assert_eq!(text, line("mov", "r0,0x5"));
    assert!(text.starts_with("mov "));
    assert!(text.ends_with("r0,0x5"));
}

#[test]
fn every_condition_suffix() {
    for (cond, suffix) in CONDITIONS.iter().enumerate() {
        // mov r0,r1
        let word = ((cond as u32) << 28) | 0x01A0_0001;
        assert_eq!(at(0, word), line(&format!("mov{suffix}"), "r0,r1"), "cond {cond}");
    }
    // al renders no suffix at all
    assert!(at(0, 0xE1A0_0001).starts_with("mov "));
}

#[test]
fn branches() {
    assert_eq!(at(0x1000, 0xE12F_FF1E), line("bx", "lr"));
    assert_eq!(at(0x1000, 0x012F_FF13), line("bxeq", "r3"));
    // b . (offset -2 words)
    assert_eq!(at(0x1000, 0xEAFF_FFFE), line("b", "0x1000"));
    assert_eq!(at(0x1000, 0xEB00_0002), line("bl", "0x1010"));
    assert_eq!(at(0x1000, 0x1B00_0000), line("blne", "0x1008"));
}

#[test]
fn data_processing_operands() {
    assert_eq!(at(0, 0xE081_0002), line("add", "r0,r1,r2"));
    assert_eq!(at(0, 0xE091_0312), line("adds", "r0,r1,r2,lsl r3"));
    assert_eq!(at(0, 0xE351_0000), line("cmp", "r1,0x0"));
    assert_eq!(at(0, 0xE183_21C4), line("orr", "r2,r3,r4,asr 0x3"));
    assert_eq!(at(0, enc_dp_imm(0xE, 0b1111, false, 0, 0, 4, 0xFF)), line("mvn", "r0,0xFF000000"));
    assert_eq!(at(0, enc_dp_imm(0x0, 0b1000, true, 2, 0, 0, 0x10)), line("tsteq", "r2,0x10"));
}

#[test]
fn shift_amount_zero_special_cases() {
    // movs r0,r1,lsr #32
    assert_eq!(at(0, 0xE1B0_0021), line("movs", "r0,r1,lsr 0x20"));
    // mov r0,r1,asr #32
    assert_eq!(at(0, 0xE1A0_0041), line("mov", "r0,r1,asr 0x20"));
    // mov r0,r1,rrx
    assert_eq!(at(0, 0xE1A0_0061), line("mov", "r0,r1,rrx"));
    // mov r0,r1 (lsl #0)
    assert_eq!(at(0, 0xE1A0_0001), line("mov", "r0,r1"));
}

#[test]
fn pc_relative_literals() {
    // add r0,pc,#0x10 at 0x1000 -> 0x1008 + 0x10
    assert_eq!(at(0x1000, 0xE28F_0010), line("add", "r0,=0x1018"));
    // sub r1,pc,#4
    assert_eq!(at(0x1000, 0xE24F_1004), line("sub", "r1,=0x1004"));
    // register operand keeps the three-operand form
    assert_eq!(at(0x1000, 0xE08F_0001), line("add", "r0,pc,r1"));
    // other opcodes with rn = pc are not rewritten
    assert_eq!(at(0x1000, enc_dp_imm(0xE, 0b0000, false, 15, 0, 0, 0xFF)), line("and", "r0,pc,0xFF"));
}

#[test]
fn psr_transfers() {
    assert_eq!(at(0, 0xE10F_0000), line("mrs", "r0,cpsr"));
    assert_eq!(at(0, 0xE14F_3000), line("mrs", "r3,spsr"));
    assert_eq!(at(0, 0xE129_F000), line("msr", "cpsr_fc,r0"));
    assert_eq!(at(0, 0xE368_F20F), line("msr", "spsr_f,0xF0000000"));
}

#[test]
fn multiplies() {
    assert_eq!(at(0, 0xE000_0291), line("mul", "r0,r1,r2"));
    assert_eq!(at(0, 0xE031_3291), line("mlas", "r1,r1,r2,r3"));
    assert_eq!(at(0, 0xE081_0392), line("umull", "r0,r1,r2,r3"));
    assert_eq!(at(0, 0xE0F1_0392), line("smlals", "r0,r1,r2,r3"));
}

#[test]
fn single_data_transfers() {
    assert_eq!(at(0, 0xE591_0004), line("ldr", "r0,[r1,0x4]"));
    assert_eq!(at(0, 0x0591_0004), line("ldreq", "r0,[r1,0x4]"));
    assert_eq!(at(0, 0xE523_2008), line("str", "r2,[r3,-0x8]!"));
    assert_eq!(at(0, 0xE4D1_0001), line("ldrb", "r0,[r1],0x1"));
    assert_eq!(at(0, 0xE791_0102), line("ldr", "r0,[r1,r2,lsl 0x2]"));
    assert_eq!(at(0, 0xE4B1_0000), line("ldrt", "r0,[r1],0x0"));
}

#[test]
fn halfword_and_signed_transfers() {
    assert_eq!(at(0, 0xE1D1_00B2), line("ldrh", "r0,[r1,0x2]"));
    assert_eq!(at(0, 0xE191_00D2), line("ldrsb", "r0,[r1,r2]"));
    assert_eq!(at(0, 0xE054_31F2), line("ldrsh", "r3,[r4],-0x12"));
    assert_eq!(at(0, 0xE121_00B2), line("strh", "r0,[r1,-r2]!"));
}

#[test]
fn block_transfers_use_stack_suffixes() {
    assert_eq!(at(0, 0xE92D_4001), line("stmfd", "sp!,{r0,lr}"));
    assert_eq!(at(0, 0xE8BD_8001), line("ldmfd", "sp!,{r0,pc}"));
    assert_eq!(at(0, 0xE880_000E), line("stmea", "r0,{r1,r2,r3}"));
    assert_eq!(at(0, 0xE9D0_0000), line("ldmed", "r0,{}^"));
}

#[test]
fn swaps() {
    assert_eq!(at(0, 0xE101_0092), line("swp", "r0,r2,[r1]"));
    assert_eq!(at(0, 0xE141_0092), line("swpb", "r0,r2,[r1]"));
}

#[test]
fn software_interrupts() {
    assert_eq!(at(0, 0xEF00_0006), line("swi", "Div"));
    assert_eq!(at(0, 0xEF00_002A), line("swi", "SoundGetJumpList"));
    assert_eq!(at(0, 0xEF00_0064), line("swi", "Unknown"));
    assert_eq!(at(0, 0x1F00_0000), line("swine", "SoftReset"));
}

#[test]
fn undefined_words() {
    assert_eq!(at(0, 0xE790_0011), "Undefined");
    assert_eq!(at(0, 0xEE00_0000), "Undefined");
    assert_eq!(at(0, 0xEC00_0000), "Undefined");
}
