/// Instruction opcodes, written to the wire as little-endian `u16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Opcode {
    Ret = 0,
    Call = 1,
    PushInt = 2,
    Let = 3,
    Echo = 4,
    Load = 5,
    End = 6,
    Sub = 7,
    Add = 8,
    NegateInt = 9,
    PushString = 10,
    PushUnit = 11,
    PushBool = 12,
    Jump = 13,
    NegateBool = 14,
    StartFrame = 15,
    Mark = 16,
    GreaterThan = 17,
    GreaterThanEqual = 18,
    LessThan = 19,
    LessThanEqual = 20,
    Equals = 21,
}

impl Opcode {
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Ret => "RET",
            Opcode::Call => "CALL",
            Opcode::PushInt => "PUSH_INT",
            Opcode::Let => "LET",
            Opcode::Echo => "ECHO",
            Opcode::Load => "LOAD",
            Opcode::End => "END",
            Opcode::Sub => "SUB",
            Opcode::Add => "ADD",
            Opcode::NegateInt => "NEGATE_INT",
            Opcode::PushString => "PUSH_STRING",
            Opcode::PushUnit => "PUSH_UNIT",
            Opcode::PushBool => "PUSH_BOOL",
            Opcode::Jump => "JUMP",
            Opcode::NegateBool => "NEGATE_BOOL",
            Opcode::StartFrame => "START_FRAME",
            Opcode::Mark => "MARK",
            Opcode::GreaterThan => "GT",
            Opcode::GreaterThanEqual => "GTE",
            Opcode::LessThan => "LT",
            Opcode::LessThanEqual => "LTE",
            Opcode::Equals => "EQ",
        }
    }
}

impl TryFrom<u16> for Opcode {
    type Error = u16;

    fn try_from(raw: u16) -> Result<Self, u16> {
        Ok(match raw {
            0 => Opcode::Ret,
            1 => Opcode::Call,
            2 => Opcode::PushInt,
            3 => Opcode::Let,
            4 => Opcode::Echo,
            5 => Opcode::Load,
            6 => Opcode::End,
            7 => Opcode::Sub,
            8 => Opcode::Add,
            9 => Opcode::NegateInt,
            10 => Opcode::PushString,
            11 => Opcode::PushUnit,
            12 => Opcode::PushBool,
            13 => Opcode::Jump,
            14 => Opcode::NegateBool,
            15 => Opcode::StartFrame,
            16 => Opcode::Mark,
            17 => Opcode::GreaterThan,
            18 => Opcode::GreaterThanEqual,
            19 => Opcode::LessThan,
            20 => Opcode::LessThanEqual,
            21 => Opcode::Equals,
            unknown => return Err(unknown),
        })
    }
}

/// Record tags of the structure section that precedes the instruction
/// stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum StructureTag {
    Function = 0,
    End = 1,
}

impl TryFrom<u16> for StructureTag {
    type Error = u16;

    fn try_from(raw: u16) -> Result<Self, u16> {
        match raw {
            0 => Ok(StructureTag::Function),
            1 => Ok(StructureTag::End),
            unknown => Err(unknown),
        }
    }
}

/// Condition under which a `JUMP` is taken. The mode travels on the operand
/// stack as an integer pushed just before the jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum JumpMode {
    /// Pop a boolean as well and jump only when it is false.
    IfFalse = 0,
    Always = 1,
}

impl JumpMode {
    pub fn flag(self) -> u64 {
        self as u64
    }

    pub fn from_flag(flag: i64) -> Option<JumpMode> {
        match flag {
            0 => Some(JumpMode::IfFalse),
            1 => Some(JumpMode::Always),
            _ => None,
        }
    }
}

/// How a `JUMP` target is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum JumpKind {
    /// Skip the following `u64` operand's worth of bytes.
    RelativeBytes = 0,
    /// Jump to a marker recorded in the current frame.
    Marker = 1,
}

impl JumpKind {
    pub fn mnemonic(self) -> &'static str {
        match self {
            JumpKind::RelativeBytes => "RELATIVE_BYTES",
            JumpKind::Marker => "MARKER",
        }
    }
}

impl TryFrom<u16> for JumpKind {
    type Error = u16;

    fn try_from(raw: u16) -> Result<Self, u16> {
        match raw {
            0 => Ok(JumpKind::RelativeBytes),
            1 => Ok(JumpKind::Marker),
            unknown => Err(unknown),
        }
    }
}

#[cfg(test)]
#[path = "opcode_test.rs"]
mod opcode_test;
