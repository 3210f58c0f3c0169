//! Recognised instruction symbols.
//!
//! Any character without a mapping here is a no-op that still consumes an
//! operation. `,` (input) is deliberately absent: the language has no input
//! stream, so it is treated like any other comment character.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `>`
    Right,
    /// `<`
    Left,
    /// `+`
    Increment,
    /// `-`
    Decrement,
    /// `.`
    Output,
    /// `[`
    LoopOpen,
    /// `]`
    LoopClose,
}

impl Instruction {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '>' => Some(Instruction::Right),
            '<' => Some(Instruction::Left),
            '+' => Some(Instruction::Increment),
            '-' => Some(Instruction::Decrement),
            '.' => Some(Instruction::Output),
            '[' => Some(Instruction::LoopOpen),
            ']' => Some(Instruction::LoopClose),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Instruction::Right => '>',
            Instruction::Left => '<',
            Instruction::Increment => '+',
            Instruction::Decrement => '-',
            Instruction::Output => '.',
            Instruction::LoopOpen => '[',
            Instruction::LoopClose => ']',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_map_both_ways() {
        for c in "><+-.[]".chars() {
            let instruction = Instruction::from_char(c).unwrap();
            assert_eq!(instruction.symbol(), c);
        }
    }

    #[test]
    fn input_and_text_are_no_ops() {
        assert_eq!(Instruction::from_char(','), None);
        assert_eq!(Instruction::from_char('a'), None);
        assert_eq!(Instruction::from_char('\n'), None);
    }
}
