//! Program generation: text in, program that prints that text out.
//!
//! Generated programs use two cells. Cell 0 carries the value of the last
//! printed character; cell 1 is a scratch counter for multiplication loops
//! and is always back at zero between characters. For each character the
//! generator takes the shorter way round the 256-value wheel and emits either
//! a plain run of `+`/`-` or a loop such as `>++++++++[<++++++++>-]<` followed
//! by a remainder run.

use thiserror::Error;

/// Deltas at or below this are emitted as a plain run
const PLAIN_RUN_LIMIT: u8 = 12;

/// Largest loop counter tried when factoring a delta
const MAX_LOOP_COUNT: u8 = 16;

/// Fixed characters of a multiplication loop: `>`, `[`, `<`, `>`, `-`, `]`, `<`
const LOOP_OVERHEAD: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// Cells hold 0-255, so only Latin-1 characters can be printed
    #[error("Character {ch:?} at index {index} has no 8-bit code point")]
    Unrepresentable { ch: char, index: usize },
}

/// Build a program whose output is exactly `text`
pub fn generate(text: &str) -> Result<String, GenerateError> {
    let mut program = String::new();
    let mut current: u8 = 0;

    for (index, ch) in text.chars().enumerate() {
        let target = u8::try_from(u32::from(ch))
            .map_err(|_| GenerateError::Unrepresentable { ch, index })?;
        emit_transition(&mut program, current, target);
        program.push('.');
        current = target;
    }

    Ok(program)
}

fn emit_transition(program: &mut String, from: u8, to: u8) {
    let up = to.wrapping_sub(from);
    let down = from.wrapping_sub(to);
    let (delta, symbol) = if up <= down { (up, '+') } else { (down, '-') };

    if delta <= PLAIN_RUN_LIMIT {
        push_run(program, symbol, delta as usize);
        return;
    }

    let (count, step, remainder) = factor(delta);
    program.push('>');
    push_run(program, '+', count as usize);
    program.push_str("[<");
    push_run(program, symbol, step as usize);
    program.push_str(">-]<");
    push_run(program, symbol, remainder as usize);
}

/// Split `delta` into `count * step + remainder` with the shortest encoding
fn factor(delta: u8) -> (u8, u8, u8) {
    let mut best = (1, delta, 0);
    let mut best_len = usize::MAX;

    for count in 2..=MAX_LOOP_COUNT {
        let step = delta / count;
        let remainder = delta % count;
        let len = count as usize + step as usize + remainder as usize + LOOP_OVERHEAD;
        if step > 0 && len < best_len {
            best = (count, step, remainder);
            best_len = len;
        }
    }

    best
}

fn push_run(program: &mut String, symbol: char, n: usize) {
    program.extend(std::iter::repeat(symbol).take(n));
}
