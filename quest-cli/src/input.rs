use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use quest_engine::{Command, StepReport};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Maps one line of player input to a command. Accepts the Portuguese menu
/// keys (`E`/`D`/`S`), English ones (`L`/`R`/`Q`) and the spelled-out words,
/// in any case.
pub fn parse_key(line: &str) -> Command {
    match line.trim().to_lowercase().as_str() {
        "e" | "l" | "esquerda" | "left" => Command::Left,
        "d" | "r" | "direita" | "right" => Command::Right,
        "s" | "q" | "sair" | "exit" | "quit" => Command::Exit,
        _ => Command::Invalid,
    }
}

/// Strips the line terminator and surrounding blanks from a typed name.
pub fn clean_name(line: &str) -> &str {
    line.trim()
}

/// Where exploration commands come from.
pub trait CommandSource {
    /// `None` means the source is exhausted; the caller treats that as `Exit`.
    fn next_command(&mut self, report: &StepReport) -> Result<Option<Command>>;
}

/// Line-oriented input from any reader, stdin in practice.
pub struct Console<R> {
    reader: R,
    prompt: bool,
}

impl<R: BufRead> Console<R> {
    pub fn new(reader: R, prompt: bool) -> Self {
        Self { reader, prompt }
    }

    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        if self.prompt {
            print!("{}", prompt);
            io::stdout().flush().context("Failed to flush prompt")?;
        }
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .context("Failed to read from input")?;
        Ok((read > 0).then_some(line))
    }
}

impl<R: BufRead> CommandSource for Console<R> {
    fn next_command(&mut self, _report: &StepReport) -> Result<Option<Command>> {
        Ok(self.read_line("\nYour choice: ")?.map(|line| parse_key(&line)))
    }
}

/// A pre-recorded sequence of keys, one command per non-blank character.
pub struct Plan {
    keys: Vec<Command>,
    next: usize,
}

impl Plan {
    pub fn new(plan: &str) -> Self {
        let keys = plan
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| parse_key(c.encode_utf8(&mut [0; 4])))
            .collect();
        Self { keys, next: 0 }
    }
}

impl CommandSource for Plan {
    fn next_command(&mut self, _report: &StepReport) -> Result<Option<Command>> {
        let command = self.keys.get(self.next).copied();
        self.next += 1;
        Ok(command)
    }
}

/// Random descent: picks any open direction, exits at a dead end. The seed
/// makes a walk reproducible.
pub struct Wander {
    rng: StdRng,
}

impl Wander {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl CommandSource for Wander {
    fn next_command(&mut self, report: &StepReport) -> Result<Option<Command>> {
        let mut open = Vec::with_capacity(2);
        if report.directions.left {
            open.push(Command::Left);
        }
        if report.directions.right {
            open.push(Command::Right);
        }
        if open.is_empty() {
            return Ok(Some(Command::Exit));
        }
        Ok(Some(open[self.rng.gen_range(0..open.len())]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quest_engine::{ClueStore, ExplorationEngine, LeafPolicy, Scenario};

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("e\n"), Command::Left);
        assert_eq!(parse_key(" D "), Command::Right);
        assert_eq!(parse_key("S"), Command::Exit);
        assert_eq!(parse_key("l"), Command::Left);
        assert_eq!(parse_key("Right"), Command::Right);
        assert_eq!(parse_key("quit"), Command::Exit);
        assert_eq!(parse_key("x"), Command::Invalid);
        assert_eq!(parse_key(""), Command::Invalid);
        assert_eq!(parse_key("ed"), Command::Invalid);
    }

    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name("Advogado\n"), "Advogado");
        assert_eq!(clean_name("  Dr. X \r\n"), "Dr. X");
    }

    #[test]
    fn test_plan_and_console_sources() {
        let (graph, _) = Scenario::classic().build().unwrap();
        let mut store = ClueStore::new();
        let (_, report) =
            ExplorationEngine::start(&graph, &mut store, LeafPolicy::RequireExit).unwrap();

        let mut plan = Plan::new("e d\nx");
        assert_eq!(plan.next_command(&report).unwrap(), Some(Command::Left));
        assert_eq!(plan.next_command(&report).unwrap(), Some(Command::Right));
        assert_eq!(plan.next_command(&report).unwrap(), Some(Command::Invalid));
        assert_eq!(plan.next_command(&report).unwrap(), None);

        let mut console = Console::new("d\ns\n".as_bytes(), false);
        assert_eq!(console.next_command(&report).unwrap(), Some(Command::Right));
        assert_eq!(console.next_command(&report).unwrap(), Some(Command::Exit));
        assert_eq!(console.next_command(&report).unwrap(), None);
    }

    #[test]
    fn test_wander_is_reproducible_and_ends() {
        let (graph, _) = Scenario::classic().build().unwrap();

        let walk = |seed| {
            let mut store = ClueStore::new();
            let (mut engine, mut report) =
                ExplorationEngine::start(&graph, &mut store, LeafPolicy::RequireExit).unwrap();
            let mut wander = Wander::new(seed);
            while !engine.is_finished() {
                let command = wander.next_command(&report).unwrap().unwrap();
                assert_ne!(command, Command::Invalid);
                report = engine.step(command);
            }
            engine.summary().path
        };

        let first = walk(7);
        assert_eq!(first, walk(7));
        let last = first.last().unwrap();
        assert!(graph.is_leaf(graph.find(last).unwrap()));
    }
}
