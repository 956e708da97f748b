use quest_engine::{
    EngineState, EvidenceLine, ExplorationSummary, Judgement, Outcome, Side, StepEvent, StepReport,
};
use serde::Serialize;

const RULE: &str = "================================================";

/// Everything the session produced, for `--json`.
#[derive(Debug, Serialize)]
pub struct Transcript {
    pub exploration: ExplorationSummary,
    pub evidence: Vec<EvidenceLine>,
    pub judgement: Judgement,
}

pub fn banner() {
    println!("{}", RULE);
    println!("     DETECTIVE QUEST - ENIGMA STUDIOS");
    println!("{}", RULE);
    println!("A mysterious mansion, hidden clues, and a culprit to unmask.");
}

pub fn step(report: &StepReport) {
    match report.event {
        StepEvent::Entered => {
            println!("\n{}", RULE);
            println!("Location: {}", report.location);
            println!("{}", RULE);
            match &report.clue {
                Some(clue) if report.new_clue => {
                    println!("\nCLUE FOUND: \"{}\"", clue);
                    println!("  -> recorded in the notebook");
                }
                Some(clue) => println!("\nClue already noted: \"{}\"", clue),
                None => println!("\nNothing of interest here."),
            }
            if report.is_leaf {
                println!("\nDead end!");
            }
        }
        StepEvent::Blocked(Side::Left) => println!("\nNo way through on the left!"),
        StepEvent::Blocked(Side::Right) => println!("\nNo way through on the right!"),
        StepEvent::InvalidCommand => println!("\nInvalid command!"),
        StepEvent::Finished => println!("\nHeading back to review the evidence..."),
        StepEvent::AlreadyFinished => {}
    }

    if report.state == EngineState::AtLocation {
        println!("\n--- Where to? ---");
        if report.directions.left {
            println!("  [E] - go left");
        }
        if report.directions.right {
            println!("  [D] - go right");
        }
        println!("  [S] - stop exploring");
        println!("\nClues collected: {}", report.clues_found);
    }
}

pub fn summary(summary: &ExplorationSummary) {
    println!("\nRoute: {}", summary.path.join(" -> "));
    println!(
        "Clues collected: {} ({} distinct)",
        summary.clues_found, summary.distinct_clues
    );
}

pub fn no_evidence() {
    println!("\n{}", RULE);
    println!("              TRIAL");
    println!("{}", RULE);
    println!("\nYou did not collect any clues.");
    println!("The case remains unsolved.");
}

pub fn evidence(lines: &[EvidenceLine]) {
    println!("\n{}", RULE);
    println!("              TRIAL");
    println!("{}", RULE);
    println!("\nCollected clues and related suspects:\n");
    for line in lines {
        println!("  \"{}\"", line.clue);
        match &line.suspect {
            Some(suspect) => println!("     -> points to: {}\n", suspect),
            None => println!("     -> points to no one\n"),
        }
    }
}

pub fn judgement(judgement: &Judgement) {
    println!("\n{}", RULE);
    println!("Clues pointing to {}: {}\n", judgement.accused, judgement.count);
    match judgement.outcome {
        Outcome::Resolved => {
            println!("CASE CLOSED!");
            println!(
                "There is enough evidence ({} clues) to convict {}.",
                judgement.count, judgement.accused
            );
        }
        Outcome::Inconclusive => {
            println!("NOT ENOUGH EVIDENCE!");
            println!("Only 1 clue points to {}; at least 2 are needed.", judgement.accused);
            println!("The case remains open...");
        }
        Outcome::IncorrectAccusation => {
            println!("WRONG ACCUSATION!");
            println!("No clue points to {}.", judgement.accused);
            println!("The real culprit is still free...");
        }
        Outcome::NoEvidence => println!("No clues were collected."),
    }
}
