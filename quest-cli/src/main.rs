mod input;
mod render;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use input::{clean_name, CommandSource, Console, Plan, Wander};
use quest_engine::{
    ClueStore, Command, ExplorationEngine, ExplorationSummary, LeafPolicy, LocationGraph,
    Scenario, VerdictEvaluator,
};
use render::Transcript;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quest")]
#[command(about = "Explore the mansion, collect clues and accuse a suspect")]
struct Cli {
    /// Scenario JSON file (defaults to QUEST_SCENARIO, then the built-in mansion)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// What happens on reaching a room with no way forward
    #[arg(long, value_enum, default_value_t = LeafPolicyArg::RequireExit)]
    leaf_policy: LeafPolicyArg,

    /// Direction keys to play instead of reading stdin, e.g. "EED"
    #[arg(long, conflicts_with = "wander")]
    plan: Option<String>,

    /// Wander randomly with this seed instead of reading stdin
    #[arg(long)]
    wander: Option<u64>,

    /// Name of the accused instead of asking for it
    #[arg(long)]
    accuse: Option<String>,

    /// Print the session as JSON instead of the interactive text
    #[arg(long)]
    json: bool,

    /// Print the active scenario as JSON and exit
    #[arg(long)]
    dump_scenario: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LeafPolicyArg {
    RequireExit,
    AutoStop,
}

impl From<LeafPolicyArg> for LeafPolicy {
    fn from(arg: LeafPolicyArg) -> Self {
        match arg {
            LeafPolicyArg::RequireExit => LeafPolicy::RequireExit,
            LeafPolicyArg::AutoStop => LeafPolicy::AutoStop,
        }
    }
}

fn load_scenario(path: Option<&Path>) -> Result<Scenario> {
    let path = path
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os("QUEST_SCENARIO").map(PathBuf::from));

    match path {
        Some(path) => {
            info!(path = %path.display(), "loading scenario");
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read scenario '{}'", path.display()))?;
            Scenario::from_json(&text)
                .with_context(|| format!("Failed to parse scenario '{}'", path.display()))
        }
        None => Ok(Scenario::classic()),
    }
}

fn explore(
    graph: &LocationGraph,
    store: &mut ClueStore,
    policy: LeafPolicy,
    source: &mut dyn CommandSource,
    human: bool,
) -> Result<ExplorationSummary> {
    let (mut engine, mut report) = ExplorationEngine::start(graph, store, policy)?;
    if human {
        render::step(&report);
    }

    while !engine.is_finished() {
        let command = source.next_command(&report)?.unwrap_or(Command::Exit);
        report = engine.step(command);
        if human {
            render::step(&report);
        }
    }
    Ok(engine.summary())
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let scenario = load_scenario(cli.scenario.as_deref())?;

    if cli.dump_scenario {
        println!("{}", scenario.to_json()?);
        return Ok(());
    }

    let (graph, index) = scenario
        .build()
        .context("Scenario does not describe a valid mansion")?;
    let policy = LeafPolicy::from(cli.leaf_policy);
    let human = !cli.json;

    if human {
        render::banner();
    }

    let mut console = Console::new(io::stdin().lock(), human);
    let mut store = ClueStore::new();
    let exploration = match (&cli.plan, cli.wander) {
        (Some(plan), _) => explore(&graph, &mut store, policy, &mut Plan::new(plan), human)?,
        (None, Some(seed)) => explore(&graph, &mut store, policy, &mut Wander::new(seed), human)?,
        (None, None) => explore(&graph, &mut store, policy, &mut console, human)?,
    };
    if human {
        render::summary(&exploration);
    }

    let evaluator = VerdictEvaluator::new(&store, &index);
    let evidence = evaluator.evidence();
    let judgement = if evaluator.has_evidence() {
        if human {
            render::evidence(&evidence);
        }
        let accused = match cli.accuse {
            Some(name) => name,
            None => console
                .read_line("\nBased on the evidence, who do you accuse?\nFull name of the suspect: ")?
                .ok_or_else(|| anyhow!("No accusation was made"))?,
        };
        let judgement = evaluator.judge(clean_name(&accused));
        if human {
            render::judgement(&judgement);
        }
        judgement
    } else {
        if human {
            render::no_evidence();
        }
        evaluator.judge(clean_name(cli.accuse.as_deref().unwrap_or_default()))
    };

    if human {
        println!("\nThanks for playing Detective Quest!");
    } else {
        let transcript = Transcript {
            exploration,
            evidence,
            judgement,
        };
        println!("{}", serde_json::to_string_pretty(&transcript)?);
    }

    Ok(())
}
