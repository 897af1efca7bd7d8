use crate::tui::app::App;
use crate::tui::draw::draw_app;
use clap::{Args, Parser, Subcommand, ValueEnum};
use crossterm::event::{Event, KeyCode, KeyEventKind};
use flownet::persist::{load_json, save_json};
use flownet::scenario::basic::BasicScenario;
use flownet::scenario::random::RandomScenario;
use flownet::scenario::scenario::Scenario;
use flownet::{MaxFlow, Network};
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

mod tui;

#[derive(Parser, Debug)]
#[command(author, version, about = "Maximum flow over capacitated networks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a network, its maximum flow and a minimum cut
    Solve {
        #[command(flatten)]
        input: Input,
        /// Give up after this many milliseconds
        #[arg(long)]
        deadline_ms: Option<u64>,
    },
    /// Write a seeded random network as JSON
    Generate {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 24)]
        nodes: usize,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Browse a network and its flow in the terminal
    View {
        #[command(flatten)]
        input: Input,
    },
}

#[derive(Args, Debug)]
struct Input {
    /// JSON network to load instead of a scenario
    #[arg(short, long)]
    file: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = ScenarioKind::Basic)]
    scenario: ScenarioKind,
    /// Seed of the random scenario
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Size of the random scenario
    #[arg(long, default_value_t = 24)]
    nodes: usize,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ScenarioKind {
    Basic,
    Random,
}

impl Input {
    fn load(&self) -> flownet::Result<(String, Network<String>)> {
        if let Some(path) = &self.file {
            let network: Network<String> = load_json(path)?;
            info!(
                "loaded {} nodes and {} arcs from {}",
                network.order(),
                network.size(),
                path.display()
            );
            return Ok((path.display().to_string(), network));
        }
        let scenario: Box<dyn Scenario> = match self.scenario {
            ScenarioKind::Basic => Box::new(BasicScenario::new()),
            ScenarioKind::Random => Box::new(RandomScenario::new(self.seed, self.nodes)),
        };
        Ok((scenario.name().to_string(), scenario.build()?))
    }
}

fn solve(input: &Input, deadline_ms: Option<u64>) -> flownet::Result<()> {
    let (_, network) = input.load()?;
    let mut solver = MaxFlow::new(&network);
    if let Some(ms) = deadline_ms {
        solver = solver.with_deadline(Duration::from_millis(ms));
    }
    let outcome = solver.solve()?;

    println!("{}", network);
    println!();
    println!("max flow: {}", outcome.value());
    println!("augmentations: {}", outcome.augmentations());
    println!("min cut ({}):", outcome.min_cut().capacity());
    for arc in outcome.min_cut().arcs() {
        println!("  {}", arc);
    }
    Ok(())
}

fn generate(seed: u64, nodes: usize, output: &Path) -> flownet::Result<()> {
    let network = RandomScenario::new(seed, nodes).build()?;
    save_json(&network, output)?;
    info!(
        "wrote {} nodes and {} arcs to {}",
        network.order(),
        network.size(),
        output.display()
    );
    Ok(())
}

fn view(input: &Input) -> flownet::Result<()> {
    let (title, network) = input.load()?;
    let mut terminal = ratatui::init();
    let mut app = App::new(title, network);

    while app.running {
        terminal.draw(|frame| draw_app(frame, &app))?;

        if crossterm::event::poll(Duration::from_millis(16))? {
            match crossterm::event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') => app.running = false,
                    KeyCode::Char('s') => app.toggle_sort(),
                    _ => continue,
                },
                _ => continue,
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match &cli.command {
        Command::Solve { input, deadline_ms } => solve(input, *deadline_ms),
        Command::Generate {
            seed,
            nodes,
            output,
        } => generate(*seed, *nodes, output),
        Command::View { input } => view(input),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
