//! Creature Arena command-line battles.
//!
//! Usage: `creature-arena [single|league|team] [category] [seed] [--auto] [--config PATH]`
//!
//! Commands while battling: `1`-`6` attack with that move, `s<N>` switch to
//! team slot N, `c` concede, `r` rematch, `q` quit.

use creature_arena::battle::engine::required_team_size;
use creature_arena::{
    draw_team, BattleEngine, BattleEngineError, BattleMode, BattleRng, BattleSetup, BattleState,
    CreatureCatalog, EngineConfig, EventBus, EventScheduler, OpponentTeam, PacingConfig,
    RandomSource, StaticCatalog, Team, TurnPhase,
};
use std::path::PathBuf;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

struct CliArgs {
    mode: BattleMode,
    category: String,
    seed: Option<u64>,
    auto: bool,
    config_path: Option<PathBuf>,
}

impl CliArgs {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut parsed = CliArgs {
            mode: BattleMode::Single,
            category: "normal".to_string(),
            seed: None,
            auto: false,
            config_path: None,
        };

        let mut positional = 0;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--auto" => parsed.auto = true,
                "--config" => {
                    let path = args.next().ok_or("--config needs a path")?;
                    parsed.config_path = Some(PathBuf::from(path));
                }
                _ => {
                    match positional {
                        0 => parsed.mode = arg.parse()?,
                        1 => parsed.category = arg.to_ascii_lowercase(),
                        2 => {
                            parsed.seed = Some(
                                arg.parse()
                                    .map_err(|_| format!("seed must be a number, got '{}'", arg))?,
                            )
                        }
                        _ => return Err(format!("unexpected argument '{}'", arg)),
                    }
                    positional += 1;
                }
            }
        }
        Ok(parsed)
    }
}

enum Command {
    Attack(usize),
    Switch(usize),
    Concede,
    Rematch,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim().to_ascii_lowercase();
    match line.as_str() {
        "c" => Some(Command::Concede),
        "r" => Some(Command::Rematch),
        "q" => Some(Command::Quit),
        _ => {
            if let Some(slot) = line.strip_prefix('s') {
                let slot: usize = slot.trim().parse().ok()?;
                return slot.checked_sub(1).map(Command::Switch);
            }
            let number: usize = line.parse().ok()?;
            number.checked_sub(1).map(Command::Attack)
        }
    }
}

async fn show(scheduler: &EventScheduler, bus: &EventBus, state: &BattleState) {
    scheduler
        .replay(bus, |event| {
            if let Some(text) = event.format(state) {
                println!("{}", text);
            }
        })
        .await;
}

fn print_status(state: &BattleState) {
    let (Some(player), Some(bot)) = (state.player.active(), state.bot.active()) else {
        return;
    };
    println!();
    println!(
        "Opponent: {} ({}/{} HP)",
        bot.name,
        bot.current_hp(),
        bot.max_hp()
    );
    println!(
        "You:      {} ({}/{} HP)",
        player.name,
        player.current_hp(),
        player.max_hp()
    );

    if state.phase == TurnPhase::AwaitingReplacement {
        println!("Choose a replacement:");
    } else {
        for (i, move_) in player.moves().iter().enumerate() {
            println!("  {}. {}", i + 1, move_);
        }
    }
    if state.player.len() > 1 {
        for (i, member) in state.player.members().iter().enumerate() {
            let marker = if i == state.player.active_index() { "*" } else { " " };
            let status = if member.is_fainted() { " (fainted)" } else { "" };
            println!("  s{}{} {}{}", i + 1, marker, member.name, status);
        }
    }
}

/// Pick a random legal command for unattended play.
fn auto_command(state: &BattleState, rng: &mut dyn RandomSource) -> Command {
    if state.phase == TurnPhase::AwaitingReplacement {
        let options = state.player.valid_switches();
        let index = rng.next_index(options.len().max(1), "auto switch");
        return Command::Switch(options.get(index).copied().unwrap_or(0));
    }
    let move_count = state
        .player
        .active()
        .map(|active| active.moves().len())
        .unwrap_or(1);
    Command::Attack(rng.next_index(move_count.max(1), "auto move"))
}

fn run_command<C: CreatureCatalog, R: RandomSource>(
    engine: &mut BattleEngine<C, R>,
    command: Command,
) -> Result<EventBus, BattleEngineError> {
    match command {
        Command::Attack(index) => {
            let move_name = engine
                .state()
                .player
                .active()
                .and_then(|active| active.moves().get(index))
                .map(|move_| move_.name.clone())
                .unwrap_or_default();
            engine.submit_player_attack(&move_name)
        }
        Command::Switch(index) => engine.submit_player_switch(index),
        Command::Concede => engine.concede(),
        Command::Rematch => engine.rematch(),
        Command::Quit => Ok(EventBus::new()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse(std::env::args().skip(1))?;
    let config = match &args.config_path {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let catalog = StaticCatalog::embedded(config.moves_per_combatant)?;
    let mut rng = match args.seed {
        Some(seed) => BattleRng::from_seed(seed),
        None => BattleRng::new_random(),
    };
    let mut auto_rng = match args.seed {
        Some(seed) => BattleRng::from_seed(seed.wrapping_add(1)),
        None => BattleRng::new_random(),
    };

    let pool = match catalog.category_pool(&args.category) {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("Categories: {}", catalog.categories().join(", "));
            return Err(err.into());
        }
    };
    let team_size = required_team_size(args.mode, &config);
    let player = draw_team(&catalog, &pool, &[], team_size, &mut rng);
    let names: Vec<&str> = player.iter().map(|member| member.name.as_str()).collect();
    println!("Your team: {}", names.join(", "));

    let scheduler = EventScheduler::new(if args.auto {
        PacingConfig::instant()
    } else {
        config.pacing.clone()
    });
    let setup = BattleSetup {
        player: Team::new(player),
        opponents: OpponentTeam::Generated,
        mode: args.mode,
        category: args.category.clone(),
    };
    let (mut engine, bus) = BattleEngine::start_battle(setup, config, catalog, rng)?;
    show(&scheduler, &bus, engine.state()).await;

    let mut lines = BufReader::new(stdin()).lines();
    loop {
        if engine.state().is_over() && args.auto {
            break;
        }
        if engine.state().is_over() {
            if engine.state().mode.is_league() {
                println!("Type q to quit.");
            } else {
                println!("Type r for a rematch or q to quit.");
            }
        } else {
            print_status(engine.state());
        }

        let command = if args.auto {
            auto_command(engine.state(), &mut auto_rng)
        } else {
            let Some(line) = lines.next_line().await? else {
                break;
            };
            match parse_command(&line) {
                Some(command) => command,
                None => {
                    println!("Unknown command '{}'.", line.trim());
                    continue;
                }
            }
        };
        if matches!(command, Command::Quit) {
            break;
        }

        match run_command(&mut engine, command) {
            Ok(bus) => show(&scheduler, &bus, engine.state()).await,
            Err(err) => println!("{}", err),
        }
    }
    Ok(())
}
