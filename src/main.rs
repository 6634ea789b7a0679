//! Headless self-play runner (default binary).
//!
//! Plays full rounds without any rendering: pick a removable group per a
//! simple selection policy, collapse it, settle, repeat until terminal, then
//! report aggregate stats. Useful for exercising the engine end-to-end and
//! for eyeballing how the scoring rule behaves across policies and seeds.

use anyhow::{bail, Result};
use clap::Parser;

use crumble::core::{Group, Round, SpawnRng};
use crumble::types::{
    BoardConfig, Score, SpawnPolicy, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH,
};

#[derive(Parser, Debug)]
#[command(name = "crumble-sim", about = "Headless self-play for the collapse engine")]
struct Args {
    /// Board width in columns
    #[arg(long, default_value_t = DEFAULT_BOARD_WIDTH)]
    width: usize,

    /// Board height in rows
    #[arg(long, default_value_t = DEFAULT_BOARD_HEIGHT)]
    height: usize,

    /// Base RNG seed; round N plays seed + N
    #[arg(long, default_value_t = 1)]
    seed: u32,

    /// How many rounds to play
    #[arg(long, default_value_t = 10)]
    rounds: u32,

    /// Selection policy: greedy | random | first
    #[arg(long, default_value = "greedy")]
    policy: String,

    /// Re-roll fresh boards until they contain a removable group
    #[arg(long)]
    require_move: bool,
}

#[derive(Debug, Clone, Copy)]
enum Policy {
    /// Largest group first
    Greedy,
    /// Uniformly random removable group
    Random,
    /// First removable group in scan order
    First,
}

impl Policy {
    fn from_cli(s: &str) -> Option<Self> {
        match s {
            "greedy" => Some(Policy::Greedy),
            "random" => Some(Policy::Random),
            "first" => Some(Policy::First),
            _ => None,
        }
    }

    fn pick(&self, removable: &[Group], rng: &mut SpawnRng) -> usize {
        match self {
            Policy::Greedy => removable
                .iter()
                .enumerate()
                .max_by_key(|(_, g)| g.len())
                .map(|(i, _)| i)
                .unwrap_or(0),
            Policy::Random => rng.next_range(removable.len() as u32) as usize,
            Policy::First => 0,
        }
    }
}

#[derive(Debug, Default)]
struct SimStats {
    rounds: u32,
    total_score: Score,
    best_score: Score,
    total_taps: u64,
    cleared_boards: u32,
    total_leftover: u64,
}

impl SimStats {
    fn on_round_end(&mut self, score: Score, taps: u64, leftover: usize) {
        self.rounds += 1;
        self.total_score += score;
        self.best_score = self.best_score.max(score);
        self.total_taps += taps;
        self.total_leftover += leftover as u64;
        if leftover == 0 {
            self.cleared_boards += 1;
        }
    }

    fn print_summary(&self) {
        println!("rounds:         {}", self.rounds);
        println!("total score:    {}", self.total_score);
        println!("best score:     {}", self.best_score);
        if self.rounds > 0 {
            println!(
                "mean score:     {:.1}",
                self.total_score as f64 / self.rounds as f64
            );
            println!(
                "mean leftover:  {:.1}",
                self.total_leftover as f64 / self.rounds as f64
            );
        }
        println!("taps:           {}", self.total_taps);
        println!("cleared boards: {}", self.cleared_boards);
    }
}

fn play_round(config: &BoardConfig, policy: Policy, rng: &mut SpawnRng) -> (Score, u64, usize) {
    let mut round = Round::new(config);
    let mut taps: u64 = 0;

    loop {
        let removable: Vec<Group> = round
            .board()
            .groups()
            .into_iter()
            .filter(Group::removable)
            .collect();

        if removable.is_empty() {
            round.finish_settling();
            break;
        }

        let group = &removable[policy.pick(&removable, rng)];
        taps += 1;
        if round.collapse(group).is_none() {
            break;
        }
        round.compact();
        if round.finish_settling() {
            break;
        }
    }

    (round.score(), taps, round.board().count_tokens())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let Some(policy) = Policy::from_cli(&args.policy) else {
        bail!("unknown policy {:?} (expected greedy | random | first)", args.policy);
    };

    let spawn = if args.require_move {
        SpawnPolicy::RequireMove
    } else {
        SpawnPolicy::Unfiltered
    };

    // Policy randomness is independent of board spawns
    let mut pick_rng = SpawnRng::new(args.seed.wrapping_mul(2654435769));
    let mut stats = SimStats::default();

    for n in 0..args.rounds {
        let config = BoardConfig::new(args.width, args.height)
            .with_seed(args.seed.wrapping_add(n))
            .with_spawn(spawn);

        let (score, taps, leftover) = play_round(&config, policy, &mut pick_rng);
        stats.on_round_end(score, taps, leftover);
    }

    println!(
        "crumble-sim: {}x{} boards, policy {}, base seed {}",
        args.width, args.height, args.policy, args.seed
    );
    stats.print_summary();

    Ok(())
}
