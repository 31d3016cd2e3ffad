//! Transfer line: `n` machines connected by buffers of capacity `k`.
//!
//! Each machine can start (controllable), finish or break down
//! (uncontrollable) and be repaired (controllable). Every buffer spec forbids
//! overflow and underflow. With `--reserve`, a machine also has to reserve a
//! buffer slot before it starts, which makes the line controllable.
//!
//! Run with:
//! ```bash
//! cargo run --example factory -- --machines 3 --capacity 2
//! cargo run --example factory -- --machines 3 --capacity 2 --reserve
//! ```

use clap::Parser;

use desctl::checker::{CheckerConfig, ControllabilityChecker};
use desctl::model::{Automaton, ComponentKind, EventKind, ProductDes};
use desctl::trace::DefaultTraceFactory;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Number of machines.
    #[arg(long, value_name = "INT", default_value = "2")]
    machines: usize,

    /// Capacity of each buffer.
    #[arg(long, value_name = "INT", default_value = "1")]
    capacity: usize,

    /// Make machines reserve a buffer slot before starting.
    #[arg(long)]
    reserve: bool,

    /// Replay the counterexample against the model before reporting it.
    #[arg(long)]
    verify: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn build_line(machines: usize, capacity: usize, reserve: bool) -> ProductDes {
    let name = format!("tline_{}_{}{}", machines, capacity, if reserve { "" } else { "_u" });
    let mut des = ProductDes::new(name);

    let mut start = Vec::new();
    let mut finish = Vec::new();
    for i in 1..=machines {
        start.push(des.add_event(format!("start{}", i), EventKind::Controllable));
        finish.push(des.add_event(format!("finish{}", i), EventKind::Uncontrollable));
        let brk = des.add_event(format!("break{}", i), EventKind::Uncontrollable);
        let repair = des.add_event(format!("repair{}", i), EventKind::Controllable);

        let mut m = Automaton::new(format!("machine{}", i), ComponentKind::Plant);
        let idle = m.add_state("idle", true);
        let working = m.add_state("working", false);
        let down = m.add_state("down", false);
        m.add_transition(idle, start[i - 1], working);
        m.add_transition(working, finish[i - 1], idle);
        m.add_transition(working, brk, down);
        m.add_transition(down, repair, idle);
        des.add_automaton(m);
    }

    for i in 1..machines {
        let (produce, fill, consume) = (start[i - 1], finish[i - 1], start[i]);
        let mut b = Automaton::new(format!("buffer{}", i), ComponentKind::Spec);
        if reserve {
            // State (filled, reserved) with filled + reserved <= capacity.
            let mut ids = Vec::new();
            for filled in 0..=capacity {
                for reserved in 0..=1 {
                    if filled + reserved <= capacity {
                        let id = b.add_state(format!("f{}r{}", filled, reserved), filled == 0 && reserved == 0);
                        ids.push(((filled, reserved), id));
                    }
                }
            }
            let find = |f: usize, r: usize| ids.iter().find(|(k, _)| *k == (f, r)).map(|&(_, id)| id);
            for &((f, r), id) in &ids {
                if r == 0 {
                    if let Some(to) = find(f, 1) {
                        b.add_transition(id, produce, to);
                    }
                } else if let Some(to) = find(f + 1, 0) {
                    b.add_transition(id, fill, to);
                }
                if f > 0 {
                    if let Some(to) = find(f - 1, r) {
                        b.add_transition(id, consume, to);
                    }
                }
            }
        } else {
            let ids: Vec<_> = (0..=capacity).map(|f| b.add_state(format!("f{}", f), f == 0)).collect();
            for f in 0..capacity {
                b.add_transition(ids[f], fill, ids[f + 1]);
                b.add_transition(ids[f + 1], consume, ids[f]);
            }
        }
        des.add_automaton(b);
    }

    des
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        if args.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    println!("args = {:?}", args);

    let des = build_line(args.machines, args.capacity, args.reserve);
    println!(
        "model '{}': {} automata, {} events",
        des.name(),
        des.automata().len(),
        des.events().len()
    );

    let time_total = std::time::Instant::now();
    let config = CheckerConfig {
        verify_counterexamples: args.verify,
        ..CheckerConfig::default()
    };
    let mut checker = ControllabilityChecker::with_config(&des, DefaultTraceFactory, config)?;
    let controllable = checker.check()?;

    println!("controllable = {}", controllable);
    println!("states = {}", checker.stats().states);
    println!("bound = {}", checker.stats().state_space_bound);
    if let Some(trace) = checker.counterexample() {
        println!("counterexample ({} events) = {}", trace.len(), trace);
    }
    println!("Done in {:.3} s", time_total.elapsed().as_secs_f64());

    Ok(())
}
