use std::error::Error;
use std::process;

use clap::Command;
use duct::cmd;

type AnyResult<T> = Result<T, Box<dyn Error>>;
type StepFn = fn() -> AnyResult<()>;
type Step = (&'static str, StepFn);

fn cli() -> Command {
    Command::new("voteboard-task")
        .about("Tasks for the voteboard workspace")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("lint").about("Format and lint the workspace with clippy"))
        .subcommand(Command::new("test").about("Run the workspace tests"))
        .subcommand(
            Command::new("bench")
                .about("Run the palette and ranking benchmarks")
                .arg(
                    clap::Arg::new("filter")
                        .help("Only run benchmarks whose name contains this string"),
                ),
        )
        .subcommand(Command::new("all").about("Run lint and tests"))
}

fn main() {
    if let Err(error) = run() {
        eprintln!("xtask error: {error}");
        process::exit(1);
    }
}

fn run() -> AnyResult<()> {
    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("lint", _)) => run_lint(),
        Some(("test", _)) => run_tests(),
        Some(("bench", subcommand)) => {
            run_bench(subcommand.get_one::<String>("filter").map(String::as_str))
        }
        Some(("all", _)) => run_all(),
        _ => unreachable!(),
    }
}

fn run_lint() -> AnyResult<()> {
    println!("Running lint...");
    run_cmd("cargo", &["fmt", "--all", "--check"])?;
    run_cmd(
        "cargo",
        &[
            "clippy",
            "--workspace",
            "--all-targets",
            "--",
            "-D",
            "warnings",
        ],
    )
}

fn run_tests() -> AnyResult<()> {
    println!("Running tests...");
    run_cmd("cargo", &["test", "--workspace"])
}

fn run_bench(filter: Option<&str>) -> AnyResult<()> {
    println!("Running benchmarks...");
    let mut args = vec!["bench", "-p", "voteboard", "--bench", "palette_benches"];
    if let Some(filter) = filter {
        args.extend(["--", filter]);
    }
    run_cmd("cargo", &args)
}

fn run_all() -> AnyResult<()> {
    let mut errors = Vec::new();

    const STEPS: &[Step] = &[("Lint", run_lint), ("Tests", run_tests)];

    for (label, step) in STEPS {
        if let Err(error) = step() {
            eprintln!("{label} failed: {error}");
            errors.push(format!("{label}: {error}"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(format!("One or more tasks failed:\n{}", errors.join("\n")).into())
    }
}

fn run_cmd(program: &str, args: &[&str]) -> AnyResult<()> {
    println!("> {} {}", program, args.join(" "));
    cmd(program, args).run()?;
    Ok(())
}
