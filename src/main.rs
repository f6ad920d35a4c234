use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

use hornsynth::{
    recipe_utils::{demo_suite, random_linear_problems, Problem},
    report::{self, RecoveryReport},
    Limits,
};

// Where the problems come from.
#[derive(Debug)]
pub enum DriverMode {
    Suite,
    Problem,
}

impl FromStr for DriverMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "suite" => Ok(Self::Suite),
            "problem" => Ok(Self::Problem),
            _ => Err("Invalid mode.".to_string()),
        }
    }
}

#[derive(Parser, Debug)]
struct DriverArgs {
    #[clap(long, default_value = "suite")]
    mode: DriverMode,
    #[clap(long)]
    problem_path: Option<PathBuf>,
    /// Extra seeded random problems appended to the demo suite.
    #[clap(long, default_value = "0")]
    random: usize,
    #[clap(long, default_value = "0")]
    seed: u64,
    #[clap(long)]
    max_steps: Option<usize>,
    #[clap(long)]
    max_iters: Option<usize>,
    #[clap(long)]
    output_path: Option<PathBuf>,
}

impl DriverArgs {
    fn limits(&self) -> Limits {
        let mut limits = Limits::deriving();
        if let Some(steps) = self.max_steps {
            limits = limits.with_max_steps(steps);
        }
        if let Some(iters) = self.max_iters {
            limits = limits.with_max_iters(iters);
        }
        limits
    }

    fn problems(&self) -> Result<(String, Vec<Problem>), String> {
        match self.mode {
            DriverMode::Suite => {
                let mut problems = demo_suite();
                problems.extend(random_linear_problems(self.random, self.seed));
                Ok((format!("CEGIS Suite ({} examples)", problems.len()), problems))
            }
            DriverMode::Problem => {
                let path = self
                    .problem_path
                    .as_ref()
                    .ok_or_else(|| "--problem-path is required in problem mode".to_string())?;
                let problem = Problem::from_file(path)?;
                Ok((format!("CEGIS: {}", problem.name), vec![problem]))
            }
        }
    }
}

fn run(args: DriverArgs) -> Result<(), String> {
    let limits = args.limits();
    let (title, problems) = args.problems()?;

    let mut reports = vec![];
    for problem in &problems {
        let result = problem.recover(limits);
        if let Some(rules) = &result.rules {
            problem.check_recovery(rules, limits)?;
        }
        reports.push(RecoveryReport::new(problem, &result));
    }

    report::print_reports(&title, &reports);
    println!("Done.");

    if let Some(path) = &args.output_path {
        report::to_file(&reports, path)?;
        log::info!("wrote {} report(s) to {}", reports.len(), path.display());
    }
    Ok(())
}

pub fn main() {
    env_logger::init();
    let args = DriverArgs::parse();
    if let Err(e) = run(args) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
