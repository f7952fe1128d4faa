use clap::{Parser, Subcommand, ValueEnum};
use pivotlab_graph::{Algorithm, RouteOutcome, RouteRequest};
use pivotlab_simplex::{LpProblem, Sense, Solver};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pivotlab")]
#[command(about = "Simplex and shortest-path teaching labs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve an LP given as JSON `{ "c": [...], "a": [[...]], "b": [...], "sense": "max" }`
    /// or as text: a costs line `3,5` then one `1,0 <= 4` line per constraint
    Simplex {
        /// The problem file (`.txt` files are read as text input)
        file: PathBuf,
        /// Read the file as text input whatever its extension
        #[arg(short, long)]
        manual: bool,
        /// Optimization direction for text input; overrides `sense` in JSON
        #[arg(short, long, value_enum)]
        sense: Option<SenseArg>,
        /// Show every pivot with its tableau before and after
        #[arg(short, long)]
        iterations: bool,
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
        /// Maximum number of pivots
        #[arg(long, default_value_t = 10000)]
        max_iterations: usize,
        /// Tolerance for pivot selection and basis detection
        #[arg(long, default_value_t = pivotlab_simplex::DEFAULT_TOLERANCE)]
        tolerance: f64,
    },
    /// Find a shortest route in a graph given as JSON `{ "names": [...], "matrix": [[...]], "directed": false }`
    Route {
        /// The graph file
        file: PathBuf,
        /// Source node name (defaults to the first node)
        #[arg(long)]
        from: Option<String>,
        /// Target node name (defaults to the second node)
        #[arg(long)]
        to: Option<String>,
        #[arg(short, long, value_enum, default_value_t = AlgorithmArg::Dijkstra)]
        algorithm: AlgorithmArg,
    },
    /// Print the vertex and edge sets of a graph file
    Describe {
        /// The graph file
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SenseArg {
    Max,
    Min,
}

impl From<SenseArg> for Sense {
    fn from(arg: SenseArg) -> Self {
        match arg {
            SenseArg::Max => Sense::Max,
            SenseArg::Min => Sense::Min,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    Dijkstra,
    BellmanFord,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Dijkstra => Algorithm::Dijkstra,
            AlgorithmArg::BellmanFord => Algorithm::BellmanFord,
        }
    }
}

#[derive(Deserialize)]
struct GraphFile {
    #[serde(default)]
    names: Option<Vec<String>>,
    matrix: Vec<Vec<f64>>,
    #[serde(default)]
    directed: bool,
}

impl GraphFile {
    fn names(&self) -> Vec<String> {
        self.names
            .clone()
            .unwrap_or_else(|| pivotlab_graph::default_names(self.matrix.len()))
    }
}

fn read_source(file: &Path) -> String {
    match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            std::process::exit(1);
        }
    }
}

fn read_json<T: DeserializeOwned>(file: &Path) -> T {
    let source = read_source(file);
    match serde_json::from_str(&source) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Invalid input in {}: {}", file.display(), e);
            std::process::exit(1);
        }
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simplex { file, manual, sense, iterations, format, max_iterations, tolerance } => {
            let is_text = manual || file.extension().is_some_and(|ext| ext == "txt");
            let problem = if is_text {
                let sense = sense.map(Sense::from).unwrap_or_default();
                match LpProblem::parse_manual_document(&read_source(&file), sense) {
                    Ok(p) => p,
                    Err(e) => {
                        eprintln!("Invalid input in {}: {}", file.display(), e);
                        std::process::exit(1);
                    }
                }
            } else {
                let mut problem: LpProblem = read_json(&file);
                if let Some(sense) = sense {
                    problem.sense = sense.into();
                }
                problem
            };

            let solver = Solver::new()
                .with_max_iterations(max_iterations)
                .with_tolerance(tolerance);
            let trace = match solver.solve(&problem) {
                Ok(t) => t,
                Err(e) => {
                    eprintln!("Solve error: {}", e);
                    std::process::exit(1);
                }
            };

            let views = if iterations || format == "json" {
                match pivotlab_simplex::build_iteration_views(&trace.steps, &problem, tolerance) {
                    Ok(v) => v,
                    Err(e) => {
                        eprintln!("Solve error: {}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                Vec::new()
            };

            if format == "json" {
                let output = serde_json::json!({
                    "problem": problem,
                    "iterations": views,
                    "solution": trace.solution,
                });
                println!("{}", serde_json::to_string_pretty(&output).unwrap_or_else(|e| {
                    format!("Error: {}", e)
                }));
                return;
            }

            println!("{}", pivotlab_simplex::problem_summary(&problem));
            println!();

            if iterations {
                let initial = pivotlab_simplex::LabeledTableau::new(&trace.steps[0], tolerance);
                println!("Initial tableau:");
                println!("{}", initial);
                println!();

                for view in &views {
                    println!(
                        "Iteration {}: {} enters, {} leaves",
                        view.index, view.entering, view.leaving
                    );
                    println!("{}", view.before);
                    println!("after:");
                    println!("{}", view.after);
                    println!();
                }
            }

            println!("Status: OPTIMAL after {} pivots", trace.iterations());
            for (label, value) in trace.solution.labeled() {
                println!("  {:4} = {}", label, pivotlab_simplex::view::format_number(value, 4));
            }
        }
        Commands::Route { file, from, to, algorithm } => {
            let graph: GraphFile = read_json(&file);
            let names = graph.names();
            if names.is_empty() {
                eprintln!("Error: the graph has no nodes");
                std::process::exit(1);
            }

            let source = from.unwrap_or_else(|| names[0].clone());
            let target = to.unwrap_or_else(|| names[names.len().min(2) - 1].clone());
            let request = RouteRequest {
                names,
                matrix: graph.matrix,
                directed: graph.directed,
                source,
                target,
                algorithm: algorithm.into(),
            };

            match request.run() {
                Ok(RouteOutcome::PathFound { distance, path }) => {
                    println!("Path: {}", request.format_path(&path));
                    println!("Distance: {}", distance);
                }
                Ok(RouteOutcome::NoPath) => {
                    println!("No path from {} to {}.", request.source, request.target);
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Route error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Describe { file } => {
            let graph: GraphFile = read_json(&file);
            match pivotlab_graph::describe(&graph.names(), &graph.matrix, graph.directed) {
                Ok(text) => println!("{}", text),
                Err(e) => {
                    eprintln!("Invalid graph: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}
