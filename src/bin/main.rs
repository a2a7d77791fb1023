use clap::Parser;
use clap::ValueEnum;
use indoc::indoc;

use bestfirst::cost::Cost;
use bestfirst::engine::BestFirstSearch;
use bestfirst::engine::PathResult;
use bestfirst::engine::SearchFailure;
use bestfirst::problem::Heuristic;
use bestfirst::problem::SearchProblem;
use bestfirst::problem::ZeroHeuristic;
use bestfirst::problems::grid_nav::GridHeuristicManhattan;
use bestfirst::problems::grid_nav::GridNavProblem;
use bestfirst::problems::route_graph::RouteHeuristicStraightLine;
use bestfirst::problems::route_graph::RouteMap;
use bestfirst::problems::route_graph::RouteProblem;
use bestfirst::problems::tile_puzzle::PuzzleHeuristicManhattan;
use bestfirst::problems::tile_puzzle::PuzzleProblem;
use bestfirst::problems::tile_puzzle::PuzzleState;
use bestfirst::problems::water_jug::WaterJugProblem;
use bestfirst::space::Action;
use bestfirst::space::State;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Demo {
    All,
    Grid,
    Route,
    Puzzle,
    Jugs,
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Which demo problem(s) to solve
    #[arg(short, long, env = "DEMO", default_value = "all")]
    demo: Demo,

    /// Print engine memory statistics after each search
    #[arg(short, long)]
    stats: bool,
}

fn report<P, H, St, A, C>(args: &Args, problem: P)
where
    P: SearchProblem<St, A, C>,
    H: Heuristic<P, St, A, C>,
    St: State,
    A: Action,
    C: Cost,
{
    let mut search = BestFirstSearch::<P, H, St, A, C>::new(problem);
    match search.run() {
        Ok(PathResult {
            path,
            nodes_expanded,
        }) => {
            println!("{path}");
            println!("  cost: {}, expanded: {nodes_expanded} states", path.cost);
        }
        Err(failure @ SearchFailure::Unreachable { .. }) => println!("  {failure}"),
        Err(failure) => println!("  search failed: {failure}"),
    }
    if args.stats {
        search
            .write_memory_stats(std::io::stdout().lock())
            .expect("writing stats to stdout");
    }
    println!();
}

fn grid_demo(args: &Args) {
    let problem = GridNavProblem::try_from(indoc! {"
        S...#...
        .##.#.#.
        .#..#.#.
        .#.##.#.
        .#....#G
        .######.
        ........
    "})
    .expect("demo map is well-formed");

    println!("{problem}");
    report::<_, GridHeuristicManhattan, _, _, _>(args, problem);
}

fn route_demo(args: &Args) {
    let mut map = RouteMap::new();
    for city in [
        "Arad", "Sibiu", "Fagaras", "Rimnicu", "Pitesti", "Bucharest",
    ] {
        map.add_city(city);
    }
    for (from, to, km) in [
        ("Arad", "Sibiu", 140.0),
        ("Sibiu", "Fagaras", 99.0),
        ("Sibiu", "Rimnicu", 80.0),
        ("Rimnicu", "Pitesti", 97.0),
        ("Pitesti", "Bucharest", 101.0),
        ("Fagaras", "Bucharest", 211.0),
    ] {
        map.add_road(from, to, km).expect("demo roads are valid");
    }

    let start = map.city("Arad").expect("city exists");
    let goal = map.city("Bucharest").expect("city exists");
    let problem = RouteProblem::new(map, start, goal)
        .with_straight_line_distances(vec![366.0, 253.0, 176.0, 193.0, 100.0, 0.0]);

    println!(
        "Route {} -> {}",
        problem.map().name(start),
        problem.map().name(goal)
    );
    report::<_, RouteHeuristicStraightLine, _, _, _>(args, problem);
}

fn puzzle_demo(args: &Args) {
    let start = PuzzleState::new([2, 8, 3, 1, 6, 4, 7, 0, 5]).expect("valid board");
    let goal = PuzzleState::new([1, 2, 3, 8, 0, 4, 7, 6, 5]).expect("valid board");
    println!("8-puzzle:\n{start}=>\n{goal}");
    report::<_, PuzzleHeuristicManhattan, _, _, _>(args, PuzzleProblem::new(start, goal));
}

fn jugs_demo(args: &Args) {
    let problem = WaterJugProblem::new(4, 3, 2);
    println!("{problem:?}");
    report::<_, ZeroHeuristic, _, _, _>(args, problem);
}

fn main() {
    let args = Args::parse();

    if matches!(args.demo, Demo::All | Demo::Grid) {
        grid_demo(&args);
    }
    if matches!(args.demo, Demo::All | Demo::Route) {
        route_demo(&args);
    }
    if matches!(args.demo, Demo::All | Demo::Puzzle) {
        puzzle_demo(&args);
    }
    if matches!(args.demo, Demo::All | Demo::Jugs) {
        jugs_demo(&args);
    }
}
