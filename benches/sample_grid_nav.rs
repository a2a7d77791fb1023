use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use bestfirst::engine::BestFirstSearch;
use bestfirst::problem::ZeroHeuristic;
use bestfirst::problems::grid_nav::GridHeuristicManhattan;
use bestfirst::problems::grid_nav::GridMap;
use bestfirst::problems::grid_nav::GridNavProblem;

const SIDES: [usize; 3] = [32, 64, 128];
const WALL_DENSITY: f64 = 0.2;
const INSTANCES_PER_SIZE: u64 = 3;

fn solve_manhattan(problem: GridNavProblem) -> usize {
    let mut search = BestFirstSearch::<_, GridHeuristicManhattan, _, _, _>::new(problem);
    match search.run() {
        Ok(result) => result.nodes_expanded,
        Err(_) => search.nodes_expanded(),
    }
}

fn solve_uninformed(problem: GridNavProblem) -> usize {
    let mut search = BestFirstSearch::<_, ZeroHeuristic, _, _, _>::new(problem);
    match search.run() {
        Ok(result) => result.nodes_expanded,
        Err(_) => search.nodes_expanded(),
    }
}

fn compare_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("GridNav Search");

    for side in SIDES {
        for i in 0..INSTANCES_PER_SIZE {
            let mut rng = ChaCha8Rng::seed_from_u64(i);
            let map = GridMap::random(side, side, WALL_DENSITY, &mut rng);

            let Some(problem) = GridNavProblem::randomize(map, &mut rng) else {
                continue;
            };

            let instance_name = format!("[{side}x{side}]:{i}");

            group.bench_with_input(
                BenchmarkId::new("manhattan", &instance_name),
                &problem,
                |b, p| b.iter(|| solve_manhattan(p.clone())),
            );
            group.bench_with_input(
                BenchmarkId::new("uniform_cost", &instance_name),
                &problem,
                |b, p| b.iter(|| solve_uninformed(p.clone())),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, compare_search);
criterion_main!(benches);
