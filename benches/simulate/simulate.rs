use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use episim::interaction::InteractionConfig;
use episim::random::seeded_rng;
use episim::{Parameters, Report, SimulationSettings};

static SEED: u64 = 123;
static ITERATIONS: usize = 30;

fn run(parameters: &Parameters) -> Report {
    let mut rng = seeded_rng(SEED);
    let pathogen = parameters.build_pathogen().unwrap();
    let mut population = parameters.build_population(&mut rng).unwrap();
    let interaction = parameters.build_interaction();
    episim::simulate_with(
        &mut population,
        &pathogen,
        parameters.iterations,
        parameters.settings(),
        interaction.as_ref(),
        &mut rng,
    )
    .unwrap()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("default parameters", |bencher| {
        let parameters = Parameters::default();
        bencher.iter_with_large_drop(|| run(&parameters));
    });

    let mut group = c.benchmark_group("population size");
    for population_size in [1_000, 5_000, 20_000] {
        let parameters = Parameters {
            population_size,
            initial_cases: population_size / 50,
            iterations: ITERATIONS,
            interaction: InteractionConfig::Constant { rounds: 2 },
            ..Parameters::default()
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(population_size),
            &parameters,
            |bencher, parameters| bencher.iter_with_large_drop(|| run(parameters)),
        );
    }
    group.finish();

    c.bench_function("single day", |bencher| {
        let parameters = Parameters::default();
        let pathogen = parameters.build_pathogen().unwrap();
        let interaction = parameters.build_interaction();
        bencher.iter_batched(
            || {
                let mut rng = seeded_rng(SEED);
                let population = parameters.build_population(&mut rng).unwrap();
                (population, rng)
            },
            |(mut population, mut rng)| {
                let settings = SimulationSettings::new(0.8, 1.0);
                episim::simulate_with(
                    &mut population,
                    &pathogen,
                    1,
                    settings,
                    interaction.as_ref(),
                    &mut rng,
                )
                .unwrap()
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(simulate_benches, criterion_benchmark);
criterion_main!(simulate_benches);
