use episim::random::seeded_rng;
use episim::{
    simulate, simulate_with, ConstantInteractions, EpisimError, ExposureRule,
    InteractionConfig, Kind, Parameters, Pathogen, Population, Report, SeverityShares,
    Simulation, SimulationSettings,
};

fn run_default(seed: u64) -> (Population, Report) {
    let parameters = Parameters::default();
    let mut rng = seeded_rng(seed);
    let pathogen = parameters.build_pathogen().unwrap();
    let mut population = parameters.build_population(&mut rng).unwrap();
    let interaction = parameters.build_interaction();
    let report = simulate_with(
        &mut population,
        &pathogen,
        parameters.iterations,
        parameters.settings(),
        interaction.as_ref(),
        &mut rng,
    )
    .unwrap();
    (population, report)
}

#[test]
fn daily_counts_are_consistent() {
    let (population, report) = run_default(42);
    let mut deaths_so_far = 0;
    for record in report.records() {
        assert_eq!(record.population_size(), population.initial_size() - deaths_so_far);
        assert_eq!(record.breakdown().infected(), record.total_infected);
        assert!(record.diagnosed <= record.total_infected);
        deaths_so_far += record.deaths;
    }
    assert_eq!(population.len() + report.total_deaths(), population.initial_size());
    assert_eq!(population.deaths(), report.total_deaths());
}

#[test]
fn same_seed_same_report() {
    let (first_population, first) = run_default(7);
    let (second_population, second) = run_default(7);
    assert_eq!(first.records(), second.records());
    assert_eq!(first_population.individuals(), second_population.individuals());
}

#[test]
fn series_line_up_with_records() {
    let (_, report) = run_default(3);
    assert_eq!(report.days(), (0..30).collect::<Vec<_>>());
    for (i, record) in report.records().iter().enumerate() {
        assert_eq!(report.total_infected()[i], record.total_infected);
        assert_eq!(report.diagnosed()[i] + report.undiagnosed()[i], record.total_infected);
        assert_eq!(report.immunized()[i], record.immunized);
        assert_eq!(report.deaths()[i], record.deaths);
        assert_eq!(report.breakdown()[i].get(Kind::SymptomaticSevere), record.severe);
    }
}

#[test]
fn infections_run_their_course_without_contacts() {
    let life_time = 15;
    let pathogen = Pathogen::new(life_time, 0.0, SeverityShares::default(), 1.0).unwrap();
    let mut rng = seeded_rng(11);
    let mut population = Population::new(5, 100, 50, &mut rng).unwrap();
    let days = usize::try_from(life_time).unwrap() + 1;
    let interaction = ConstantInteractions(0);

    let mut simulation = Simulation::new(
        &mut population,
        &pathogen,
        &interaction,
        SimulationSettings::new(0.8, 0.0),
    )
    .unwrap();
    simulation.run(days - 1, &mut rng);
    // The counters now equal the life time: still infected.
    assert_eq!(simulation.population().num_infected(), 5);
    assert_eq!(simulation.population().num_immunized(), 0);

    simulation.run(1, &mut rng);
    assert_eq!(simulation.population().num_infected(), 0);
    assert_eq!(simulation.population().num_immunized(), 5);

    let report = simulation.into_report();
    assert_eq!(report.len(), days);
    assert!(report.total_infected().iter().all(|&infected| infected == 5));
    assert!(report.immunized().iter().all(|&immunized| immunized == 0));
    assert_eq!(report.total_deaths(), 0);
    assert_eq!(population.count_kinds().healthy, 95);
}

#[test]
fn exposure_rule_changes_the_run() {
    let parameters = Parameters {
        interaction: InteractionConfig::Constant { rounds: 3 },
        ..Parameters::default()
    };
    let run = |rule: ExposureRule| {
        let mut rng = seeded_rng(5);
        let pathogen = parameters.build_pathogen().unwrap();
        let mut population = parameters.build_population(&mut rng).unwrap();
        let settings = parameters.settings().with_exposure_rule(rule);
        simulate_with(
            &mut population,
            &pathogen,
            10,
            settings,
            parameters.build_interaction().as_ref(),
            &mut rng,
        )
        .unwrap()
    };
    let symmetric = run(ExposureRule::Symmetric);
    let directional = run(ExposureRule::Directional);
    // Same population on day 0, different spread afterwards.
    assert_eq!(symmetric.records()[0], directional.records()[0]);
    assert_ne!(symmetric.records(), directional.records());
}

#[test]
fn closures_drive_the_contact_rounds() {
    let pathogen = Pathogen::new(15, 0.01, SeverityShares::default(), 1.0).unwrap();
    let mut rng = seeded_rng(9);
    let mut population = Population::new(10, 500, 250, &mut rng).unwrap();
    let density = |size: usize, _activity: f64, space: usize| size / space;
    let report = simulate(&mut population, &pathogen, 5, 0.8, 0.0, &density, &mut rng).unwrap();
    assert_eq!(report.len(), 5);
    assert_eq!(report.records()[0].total_infected, 10);
    // Nobody recovers within five days, so infections only leave through death.
    let last = report.last().unwrap();
    assert!(last.total_infected + report.total_deaths() >= 10);
}

#[test]
fn invalid_inputs() {
    let shares = SeverityShares {
        asymptomatic: 0.05,
        ..SeverityShares::default()
    };
    assert!(matches!(
        Pathogen::new(15, 0.01, shares, 1.0),
        Err(EpisimError::InvalidShares { .. })
    ));

    let mut rng = seeded_rng(0);
    assert!(matches!(
        Population::new(101, 100, 10, &mut rng),
        Err(EpisimError::ConfigError(_))
    ));

    let pathogen = Pathogen::new(15, 0.01, SeverityShares::default(), 1.0).unwrap();
    let mut population = Population::new(1, 10, 10, &mut rng).unwrap();
    let result = simulate(
        &mut population,
        &pathogen,
        5,
        -1.0,
        0.5,
        &ConstantInteractions(1),
        &mut rng,
    );
    assert!(matches!(result, Err(EpisimError::ConfigError(_))));
    assert_eq!(population.count_kinds().light, 1);
    assert_eq!(population.iter().filter(|i| i.state().is_healthy()).count(), 9);
}
