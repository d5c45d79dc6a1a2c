#[cfg(test)]
mod tests {
    use knapcqm::knapsack::CAPACITY_LABEL;
    use knapcqm::{
        build_knapsack_cqm, ExactCqmSampler, GeneratorConfig, InstanceGenerator, Sampler,
        SamplerConfig, Sense, VarId,
    };
    use test_case::test_case;

    #[test_case(&[5, 3], &[4, 2], 5; "two items")]
    #[test_case(&[1], &[9], 3; "single heavy item")]
    #[test_case(&[9, 1, 4, 7, 2], &[2, 8, 3, 3, 1], 12; "five items")]
    #[test_case(&[], &[], 0; "no items")]
    fn model_mirrors_items(values: &[i64], weights: &[i64], capacity: i64) {
        let cqm = build_knapsack_cqm(values, weights, capacity).unwrap();

        assert_eq!(cqm.num_variables(), values.len());
        assert!(cqm.is_binary());
        assert_eq!(cqm.objective.num_terms(), values.len());

        let constraint = cqm.constraint(CAPACITY_LABEL).unwrap();
        assert_eq!(cqm.num_constraints(), 1);
        assert_eq!(constraint.sense, Sense::Le);
        assert_eq!(constraint.rhs, capacity);
        assert_eq!(constraint.lhs.num_terms(), weights.len());

        for i in 0..values.len() {
            assert_eq!(cqm.objective.linear(VarId(i)), Some(-values[i]));
            assert_eq!(constraint.lhs.linear(VarId(i)), Some(weights[i]));
        }
    }

    #[test]
    fn building_twice_gives_identical_models() {
        let values = [4, 8, 1, 6];
        let weights = [3, 5, 1, 4];
        assert_eq!(
            build_knapsack_cqm(&values, &weights, 9).unwrap(),
            build_knapsack_cqm(&values, &weights, 9).unwrap()
        );
    }

    #[test_case(3; "three")]
    #[test_case(8; "eight")]
    #[test_case(12; "twelve")]
    fn exact_optimum_matches_brute_force(seed: u64) {
        let instance = InstanceGenerator::new(GeneratorConfig::default().with_seed(seed))
            .unwrap()
            .generate();
        let cqm = instance.build_model().unwrap();

        let best = ExactCqmSampler::new()
            .sample_cqm(&cqm, &SamplerConfig::new("brute-force"))
            .unwrap()
            .feasible()
            .first()
            .cloned()
            .unwrap();

        let n = instance.num_items();
        let mut best_value = 0;
        for mask in 0u32..(1 << n) {
            let (value, weight) = (0..n)
                .filter(|i| mask & (1 << i) != 0)
                .fold((0, 0), |(v, w), i| {
                    (v + instance.items[i].value, w + instance.items[i].weight)
                });
            if weight <= instance.capacity {
                best_value = best_value.max(value);
            }
        }

        let selection = instance.selection(&best);
        assert!(selection.fits());
        assert_eq!(selection.total_value, best_value);
        assert_eq!(best.energy, -best_value);
    }

    #[cfg(feature = "milp")]
    #[test_case(1; "one")]
    #[test_case(21; "twenty one")]
    #[test_case(77; "seventy seven")]
    fn milp_and_exact_agree(seed: u64) {
        use knapcqm::MilpSampler;

        let instance = InstanceGenerator::new(GeneratorConfig::default().with_seed(seed))
            .unwrap()
            .generate();
        let cqm = instance.build_model().unwrap();
        let config = SamplerConfig::new("agree");

        let exact = ExactCqmSampler::new().sample_cqm(&cqm, &config).unwrap();
        let milp = MilpSampler::new().sample_cqm(&cqm, &config).unwrap();

        let exact_best = exact.feasible().first().map(|s| s.energy);
        let milp_best = milp.feasible().first().map(|s| s.energy);
        assert_eq!(exact_best, milp_best);
    }
}
