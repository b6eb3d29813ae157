use qubopack_model::*;

#[test]
fn num_bins_defaults_to_item_count() {
    let instance = Instance::new(vec![1.0, 2.0, 3.0], 10.0, None).unwrap();
    assert_eq!(instance.num_bins, 3);
    let explicit = Instance::new(vec![1.0, 2.0, 3.0], 10.0, Some(2)).unwrap();
    assert_eq!(explicit.num_bins, 2);
}

#[test]
fn slack_bits_cover_the_capacity_margin() {
    let bits = |weights: Vec<f64>, capacity: f64| {
        Instance::new(weights, capacity, None).unwrap().slack_bits().unwrap()
    };
    // margin 1 still gets one bit
    assert_eq!(bits(vec![1.0], 2.0), 1);
    // margin 3 -> ceil(log2(3)) = 2
    assert_eq!(bits(vec![3.0, 4.0], 10.0), 2);
    // margin 8 -> exactly 3
    assert_eq!(bits(vec![2.0], 10.0), 3);
    // margin 9 -> 4
    assert_eq!(bits(vec![1.0], 10.0), 4);
}

#[test]
fn slack_bits_undefined_at_or_below_total_weight() {
    let at = Instance::new(vec![5.0, 5.0], 10.0, None).unwrap();
    assert!(matches!(at.slack_bits(), Err(ModelError::InvalidCapacity { .. })));
    let below = Instance::new(vec![5.0, 5.0], 5.0, None).unwrap();
    assert!(matches!(below.slack_bits(), Err(ModelError::InvalidCapacity { .. })));
}

#[test]
fn generation_is_deterministic_in_the_seed() {
    let difficulty = Difficulty {
        num_items: 6,
        capacity_margin_percent: 20,
    };
    let a = Instance::generate(&[7u8; 32], &difficulty).unwrap();
    let b = Instance::generate(&[7u8; 32], &difficulty).unwrap();
    assert_eq!(a, b);

    let other = Instance::generate(&[8u8; 32], &difficulty).unwrap();
    assert_ne!(a.weights, other.weights);
}

#[test]
fn generated_instances_always_encode() {
    let difficulty = Difficulty {
        num_items: 4,
        capacity_margin_percent: 0,
    };
    for seed in 0..8u8 {
        let instance = Instance::generate(&[seed; 32], &difficulty).unwrap();
        assert_eq!(instance.num_items(), 4);
        assert!(instance.weights.iter().all(|&w| (1.0..=50.0).contains(&w)));
        assert!(instance.capacity > instance.total_weight());
        Model::encode(&instance, 2500.0).unwrap();
    }
}

#[test]
fn instance_serde_round_trip() {
    let instance = Instance::new(vec![3.0, 4.0], 10.0, Some(2)).unwrap();
    let json = serde_json::to_string(&instance).unwrap();
    let restored: Instance = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, instance);
}
