use qubopack_model::*;
use qubopack_solver::{solve_brute_force, MAX_BRUTE_FORCE_VARIABLES};

#[test]
fn finds_the_unique_minimum_of_the_single_item_instance() {
    // weights [1], V = 2: the only zero-penalty assignment packs the item
    // into bin 0 with slack 1, and a small lagrange keeps it the argmin
    let instance = Instance::new(vec![1.0], 2.0, Some(1)).unwrap();
    let model = Model::encode(&instance, 0.5).unwrap();

    let (sample, energy) = solve_brute_force(model.qubo()).unwrap();

    assert_eq!(energy, 0.5);
    assert_eq!(energy, model.energy(&sample));
    assert!(model.is_feasible(&sample));
    assert!(sample.get(Variable::assign(0, 0)));
    assert!(sample.get(Variable::used(0)));
    assert!(sample.get(Variable::slack(0, 0)));
    assert_eq!(model.used_bins(&sample), vec![0]);
}

#[test]
fn packs_two_items_into_one_bin() {
    let instance = Instance::new(vec![3.0, 4.0], 10.0, None).unwrap();
    let model = Model::encode(&instance, 0.5).unwrap();

    let (sample, energy) = solve_brute_force(model.qubo()).unwrap();

    // one used bin beats two, and beats any constraint violation
    assert_eq!(energy, 0.5);
    assert!(model.is_feasible(&sample));
    let used = model.used_bins(&sample);
    assert_eq!(used.len(), 1);
    assert_eq!(model.bin_contents(&sample)[used[0]], vec![0, 1]);
    assert_eq!(model.bin_load(used[0], &sample), 7.0);
    assert_eq!(model.slack_value(used[0], &sample), 3.0);
}

#[test]
fn is_deterministic() {
    let instance = Instance::new(vec![3.0, 4.0], 10.0, None).unwrap();
    let model = Model::encode(&instance, 0.5).unwrap();

    let a = solve_brute_force(model.qubo()).unwrap();
    let b = solve_brute_force(model.qubo()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn rejects_oversized_models() {
    // 5 items x 5 bins + 5 used + 5 slack = 35 variables
    let instance = Instance::new(vec![1.0; 5], 6.0, None).unwrap();
    let model = Model::encode(&instance, 0.5).unwrap();
    assert!(model.num_variables() > MAX_BRUTE_FORCE_VARIABLES);
    assert!(solve_brute_force(model.qubo()).is_err());
}

#[test]
fn rejects_an_empty_cost_map() {
    assert!(solve_brute_force(&Qubo::new()).is_err());
}
