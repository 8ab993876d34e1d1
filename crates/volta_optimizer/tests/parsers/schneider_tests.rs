use volta_optimizer::parsers::{parser::DatasetParser, schneider::SchneiderParser};

use crate::test_utils;

#[test]
fn test_parse_fixture_instance() {
    let problem = SchneiderParser
        .parse(test_utils::fixture_path("evrptw_5c3s.txt"))
        .unwrap();

    assert_eq!(problem.customers().len(), 5);
    assert_eq!(problem.stations().len(), 3);
    assert_eq!(problem.num_nodes(), 10);

    let depot_start = problem.node(problem.depot_start());
    let depot_end = problem.node(problem.depot_end());
    assert_eq!(depot_start.external_id(), "D0");
    assert_eq!(depot_end.external_id(), "D0_end");
    assert_eq!(depot_start.location(), depot_end.location());

    let fleet = problem.fleet();
    assert_eq!(fleet.battery_capacity, 100.0);
    assert_eq!(fleet.load_capacity, 200.0);
    assert_eq!(fleet.consumption_rate, 1.0);
    assert_eq!(fleet.inverse_recharge_rate, 1.0);
    assert_eq!(fleet.speed, 1.0);

    let c1 = problem.find_node("C1").unwrap();
    let c2 = problem.find_node("C2").unwrap();
    assert_eq!(problem.node(c1).demand(), 10.0);
    assert_eq!(problem.node(c1).service_duration(), 10.0);
    assert!((problem.distance(c1, c2) - 650.0_f64.sqrt()).abs() < 1e-9);
}

#[test]
fn test_missing_file_is_an_error() {
    let result = SchneiderParser.parse(test_utils::fixture_path("does_not_exist.txt"));

    assert!(result.is_err());
}
