use cost_sankey::aggregator::aggregate;
use cost_sankey::output::render_flows;
use cost_sankey::parser::{read_cost_records, CostRecord};
use cost_sankey::sankey::{build_flows, Edge, LabelMap, SankeyFlows};
use pretty_assertions::assert_eq;

fn run(records: &[CostRecord], top: usize, labels: &LabelMap) -> SankeyFlows {
    let agg = aggregate(records, top).unwrap();
    build_flows(&agg.grouped, labels)
}

fn sample_records() -> Vec<CostRecord> {
    vec![
        CostRecord::new("OnDemand", "A", "prod", 300),
        CostRecord::new("OnDemand", "A", "dev", 200),
        CostRecord::new("Reservation", "B", "prod", 200),
        CostRecord::new("Reservation", "B", "test", 100),
        CostRecord::new("OnDemand", "C", "dev", 100),
        CostRecord::new("OnDemand", "C", "test", 50),
        CostRecord::new("SavingsPlan", "C", "prod", 50),
        CostRecord::new("SavingsPlan", "D", "prod", 40),
        CostRecord::new("SavingsPlan", "D", "dev", 40),
        CostRecord::new("SavingsPlan", "D", "test", 20),
    ]
}

#[test]
fn test_four_categories_under_default_cap() {
    let flows = run(&sample_records(), 9, &LabelMap::identity());

    assert_eq!(
        flows.categories,
        vec![
            Edge::new("A", 500, "TotalMonthly"),
            Edge::new("B", 300, "TotalMonthly"),
            Edge::new("C", 200, "TotalMonthly"),
            Edge::new("D", 100, "TotalMonthly"),
        ]
    );
    assert_eq!(flows.total_weight(), 1100);

    let env_total: u64 = flows.environments.iter().map(|e| e.weight).sum();
    assert_eq!(env_total, 1100);
    assert!(flows.categories.iter().all(|e| e.source != "Others"));
}

#[test]
fn test_conservation_across_stages() {
    let records = sample_records();
    let input_total: u64 = records.iter().map(|r| r.monthly_cost).sum();

    for k in 1..=5 {
        let flows = run(&records, k, &LabelMap::identity());
        let a: u64 = flows.pricing.iter().map(|e| e.weight).sum();
        let b: u64 = flows.categories.iter().map(|e| e.weight).sum();
        let c: u64 = flows.environments.iter().map(|e| e.weight).sum();

        assert_eq!(a, input_total);
        assert_eq!(b, input_total);
        assert_eq!(c, input_total);
    }
}

#[test]
fn test_environment_order_by_cost() {
    let flows = run(&sample_records(), 9, &LabelMap::identity());

    assert_eq!(
        flows.environments,
        vec![
            Edge::new("TotalMonthly", 590, "prod"),
            Edge::new("TotalMonthly", 340, "dev"),
            Edge::new("TotalMonthly", 170, "test"),
        ]
    );
}

#[test]
fn test_environment_totals_ignore_folding() {
    let flows = run(&sample_records(), 2, &LabelMap::identity());

    // Only B (reservation) is retained, everything else is Others
    assert_eq!(
        flows.categories,
        vec![
            Edge::new("Others", 800, "TotalMonthly"),
            Edge::new("B", 300, "TotalMonthly"),
        ]
    );
    assert_eq!(flows.environments.len(), 3);
}

#[test]
fn test_rendered_output_end_to_end() {
    let csv = "\
PricingModel,MeterCategory,Environment,Monthy Cost
OnDemand,Azure Database for PostgreSQL,prod,\"1,200.4\"
Reservation,Virtual Machines,prod,800
SavingsPlan,Virtual Machines,dev,400
OnDemand,Azure Data Factory v2,dev,150
OnDemand,Azure Synapse Analytics,prod,50
Spot,Virtual Machines,dev,10
";
    let records = read_cost_records(csv.as_bytes()).unwrap();
    let labels = LabelMap::from_json_str(r#"{"prod": "Production"}"#).unwrap();
    let flows = run(&records, 9, &labels);

    let expected = "\
SavingsPlan [400] Virtual Machines
Reservation [800] Virtual Machines
OnDemand [1200] PostgreSQL
OnDemand [200] ETL Tools

Virtual Machines [1210] TotalMonthly
PostgreSQL [1200] TotalMonthly
ETL Tools [200] TotalMonthly
TotalMonthly [2050] Production
TotalMonthly [560] dev";

    assert_eq!(render_flows(&flows), expected);
}

#[test]
fn test_output_is_deterministic() {
    let records: Vec<CostRecord> = (0..50u64)
        .map(|i| {
            let model = ["OnDemand", "Reservation", "SavingsPlan"][(i % 3) as usize];
            CostRecord::new(model, format!("Cat{}", i % 13), format!("env{}", i % 4), (i * 7) % 11 + 1)
        })
        .collect();

    let first = render_flows(&run(&records, 5, &LabelMap::with_defaults()));
    let second = render_flows(&run(&records, 5, &LabelMap::with_defaults()));

    assert_eq!(first, second);
}

#[test]
fn test_no_zero_weight_edges() {
    let records = vec![
        CostRecord::new("OnDemand", "A", "prod", 0),
        CostRecord::new("Reservation", "B", "dev", 0),
        CostRecord::new("OnDemand", "C", "prod", 7),
    ];
    let flows = run(&records, 9, &LabelMap::identity());

    for edge in flows.pricing.iter().chain(&flows.categories).chain(&flows.environments) {
        assert!(edge.weight > 0, "zero edge: {}", edge);
    }
}

#[test]
fn test_empty_input_renders_nothing() {
    let flows = run(&[], 9, &LabelMap::with_defaults());
    assert_eq!(render_flows(&flows), "");
}

#[test]
fn test_equal_totals_keep_first_seen_order_including_others() {
    // X and Y are retained at 10 each; Z + W fold into Others, also 10.
    // Others is first seen before Y, so it stacks between them.
    let records = vec![
        CostRecord::new("OnDemand", "X", "prod", 10),
        CostRecord::new("OnDemand", "Z", "prod", 5),
        CostRecord::new("OnDemand", "Y", "dev", 10),
        CostRecord::new("OnDemand", "W", "dev", 5),
    ];
    let flows = run(&records, 3, &LabelMap::identity());

    assert_eq!(
        flows.categories,
        vec![
            Edge::new("X", 10, "TotalMonthly"),
            Edge::new("Others", 10, "TotalMonthly"),
            Edge::new("Y", 10, "TotalMonthly"),
        ]
    );
    assert_eq!(
        flows.pricing,
        vec![
            Edge::new("OnDemand", 10, "X"),
            Edge::new("OnDemand", 10, "Others"),
            Edge::new("OnDemand", 10, "Y"),
        ]
    );
    assert_eq!(
        flows.environments,
        vec![
            Edge::new("TotalMonthly", 15, "prod"),
            Edge::new("TotalMonthly", 15, "dev"),
        ]
    );
}

#[test]
fn test_oversized_costs_are_rejected_not_truncated() {
    let csv = "\
PricingModel,MeterCategory,Environment,Monthy Cost
OnDemand,A,prod,1e19
OnDemand,A,prod,1e19
";
    assert!(read_cost_records(csv.as_bytes()).is_err());
}

#[test]
fn test_large_valid_costs_are_conserved() {
    let big = cost_sankey::utils::config::MAX_COST;
    let records = vec![
        CostRecord::new("OnDemand", "A", "prod", big),
        CostRecord::new("Reservation", "A", "dev", big),
        CostRecord::new("SavingsPlan", "B", "prod", big),
    ];
    let flows = run(&records, 9, &LabelMap::identity());

    assert_eq!(flows.total_weight(), 3 * big);
    let env_total: u64 = flows.environments.iter().map(|e| e.weight).sum();
    assert_eq!(env_total, 3 * big);
}
