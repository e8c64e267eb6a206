//! End-to-end pipeline regression tests.
//!
//! Exercises the full per-lateral pipeline (trajectory → annulus zones →
//! segmentation → gap filling → aggregation → lumping → zone correction →
//! cell linkage) and the cross-stage invariants: determinism, contiguity,
//! device-count conservation, and zone degeneracy.

use mswell::aggregate::aggregate_completion;
use mswell::annulus::assign_annulus_zones;
use mswell::gaps::fill_gaps;
use mswell::lumping::lump_segments;
use mswell::segmentation::create_tubing_segments;
use mswell::{
    build_lateral, AnnulusContent, CaseConfig, CompletionRow, DeviceType, LateralInput,
    MdInterval, Method, ReservoirCell, SegmentKind, Trajectory, TrajectoryPoint,
};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn completion_row(
    start: f64,
    end: f64,
    annulus: AnnulusContent,
    device_type: DeviceType,
    valves_per_joint: f64,
) -> CompletionRow {
    CompletionRow {
        interval: MdInterval::new(start, end),
        inner_diameter: 0.15,
        outer_diameter: 0.2159,
        roughness: 1e-5,
        annulus,
        valves_per_joint,
        device_type,
        device_number: 1,
        annulus_zone: 0,
    }
}

fn cell(start: f64, end: f64) -> ReservoirCell {
    ReservoirCell {
        interval: MdInterval::new(start, end),
        segment_group: None,
    }
}

fn straight_trajectory(max_md: f64) -> (TrajectoryPoint, Vec<TrajectoryPoint>) {
    let header = TrajectoryPoint { md: 0.0, tvd: 0.0 };
    let content = (1..=10)
        .map(|i| {
            let md = max_md * f64::from(i) / 10.0;
            TrajectoryPoint { md, tvd: md * 0.95 }
        })
        .collect();
    (header, content)
}

fn basic_input(completion: Vec<CompletionRow>, reservoir: Vec<ReservoirCell>) -> LateralInput {
    let max_md = reservoir
        .iter()
        .map(|c| c.interval.end)
        .fold(1000.0, f64::max);
    let (welsegs_header, welsegs_content) = straight_trajectory(max_md);
    LateralInput {
        well: "A-1".to_string(),
        branch: 1,
        completion,
        welsegs_header,
        welsegs_content,
        reservoir,
    }
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[test]
fn test_scenario_single_open_interval_two_cells() {
    init_tracing();
    let input = basic_input(
        vec![completion_row(
            0.0,
            1000.0,
            AnnulusContent::OpenAnnulus,
            DeviceType::Aicd,
            1.0,
        )],
        vec![cell(0.0, 500.0), cell(500.0, 1000.0)],
    );
    let model = build_lateral(&input, &CaseConfig::default()).unwrap();
    assert_eq!(model.segments.len(), 2);
    assert!(model.segments.iter().all(|row| row.annulus_zone == 1));
}

#[test]
fn test_scenario_packer_separates_zones() {
    let completion = vec![
        completion_row(0.0, 500.0, AnnulusContent::OpenAnnulus, DeviceType::Aicd, 1.0),
        completion_row(500.0, 500.0, AnnulusContent::Packer, DeviceType::Aicd, 0.0),
        completion_row(500.0, 1000.0, AnnulusContent::OpenAnnulus, DeviceType::Aicd, 1.0),
    ];
    let zoned = assign_annulus_zones("A-1", &completion).unwrap();
    assert_eq!(zoned.len(), 2);
    assert_eq!(zoned[0].annulus_zone, 1);
    assert_eq!(zoned[1].annulus_zone, 2, "zones across a packer stay distinct");
}

#[test]
fn test_scenario_gap_filler_inserts_additional_row() {
    let (header, content) = straight_trajectory(200.0);
    let trajectory = Trajectory::build("A-1", header, &content);
    let config = CaseConfig::default();
    let completion = vec![completion_row(
        0.0,
        200.0,
        AnnulusContent::OpenAnnulus,
        DeviceType::Aicd,
        1.0,
    )];
    let zoned = assign_annulus_zones("A-1", &completion).unwrap();
    let reservoir = vec![cell(0.0, 100.0), cell(150.0, 200.0)];
    let segments =
        create_tubing_segments(&reservoir, &zoned, &trajectory, Method::Cells, &config).unwrap();
    let filled = fill_gaps("A-1", 1, segments, &trajectory).unwrap();

    let shape: Vec<(f64, f64, SegmentKind)> = filled
        .iter()
        .map(|s| (s.interval.start, s.interval.end, s.kind))
        .collect();
    assert_eq!(
        shape,
        vec![
            (0.0, 100.0, SegmentKind::Original),
            (100.0, 150.0, SegmentKind::Additional),
            (150.0, 200.0, SegmentKind::Original),
        ]
    );
}

#[test]
fn test_scenario_bad_diameters_abort_pipeline() {
    let mut bad = completion_row(0.0, 1000.0, AnnulusContent::OpenAnnulus, DeviceType::Aicd, 1.0);
    bad.outer_diameter = bad.inner_diameter;
    let input = basic_input(vec![bad], vec![cell(0.0, 1000.0)]);
    let err = build_lateral(&input, &CaseConfig::default()).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_scenario_lumping_folds_into_predecessor() {
    // connections leave a hole inside one open-annulus zone; the filler's
    // device share must end up in a neighboring real segment
    let input = basic_input(
        vec![completion_row(
            0.0,
            1000.0,
            AnnulusContent::OpenAnnulus,
            DeviceType::Aicd,
            1.0,
        )],
        vec![cell(0.0, 400.0), cell(600.0, 1000.0)],
    );
    let model = build_lateral(&input, &CaseConfig::default()).unwrap();
    assert_eq!(model.segments.len(), 2, "filler absent from final output");
    let joint_length = CaseConfig::default().joint_length;
    let expected_total = 1000.0 / joint_length;
    let total: f64 = model.segments.iter().map(|r| r.device_count).sum();
    assert!(
        (total - expected_total).abs() < 1e-9,
        "full design device count survives lumping"
    );
    // predecessor-first policy: the filler [400,600] lumps into [0,400]
    assert!(model.segments[0].device_count > 400.0 / joint_length);
}

// ============================================================================
// Cross-stage properties
// ============================================================================

#[test]
fn test_determinism_over_random_wells() {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..20 {
        let boundary_count = rng.gen_range(2..6);
        let mut boundaries: Vec<f64> = (0..boundary_count)
            .map(|_| rng.gen_range(0.0..2000.0))
            .collect();
        boundaries.push(0.0);
        boundaries.push(2000.0);
        boundaries.sort_by(f64::total_cmp);
        boundaries.dedup();

        let completion: Vec<CompletionRow> = boundaries
            .windows(2)
            .map(|pair| {
                let annulus = if rng.gen_bool(0.7) {
                    AnnulusContent::OpenAnnulus
                } else {
                    AnnulusContent::GravelPack
                };
                completion_row(pair[0], pair[1], annulus, DeviceType::Aicd, rng.gen_range(0.0..4.0))
            })
            .collect();

        let reservoir: Vec<ReservoirCell> = (0..10)
            .map(|i| cell(f64::from(i) * 200.0, f64::from(i + 1) * 200.0))
            .collect();

        let input = basic_input(completion, reservoir);
        let config = CaseConfig::default();
        let first = build_lateral(&input, &config).unwrap();
        let second = build_lateral(&input, &config).unwrap();
        assert_eq!(
            serde_json::to_string(&first.segments).unwrap(),
            serde_json::to_string(&second.segments).unwrap(),
            "identical inputs must give identical segment tables"
        );
        assert_eq!(first.links, second.links);
    }
}

#[test]
fn test_contiguity_after_gap_fill() {
    let (header, content) = straight_trajectory(1000.0);
    let trajectory = Trajectory::build("A-1", header, &content);
    let config = CaseConfig::default();
    let completion = assign_annulus_zones(
        "A-1",
        &[completion_row(0.0, 1000.0, AnnulusContent::OpenAnnulus, DeviceType::Aicd, 1.0)],
    )
    .unwrap();
    let reservoir = vec![cell(0.0, 200.0), cell(350.0, 500.0), cell(700.0, 1000.0)];
    let segments =
        create_tubing_segments(&reservoir, &completion, &trajectory, Method::Cells, &config)
            .unwrap();
    let filled = fill_gaps("A-1", 1, segments, &trajectory).unwrap();
    for pair in filled.windows(2) {
        assert_eq!(pair[0].interval.end, pair[1].interval.start);
    }
    assert!(filled.iter().all(|s| s.interval.start < s.interval.end));
}

#[test]
fn test_conservation_of_device_count_per_zone() {
    let (header, content) = straight_trajectory(1200.0);
    let trajectory = Trajectory::build("A-1", header, &content);
    let config = CaseConfig::default();
    let completion = assign_annulus_zones(
        "A-1",
        &[
            completion_row(0.0, 600.0, AnnulusContent::OpenAnnulus, DeviceType::Aicd, 2.0),
            completion_row(600.0, 600.0, AnnulusContent::Packer, DeviceType::Aicd, 0.0),
            completion_row(600.0, 1200.0, AnnulusContent::OpenAnnulus, DeviceType::Aicd, 1.0),
        ],
    )
    .unwrap();
    let reservoir = vec![
        cell(0.0, 300.0),
        cell(450.0, 600.0),
        cell(600.0, 800.0),
        cell(900.0, 1200.0),
    ];
    let segments =
        create_tubing_segments(&reservoir, &completion, &trajectory, Method::Cells, &config)
            .unwrap();
    let filled = fill_gaps("A-1", 1, segments, &trajectory).unwrap();
    let rows = aggregate_completion("A-1", 1, &filled, &completion, config.joint_length).unwrap();

    let zones: Vec<u32> = vec![1, 2];
    let sums_before: Vec<f64> = zones
        .iter()
        .map(|&z| {
            rows.iter()
                .filter(|r| r.annulus_zone == z)
                .map(|r| r.device_count)
                .sum()
        })
        .collect();
    let lumped = lump_segments(rows);
    let sums_after: Vec<f64> = zones
        .iter()
        .map(|&z| {
            lumped
                .iter()
                .filter(|r| r.annulus_zone == z)
                .map(|r| r.device_count)
                .sum()
        })
        .collect();
    for (before, after) in sums_before.iter().zip(&sums_after) {
        assert!((before - after).abs() < 1e-9, "lumping conserves zone totals");
    }
}

#[test]
fn test_zone_degeneracy() {
    // all gravel pack: every row zone 0
    let gp = assign_annulus_zones(
        "A-1",
        &[
            completion_row(0.0, 500.0, AnnulusContent::GravelPack, DeviceType::Icd, 1.0),
            completion_row(500.0, 1000.0, AnnulusContent::GravelPack, DeviceType::Icd, 1.0),
        ],
    )
    .unwrap();
    assert!(gp.iter().all(|row| row.annulus_zone == 0));

    // all open annulus: exactly one zone
    let oa = assign_annulus_zones(
        "A-1",
        &[
            completion_row(0.0, 500.0, AnnulusContent::OpenAnnulus, DeviceType::Icd, 1.0),
            completion_row(500.0, 1000.0, AnnulusContent::OpenAnnulus, DeviceType::Icd, 1.0),
        ],
    )
    .unwrap();
    assert!(oa.iter().all(|row| row.annulus_zone == 1));
}

// ============================================================================
// Strategy coverage through the full pipeline
// ============================================================================

#[test]
fn test_fix_method_end_to_end() {
    let mut input = basic_input(
        vec![completion_row(
            0.0,
            1000.0,
            AnnulusContent::OpenAnnulus,
            DeviceType::Valve,
            1.0,
        )],
        vec![cell(0.0, 1000.0)],
    );
    input.well = "FIX-1".to_string();
    let config = CaseConfig {
        method: Method::Fix,
        segment_length: 300.0,
        ..CaseConfig::default()
    };
    let model = build_lateral(&input, &config).unwrap();
    assert_eq!(model.segments.len(), 4);
    assert!((model.segments[3].length - 100.0).abs() < 1e-9, "final segment truncated");
}

#[test]
fn test_welsegs_method_end_to_end() {
    let config = CaseConfig {
        method: Method::Welsegs,
        ..CaseConfig::default()
    };
    let input = basic_input(
        vec![completion_row(
            0.0,
            1000.0,
            AnnulusContent::OpenAnnulus,
            DeviceType::Aicd,
            1.0,
        )],
        vec![cell(0.0, 500.0), cell(500.0, 1000.0)],
    );
    let model = build_lateral(&input, &config).unwrap();
    assert!(!model.segments.is_empty());
    let total_length: f64 = model.segments.iter().map(|r| r.length).sum();
    assert!(total_length >= 1000.0 - 1e-9, "grid covers the reservoir extent");
}

#[test]
fn test_user_method_links_by_design_boundaries() {
    let config = CaseConfig {
        method: Method::User,
        ..CaseConfig::default()
    };
    let input = basic_input(
        vec![
            completion_row(0.0, 600.0, AnnulusContent::OpenAnnulus, DeviceType::Icd, 1.0),
            completion_row(600.0, 1000.0, AnnulusContent::OpenAnnulus, DeviceType::Icd, 1.0),
        ],
        vec![cell(0.0, 500.0), cell(500.0, 1000.0)],
    );
    let model = build_lateral(&input, &config).unwrap();
    assert_eq!(model.segments.len(), 2);
    // cell midpoints 250 and 750 fall inside design intervals 0 and 1
    assert_eq!(model.links[0].segment_index, 0);
    assert_eq!(model.links[1].segment_index, 1);
}

#[test]
fn test_minimum_segment_length_lumps_cells() {
    let config = CaseConfig {
        minimum_segment_length: 350.0,
        ..CaseConfig::default()
    };
    let input = basic_input(
        vec![completion_row(
            0.0,
            1000.0,
            AnnulusContent::OpenAnnulus,
            DeviceType::Aicd,
            1.0,
        )],
        vec![
            cell(0.0, 250.0),
            cell(250.0, 500.0),
            cell(500.0, 750.0),
            cell(750.0, 1000.0),
        ],
    );
    let model = build_lateral(&input, &config).unwrap();
    assert_eq!(model.segments.len(), 2);
    assert!((model.segments[0].length - 500.0).abs() < 1e-9);
}
