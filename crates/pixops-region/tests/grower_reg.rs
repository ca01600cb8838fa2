//! Region grower regression test
//!
//! Tests seeded region growing on synthetic images:
//!   (1) One step from a single seed claims the seed's neighbourhood
//!   (2) Growing to completion terminates and assigns every pixel once
//!   (3) Regions seeded on very different values never merge
//!   (4) Statistics and status stay consistent with the label image
//!   (5) Within one step, contested pixels and running means follow raster
//!       scan order

use pixops_core::{Pix, PixelDepth};
use pixops_region::{
    Connectivity, GrowerOptions, GrowerState, PixelStatus, RegionError, RegionGrower,
};
use pixops_test::RegParams;

fn uniform(w: u32, h: u32, v: u8) -> Pix {
    Pix::from_samples(w, h, PixelDepth::Bit8, 1, vec![v; (w * h) as usize]).expect("uniform")
}

/// Left half dark (around 10), right half bright (around 250), with a
/// little deterministic texture.
fn two_halves(w: u32, h: u32) -> Pix {
    let samples = (0..h)
        .flat_map(|y| {
            (0..w).map(move |x| {
                let jitter = ((x * 7 + y * 3) % 3) as u8;
                if x < w / 2 { 10 + jitter } else { 250 - jitter }
            })
        })
        .collect();
    Pix::from_samples(w, h, PixelDepth::Bit8, 1, samples).expect("halves")
}

#[test]
fn grower_reg_single_step() {
    let mut rp = RegParams::new("grower_single_step");

    let pixs = uniform(5, 5, 100);
    for (conn, expected) in [(Connectivity::Eight, 9.0), (Connectivity::Four, 5.0)] {
        let mut grower =
            RegionGrower::new(&pixs, &[(2, 2)], GrowerOptions::new(conn, 1)).expect("grower");
        rp.compare_values(1.0, if grower.grow() { 1.0 } else { 0.0 }, 0.0);
        rp.compare_values(expected, grower.region_size(1).unwrap_or(0) as f64, 0.0);

        let labels = grower.label_map();
        let mut in_neighbourhood = true;
        for y in 0..5u32 {
            for x in 0..5u32 {
                let dx = x.abs_diff(2);
                let dy = y.abs_diff(2);
                let near = match conn {
                    Connectivity::Eight => dx <= 1 && dy <= 1,
                    Connectivity::Four => dx + dy <= 1,
                };
                let label = labels.get_pixel(x, y).unwrap_or(0);
                in_neighbourhood &= (label == 1) == near;
            }
        }
        rp.compare_values(1.0, if in_neighbourhood { 1.0 } else { 0.0 }, 0.0);
    }

    assert!(rp.cleanup(), "grower_single_step regression test failed");
}

#[test]
fn grower_reg_completion() {
    let mut rp = RegParams::new("grower_completion");

    let pixs = uniform(5, 5, 100);
    let mut grower =
        RegionGrower::new(&pixs, &[(2, 2)], GrowerOptions::default()).expect("grower");
    rp.compare_values(1.0, if grower.state() == GrowerState::Initialized { 1.0 } else { 0.0 }, 0.0);
    let calls = grower.grow_to_completion();
    rp.compare_values(3.0, calls as f64, 0.0);
    rp.compare_values(1.0, if grower.is_finished() { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(0.0, grower.unassigned_count() as f64, 0.0);
    rp.compare_values(25.0, grower.region_size(1).unwrap_or(0) as f64, 0.0);
    rp.compare_values(25.0, grower.label_map().count_pixels() as f64, 0.0);

    // Further calls are no-ops.
    rp.compare_values(0.0, if grower.grow() { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(0.0, grower.grow_to_completion() as f64, 0.0);
    rp.compare_values(3.0, grower.num_iterations() as f64, 0.0);

    // A larger image with four seeds: every pixel ends up in exactly one
    // region, and region sizes add up to the image size.
    let pixs = uniform(40, 30, 77);
    let seeds = [(0, 0), (39, 0), (0, 29), (20, 15)];
    let mut grower =
        RegionGrower::new(&pixs, &seeds, GrowerOptions::new(Connectivity::Four, 2)).expect("grower");
    grower.grow_to_completion();
    let total: u32 = grower.regions().iter().map(|r| r.size()).sum();
    rp.compare_values(1200.0, total as f64, 0.0);
    let labels = grower.label_map();
    let mut counts = [0u32; 5];
    for &s in labels.data() {
        counts[s as usize] += 1;
    }
    rp.compare_values(0.0, counts[0] as f64, 0.0);
    for id in 1..=4u32 {
        rp.compare_values(
            grower.region_size(id).unwrap_or(0) as f64,
            counts[id as usize] as f64,
            0.0,
        );
    }

    assert!(rp.cleanup(), "grower_completion regression test failed");
}

#[test]
fn grower_reg_no_merge() {
    let mut rp = RegParams::new("grower_no_merge");

    let pixs = two_halves(20, 12);
    let seeds = [(2, 6), (17, 6)];
    let mut grower =
        RegionGrower::new(&pixs, &seeds, GrowerOptions::new(Connectivity::Eight, 5)).expect("grower");
    grower.grow_to_completion();

    let labels = grower.label_map();
    let mut separated = true;
    for y in 0..12 {
        for x in 0..20 {
            let expected = if x < 10 { 1 } else { 2 };
            separated &= labels.get_pixel(x, y) == Some(expected);
        }
    }
    rp.compare_values(1.0, if separated { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(120.0, grower.region_size(1).unwrap_or(0) as f64, 0.0);
    rp.compare_values(120.0, grower.region_size(2).unwrap_or(0) as f64, 0.0);

    let dark = grower.region_mean(1).map_or(0, |m| m[0]);
    let bright = grower.region_mean(2).map_or(0, |m| m[0]);
    rp.compare_values(11.0, dark as f64, 1.0);
    rp.compare_values(249.0, bright as f64, 1.0);

    assert!(rp.cleanup(), "grower_no_merge regression test failed");
}

#[test]
fn grower_reg_status() {
    let mut rp = RegParams::new("grower_status");

    let pixs = uniform(7, 7, 30);
    let mut grower = RegionGrower::new(&pixs, &[(3, 3)], GrowerOptions::new(Connectivity::Four, 1))
        .expect("grower");
    grower.grow();
    grower.grow();

    // After two steps the diamond of radius 2 is assigned; its rim is the
    // active border.
    let status = grower.status_map();
    let mut consistent = true;
    for y in 0..7u32 {
        for x in 0..7u32 {
            let d = x.abs_diff(3) + y.abs_diff(3);
            let expected = match d {
                0 | 1 => PixelStatus::Assigned,
                2 => PixelStatus::Border,
                _ => PixelStatus::Unassigned,
            };
            consistent &= grower.status(x, y) == Some(expected);
            consistent &= status.get_pixel(x, y) == Some(expected.value());
        }
    }
    rp.compare_values(1.0, if consistent { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(1.0, if grower.status(7, 0).is_none() { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "grower_status regression test failed");
}

fn row(samples: &[u8]) -> Pix {
    Pix::from_samples(samples.len() as u32, 1, PixelDepth::Bit8, 1, samples.to_vec())
        .expect("row")
}

#[test]
fn grower_reg_scan_order() {
    let mut rp = RegParams::new("grower_scan_order");
    let four = |threshold| GrowerOptions::new(Connectivity::Four, threshold);

    // Two seeds contest the middle pixel in the first step. The border
    // pixel met first in the scan wins, whatever the region ids.
    let pixs = row(&[50; 5]);
    for (seeds, winner) in [([(1, 0), (3, 0)], 1.0), ([(3, 0), (1, 0)], 2.0)] {
        let mut grower = RegionGrower::new(&pixs, &seeds, four(1)).expect("grower");
        grower.grow();
        let labels = grower.label_map();
        rp.compare_values(winner, labels.get_pixel(2, 0).unwrap_or(0) as f64, 0.0);
        rp.compare_values(winner, labels.get_pixel(0, 0).unwrap_or(0) as f64, 0.0);
        rp.compare_values(3.0 - winner, labels.get_pixel(4, 0).unwrap_or(0) as f64, 0.0);
        rp.compare_values(0.0, grower.unassigned_count() as f64, 0.0);
    }

    // The right neighbour is visited first. Claiming 104 moves the mean
    // from 100 to 102 before the left neighbour is judged (threshold 5).
    //
    // 106 is 6 away from the seed but 4 from the updated mean: admitted.
    let mut grower =
        RegionGrower::new(&row(&[106, 100, 104]), &[(1, 0)], four(5)).expect("grower");
    grower.grow();
    rp.compare_values(3.0, grower.region_size(1).unwrap_or(0) as f64, 0.0);
    rp.compare_values(103.0, grower.region_mean(1).map_or(0, |m| m[0]) as f64, 0.0);

    // 96 is 4 away from the seed but 6 from the updated mean: rejected,
    // and never reached again since its only neighbour is no longer border.
    let mut grower =
        RegionGrower::new(&row(&[96, 100, 104]), &[(1, 0)], four(5)).expect("grower");
    grower.grow();
    rp.compare_values(2.0, grower.region_size(1).unwrap_or(0) as f64, 0.0);
    rp.compare_values(102.0, grower.region_mean(1).map_or(0, |m| m[0]) as f64, 0.0);
    rp.compare_values(0.0, grower.label_map().get_pixel(0, 0).unwrap_or(99) as f64, 0.0);
    grower.grow_to_completion();
    rp.compare_values(1.0, grower.unassigned_count() as f64, 0.0);
    rp.compare_values(
        1.0,
        if grower.status(0, 0) == Some(PixelStatus::Unassigned) { 1.0 } else { 0.0 },
        0.0,
    );

    assert!(rp.cleanup(), "grower_scan_order regression test failed");
}

#[test]
fn grower_reg_configuration_errors() {
    let mut rp = RegParams::new("grower_config");

    let pixs = uniform(8, 8, 1);
    let opts = GrowerOptions::default();
    let too_many: Vec<(u32, u32)> = (0..256u32).map(|i| (i % 8, i / 8 % 8)).collect();

    let cases = [
        matches!(
            RegionGrower::new(&pixs, &[], opts),
            Err(RegionError::InvalidParameters(_))
        ),
        matches!(
            RegionGrower::new(&pixs, &too_many, opts),
            Err(RegionError::InvalidParameters(_))
        ),
        matches!(
            RegionGrower::new(&pixs, &[(0, 8)], opts),
            Err(RegionError::InvalidSeed { x: 0, y: 8 })
        ),
        matches!(
            RegionGrower::new(&pixs, &[(0, 0)], opts.with_threshold(0)),
            Err(RegionError::InvalidParameters(_))
        ),
    ];
    for ok in cases {
        rp.compare_values(1.0, if ok { 1.0 } else { 0.0 }, 0.0);
    }
    // Any value other than 4 means 8-connectivity.
    rp.compare_values(
        1.0,
        if Connectivity::from_value_lenient(5) == Connectivity::Eight { 1.0 } else { 0.0 },
        0.0,
    );

    assert!(rp.cleanup(), "grower_config regression test failed");
}
