//! Connected-component labeling regression test
//!
//! Tests the region labeler:
//!   (1) 4- vs 8-connectivity on diagonally touching pixels
//!   (2) Labels are dense, non-zero on foreground and zero on background
//!   (3) More than 255 components are truncated to exactly 255
//!   (4) Large components are labeled without deep recursion

use pixops_core::{Pix, PixMut, PixelDepth};
use pixops_region::{Connectivity, MAX_LABELS, RegionError, RegionLabeler};
use pixops_test::{RegParams, pix_from_picture, random_binary_pix};

#[test]
fn label_reg_connectivity() {
    let mut rp = RegParams::new("label_connectivity");

    // Two single-pixel blobs touching at a corner
    let pixs = pix_from_picture(
        PixelDepth::Bit8,
        255,
        "
        ........
        ........
        ..#.....
        ...#....
        ........
        ........
        ........
        ........
        ",
    );
    let four = RegionLabeler::new(4).expect("4").label(&pixs).expect("label 4");
    let eight = RegionLabeler::new(8).expect("8").label(&pixs).expect("label 8");
    rp.compare_values(2.0, four.num_labels() as f64, 0.0);
    rp.compare_values(1.0, four.label_at(2, 2).unwrap_or(0) as f64, 0.0);
    rp.compare_values(2.0, four.label_at(3, 3).unwrap_or(0) as f64, 0.0);
    rp.compare_values(1.0, eight.num_labels() as f64, 0.0);
    rp.compare_values(1.0, eight.label_at(3, 3).unwrap_or(0) as f64, 0.0);

    // Blobs separated by a gap stay apart under either connectivity.
    let apart = pix_from_picture(PixelDepth::Bit1, 1, "#...\n....\n..#.\n....");
    let eight = RegionLabeler::with_connectivity(Connectivity::Eight)
        .label(&apart)
        .expect("label");
    rp.compare_values(2.0, eight.num_labels() as f64, 0.0);

    let bad = matches!(RegionLabeler::new(5), Err(RegionError::InvalidParameters(_)));
    rp.compare_values(1.0, if bad { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "label_connectivity regression test failed");
}

#[test]
fn label_reg_label_invariants() {
    let mut rp = RegParams::new("label_invariants");

    for (seed, conn) in [(1u32, 4u32), (2, 8), (3, 4)] {
        // 240 pixels, so the label cap can never be reached.
        let pixs = random_binary_pix(20, 12, PixelDepth::Bit1, 1, 35, seed);
        let map = RegionLabeler::new(conn).expect("labeler").label(&pixs).expect("label");
        let n = map.num_labels();
        rp.compare_values(1.0, if n < MAX_LABELS { 1.0 } else { 0.0 }, 0.0);

        let mut fg_labeled = true;
        let mut bg_zero = true;
        let mut in_range = true;
        let mut counts = vec![0u32; n as usize + 1];
        for y in 0..12 {
            for x in 0..20 {
                let fg = pixs.get_pixel(x, y).unwrap_or(0) > 0;
                let label = map.label_at(x, y).unwrap_or(0);
                if fg {
                    fg_labeled &= label != 0;
                } else {
                    bg_zero &= label == 0;
                }
                in_range &= label <= n;
                if label <= n {
                    counts[label as usize] += 1;
                }
            }
        }
        rp.compare_values(1.0, if fg_labeled { 1.0 } else { 0.0 }, 0.0);
        rp.compare_values(1.0, if bg_zero { 1.0 } else { 0.0 }, 0.0);
        rp.compare_values(1.0, if in_range { 1.0 } else { 0.0 }, 0.0);
        // Every label is used, and sizes match the label image.
        let sizes_match = map
            .component_sizes()
            .iter()
            .enumerate()
            .all(|(i, &s)| s > 0 && counts[i + 1] == s);
        rp.compare_values(1.0, if sizes_match { 1.0 } else { 0.0 }, 0.0);

        // Neighbouring foreground pixels always share a label.
        let offsets: &[(u32, u32)] = if conn == 4 {
            &[(1, 0), (0, 1)]
        } else {
            &[(1, 0), (0, 1), (1, 1)]
        };
        let mut coherent = true;
        for y in 0..11 {
            for x in 0..19 {
                let a = map.label_at(x, y).unwrap_or(0);
                for &(dx, dy) in offsets {
                    let b = map.label_at(x + dx, y + dy).unwrap_or(0);
                    if a != 0 && b != 0 {
                        coherent &= a == b;
                    }
                }
                if conn == 8 {
                    let c = map.label_at(x + 1, y).unwrap_or(0);
                    let d = map.label_at(x, y + 1).unwrap_or(0);
                    if c != 0 && d != 0 {
                        coherent &= c == d;
                    }
                }
            }
        }
        rp.compare_values(1.0, if coherent { 1.0 } else { 0.0 }, 0.0);
    }

    assert!(rp.cleanup(), "label_invariants regression test failed");
}

#[test]
fn label_reg_truncation() {
    let mut rp = RegParams::new("label_truncation");

    // 300 isolated pixels on a 2-pixel grid
    let mut pm = PixMut::new(40, 30, PixelDepth::Bit1).expect("pixmut");
    for i in 0..300u32 {
        pm.set_pixel((i % 20) * 2, (i / 20) * 2, 1).expect("set");
    }
    let pixs: Pix = pm.into();
    rp.compare_values(300.0, pixs.count_pixels() as f64, 0.0);

    let map = RegionLabeler::new(8).expect("labeler").label(&pixs).expect("label");
    rp.compare_values(255.0, map.num_labels() as f64, 0.0);
    rp.compare_values(255.0, map.pix().count_pixels() as f64, 0.0);

    let max_label = map.pix().data().iter().copied().max().unwrap_or(0);
    rp.compare_values(255.0, max_label as f64, 0.0);
    // Components are found in raster order: pixel 254 gets the last label,
    // pixel 255 (row 12, column 15 on the grid) is left unlabeled.
    rp.compare_values(255.0, map.label_at(28, 24).unwrap_or(0) as f64, 0.0);
    rp.compare_values(0.0, map.label_at(30, 24).unwrap_or(99) as f64, 0.0);
    rp.compare_values(0.0, map.label_at(38, 28).unwrap_or(99) as f64, 0.0);

    assert!(rp.cleanup(), "label_truncation regression test failed");
}

#[test]
fn label_reg_large_component() {
    let mut rp = RegParams::new("label_large");

    // A single serpentine component spanning the whole image
    let (w, h) = (400u32, 300u32);
    let mut pm = PixMut::new(w, h, PixelDepth::Bit1).expect("pixmut");
    for y in (0..h).step_by(2) {
        for x in 0..w {
            pm.set_pixel_unchecked(x, y, 1);
        }
        if y + 1 < h {
            let link = if (y / 2) % 2 == 0 { w - 1 } else { 0 };
            pm.set_pixel_unchecked(link, y + 1, 1);
        }
    }
    let pixs: Pix = pm.into();
    let map = RegionLabeler::new(4).expect("labeler").label(&pixs).expect("label");
    rp.compare_values(1.0, map.num_labels() as f64, 0.0);
    rp.compare_values(
        pixs.count_pixels() as f64,
        map.component_sizes()[0] as f64,
        0.0,
    );

    assert!(rp.cleanup(), "label_large regression test failed");
}
