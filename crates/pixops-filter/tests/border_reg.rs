//! Border policy regression test
//!
//! Exercises the four border policies of the neighbourhood scanner:
//!   (1) NoOp leaves the border band at zero
//!   (2) CopyBorder copies the border band from the source
//!   (3) Reflect and Circular compute every pixel
//!   (4) Index mapping helpers

use pixops_core::{Pix, PixelDepth};
use pixops_filter::{BorderPolicy, Neighbourhood, circular_index, reflect_index};
use pixops_test::RegParams;

fn gradient(w: u32, h: u32) -> Pix {
    let samples = (0..h)
        .flat_map(|y| (0..w).map(move |x| (10 + x * 7 + y * 13) as u8))
        .collect();
    Pix::from_samples(w, h, PixelDepth::Bit8, 1, samples).expect("gradient")
}

fn window_sum(win: &mut [u32]) -> u32 {
    win.iter().sum::<u32>() / win.len() as u32
}

#[test]
fn border_reg_noop_and_copy() {
    let mut rp = RegParams::new("border_noop_copy");

    let pixs = gradient(12, 9);
    let noop = Neighbourhood::new(5, 3, BorderPolicy::NoOp).expect("noop");
    let copy = Neighbourhood::new(5, 3, BorderPolicy::CopyBorder).expect("copy");
    let out_noop = noop.apply(&pixs, window_sum).expect("apply noop");
    let out_copy = copy.apply(&pixs, window_sum).expect("apply copy");

    let mut border_zero = true;
    let mut border_copied = true;
    let mut interior_same = true;
    for y in 0..9 {
        for x in 0..12 {
            let interior = (2..10).contains(&x) && (1..8).contains(&y);
            let a = out_noop.get_pixel(x, y).unwrap();
            let b = out_copy.get_pixel(x, y).unwrap();
            if interior {
                interior_same &= a == b;
            } else {
                border_zero &= a == 0;
                border_copied &= b == pixs.get_pixel(x, y).unwrap();
            }
        }
    }
    rp.compare_values(1.0, if border_zero { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(1.0, if border_copied { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(1.0, if interior_same { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "border_noop_copy regression test failed");
}

#[test]
fn border_reg_reflect_circular() {
    let mut rp = RegParams::new("border_reflect_circular");

    // A constant image is invariant under any averaging window and policy.
    let flat = Pix::from_samples(6, 4, PixelDepth::Bit8, 1, vec![77; 24]).expect("flat");
    for policy in [BorderPolicy::Reflect, BorderPolicy::Circular] {
        let nb = Neighbourhood::new(3, 5, policy).expect("neighbourhood");
        let out = nb.apply(&flat, window_sum).expect("apply");
        rp.compare_pix(&flat, &out);
    }

    // Interior results agree with the interior-only policy.
    let pixs = gradient(10, 10);
    let noop = Neighbourhood::new(3, 3, BorderPolicy::NoOp)
        .unwrap()
        .apply(&pixs, window_sum)
        .unwrap();
    let reflect = Neighbourhood::new(3, 3, BorderPolicy::Reflect)
        .unwrap()
        .apply(&pixs, window_sum)
        .unwrap();
    rp.compare_values(
        noop.get_pixel(4, 4).unwrap() as f64,
        reflect.get_pixel(4, 4).unwrap() as f64,
        0.0,
    );
    // Reflect computes the corner where NoOp does not.
    rp.compare_values(1.0, if reflect.get_pixel(0, 0).unwrap() > 0 { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "border_reflect_circular regression test failed");
}

#[test]
fn border_reg_index_mapping() {
    let mut rp = RegParams::new("border_index");

    rp.compare_values(0.0, reflect_index(-1, 8) as f64, 0.0);
    rp.compare_values(7.0, reflect_index(8, 8) as f64, 0.0);
    rp.compare_values(0.0, reflect_index(15, 8) as f64, 0.0);
    rp.compare_values(7.0, circular_index(-1, 8) as f64, 0.0);
    rp.compare_values(0.0, circular_index(8, 8) as f64, 0.0);
    rp.compare_values(0.0, circular_index(-8, 8) as f64, 0.0);

    assert!(rp.cleanup(), "border_index regression test failed");
}
