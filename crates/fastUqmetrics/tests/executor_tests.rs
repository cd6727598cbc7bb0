#![cfg(feature = "dev")]
#![cfg(feature = "cpu")]
//! Direct tests of the rayon passes.

use fastUqmetrics::internals::engine::executor::{fit_pass_parallel, index_pass_parallel};
use fastUqmetrics::prelude::*;

#[test]
fn test_index_pass_fills_every_slot_in_order() {
    let units = 1000;
    let width = 3;
    let mut out = vec![0.0f64; units * width];

    let fill = |i: usize, slot: &mut [f64]| {
        for (k, v) in slot.iter_mut().enumerate() {
            *v = (i * 10 + k) as f64;
        }
    };
    index_pass_parallel(units, width, &fill, &mut out);

    for i in 0..units {
        let expected = [(i * 10) as f64, (i * 10 + 1) as f64, (i * 10 + 2) as f64];
        assert_eq!(&out[i * width..(i + 1) * width], &expected);
    }
}

#[test]
fn test_index_pass_zero_width() {
    let mut out: Vec<f64> = Vec::new();
    let fill = |_: usize, _: &mut [f64]| panic!("no unit has a slot");
    index_pass_parallel(5, 0, &fill, &mut out);
    assert!(out.is_empty());
}

#[test]
fn test_fit_pass_preserves_order() {
    let fit = |i: usize| {
        if i % 3 == 0 {
            Err(FitFailure::Singular)
        } else {
            Ok(VariogramModel {
                nugget: i as f64,
                range: 1.0,
                sill: 2.0,
            })
        }
    };
    let results = fit_pass_parallel(50, &fit);

    assert_eq!(results.len(), 50);
    for (i, r) in results.iter().enumerate() {
        match r {
            Ok(model) => assert_eq!(model.nugget, i as f64),
            Err(e) => {
                assert_eq!(i % 3, 0);
                assert_eq!(*e, FitFailure::Singular);
            }
        }
    }
}
