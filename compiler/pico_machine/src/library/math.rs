//! Arithmetic, trigonometry, 16.16 bit operations and random numbers.

use std::f64::consts::TAU;

use pico_eval::{MultiValue, RuntimeResult};

use super::{binding, none, number, single, Binding, Host};

/// One in 16.16 fixed point.
const FIXED_ONE: f64 = 65536.0;

pub(super) fn bindings(host: &Host) -> Vec<Binding> {
    let rnd_prng = host.prng.clone();
    let srand_prng = host.prng.clone();
    vec![
        binding("flr", |args| single(number(&args, 0).floor())),
        binding("abs", |args| single(number(&args, 0).abs())),
        binding("sqrt", |args| single(number(&args, 0).sqrt())),
        binding("min", |args| single(number(&args, 0).min(number(&args, 1)))),
        binding("max", |args| single(number(&args, 0).max(number(&args, 1)))),
        binding("mid", |args| {
            single(mid(number(&args, 0), number(&args, 1), number(&args, 2)))
        }),
        binding("sin", |args| single((number(&args, 0) * TAU).sin())),
        binding("cos", |args| single((number(&args, 0) * TAU).cos())),
        binding("atan2", |args| {
            single(number(&args, 0).atan2(-number(&args, 1)) / TAU)
        }),
        binding("band", |args| bitwise(&args, |a, b| a & b)),
        binding("bor", |args| bitwise(&args, |a, b| a | b)),
        binding("bxor", |args| bitwise(&args, |a, b| a ^ b)),
        binding("bnot", |args| single(from_fixed(!to_fixed(number(&args, 0))))),
        binding("shl", |args| {
            let shift = shift_amount(number(&args, 1));
            single(from_fixed(to_fixed(number(&args, 0)).wrapping_shl(shift)))
        }),
        binding("shr", |args| {
            let shift = shift_amount(number(&args, 1));
            single(from_fixed(to_fixed(number(&args, 0)).wrapping_shr(shift)))
        }),
        binding("rnd", move |args| {
            // `rnd()` draws from [0, 1).
            let scale = if args.first().is_nil() {
                1.0
            } else {
                number(&args, 0)
            };
            single(rnd_prng.borrow_mut().next_scaled(scale))
        }),
        binding("srand", move |args| {
            srand_prng.borrow_mut().seed(to_fixed(number(&args, 0)) as u32);
            none()
        }),
    ]
}

/// Middle of three values.
fn mid(x: f64, y: f64, z: f64) -> f64 {
    let (lo, hi) = if x < y { (x, y) } else { (y, x) };
    if z < lo {
        lo
    } else if z > hi {
        hi
    } else {
        z
    }
}

/// Convert to 16.16 fixed point with 32-bit wraparound.
#[allow(clippy::cast_possible_wrap)]
fn to_fixed(x: f64) -> i32 {
    let scaled = (x * FIXED_ONE).trunc();
    if scaled.is_finite() {
        scaled.rem_euclid(4_294_967_296.0) as u32 as i32
    } else {
        0
    }
}

fn from_fixed(bits: i32) -> f64 {
    f64::from(bits) / FIXED_ONE
}

/// Whole-number shift distance, masked to the word size.
fn shift_amount(n: f64) -> u32 {
    (n.trunc() as i64 & 31) as u32
}

fn bitwise(args: &MultiValue, op: impl Fn(i32, i32) -> i32) -> RuntimeResult<MultiValue> {
    let a = to_fixed(number(args, 0));
    let b = to_fixed(number(args, 1));
    single(from_fixed(op(a, b)))
}
