//! `sub`, `tostr`, `tonum` and `type`.

use pico_eval::{library, to_string, type_of, Value};

use super::{binding, number, single, Binding};

pub(super) fn bindings() -> Vec<Binding> {
    vec![
        binding("sub", |args| {
            let text = to_string(&args.pluck(0))
                .map_err(|_| library("sub", "argument 1 was not a string"))?;
            let start = number(&args, 1);
            let end = match args.pluck(2) {
                Value::Nil => None,
                _ => Some(number(&args, 2)),
            };
            single(substring(&text, start, end))
        }),
        binding("tostr", |args| single(args.first().to_string())),
        binding("tonum", |args| single(parse_number(&args.first()))),
        binding("type", |args| single(type_of(&args.first()).as_str())),
    ]
}

/// Characters `start..=end`, 1-based; negative positions count from the end.
fn substring(text: &str, start: f64, end: Option<f64>) -> String {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len() as i64;
    let resolve = |i: f64| {
        let i = i.floor() as i64;
        if i < 0 {
            len + i + 1
        } else {
            i
        }
    };

    let first = resolve(start).max(1);
    let last = end.map_or(len, resolve).min(len);
    if first > last {
        return String::new();
    }
    chars[(first - 1) as usize..last as usize].iter().collect()
}

/// Numeric value of a number or numeric string, nil otherwise.
fn parse_number(value: &Value) -> Value {
    match value {
        Value::Number(n) => Value::Number(*n),
        Value::Str(s) => {
            let s = s.trim();
            let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
                Some(hex) => u64::from_str_radix(hex, 16).ok().map(|v| v as f64),
                None => s.parse::<f64>().ok().filter(|n| n.is_finite()),
            };
            parsed.map_or(Value::Nil, Value::Number)
        }
        _ => Value::Nil,
    }
}
