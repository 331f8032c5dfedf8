use llkv_result::{Error, Result};

use crate::module::{ScalarFunctionDef, ScalarModule};

pub fn math_functions() -> ScalarModule {
    ScalarModule::new("math")
        .function(ScalarFunctionDef::stateless("abs_int64", abs_int64).named("abs"))
        .function(ScalarFunctionDef::stateless("abs_double", abs_double).named("abs"))
        .function(ScalarFunctionDef::stateless("ceil", ceil).alias("ceiling"))
        .function(ScalarFunctionDef::stateless("floor", floor))
        .function(ScalarFunctionDef::stateless("ln", ln))
        .function(ScalarFunctionDef::stateless("log2", log2))
        .function(ScalarFunctionDef::stateless("log10", log10))
        .function(ScalarFunctionDef::stateless("exp", exp))
        .function(ScalarFunctionDef::stateless("sqrt", sqrt))
        .function(ScalarFunctionDef::stateless("pow", pow).alias("power"))
        .function(ScalarFunctionDef::stateless("round", round))
        .function(ScalarFunctionDef::stateless("round_to_digits", round_to_digits).named("round"))
        .function(ScalarFunctionDef::stateless("mod_int64", mod_int64).named("mod"))
        .function(ScalarFunctionDef::stateless("mod_double", mod_double).named("mod"))
        .function(ScalarFunctionDef::stateless("sign", sign))
        .function(ScalarFunctionDef::stateless("pi", pi))
        .function(ScalarFunctionDef::stateless("e", e))
}

pub fn abs_int64(x: i64) -> Result<i64> {
    x.checked_abs()
        .ok_or_else(|| Error::InvalidArgumentError(format!("abs({x}) exceeds i64 range")))
}

pub fn abs_double(x: f64) -> f64 {
    x.abs()
}

pub fn ceil(x: f64) -> f64 {
    x.ceil()
}

pub fn floor(x: f64) -> f64 {
    x.floor()
}

pub fn ln(x: f64) -> f64 {
    x.ln()
}

pub fn log2(x: f64) -> f64 {
    x.log2()
}

pub fn log10(x: f64) -> f64 {
    x.log10()
}

pub fn exp(x: f64) -> f64 {
    x.exp()
}

pub fn sqrt(x: f64) -> f64 {
    x.sqrt()
}

pub fn pow(base: f64, exponent: f64) -> f64 {
    base.powf(exponent)
}

/// Rounds half away from zero.
pub fn round(x: f64) -> f64 {
    x.round()
}

pub fn round_to_digits(x: f64, digits: i64) -> Result<f64> {
    let digits = i32::try_from(digits).map_err(|_| {
        Error::InvalidArgumentError(format!("round digits {digits} out of range"))
    })?;
    let factor = 10f64.powi(digits);
    Ok((x * factor).round() / factor)
}

pub fn mod_int64(dividend: i64, divisor: i64) -> Result<i64> {
    if divisor == 0 {
        return Err(Error::InvalidArgumentError("division by zero in mod".into()));
    }
    // i64::MIN % -1 overflows; the mathematical result is 0.
    Ok(dividend.checked_rem(divisor).unwrap_or(0))
}

pub fn mod_double(dividend: f64, divisor: f64) -> f64 {
    dividend % divisor
}

/// `-1`, `0` or `1`; NaN stays NaN.
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        x
    }
}

pub fn pi() -> f64 {
    std::f64::consts::PI
}

pub fn e() -> f64 {
    std::f64::consts::E
}
