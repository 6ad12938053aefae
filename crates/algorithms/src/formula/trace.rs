//! Human-readable formula traces.
//!
//! A trace embeds the actual inputs and the result, e.g.
//! `ICVI = (EVI + SVI)/2 = (0.350 + 0.420)/2 = 0.385`.

use coastcvi_core::formula::{CombineMethod, CustomCombination, FormulaFamily, FormulaTag};

/// Decimal places used in traces
pub const TRACE_PRECISION: usize = 3;

/// Precision for a tag; the 0.1–0.9 geometric ICVI needs one more digit to stay legible
pub fn precision_for(tag: FormulaTag) -> usize {
    match tag {
        FormulaTag::IcviGeometric => TRACE_PRECISION + 1,
        _ => TRACE_PRECISION,
    }
}

pub fn fixed(value: f64, precision: usize) -> String {
    format!("{value:.precision$}")
}

/// Whole numbers without decimals, everything else at `precision`
pub fn compact(value: f64, precision: usize) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        fixed(value, precision)
    }
}

fn joined(values: &[f64], sep: &str, precision: usize) -> String {
    values
        .iter()
        .map(|&v| compact(v, precision))
        .collect::<Vec<_>>()
        .join(sep)
}

fn weighted_terms(values: &[f64], weights: &[f64], precision: usize) -> String {
    values
        .iter()
        .zip(weights)
        .map(|(&v, &w)| format!("{}×{}", compact(v, precision), fixed(w, precision)))
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Trace for an atomic formula over the values it actually consumed
pub fn atomic(tag: FormulaTag, family: FormulaFamily, values: &[f64], weights: &[f64], result: f64) -> String {
    let p = precision_for(tag);
    let symbol = tag.symbol();
    let n = values.len();
    let r = fixed(result, p);
    match family {
        FormulaFamily::Traditional => {
            let product: f64 = values.iter().product();
            format!(
                "{symbol} = √(∏Vi/n) = √(({})/{n}) = √({}/{n}) = {r}",
                joined(values, "×", p),
                compact(product, p)
            )
        }
        FormulaFamily::GeometricMean => {
            let terms = values
                .iter()
                .zip(normalized(weights))
                .map(|(&v, w)| format!("{}^{}", compact(v, p), fixed(w, p)))
                .collect::<Vec<_>>()
                .join(" × ");
            format!("{symbol} = ∏(Vi^(Wi/ΣW)) = {terms} = {r}")
        }
        FormulaFamily::NormalizedGeometricMean => {
            let terms = values
                .iter()
                .zip(normalized(weights))
                .map(|(&v, w)| format!("{}^{}", compact(v, p), fixed(w, p)))
                .collect::<Vec<_>>()
                .join(" × ");
            format!("{symbol} = (∏(Vi^(Wi/ΣW)))^(1/n) = ({terms})^(1/{n}) = {r}")
        }
        FormulaFamily::ArithmeticMean => format!(
            "{symbol} = Σ(Vi×Wi)/ΣW = ({})/{} = {r}",
            weighted_terms(values, weights, p),
            fixed(weights.iter().sum(), p)
        ),
        FormulaFamily::NonlinearPower => {
            let terms = values
                .iter()
                .zip(weights)
                .map(|(&v, &w)| format!("{}²×{}", compact(v, p), fixed(w, p)))
                .collect::<Vec<_>>()
                .join(" + ");
            format!(
                "{symbol} = √(Σ(Vi²×Wi)/ΣW) = √(({terms})/{}) = {r}",
                fixed(weights.iter().sum(), p)
            )
        }
        FormulaFamily::Additive => format!("{symbol} = Σ(Vi) = {} = {}", joined(values, " + ", p), compact(result, p)),
        FormulaFamily::WeightedSum => {
            format!("{symbol} = Σ(Vi×Wi) = {} = {r}", weighted_terms(values, weights, p))
        }
        FormulaFamily::RemappedMean => format!(
            "{symbol} = Σ(Vi)/n = ({})/{n} = {r}",
            values.iter().map(|&v| fixed(v, p)).collect::<Vec<_>>().join(" + ")
        ),
    }
}

fn normalized(weights: &[f64]) -> Vec<f64> {
    let total: f64 = weights.iter().sum();
    if total == 0.0 {
        return weights.to_vec();
    }
    weights.iter().map(|w| w / total).collect()
}

/// Default right-hand side when a composite declares no expression
pub fn default_expression(combine: CombineMethod, symbols: &[&str]) -> String {
    match combine {
        CombineMethod::ArithmeticMean => format!("({})/{}", symbols.join(" + "), symbols.len()),
        CombineMethod::WeightedSum => symbols
            .iter()
            .map(|s| format!("w×{s}"))
            .collect::<Vec<_>>()
            .join(" + "),
        CombineMethod::Custom(custom) => custom.expression().to_string(),
    }
}

/// Trace for a composite: `LABEL = expression = numeric expansion = result`
pub fn composite(
    tag: FormulaTag,
    label: &str,
    expression: &str,
    combine: CombineMethod,
    parts: &[(f64, f64)],
    result: f64,
) -> String {
    let p = precision_for(tag);
    let values: Vec<f64> = parts.iter().map(|&(v, _)| v).collect();
    let expansion = match combine {
        CombineMethod::ArithmeticMean => format!(
            "({})/{}",
            values.iter().map(|&v| fixed(v, p)).collect::<Vec<_>>().join(" + "),
            values.len()
        ),
        CombineMethod::WeightedSum => parts
            .iter()
            .map(|&(v, w)| format!("{}×{}", compact(w, p), fixed(v, p)))
            .collect::<Vec<_>>()
            .join(" + "),
        CombineMethod::Custom(CustomCombination::ExposureSensitivityAdaptive) => match values.as_slice() {
            [e, s, ac] => format!("({} + {} - {})/3", fixed(*e, p), fixed(*s, p), fixed(*ac, p)),
            _ => values.iter().map(|&v| fixed(v, p)).collect::<Vec<_>>().join(", "),
        },
    };
    format!("{label} = {expression} = {expansion} = {}", fixed(result, p))
}
