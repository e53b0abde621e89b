pub mod csv;
pub mod json;
pub mod text;

use crate::model::summary::Stat;

pub const NOT_COMPUTABLE: &str = "NA";

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

pub fn format_stat(stat: Stat) -> String {
    match stat {
        Stat::Value(v) => format_f64_6(v),
        Stat::NotComputable => NOT_COMPUTABLE.to_string(),
    }
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag { "YES" } else { "no" }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
