use citeguard_core::ReasonCode;

use crate::exit_codes;

pub fn run() -> anyhow::Result<i32> {
    let width = ReasonCode::ALL
        .iter()
        .map(|c| c.as_str().len())
        .max()
        .unwrap_or(0);
    for code in ReasonCode::ALL {
        let origin = if code.is_extension() { "extension" } else { "base" };
        println!(
            "{:<width$}  {:<5}  {:<9}  {}",
            code.as_str(),
            code.severity().as_str(),
            origin,
            code.default_message(),
        );
    }
    Ok(exit_codes::SUCCESS)
}
