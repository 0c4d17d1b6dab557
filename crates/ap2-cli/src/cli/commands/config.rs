use crate::exit_codes::SUCCESS;
use ap2_core::Ap2Config;
use anyhow::Result;

pub fn run(cfg: &Ap2Config) -> Result<i32> {
    print!("{}", serde_yaml::to_string(cfg)?);
    Ok(SUCCESS)
}
