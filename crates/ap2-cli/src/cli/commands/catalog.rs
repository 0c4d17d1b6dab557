use super::super::args::CatalogArgs;
use super::load_catalog;
use crate::exit_codes::SUCCESS;
use ap2_core::money::format_amount;
use ap2_core::Ap2Config;
use anyhow::Result;

pub fn run(cfg: &Ap2Config, args: CatalogArgs) -> Result<i32> {
    let catalog = load_catalog(cfg)?;

    println!("{:<16} {:<20} {:>12} {:>6}  NAME", "ID", "PLATFORM", "PRICE", "STOCK");
    for p in catalog.products() {
        if let Some(platform) = &args.platform {
            if !p.platform.eq_ignore_ascii_case(platform) {
                continue;
            }
        }
        let stock = if p.in_stock {
            p.stock_count.to_string()
        } else {
            "-".to_string()
        };
        println!(
            "{:<16} {:<20} {:>12} {:>6}  {}",
            p.id,
            p.platform,
            format_amount(p.price, &cfg.currency_symbol),
            stock,
            p.display_name()
        );
    }
    Ok(SUCCESS)
}
