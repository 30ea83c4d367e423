const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;
const THOUSAND: f64 = 1_000.0;

/// Rupee amount in Indian short notation: crore, lakh, thousands, then units.
pub fn format_inr(amount: f64) -> String {
    if amount >= CRORE {
        format!("₹{:.2} Cr", amount / CRORE)
    } else if amount >= LAKH {
        format!("₹{:.2} L", amount / LAKH)
    } else if amount >= THOUSAND {
        format!("₹{:.0}K", amount / THOUSAND)
    } else {
        format!("₹{amount:.0}")
    }
}
