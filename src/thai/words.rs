use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

const DIGITS: [&str; 10] = [
    "ศูนย์", "หนึ่ง", "สอง", "สาม", "สี่", "ห้า", "หก", "เจ็ด", "แปด", "เก้า",
];

/// Place names within a six-digit group; millions repeat the group.
const PLACES: [&str; 6] = ["", "สิบ", "ร้อย", "พัน", "หมื่น", "แสน"];

const MILLION: u64 = 1_000_000;

/// Thai reading of an amount in baht, as written on payment vouchers.
/// e.g. `1500.50` → `"หนึ่งพันห้าร้อยบาทห้าสิบสตางค์"`
///
/// `None` when the baht part is beyond `u64`.
pub(crate) fn baht_text(amount: Decimal) -> Option<String> {
    let amount = amount.abs().round_dp(2);
    let baht_part = amount.trunc();
    let satang = ((amount - baht_part) * Decimal::ONE_HUNDRED)
        .trunc()
        .to_u64()?;
    let baht = baht_part.to_u64()?;

    if baht == 0 && satang == 0 {
        return Some(format!("{}บาทถ้วน", DIGITS[0]));
    }

    let mut out = String::new();
    if baht > 0 {
        out.push_str(&read_number(baht));
        out.push_str("บาท");
    }
    if satang == 0 {
        out.push_str("ถ้วน");
    } else {
        out.push_str(&read_number(satang));
        out.push_str("สตางค์");
    }
    Some(out)
}

fn read_number(n: u64) -> String {
    if n == 0 {
        return DIGITS[0].to_string();
    }
    let millions = n / MILLION;
    let rest = n % MILLION;

    let mut out = String::new();
    if millions > 0 {
        out.push_str(&read_number(millions));
        out.push_str("ล้าน");
    }
    if rest > 0 {
        out.push_str(&read_group(rest, millions > 0));
    }
    out
}

/// Read 1..=999_999. `has_higher` is set when a millions part precedes it.
fn read_group(n: u64, has_higher: bool) -> String {
    let mut out = String::new();
    for place in (0..PLACES.len()).rev() {
        let digit = (n / 10u64.pow(place as u32) % 10) as usize;
        if digit == 0 {
            continue;
        }
        match place {
            0 if digit == 1 && (n >= 10 || has_higher) => out.push_str("เอ็ด"),
            0 => out.push_str(DIGITS[digit]),
            1 => {
                match digit {
                    1 => {}
                    2 => out.push_str("ยี่"),
                    _ => out.push_str(DIGITS[digit]),
                }
                out.push_str(PLACES[1]);
            }
            _ => {
                out.push_str(DIGITS[digit]);
                out.push_str(PLACES[place]);
            }
        }
    }
    out
}
